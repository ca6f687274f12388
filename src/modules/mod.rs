pub mod auth;
pub mod courses;
pub mod features;
pub mod subjects;
pub mod users;
