pub mod controller;
pub mod repository;
pub mod router;
pub mod service;

pub use router::init_subjects_router;
