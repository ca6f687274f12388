//! # TutorHub Auth
//!
//! Token issuance and verification for the TutorHub API.
//!
//! - [`claims`]: the JWT payload and the verified [`Identity`]
//! - [`jwt`]: [`TokenService`], built once from `JwtConfig` and shared read-only

pub mod claims;
pub mod jwt;

pub use claims::{Claims, Identity};
pub use jwt::{IssuedToken, TokenError, TokenService};
