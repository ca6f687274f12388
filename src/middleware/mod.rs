//! Request authentication and role checks.
//!
//! - [`auth`]: the bearer-token gate and the `AuthUser` extractor
//! - [`role`]: role requirements evaluated by the usecases
//!
//! ```ignore
//! async fn handler(AuthUser(caller): AuthUser) -> Result<..., AppError> {
//!     require_admin(&caller)?;
//!     // ...
//! }
//! ```

pub mod auth;
pub mod role;
