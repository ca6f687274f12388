//! # TutorHub Config
//!
//! Configuration loaded once from the environment at startup and then passed
//! around as plain immutable values.
//!
//! - [`app`]: listen address and public base URL
//! - [`database`]: PostgreSQL connection settings
//! - [`jwt`]: token signing secret and lifetime
//! - [`cors`]: allowed origins
//! - [`storage`]: thumbnail upload directory and size limit
//!
//! Every struct has a `from_env()` constructor and a `from_lookup()` variant
//! that takes any key lookup, which keeps tests away from process-global state.
//!
//! # Example
//!
//! ```ignore
//! use tutorhub_config::{AppConfig, DatabaseConfig, JwtConfig};
//!
//! dotenvy::dotenv().ok();
//! let app = AppConfig::from_env();
//! let jwt = JwtConfig::from_env();
//! ```

pub mod app;
pub mod cors;
pub mod database;
pub mod jwt;
pub mod storage;

pub use app::AppConfig;
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use storage::StorageConfig;

/// Read `key` through `lookup` and parse it, ignoring unset or unparsable values.
pub(crate) fn parsed<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|s| s.trim().parse().ok())
}

pub(crate) fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(test)]
pub(crate) fn map_lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: std::collections::HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}
