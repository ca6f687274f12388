use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{login, register};

/// Public routes; they sit outside the bearer-token gate.
pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
