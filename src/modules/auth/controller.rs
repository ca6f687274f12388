use axum::extract::State;
use tracing::instrument;

use tutorhub_core::{ApiResponse, AppError};
use tutorhub_models::{AuthResponse, LoginRequest, RegisterRequest};

use crate::modules::auth::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created and signed in", body = AuthResponse),
        (status = 400, description = "Invalid input, role admin requested, or email already registered")
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<ApiResponse<AuthResponse>, AppError> {
    let session = AuthService::register(&state.db, &state.tokens, dto).await?;
    Ok(ApiResponse::created("registration successful", session))
}

#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid email or password")
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<ApiResponse<AuthResponse>, AppError> {
    let session = AuthService::login(&state.db, &state.tokens, dto).await?;
    Ok(ApiResponse::ok("login successful", session))
}
