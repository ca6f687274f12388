use axum::extract::{Path, State};
use tracing::instrument;

use tutorhub_core::{ApiResponse, AppError};
use tutorhub_models::{CreateFeatureDto, Feature, UpdateFeatureDto};

use crate::middleware::auth::AuthUser;
use crate::modules::features::service::FeatureService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/v1/features",
    responses(
        (status = 200, description = "Active features visible to the caller's role", body = Vec<Feature>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Features",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_features(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<ApiResponse<Vec<Feature>>, AppError> {
    let features = FeatureService::list_for_caller(&state.db, &caller).await?;
    Ok(ApiResponse::ok("features retrieved", features))
}

#[utoipa::path(
    get,
    path = "/api/v1/features/show/{id}",
    params(("id" = i64, Path, description = "Feature ID")),
    responses(
        (status = 200, description = "Feature details", body = Feature),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Feature not found")
    ),
    tag = "Features",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_feature(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Feature>, AppError> {
    let feature = FeatureService::get(&state.db, id).await?;
    Ok(ApiResponse::ok("feature retrieved", feature))
}

#[utoipa::path(
    post,
    path = "/api/v1/features",
    request_body = CreateFeatureDto,
    responses(
        (status = 201, description = "Feature created", body = Feature),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only"),
        (status = 409, description = "Feature name already exists")
    ),
    tag = "Features",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_feature(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateFeatureDto>,
) -> Result<ApiResponse<Feature>, AppError> {
    let feature = FeatureService::create(&state.db, &caller, dto).await?;
    Ok(ApiResponse::created("feature created", feature))
}

#[utoipa::path(
    put,
    path = "/api/v1/features/{id}",
    params(("id" = i64, Path, description = "Feature ID")),
    request_body = UpdateFeatureDto,
    responses(
        (status = 200, description = "Feature updated", body = Feature),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Feature not found"),
        (status = 409, description = "Feature name already exists")
    ),
    tag = "Features",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_feature(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateFeatureDto>,
) -> Result<ApiResponse<Feature>, AppError> {
    let feature = FeatureService::update(&state.db, &caller, id, dto).await?;
    Ok(ApiResponse::ok("feature updated", feature))
}

#[utoipa::path(
    delete,
    path = "/api/v1/features/{id}",
    params(("id" = i64, Path, description = "Feature ID")),
    responses(
        (status = 200, description = "Feature and its subjects deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Feature not found"),
        (status = 409, description = "Feature is still referenced by courses")
    ),
    tag = "Features",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_feature(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>, AppError> {
    FeatureService::delete(&state.db, &caller, id).await?;
    Ok(ApiResponse::message("feature deleted"))
}
