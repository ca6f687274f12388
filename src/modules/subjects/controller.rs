use axum::extract::{Path, State};
use tracing::instrument;

use tutorhub_core::{ApiResponse, AppError};
use tutorhub_models::{CreateSubjectDto, Subject, UpdateSubjectDto};

use crate::middleware::auth::AuthUser;
use crate::modules::subjects::service::SubjectService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/v1/matpels/{feature_id}",
    params(("feature_id" = i64, Path, description = "Feature ID")),
    responses(
        (status = 200, description = "Active subjects of the feature", body = Vec<Subject>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_subjects_by_feature(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
    Path(feature_id): Path<i64>,
) -> Result<ApiResponse<Vec<Subject>>, AppError> {
    let subjects = SubjectService::list_by_feature(&state.db, feature_id).await?;
    Ok(ApiResponse::ok("subjects retrieved", subjects))
}

#[utoipa::path(
    get,
    path = "/api/v1/matpels/show/{id}",
    params(("id" = i64, Path, description = "Subject ID")),
    responses(
        (status = 200, description = "Subject details", body = Subject),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Subject not found")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_subject(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Subject>, AppError> {
    let subject = SubjectService::get(&state.db, id).await?;
    Ok(ApiResponse::ok("subject retrieved", subject))
}

#[utoipa::path(
    post,
    path = "/api/v1/matpels",
    request_body = CreateSubjectDto,
    responses(
        (status = 201, description = "Subject created", body = Subject),
        (status = 400, description = "Invalid input or feature not found/inactive"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only"),
        (status = 409, description = "Subject name already exists in this feature")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_subject(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateSubjectDto>,
) -> Result<ApiResponse<Subject>, AppError> {
    let subject = SubjectService::create(&state.db, &caller, dto).await?;
    Ok(ApiResponse::created("subject created", subject))
}

#[utoipa::path(
    put,
    path = "/api/v1/matpels/{id}",
    params(("id" = i64, Path, description = "Subject ID")),
    request_body = UpdateSubjectDto,
    responses(
        (status = 200, description = "Subject updated", body = Subject),
        (status = 400, description = "Invalid input or feature not found/inactive"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Subject not found"),
        (status = 409, description = "Subject name already exists in this feature")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_subject(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateSubjectDto>,
) -> Result<ApiResponse<Subject>, AppError> {
    let subject = SubjectService::update(&state.db, &caller, id, dto).await?;
    Ok(ApiResponse::ok("subject updated", subject))
}

#[utoipa::path(
    delete,
    path = "/api/v1/matpels/{id}",
    params(("id" = i64, Path, description = "Subject ID")),
    responses(
        (status = 200, description = "Subject deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Subject not found"),
        (status = 409, description = "Subject is still referenced by courses")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_subject(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>, AppError> {
    SubjectService::delete(&state.db, &caller, id).await?;
    Ok(ApiResponse::message("subject deleted"))
}
