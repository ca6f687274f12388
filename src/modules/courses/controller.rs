use std::str::FromStr;

use axum::extract::{Multipart, Path, Query, State};
use tracing::instrument;

use tutorhub_core::{ApiResponse, AppError, DomainError};
use tutorhub_models::{CourseForm, CourseListQuery, CourseResponse, CourseUploadForm, ThumbnailUpload};

use crate::middleware::auth::AuthUser;
use crate::modules::courses::service::CourseService;
use crate::state::AppState;

fn parse_field<T: FromStr>(field: &str, value: &str) -> Result<T, DomainError> {
    value
        .parse()
        .map_err(|_| DomainError::validation(format!("{field} must be a number")))
}

fn parse_flag(field: &str, value: &str) -> Result<bool, DomainError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(DomainError::validation(format!("{field} must be true or false"))),
    }
}

/// Copy one text part into the form. Blank values leave the default in place.
fn apply_text_field(form: &mut CourseForm, field: &str, value: &str) -> Result<(), DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }

    match field {
        "name" => form.name = value.to_string(),
        "deskripsi" | "description" => form.description = value.to_string(),
        "harga" | "price" => form.price = parse_field(field, value)?,
        "feature_id" => form.feature_id = parse_field(field, value)?,
        "subject_id" => form.subject_id = parse_field(field, value)?,
        "limit_peserta" | "capacity" => form.capacity = Some(parse_field(field, value)?),
        "tutor_id" => form.tutor_id = Some(parse_field(field, value)?),
        "is_active" => form.is_active = Some(parse_flag(field, value)?),
        other => tracing::debug!(field = other, "ignoring unknown form field"),
    }
    Ok(())
}

async fn read_course_form(mut multipart: Multipart) -> Result<CourseForm, AppError> {
    let mut form = CourseForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::new(e.status(), e))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "thumbnail" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::new(e.status(), e))?;
            if !file_name.is_empty() || !bytes.is_empty() {
                form.thumbnail = Some(ThumbnailUpload {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::new(e.status(), e))?;
        apply_text_field(&mut form, &name, &value)?;
    }

    Ok(form)
}

#[utoipa::path(
    post,
    path = "/api/v1/bimbels",
    request_body(content = CourseUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Missing or invalid fields, or bad thumbnail"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only tutors and admins may create courses"),
        (status = 409, description = "Course name already used by this tutor"),
        (status = 413, description = "Thumbnail too large")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, multipart))]
pub async fn create_course(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    multipart: Multipart,
) -> Result<ApiResponse<CourseResponse>, AppError> {
    let form = read_course_form(multipart).await?;
    let course = CourseService::create(&state.db, state.storage.as_ref(), &caller, form).await?;
    Ok(ApiResponse::created("course created", course))
}

#[utoipa::path(
    get,
    path = "/api/v1/bimbels",
    params(CourseListQuery),
    responses(
        (status = 200, description = "Courses visible to the caller", body = Vec<CourseResponse>),
        (status = 400, description = "Caller is a tutor without a tutor record"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_courses(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Query(query): Query<CourseListQuery>,
) -> Result<ApiResponse<Vec<CourseResponse>>, AppError> {
    let courses = CourseService::list(&state.db, state.storage.as_ref(), &caller, query).await?;
    Ok(ApiResponse::ok("courses retrieved", courses))
}

#[utoipa::path(
    get,
    path = "/api/v1/bimbels/show/{id}",
    params(("id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course details", body = CourseResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Course belongs to another tutor"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<i64>,
) -> Result<ApiResponse<CourseResponse>, AppError> {
    let course = CourseService::get(&state.db, state.storage.as_ref(), &caller, id).await?;
    Ok(ApiResponse::ok("course retrieved", course))
}

#[utoipa::path(
    put,
    path = "/api/v1/bimbels/{id}",
    params(("id" = i64, Path, description = "Course ID")),
    request_body(content = CourseUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 400, description = "Missing or invalid fields, or bad thumbnail"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Course belongs to another tutor"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Course name already used in this feature and subject")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, multipart))]
pub async fn update_course(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<ApiResponse<CourseResponse>, AppError> {
    let form = read_course_form(multipart).await?;
    let course =
        CourseService::update(&state.db, state.storage.as_ref(), &caller, id, form).await?;
    Ok(ApiResponse::ok("course updated", course))
}

#[utoipa::path(
    delete,
    path = "/api/v1/bimbels/{id}",
    params(("id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Course belongs to another tutor"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>, AppError> {
    CourseService::delete(&state.db, &caller, id).await?;
    Ok(ApiResponse::message("course deleted"))
}
