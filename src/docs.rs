use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use tutorhub_core::UserRole;
use tutorhub_models::{
    AuthResponse, Course, CourseResponse, CourseUploadForm, CreateFeatureDto, CreateSubjectDto,
    Feature, LoginRequest, PublicUser, RegisterRequest, Subject, UpdateFeatureDto,
    UpdateSubjectDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::features::controller::list_features,
        crate::modules::features::controller::get_feature,
        crate::modules::features::controller::create_feature,
        crate::modules::features::controller::update_feature,
        crate::modules::features::controller::delete_feature,
        crate::modules::subjects::controller::list_subjects_by_feature,
        crate::modules::subjects::controller::get_subject,
        crate::modules::subjects::controller::create_subject,
        crate::modules::subjects::controller::update_subject,
        crate::modules::subjects::controller::delete_subject,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::list_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
    ),
    components(
        schemas(
            UserRole,
            PublicUser,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            Feature,
            CreateFeatureDto,
            UpdateFeatureDto,
            Subject,
            CreateSubjectDto,
            UpdateSubjectDto,
            Course,
            CourseResponse,
            CourseUploadForm,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Features", description = "Role-gated feature flags"),
        (name = "Subjects", description = "Subjects (matpel) within a feature"),
        (name = "Courses", description = "Tutoring courses (bimbel) and their thumbnails")
    ),
    info(
        title = "TutorHub API",
        version = "0.1.0",
        description = "Tutoring marketplace backend. Every response uses the envelope \
            {status_code, status, message, data}; the schemas below describe `data`.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
