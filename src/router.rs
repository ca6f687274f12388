use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use tutorhub_config::storage::UPLOADS_PATH;
use tutorhub_core::ApiResponse;
use tutorhub_observability::{
    PrometheusHandle, logging_middleware, metrics_middleware, metrics_router,
};

use crate::docs::ApiDoc;
use crate::middleware::auth::authenticate;
use crate::modules::auth::init_auth_router;
use crate::modules::courses::init_courses_router;
use crate::modules::features::init_features_router;
use crate::modules::subjects::init_subjects_router;
use crate::state::AppState;

async fn health() -> ApiResponse<()> {
    ApiResponse::message("service is healthy")
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

/// Everything under `/api/v1` except register and login passes the
/// bearer-token gate first.
pub fn init_router(state: AppState, metrics: Option<PrometheusHandle>) -> Router {
    let protected = Router::new()
        .nest("/features", init_features_router())
        .nest("/matpels", init_subjects_router())
        .nest(
            "/bimbels",
            init_courses_router(state.storage_config.max_thumbnail_bytes),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let mut app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/health", get(health))
        .nest("/api/v1", init_auth_router().merge(protected))
        .nest_service(
            UPLOADS_PATH,
            ServeDir::new(&state.storage_config.upload_dir),
        )
        .with_state(state.clone());

    if let Some(handle) = metrics {
        app = app.merge(metrics_router(handle));
    }

    app.layer(cors_layer(&state))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
