use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, put},
};

use crate::state::AppState;

use super::controller::{create_course, delete_course, get_course, list_courses, update_course};

/// Multipart headroom on top of the thumbnail cap for the text fields.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn init_courses_router(max_thumbnail_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route("/{id}", put(update_course).delete(delete_course))
        .route("/show/{id}", get(get_course))
        .layer(DefaultBodyLimit::max(max_thumbnail_bytes + FORM_OVERHEAD_BYTES))
}
