use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_subject, delete_subject, get_subject, list_subjects_by_feature, update_subject,
};

/// `GET /{id}` takes a feature id; `PUT` and `DELETE` on the same path take a
/// subject id.
pub fn init_subjects_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_subject))
        .route(
            "/{id}",
            get(list_subjects_by_feature)
                .put(update_subject)
                .delete(delete_subject),
        )
        .route("/show/{id}", get(get_subject))
}
