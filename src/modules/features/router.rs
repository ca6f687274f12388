use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

use super::controller::{
    create_feature, delete_feature, get_feature, list_features, update_feature,
};

pub fn init_features_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_features).post(create_feature))
        .route("/{id}", put(update_feature).delete(delete_feature))
        .route("/show/{id}", get(get_feature))
}
