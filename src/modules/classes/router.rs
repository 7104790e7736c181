use axum::{
    Router,
    routing::{delete, get},
};

use crate::modules::classes::controller::{create_class, delete_class, get_classes};
use crate::state::AppState;

pub fn init_classes_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_classes).post(create_class))
        .route("/{id}", delete(delete_class))
}
