use axum::{
    Router,
    routing::{delete, get},
};

use crate::modules::streams::controller::{create_stream, delete_stream, get_streams};
use crate::state::AppState;

pub fn init_streams_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_streams).post(create_stream))
        .route("/{id}", delete(delete_stream))
}
