use axum::{
    Router,
    routing::{get, patch},
};

use crate::modules::books::controller::{create_book, delete_book, get_books, update_book};
use crate::state::AppState;

pub fn init_books_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_books).post(create_book))
        .route("/{id}", patch(update_book).delete(delete_book))
}
