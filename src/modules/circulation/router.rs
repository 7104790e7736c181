use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::circulation::controller::{borrow_book, get_borrow_history, return_book};
use crate::state::AppState;

pub fn init_circulation_router() -> Router<AppState> {
    Router::new()
        .route("/history", get(get_borrow_history))
        .route("/borrow", post(borrow_book))
        .route("/return/{record_id}", post(return_book))
}
