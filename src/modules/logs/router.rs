use axum::{Router, routing::get};

use crate::modules::logs::controller::get_logs;
use crate::state::AppState;

pub fn init_logs_router() -> Router<AppState> {
    Router::new().route("/", get(get_logs))
}
