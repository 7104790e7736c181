use axum::{Router, routing::get};

use crate::modules::config::controller::{check_policy, get_config, update_config};
use crate::state::AppState;

pub fn init_config_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_config).patch(update_config))
        .route("/check-policy", get(check_policy))
}
