use axum::{
    Router,
    routing::{patch, put},
};

use crate::modules::users::controller::{update_subroles, update_user_role};
use crate::state::AppState;

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/{id}/role", patch(update_user_role))
        .route("/{id}/subroles", put(update_subroles))
}
