use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::student_auth::controller::{
    activate_account, get_me, login, verify_onboarding,
};
use crate::state::AppState;

pub fn init_student_auth_router() -> Router<AppState> {
    Router::new()
        .route("/onboard/verify", post(verify_onboarding))
        .route("/onboard/activate", post(activate_account))
        .route("/login", post(login))
        .route("/me", get(get_me))
}
