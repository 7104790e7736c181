use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::modules::students::controller::{
    clear_student, create_student, delete_student, get_students, reset_student_account,
    update_student,
};
use crate::state::AppState;

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_students).post(create_student))
        .route("/{id}", patch(update_student).delete(delete_student))
        .route("/{id}/clear", post(clear_student))
        .route("/{id}/reset-account", post(reset_student_account))
}
