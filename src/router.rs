use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::modules::auth::router::init_auth_router;
use crate::modules::books::router::init_books_router;
use crate::modules::circulation::router::init_circulation_router;
use crate::modules::classes::router::init_classes_router;
use crate::modules::config::router::init_config_router;
use crate::modules::logs::router::init_logs_router;
use crate::modules::streams::router::init_streams_router;
use crate::modules::student_auth::router::init_student_auth_router;
use crate::modules::students::router::init_students_router;
use crate::modules::users::controller::get_staff;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .route("/staff", get(get_staff))
                .nest("/users", init_users_router())
                .nest("/config", init_config_router())
                .nest("/classes", init_classes_router())
                .nest("/streams", init_streams_router())
                .nest("/students", init_students_router())
                .nest("/student/auth", init_student_auth_router())
                .nest("/books", init_books_router())
                .nest("/circulation", init_circulation_router())
                .nest("/logs", init_logs_router()),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
