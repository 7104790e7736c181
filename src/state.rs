use sqlx::PgPool;

use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::config::identity::IdentityConfig;
use crate::config::jwt::StudentJwtConfig;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub identity_config: IdentityConfig,
    pub student_jwt_config: StudentJwtConfig,
    pub cors_config: CorsConfig,
}

pub async fn init_app_state() -> AppState {
    AppState {
        db: init_db_pool().await,
        identity_config: IdentityConfig::from_env(),
        student_jwt_config: StudentJwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    }
}
