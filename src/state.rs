use sqlx::PgPool;

use crate::config::Config;
use crate::routes::middleware_auth::SessionKeys;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub session: SessionKeys,
}

impl AppState {
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            session: SessionKeys::new(config.session_secret.as_bytes()),
        }
    }
}
