//! database (db) union structure.
use axum::extract::FromRef;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::AppState;
use crate::config::Postgres;

const DEFAULT_CREDENTIALS: &str = "postgres";
const DEFAULT_DATABASE_NAME: &str = "brainbin";
const DEFAULT_POOL_SIZE: u32 = 10;

/// Custom db structure to pass to Axum.
#[derive(Clone)]
pub struct Database {
    pub postgres: PgPool,
}

impl Database {
    /// Init database connections from the `postgres` configuration section.
    pub async fn new(config: &Postgres) -> Result<Self, sqlx::Error> {
        let username =
            config.username.as_deref().unwrap_or(DEFAULT_CREDENTIALS);
        let password =
            config.password.as_deref().unwrap_or(DEFAULT_CREDENTIALS);
        let database =
            config.database.as_deref().unwrap_or(DEFAULT_DATABASE_NAME);
        let hostname = &config.address;

        let addr =
            format!("postgres://{username}:{password}@{hostname}/{database}");
        let pool = PgPoolOptions::new()
            .max_connections(config.pool_size.unwrap_or(DEFAULT_POOL_SIZE));
        let postgres = pool.connect(&addr).await?;

        tracing::info!(%hostname, %database, "postgres connected");

        Ok(Self { postgres })
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(app_state: &AppState) -> Database {
        app_state.db.clone()
    }
}
