use secrecy::ExposeSecret;

use crate::{adapters::persistence::PostgresPersistence, infra::db::init_db};

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod random;
pub mod setup;

pub use error::InfraError;

pub async fn postgres_persistence(
    config: &config::AppConfig,
) -> Result<PostgresPersistence, InfraError> {
    let pool = init_db(
        config.database_url.expose_secret(),
        config.database_max_connections,
    )
    .await?;
    let persistence = PostgresPersistence::new(pool);
    Ok(persistence)
}
