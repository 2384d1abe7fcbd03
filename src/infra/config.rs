use std::{net::SocketAddr, num::ParseIntError};

use axum::http::HeaderValue;
use env_helpers::{get_env, get_env_default};
use secrecy::SecretString;

pub struct AppConfig {
    pub database_url: SecretString,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub cors_origin: HeaderValue,
    /// Where the JSON log layer writes.
    pub log_file: String,
    /// When set, wait-time estimates are drawn from a generator seeded with
    /// this value and repeat across restarts.
    pub estimator_seed: Option<u64>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database_url: SecretString =
            SecretString::new(get_env::<String>("DATABASE_URL").into());
        let database_max_connections: u32 = get_env_default("DATABASE_MAX_CONNECTIONS", 5);

        let bind_addr: SocketAddr = get_env_default(
            "BIND_ADDR",
            SocketAddr::from(([127, 0, 0, 1], 3001)),
        );
        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:3000"))
                .parse()
                .expect("CORS_ORIGIN must be a valid header value");
        let log_file: String = get_env_default("LOG_FILE", "app.log".to_string());
        let estimator_seed: Option<u64> = parse_seed(std::env::var("ESTIMATOR_SEED").ok())
            .expect("ESTIMATOR_SEED must be an unsigned integer");

        Self {
            database_url,
            database_max_connections,
            bind_addr,
            cors_origin,
            log_file,
            estimator_seed,
        }
    }
}

/// An unset or blank seed means thread-local randomness. Anything else must parse.
fn parse_seed(raw: Option<String>) -> Result<Option<u64>, ParseIntError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some),
    }
}
