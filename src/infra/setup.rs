use crate::{
    adapters::http::app_state::AppState,
    application::ports::random::RandomSource,
    infra::{
        InfraError,
        config::AppConfig,
        postgres_persistence,
        random::{SeededRandom, ThreadRandom},
    },
    use_cases::{
        queue::{QueueTicketRepo, QueueUseCases},
        user::{UserRepo, UserUseCases},
    },
};
use std::fs::File;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub async fn init_app_state(config: AppConfig) -> Result<AppState, InfraError> {
    let postgres_arc = Arc::new(postgres_persistence(&config).await?);

    let user_repo_arc = postgres_arc.clone() as Arc<dyn UserRepo>;
    let ticket_repo_arc = postgres_arc.clone() as Arc<dyn QueueTicketRepo>;

    let random: Arc<dyn RandomSource> = match config.estimator_seed {
        Some(seed) => {
            tracing::info!(seed, "Using seeded wait-time estimator");
            Arc::new(SeededRandom::new(seed))
        }
        None => Arc::new(ThreadRandom),
    };

    let user_use_cases = UserUseCases::new(user_repo_arc.clone());
    let queue_use_cases = QueueUseCases::new(ticket_repo_arc, user_repo_arc, random);

    Ok(AppState {
        config: Arc::new(config),
        user_use_cases: Arc::new(user_use_cases),
        queue_use_cases: Arc::new(queue_use_cases),
    })
}

pub fn init_tracing(log_file: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ywait=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false) // don't show target (module path)
        .with_level(true) // show log level
        .pretty(); // human-friendly, with colors

    // File (structured JSON logs)
    let (json_layer, file_err) = match File::create(log_file) {
        Ok(file) => (
            Some(
                fmt::layer()
                    .json()
                    .with_writer(file)
                    .with_current_span(true)
                    .with_span_list(true),
            ),
            None,
        ),
        Err(err) => (None, Some(err)),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();

    if let Some(err) = file_err {
        tracing::warn!(log_file, error = %err, "Cannot open log file, logging to console only");
    }
}
