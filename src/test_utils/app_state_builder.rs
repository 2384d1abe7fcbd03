//! Test app state builder for HTTP-level testing.
//!
//! `TestAppStateBuilder` creates an `AppState` backed by the in-memory store
//! and a pinned or seeded randomness source.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, http::HeaderValue};
use secrecy::SecretString;

use crate::{
    adapters::http::{app_state::AppState, routes},
    application::{
        ports::random::RandomSource,
        use_cases::{
            queue::{QueueTicketRepo, QueueUseCases},
            user::{UserRepo, UserUseCases},
        },
    },
    domain::entities::{queue_ticket::QueueTicket, user::User},
    infra::config::AppConfig,
    test_utils::{InMemoryPersistence, PinnedRandom},
};

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: SecretString::new("postgres://localhost/ywait_test".into()),
        database_max_connections: 1,
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        cors_origin: HeaderValue::from_static("http://localhost:3000"),
        log_file: "test.log".to_string(),
        estimator_seed: None,
    }
}

/// The `/api` tree exactly as `create_app` mounts it, without the outer layers.
pub fn build_test_router(app_state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::router())
        .with_state(app_state)
}

pub struct TestAppStateBuilder {
    users: Vec<User>,
    tickets: Vec<QueueTicket>,
    random: Arc<dyn RandomSource>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            tickets: Vec::new(),
            random: Arc::new(PinnedRandom::Low),
        }
    }
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }

    pub fn with_ticket(mut self, ticket: QueueTicket) -> Self {
        self.tickets.push(ticket);
        self
    }

    pub fn with_random(mut self, random: impl RandomSource + 'static) -> Self {
        self.random = Arc::new(random);
        self
    }

    /// Returns the state plus the backing store for assertions.
    pub fn build(self) -> (AppState, Arc<InMemoryPersistence>) {
        let store = Arc::new(InMemoryPersistence::with_users(self.users));
        for ticket in self.tickets {
            store.insert_ticket(ticket);
        }

        let user_repo = store.clone() as Arc<dyn UserRepo>;
        let ticket_repo = store.clone() as Arc<dyn QueueTicketRepo>;

        let app_state = AppState {
            config: Arc::new(test_config()),
            user_use_cases: Arc::new(UserUseCases::new(user_repo.clone())),
            queue_use_cases: Arc::new(QueueUseCases::new(ticket_repo, user_repo, self.random)),
        };
        (app_state, store)
    }
}
