use std::sync::Arc;

use crate::{
    infra::config::AppConfig,
    use_cases::{queue::QueueUseCases, user::UserUseCases},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub user_use_cases: Arc<UserUseCases>,
    pub queue_use_cases: Arc<QueueUseCases>,
}
