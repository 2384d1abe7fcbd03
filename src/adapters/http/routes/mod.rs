pub mod queue;
pub mod user;

use axum::Router;

use crate::adapters::http::app_state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/users", user::router())
        .nest("/queues", queue::router())
}
