pub mod queue;
pub mod user;
