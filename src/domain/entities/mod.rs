pub mod queue_ticket;
pub mod service_type;
pub mod ticket_status;
pub mod user;
