//! Test data factories for creating valid test fixtures.
//!
//! Each factory function creates a complete, valid object with sensible defaults.
//! Use the closure parameter to override specific fields as needed.

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::domain::entities::{
    queue_ticket::QueueTicket, service_type::ServiceType, ticket_status::TicketStatus, user::User,
};

/// Create a test user with sensible defaults.
pub fn create_test_user(overrides: impl FnOnce(&mut User)) -> User {
    let id = Uuid::new_v4();
    let mut user = User {
        id,
        name: "Test User".to_string(),
        email: format!("user-{}@example.com", id.simple()),
        created_at: test_datetime(),
    };
    overrides(&mut user);
    user
}

/// Create a waiting test ticket owned by `user_id`.
pub fn create_test_ticket(user_id: Uuid, overrides: impl FnOnce(&mut QueueTicket)) -> QueueTicket {
    let mut ticket = QueueTicket {
        id: Uuid::new_v4(),
        user_id,
        service_type: ServiceType::Bank,
        status: TicketStatus::Waiting,
        estimated_wait_time: 15,
        alternative_suggestion: String::new(),
        created_at: test_datetime(),
    };
    overrides(&mut ticket);
    ticket
}

/// Fixed timestamp so fixtures compare equal across runs.
pub fn test_datetime() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factories_apply_overrides() {
        let user = create_test_user(|u| u.name = "Grace".into());
        assert_eq!(user.name, "Grace");
        assert!(user.email.ends_with("@example.com"));

        let ticket = create_test_ticket(user.id, |t| t.service_type = ServiceType::School);
        assert_eq!(ticket.user_id, user.id);
        assert_eq!(ticket.service_type, ServiceType::School);
        assert_eq!(ticket.status, TicketStatus::Waiting);
    }
}
