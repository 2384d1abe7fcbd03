use chrono::NaiveDateTime;
use uuid::Uuid;

use super::{service_type::ServiceType, ticket_status::TicketStatus};

/// One queue-membership record belonging to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueTicket {
    pub id: Uuid,
    pub user_id: Uuid,
    pub service_type: ServiceType,
    pub status: TicketStatus,
    /// Minutes. Set at creation and overwritten by prediction.
    pub estimated_wait_time: i32,
    /// Empty until the first prediction.
    pub alternative_suggestion: String,
    pub created_at: NaiveDateTime,
}
