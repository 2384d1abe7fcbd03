//! In-memory mock implementations for the repository traits.

use async_trait::async_trait;
use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::{
        ports::random::RandomSource,
        use_cases::{
            queue::{NewTicket, QueueTicketRepo, StatusChange},
            user::UserRepo,
        },
    },
    domain::entities::{
        queue_ticket::QueueTicket, service_type::ServiceType, ticket_status::TicketStatus,
        user::User,
    },
};

/// In-memory store implementing both `UserRepo` and `QueueTicketRepo`, so
/// deleting a user can cascade to tickets the way the database does.
#[derive(Default)]
pub struct InMemoryPersistence {
    pub users: Mutex<HashMap<Uuid, User>>,
    pub tickets: Mutex<HashMap<Uuid, QueueTicket>>,
}

impl InMemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with initial users for testing.
    pub fn with_users(users: Vec<User>) -> Self {
        let map: HashMap<Uuid, User> = users.into_iter().map(|u| (u.id, u)).collect();
        Self {
            users: Mutex::new(map),
            ..Default::default()
        }
    }

    /// Insert a ticket directly, bypassing estimation.
    pub fn insert_ticket(&self, ticket: QueueTicket) {
        self.tickets.lock().unwrap().insert(ticket.id, ticket);
    }

    pub fn get_ticket(&self, ticket_id: Uuid) -> Option<QueueTicket> {
        self.tickets.lock().unwrap().get(&ticket_id).cloned()
    }

    /// Get all users (for test assertions).
    pub fn get_all_users(&self) -> Vec<User> {
        self.users.lock().unwrap().values().cloned().collect()
    }

    /// Get all tickets (for test assertions).
    pub fn get_all_tickets(&self) -> Vec<QueueTicket> {
        self.tickets.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl UserRepo for InMemoryPersistence {
    async fn create(&self, name: &str, email: &str) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();

        if users.values().any(|u| u.email == email) {
            return Err(AppError::InvalidInput(
                "A record with this value already exists".into(),
            ));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(&user_id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let mut users = self.get_all_users();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn update_name(&self, user_id: Uuid, name: &str) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(&user_id).ok_or(AppError::NotFound)?;
        user.name = name.to_string();
        Ok(user.clone())
    }

    async fn delete(&self, user_id: Uuid) -> AppResult<()> {
        self.users
            .lock()
            .unwrap()
            .remove(&user_id)
            .ok_or(AppError::NotFound)?;
        self.tickets
            .lock()
            .unwrap()
            .retain(|_, t| t.user_id != user_id);
        Ok(())
    }
}

#[async_trait]
impl QueueTicketRepo for InMemoryPersistence {
    async fn create(&self, ticket: NewTicket) -> AppResult<QueueTicket> {
        if !self.users.lock().unwrap().contains_key(&ticket.user_id) {
            return Err(AppError::InvalidInput("Referenced record not found".into()));
        }

        let created = QueueTicket {
            id: Uuid::new_v4(),
            user_id: ticket.user_id,
            service_type: ticket.service_type,
            status: TicketStatus::default(),
            estimated_wait_time: ticket.estimated_wait_time,
            alternative_suggestion: String::new(),
            created_at: chrono::Utc::now().naive_utc(),
        };
        self.insert_ticket(created.clone());
        Ok(created)
    }

    async fn get_by_id(&self, ticket_id: Uuid) -> AppResult<Option<QueueTicket>> {
        Ok(self.get_ticket(ticket_id))
    }

    async fn list(&self, user_id: Option<Uuid>) -> AppResult<Vec<QueueTicket>> {
        let mut tickets: Vec<QueueTicket> = self
            .get_all_tickets()
            .into_iter()
            .filter(|t| user_id.is_none_or(|id| t.user_id == id))
            .collect();
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tickets)
    }

    async fn update(
        &self,
        ticket_id: Uuid,
        service_type: Option<ServiceType>,
        status: Option<StatusChange>,
    ) -> AppResult<Option<QueueTicket>> {
        let mut tickets = self.tickets.lock().unwrap();
        let Some(ticket) = tickets.get_mut(&ticket_id) else {
            return Ok(None);
        };
        if status.is_some_and(|change| ticket.status != change.from) {
            return Ok(None);
        }
        if let Some(service_type) = service_type {
            ticket.service_type = service_type;
        }
        if let Some(change) = status {
            ticket.status = change.to;
        }
        Ok(Some(ticket.clone()))
    }

    async fn save_estimate(
        &self,
        ticket_id: Uuid,
        estimated_for: ServiceType,
        estimated_wait_time: i32,
        alternative_suggestion: &str,
    ) -> AppResult<Option<QueueTicket>> {
        let mut tickets = self.tickets.lock().unwrap();
        let Some(ticket) = tickets
            .get_mut(&ticket_id)
            .filter(|t| t.service_type == estimated_for)
        else {
            return Ok(None);
        };
        ticket.estimated_wait_time = estimated_wait_time;
        ticket.alternative_suggestion = alternative_suggestion.to_string();
        Ok(Some(ticket.clone()))
    }

    async fn delete(&self, ticket_id: Uuid) -> AppResult<()> {
        self.tickets
            .lock()
            .unwrap()
            .remove(&ticket_id)
            .ok_or(AppError::NotFound)?;
        Ok(())
    }
}

/// Ticket repo whose first `get_by_id` parks after reading until released,
/// so a test can run another request between that read and the write.
pub struct StallingTickets {
    inner: Arc<InMemoryPersistence>,
    stalled: AtomicBool,
    reached: Notify,
    resume: Notify,
}

impl StallingTickets {
    pub fn new(inner: Arc<InMemoryPersistence>) -> Self {
        Self {
            inner,
            stalled: AtomicBool::new(false),
            reached: Notify::new(),
            resume: Notify::new(),
        }
    }

    /// Resolves once the first read has happened and is parked.
    pub async fn wait_until_stalled(&self) {
        self.reached.notified().await;
    }

    pub fn release(&self) {
        self.resume.notify_one();
    }
}

#[async_trait]
impl QueueTicketRepo for StallingTickets {
    async fn create(&self, ticket: NewTicket) -> AppResult<QueueTicket> {
        QueueTicketRepo::create(self.inner.as_ref(), ticket).await
    }

    async fn get_by_id(&self, ticket_id: Uuid) -> AppResult<Option<QueueTicket>> {
        let ticket = QueueTicketRepo::get_by_id(self.inner.as_ref(), ticket_id).await?;
        if !self.stalled.swap(true, Ordering::SeqCst) {
            self.reached.notify_one();
            self.resume.notified().await;
        }
        Ok(ticket)
    }

    async fn list(&self, user_id: Option<Uuid>) -> AppResult<Vec<QueueTicket>> {
        QueueTicketRepo::list(self.inner.as_ref(), user_id).await
    }

    async fn update(
        &self,
        ticket_id: Uuid,
        service_type: Option<ServiceType>,
        status: Option<StatusChange>,
    ) -> AppResult<Option<QueueTicket>> {
        self.inner.update(ticket_id, service_type, status).await
    }

    async fn save_estimate(
        &self,
        ticket_id: Uuid,
        estimated_for: ServiceType,
        estimated_wait_time: i32,
        alternative_suggestion: &str,
    ) -> AppResult<Option<QueueTicket>> {
        self.inner
            .save_estimate(ticket_id, estimated_for, estimated_wait_time, alternative_suggestion)
            .await
    }

    async fn delete(&self, ticket_id: Uuid) -> AppResult<()> {
        QueueTicketRepo::delete(self.inner.as_ref(), ticket_id).await
    }
}

/// Randomness that always lands on a known point of the requested range.
#[derive(Debug, Clone, Copy)]
pub enum PinnedRandom {
    Low,
    High,
    /// Clamped into the requested range.
    Value(i32),
}

impl RandomSource for PinnedRandom {
    fn int_in(&self, range: RangeInclusive<i32>) -> i32 {
        match self {
            PinnedRandom::Low => *range.start(),
            PinnedRandom::High => *range.end(),
            PinnedRandom::Value(v) => (*v).clamp(*range.start(), *range.end()),
        }
    }
}
