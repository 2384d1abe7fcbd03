use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::{ports::random::RandomSource, wait_time},
    domain::entities::{
        queue_ticket::QueueTicket, service_type::ServiceType, ticket_status::TicketStatus,
        user::User,
    },
    use_cases::user::UserRepo,
};

/// Fields needed to insert a ticket. The estimate is computed up front so the
/// row never exists without one.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub user_id: Uuid,
    pub service_type: ServiceType,
    pub estimated_wait_time: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub from: TicketStatus,
    pub to: TicketStatus,
}

/// How often `predict` re-reads a ticket whose service type keeps changing
/// under it before giving up.
const PREDICT_ATTEMPTS: usize = 3;

#[async_trait]
pub trait QueueTicketRepo: Send + Sync {
    async fn create(&self, ticket: NewTicket) -> AppResult<QueueTicket>;
    async fn get_by_id(&self, ticket_id: Uuid) -> AppResult<Option<QueueTicket>>;
    /// Newest first, optionally restricted to one owner.
    async fn list(&self, user_id: Option<Uuid>) -> AppResult<Vec<QueueTicket>>;
    /// Applies the given changes in one statement. `None` fields keep their
    /// column. A status change is only written while the row still holds
    /// `status.from`. Returns `None` when the row is gone or that guard fails.
    async fn update(
        &self,
        ticket_id: Uuid,
        service_type: Option<ServiceType>,
        status: Option<StatusChange>,
    ) -> AppResult<Option<QueueTicket>>;
    /// Stores a fresh estimate only while the ticket still has the service
    /// type it was computed for. Returns `None` otherwise.
    async fn save_estimate(
        &self,
        ticket_id: Uuid,
        estimated_for: ServiceType,
        estimated_wait_time: i32,
        alternative_suggestion: &str,
    ) -> AppResult<Option<QueueTicket>>;
    async fn delete(&self, ticket_id: Uuid) -> AppResult<()>;
}

/// A ticket with its owner embedded, as served to clients.
#[derive(Debug, Clone, Serialize)]
pub struct TicketDetails {
    pub id: Uuid,
    pub user: User,
    pub service_type: ServiceType,
    pub status: TicketStatus,
    pub estimated_wait_time: i32,
    pub alternative_suggestion: String,
    #[serde(rename = "timestamp")]
    pub created_at: NaiveDateTime,
}

impl TicketDetails {
    fn new(ticket: QueueTicket, user: User) -> Self {
        Self {
            id: ticket.id,
            user,
            service_type: ticket.service_type,
            status: ticket.status,
            estimated_wait_time: ticket.estimated_wait_time,
            alternative_suggestion: ticket.alternative_suggestion,
            created_at: ticket.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    #[serde(rename = "queue_id")]
    pub ticket_id: Uuid,
    pub service_type: ServiceType,
    pub estimated_wait_time: i32,
    pub alternative_suggestion: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTicketInput {
    pub service_type: Option<ServiceType>,
    pub status: Option<TicketStatus>,
}

#[derive(Clone)]
pub struct QueueUseCases {
    tickets: Arc<dyn QueueTicketRepo>,
    users: Arc<dyn UserRepo>,
    random: Arc<dyn RandomSource>,
}

impl QueueUseCases {
    pub fn new(
        tickets: Arc<dyn QueueTicketRepo>,
        users: Arc<dyn UserRepo>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            tickets,
            users,
            random,
        }
    }

    #[instrument(skip(self))]
    pub async fn create_ticket(
        &self,
        user_id: Uuid,
        service_type: ServiceType,
    ) -> AppResult<TicketDetails> {
        let user = self
            .users
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::InvalidInput("User not found".into()))?;

        let estimated_wait_time = wait_time::initial_estimate(service_type, self.random.as_ref());
        let ticket = self
            .tickets
            .create(NewTicket {
                user_id,
                service_type,
                estimated_wait_time,
            })
            .await?;

        tracing::info!(
            ticket_id = %ticket.id,
            service_type = %service_type,
            estimated_wait_time,
            "Queue ticket created"
        );
        Ok(TicketDetails::new(ticket, user))
    }

    pub async fn list_tickets(&self, user_id: Option<Uuid>) -> AppResult<Vec<TicketDetails>> {
        let tickets = self.tickets.list(user_id).await?;
        let owners: HashMap<Uuid, User> = match user_id {
            Some(id) => self.users.get_by_id(id).await?.into_iter().map(|u| (u.id, u)).collect(),
            None => self.users.list().await?.into_iter().map(|u| (u.id, u)).collect(),
        };

        Ok(tickets
            .into_iter()
            .filter_map(|ticket| match owners.get(&ticket.user_id) {
                Some(user) => Some(TicketDetails::new(ticket, user.clone())),
                None => {
                    tracing::warn!(ticket_id = %ticket.id, "Skipping ticket without owner");
                    None
                }
            })
            .collect())
    }

    pub async fn get_ticket(&self, ticket_id: Uuid) -> AppResult<TicketDetails> {
        let ticket = self.find_ticket(ticket_id).await?;
        self.with_owner(ticket).await
    }

    /// Changing the service type keeps the current estimate; only `predict`
    /// recomputes it.
    #[instrument(skip(self))]
    pub async fn update_ticket(
        &self,
        ticket_id: Uuid,
        input: UpdateTicketInput,
    ) -> AppResult<TicketDetails> {
        // Status only moves forward, so a lost guard can repeat at most twice
        // before the transition becomes invalid or the ticket is gone.
        loop {
            let ticket = self.find_ticket(ticket_id).await?;

            let status = match input.status {
                Some(next) => {
                    let to = ticket
                        .status
                        .transition_to(next)
                        .map_err(AppError::InvalidInput)?;
                    (to != ticket.status).then_some(StatusChange {
                        from: ticket.status,
                        to,
                    })
                }
                None => None,
            };

            if let Some(updated) = self
                .tickets
                .update(ticket_id, input.service_type, status)
                .await?
            {
                return self.with_owner(updated).await;
            }
            tracing::debug!(ticket_id = %ticket_id, "Ticket changed concurrently, re-reading");
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_ticket(&self, ticket_id: Uuid) -> AppResult<()> {
        self.tickets.delete(ticket_id).await
    }

    /// Re-estimates one ticket from its historical average and stores the
    /// new estimate and suggestion. Unknown ids fail before anything is written.
    #[instrument(skip(self))]
    pub async fn predict(&self, ticket_id: Uuid) -> AppResult<Prediction> {
        for _ in 0..PREDICT_ATTEMPTS {
            let ticket = self.find_ticket(ticket_id).await?;
            let service_type = ticket.service_type;

            let estimated_wait_time =
                wait_time::predicted_estimate(service_type, self.random.as_ref());
            let suggestion = wait_time::suggest_alternative(service_type, estimated_wait_time);

            let Some(saved) = self
                .tickets
                .save_estimate(ticket_id, service_type, estimated_wait_time, suggestion)
                .await?
            else {
                tracing::debug!(ticket_id = %ticket_id, "Service type changed, re-estimating");
                continue;
            };

            tracing::info!(
                ticket_id = %saved.id,
                estimated_wait_time,
                suggestion,
                "Wait time predicted"
            );
            return Ok(Prediction {
                ticket_id: saved.id,
                service_type: saved.service_type,
                estimated_wait_time: saved.estimated_wait_time,
                alternative_suggestion: saved.alternative_suggestion,
            });
        }

        tracing::warn!(ticket_id = %ticket_id, "Giving up on prediction, ticket kept changing");
        Err(AppError::Internal(format!(
            "Ticket {ticket_id} changed during prediction"
        )))
    }

    async fn find_ticket(&self, ticket_id: Uuid) -> AppResult<QueueTicket> {
        self.tickets
            .get_by_id(ticket_id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn with_owner(&self, ticket: QueueTicket) -> AppResult<TicketDetails> {
        let user = self
            .users
            .get_by_id(ticket.user_id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Ticket {} has no owner", ticket.id)))?;
        Ok(TicketDetails::new(ticket, user))
    }
}
