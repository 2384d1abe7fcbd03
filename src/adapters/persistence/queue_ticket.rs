use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::{
        queue_ticket::QueueTicket, service_type::ServiceType, ticket_status::TicketStatus,
    },
    use_cases::queue::{NewTicket, QueueTicketRepo, StatusChange},
};

const TICKET_COLUMNS: &str =
    "id, user_id, service_type, status, estimated_wait_time, alternative_suggestion, created_at";

// Queue ticket as stored in the db. Enums are kept as text columns.
#[derive(sqlx::FromRow, Debug)]
pub struct QueueTicketDb {
    pub id: Uuid,
    pub user_id: Uuid,
    pub service_type: String,
    pub status: String,
    pub estimated_wait_time: i32,
    pub alternative_suggestion: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<QueueTicketDb> for QueueTicket {
    type Error = AppError;

    fn try_from(row: QueueTicketDb) -> Result<Self, Self::Error> {
        let service_type: ServiceType = row.service_type.parse().map_err(|e: String| {
            tracing::error!(ticket_id = %row.id, error = %e, "Corrupt service_type column");
            AppError::Internal(e)
        })?;
        let status: TicketStatus = row.status.parse().map_err(|e: String| {
            tracing::error!(ticket_id = %row.id, error = %e, "Corrupt status column");
            AppError::Internal(e)
        })?;
        Ok(QueueTicket {
            id: row.id,
            user_id: row.user_id,
            service_type,
            status,
            estimated_wait_time: row.estimated_wait_time,
            alternative_suggestion: row.alternative_suggestion,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl QueueTicketRepo for PostgresPersistence {
    async fn create(&self, ticket: NewTicket) -> AppResult<QueueTicket> {
        let sql = format!(
            r#"
                INSERT INTO queue_tickets (id, user_id, service_type, estimated_wait_time)
                VALUES ($1, $2, $3, $4)
                RETURNING {TICKET_COLUMNS}
            "#
        );
        let rec = sqlx::query_as::<_, QueueTicketDb>(&sql)
            .bind(Uuid::new_v4())
            .bind(ticket.user_id)
            .bind(ticket.service_type.as_str())
            .bind(ticket.estimated_wait_time)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)?;
        rec.try_into()
    }

    async fn get_by_id(&self, ticket_id: Uuid) -> AppResult<Option<QueueTicket>> {
        let sql = format!("SELECT {TICKET_COLUMNS} FROM queue_tickets WHERE id = $1");
        let rec = sqlx::query_as::<_, QueueTicketDb>(&sql)
            .bind(ticket_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;
        rec.map(QueueTicket::try_from).transpose()
    }

    async fn list(&self, user_id: Option<Uuid>) -> AppResult<Vec<QueueTicket>> {
        let sql = format!(
            r#"
                SELECT {TICKET_COLUMNS} FROM queue_tickets
                WHERE ($1::uuid IS NULL OR user_id = $1)
                ORDER BY created_at DESC, id
            "#
        );
        let rows = sqlx::query_as::<_, QueueTicketDb>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)?;
        rows.into_iter().map(QueueTicket::try_from).collect()
    }

    async fn update(
        &self,
        ticket_id: Uuid,
        service_type: Option<ServiceType>,
        status: Option<StatusChange>,
    ) -> AppResult<Option<QueueTicket>> {
        let sql = format!(
            r#"
                UPDATE queue_tickets
                SET service_type = COALESCE($2, service_type),
                    status = COALESCE($3, status)
                WHERE id = $1 AND ($4::text IS NULL OR status = $4)
                RETURNING {TICKET_COLUMNS}
            "#
        );
        let rec = sqlx::query_as::<_, QueueTicketDb>(&sql)
            .bind(ticket_id)
            .bind(service_type.map(|st| st.as_str()))
            .bind(status.map(|change| change.to.as_str()))
            .bind(status.map(|change| change.from.as_str()))
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;
        rec.map(QueueTicket::try_from).transpose()
    }

    async fn save_estimate(
        &self,
        ticket_id: Uuid,
        estimated_for: ServiceType,
        estimated_wait_time: i32,
        alternative_suggestion: &str,
    ) -> AppResult<Option<QueueTicket>> {
        let sql = format!(
            r#"
                UPDATE queue_tickets
                SET estimated_wait_time = $3, alternative_suggestion = $4
                WHERE id = $1 AND service_type = $2
                RETURNING {TICKET_COLUMNS}
            "#
        );
        let rec = sqlx::query_as::<_, QueueTicketDb>(&sql)
            .bind(ticket_id)
            .bind(estimated_for.as_str())
            .bind(estimated_wait_time)
            .bind(alternative_suggestion)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;
        rec.map(QueueTicket::try_from).transpose()
    }

    async fn delete(&self, ticket_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM queue_tickets WHERE id = $1")
            .bind(ticket_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
