use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    domain::entities::{service_type::ServiceType, ticket_status::TicketStatus},
    use_cases::queue::UpdateTicketInput,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tickets).post(create_ticket))
        .route(
            "/{queue_id}",
            get(get_ticket)
                .put(update_ticket)
                .patch(update_ticket)
                .delete(delete_ticket),
        )
        .route("/{queue_id}/predict", get(predict_wait_time))
}

#[derive(Deserialize)]
struct ListTicketsParams {
    user_id: Option<Uuid>,
}

#[derive(Deserialize)]
struct CreateTicketPayload {
    user_id: Uuid,
    service_type: String,
}

// Owner is fixed at creation; a `user_id` in the body is ignored.
#[derive(Deserialize)]
struct UpdateTicketPayload {
    service_type: Option<String>,
    status: Option<String>,
}

async fn list_tickets(
    State(app_state): State<AppState>,
    Query(params): Query<ListTicketsParams>,
) -> AppResult<impl IntoResponse> {
    let tickets = app_state.queue_use_cases.list_tickets(params.user_id).await?;
    Ok(Json(tickets))
}

async fn create_ticket(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateTicketPayload>,
) -> AppResult<impl IntoResponse> {
    let service_type = parse_service_type(&payload.service_type)?;
    let ticket = app_state
        .queue_use_cases
        .create_ticket(payload.user_id, service_type)
        .await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

async fn get_ticket(
    State(app_state): State<AppState>,
    Path(queue_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let ticket = app_state.queue_use_cases.get_ticket(queue_id).await?;
    Ok(Json(ticket))
}

async fn update_ticket(
    State(app_state): State<AppState>,
    Path(queue_id): Path<Uuid>,
    Json(payload): Json<UpdateTicketPayload>,
) -> AppResult<impl IntoResponse> {
    let input = UpdateTicketInput {
        service_type: payload
            .service_type
            .as_deref()
            .map(parse_service_type)
            .transpose()?,
        status: payload
            .status
            .as_deref()
            .map(|s| s.parse::<TicketStatus>().map_err(AppError::InvalidInput))
            .transpose()?,
    };
    let ticket = app_state
        .queue_use_cases
        .update_ticket(queue_id, input)
        .await?;
    Ok(Json(ticket))
}

async fn delete_ticket(
    State(app_state): State<AppState>,
    Path(queue_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    app_state.queue_use_cases.delete_ticket(queue_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn predict_wait_time(
    State(app_state): State<AppState>,
    Path(queue_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let prediction = app_state.queue_use_cases.predict(queue_id).await?;
    Ok(Json(prediction))
}

fn parse_service_type(raw: &str) -> AppResult<ServiceType> {
    raw.parse().map_err(AppError::InvalidInput)
}
