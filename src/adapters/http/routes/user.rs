use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{adapters::http::app_state::AppState, app_error::AppResult};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/{user_id}",
            get(get_user)
                .put(rename_user)
                .patch(rename_user)
                .delete(delete_user),
        )
}

#[derive(Deserialize)]
struct SignupPayload {
    name: String,
    email: String,
}

#[derive(Deserialize)]
struct RenamePayload {
    name: String,
}

async fn list_users(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let users = app_state.user_use_cases.list_users().await?;
    Ok(Json(users))
}

async fn create_user(
    State(app_state): State<AppState>,
    Json(payload): Json<SignupPayload>,
) -> AppResult<impl IntoResponse> {
    let user = app_state
        .user_use_cases
        .signup(&payload.name, &payload.email)
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn get_user(
    State(app_state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let user = app_state.user_use_cases.get_user(user_id).await?;
    Ok(Json(user))
}

async fn rename_user(
    State(app_state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<RenamePayload>,
) -> AppResult<impl IntoResponse> {
    let user = app_state
        .user_use_cases
        .rename_user(user_id, &payload.name)
        .await?;
    Ok(Json(user))
}

async fn delete_user(
    State(app_state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    app_state.user_use_cases.delete_user(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
