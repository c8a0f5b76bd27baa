use crate::models::{CreateTransaction, Transaction};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use validator::Validate;

pub async fn list_transactions(State(state): State<AppState>) -> Json<Vec<Transaction>> {
    Json(state.store.list_transactions().await)
}

pub async fn create_transaction(
    State(state): State<AppState>,
    Json(payload): Json<CreateTransaction>,
) -> Result<(StatusCode, Json<Transaction>), AppError> {
    payload.validate()?;
    let transaction = state.store.add_transaction(payload).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.store.delete_transaction(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
