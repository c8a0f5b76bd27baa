//! Parent-facing endpoints: fee lookup, self-service payment, receipts.

use crate::models::{Student, SubmitPayment};
use crate::services::store::Receipt;
use crate::AppState;
use anyhow::anyhow;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use service_core::error::AppError;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub q: String,
}

/// Find a student by exact NIS/NISN or name fragment.
pub async fn lookup_student(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<Student>, AppError> {
    state
        .store
        .lookup_student(&query.q)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(anyhow!("Data siswa tidak ditemukan")))
}

/// Self-reported payment; auto-verified and allocated against the fee
/// breakdown, answered with the receipt payload.
pub async fn submit_payment(
    State(state): State<AppState>,
    Json(payload): Json<SubmitPayment>,
) -> Result<(StatusCode, Json<Receipt>), AppError> {
    payload.validate()?;
    let receipt = state.store.submit_payment(payload).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

pub async fn get_receipt(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Receipt>, AppError> {
    Ok(Json(state.store.get_receipt(&id).await?))
}
