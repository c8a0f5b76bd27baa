use crate::models::{CreateSppPayment, SppBulanan, UpdateSppPayment};
use crate::services::store::SppMonthView;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use service_core::error::AppError;
use validator::Validate;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SppListQuery {
    pub siswa_id: Option<String>,
}

pub async fn list_spp(
    State(state): State<AppState>,
    Query(query): Query<SppListQuery>,
) -> Json<Vec<SppBulanan>> {
    Json(state.store.list_spp(query.siswa_id.as_deref()).await)
}

/// Twelve month-slots for one student, unrecorded months synthesized at the
/// standing rate. Serves both the parent view and the admin kelola dialog.
pub async fn month_view(
    State(state): State<AppState>,
    Path(siswa_id): Path<String>,
) -> Result<Json<SppMonthView>, AppError> {
    Ok(Json(state.store.spp_month_view(&siswa_id).await?))
}

pub async fn record_payment(
    State(state): State<AppState>,
    Json(payload): Json<CreateSppPayment>,
) -> Result<(StatusCode, Json<SppBulanan>), AppError> {
    payload.validate()?;
    let row = state.store.record_spp_payment(payload).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateSppPayment>,
) -> Result<Json<SppBulanan>, AppError> {
    payload.validate()?;
    Ok(Json(state.store.update_spp_payment(&id, payload).await?))
}

pub async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.store.delete_spp_payment(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
