use crate::models::{BiayaAdministrasi, CreateBiayaAdministrasi};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use validator::Validate;

pub async fn list_biaya(State(state): State<AppState>) -> Json<Vec<BiayaAdministrasi>> {
    Json(state.store.list_biaya().await)
}

pub async fn create_biaya(
    State(state): State<AppState>,
    Json(payload): Json<CreateBiayaAdministrasi>,
) -> Result<(StatusCode, Json<BiayaAdministrasi>), AppError> {
    payload.validate()?;
    let entry = state.store.create_biaya(payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update_biaya(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CreateBiayaAdministrasi>,
) -> Result<Json<BiayaAdministrasi>, AppError> {
    payload.validate()?;
    Ok(Json(state.store.update_biaya(&id, payload).await?))
}

pub async fn delete_biaya(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.store.delete_biaya(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
