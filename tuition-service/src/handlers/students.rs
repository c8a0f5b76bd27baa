use crate::models::{CreateStudent, RincianItemInput, Student, UpdateStudent};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use validator::Validate;

pub async fn list_students(State(state): State<AppState>) -> Json<Vec<Student>> {
    Json(state.store.list_students().await)
}

pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Student>, AppError> {
    Ok(Json(state.store.get_student(&id).await?))
}

pub async fn create_student(
    State(state): State<AppState>,
    Json(payload): Json<CreateStudent>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    payload.validate()?;
    let student = state.store.create_student(payload).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStudent>,
) -> Result<Json<Student>, AppError> {
    payload.validate()?;
    Ok(Json(state.store.update_student(&id, payload).await?))
}

pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.store.delete_student(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Replace the student's fee breakdown; aggregates are rederived server-side.
pub async fn replace_rincian(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Vec<RincianItemInput>>,
) -> Result<Json<Student>, AppError> {
    for item in &payload {
        item.validate()?;
    }
    Ok(Json(state.store.replace_rincian(&id, payload).await?))
}
