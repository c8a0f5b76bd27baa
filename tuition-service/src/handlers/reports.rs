use crate::fees::report::{PaymentRecap, SppRecapRow, SppRecapTotals, StudentFilter};
use crate::models::Student;
use crate::services::store::DashboardSummary;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Local;
use serde::Serialize;
use service_core::error::AppError;

pub async fn dashboard(State(state): State<AppState>) -> Json<DashboardSummary> {
    Json(state.store.dashboard().await)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RekapResponse {
    pub siswa: Vec<Student>,
    pub rekap: PaymentRecap,
}

pub async fn rekap(
    State(state): State<AppState>,
    Query(filter): Query<StudentFilter>,
) -> Json<RekapResponse> {
    let (siswa, rekap) = state.store.rekap(&filter).await;
    Json(RekapResponse { siswa, rekap })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SppRekapResponse {
    pub siswa: Vec<SppRecapRow>,
    pub rekap: SppRecapTotals,
}

pub async fn spp_rekap(
    State(state): State<AppState>,
    Query(filter): Query<StudentFilter>,
) -> Json<SppRekapResponse> {
    let (siswa, rekap) = state.store.spp_recap(&filter).await;
    Json(SppRekapResponse { siswa, rekap })
}

/// CSV download of the fee recap for the current filter.
pub async fn rekap_export(
    State(state): State<AppState>,
    Query(filter): Query<StudentFilter>,
) -> Result<impl IntoResponse, AppError> {
    let csv = state.store.rekap_csv(&filter).await?;
    let filename = format!(
        "rekap-biaya-{}.csv",
        Local::now().date_naive().format("%Y-%m-%d")
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    ))
}
