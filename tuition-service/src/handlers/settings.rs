use crate::models::{InfaqRates, ProfilAdmin, ProfilSekolah};
use crate::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;

pub async fn get_infaq_rates(State(state): State<AppState>) -> Json<InfaqRates> {
    Json(state.store.get_rates().await)
}

pub async fn set_infaq_rates(
    State(state): State<AppState>,
    Json(payload): Json<InfaqRates>,
) -> Result<Json<InfaqRates>, AppError> {
    Ok(Json(state.store.set_rates(payload).await?))
}

pub async fn get_profil_sekolah(State(state): State<AppState>) -> Json<ProfilSekolah> {
    Json(state.store.get_profil_sekolah().await)
}

pub async fn set_profil_sekolah(
    State(state): State<AppState>,
    Json(payload): Json<ProfilSekolah>,
) -> Result<Json<ProfilSekolah>, AppError> {
    state.store.set_profil_sekolah(payload.clone()).await?;
    Ok(Json(payload))
}

pub async fn get_profil_admin(State(state): State<AppState>) -> Json<ProfilAdmin> {
    Json(state.store.get_profil_admin().await)
}

pub async fn set_profil_admin(
    State(state): State<AppState>,
    Json(payload): Json<ProfilAdmin>,
) -> Result<Json<ProfilAdmin>, AppError> {
    state.store.set_profil_admin(payload.clone()).await?;
    Ok(Json(payload))
}
