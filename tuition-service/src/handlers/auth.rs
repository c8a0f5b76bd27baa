use crate::middleware::auth::SESSION_ADMIN_KEY;
use crate::AppState;
use anyhow::anyhow;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use subtle::ConstantTimeEq;
use tower_sessions::Session;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub username: String,
    pub nama: String,
    pub role: &'static str,
}

/// Login against the single configured admin credential. The comparison is
/// constant-time even though the credential itself is stored in plaintext.
pub async fn login_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let admin = &state.config.admin;

    let username_ok: bool = payload
        .username
        .as_bytes()
        .ct_eq(admin.username.as_bytes())
        .into();
    let password_ok: bool = payload
        .password
        .as_bytes()
        .ct_eq(admin.password.as_bytes())
        .into();

    if !(username_ok && password_ok) {
        tracing::warn!(username = %payload.username, "Rejected login attempt");
        return Err(AppError::Unauthorized(anyhow!(
            "Username atau password salah"
        )));
    }

    session
        .insert(SESSION_ADMIN_KEY, &admin.username)
        .await
        .map_err(|e| AppError::InternalError(anyhow!(e)))?;

    tracing::info!(username = %admin.username, "Admin logged in");

    Ok(Json(LoginResponse {
        username: admin.username.clone(),
        nama: admin.nama.clone(),
        role: "admin",
    }))
}

pub async fn logout_handler(session: Session) -> Result<Json<serde_json::Value>, AppError> {
    session.clear().await;
    Ok(Json(serde_json::json!({ "status": "ok" })))
}
