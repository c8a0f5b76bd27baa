use anyhow::anyhow;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use service_core::error::AppError;
use tower_sessions::Session;

/// Session key carrying the logged-in admin's username.
pub const SESSION_ADMIN_KEY: &str = "admin_username";

/// Gate for the admin API: rejects requests without a logged-in session.
pub async fn auth_middleware(
    session: Session,
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let admin: Option<String> = session.get(SESSION_ADMIN_KEY).await.unwrap_or(None);

    if admin.is_none() {
        return Ok(
            AppError::Unauthorized(anyhow!("Silakan login terlebih dahulu")).into_response(),
        );
    }

    Ok(next.run(request).await)
}
