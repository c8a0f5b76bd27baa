use axum::{
    middleware::from_fn,
    routing::{get, post, put},
    Router,
};
use service_core::middleware::{metrics::metrics_middleware, tracing::request_id_middleware};
use time::Duration;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::handlers::{
    app::{health_check, metrics_handler},
    auth::{login_handler, logout_handler},
    biaya, payments, reports, settings, spp, students, transactions,
};
use crate::middleware::auth::auth_middleware;
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    // Session setup
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false) // Set to true in production with HTTPS
        .with_expiry(Expiry::OnInactivity(Duration::hours(24)));

    // Everything behind the admin session gate
    let admin_routes = Router::new()
        .route(
            "/api/students",
            get(students::list_students).post(students::create_student),
        )
        .route(
            "/api/students/:id",
            get(students::get_student)
                .put(students::update_student)
                .delete(students::delete_student),
        )
        .route("/api/students/:id/rincian", put(students::replace_rincian))
        .route(
            "/api/biaya-administrasi",
            get(biaya::list_biaya).post(biaya::create_biaya),
        )
        .route(
            "/api/biaya-administrasi/:id",
            put(biaya::update_biaya).delete(biaya::delete_biaya),
        )
        .route("/api/spp", get(spp::list_spp).post(spp::record_payment))
        .route(
            "/api/spp/:id",
            put(spp::update_payment).delete(spp::delete_payment),
        )
        .route("/api/students/:id/spp", get(spp::month_view))
        .route(
            "/api/transactions",
            get(transactions::list_transactions).post(transactions::create_transaction),
        )
        .route(
            "/api/transactions/:id",
            axum::routing::delete(transactions::delete_transaction),
        )
        .route(
            "/api/settings/infaq",
            get(settings::get_infaq_rates).put(settings::set_infaq_rates),
        )
        .route(
            "/api/settings/profil-sekolah",
            get(settings::get_profil_sekolah).put(settings::set_profil_sekolah),
        )
        .route(
            "/api/settings/profil-admin",
            get(settings::get_profil_admin).put(settings::set_profil_admin),
        )
        .route("/api/reports/dashboard", get(reports::dashboard))
        .route("/api/reports/rekap", get(reports::rekap))
        .route("/api/reports/rekap/export", get(reports::rekap_export))
        .route("/api/reports/spp", get(reports::spp_rekap))
        .route_layer(from_fn(auth_middleware));

    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/login", post(login_handler))
        .route("/api/logout", post(logout_handler))
        .route(
            "/api/public/students/lookup",
            get(payments::lookup_student),
        )
        .route("/api/public/students/:id/spp", get(spp::month_view))
        .route("/api/public/payments", post(payments::submit_payment))
        .route("/api/public/payments/:id/receipt", get(payments::get_receipt))
        .merge(admin_routes)
        .layer(session_layer)
        .layer(from_fn(metrics_middleware))
        // Add tracing layer
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}
