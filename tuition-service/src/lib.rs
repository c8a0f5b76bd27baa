//! Tuition Service - fee, monthly dues (SPP), and cashflow administration
//! for SMK AL-ISHLAH CISAUK.

pub mod config;
pub mod fees;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;

use services::store::Store;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: config::Settings,
    pub store: Arc<Store>,
}

impl AppState {
    pub fn new(config: config::Settings, store: Arc<Store>) -> Self {
        Self { config, store }
    }
}
