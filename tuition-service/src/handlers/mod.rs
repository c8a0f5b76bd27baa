pub mod app;
pub mod auth;
pub mod biaya;
pub mod payments;
pub mod reports;
pub mod settings;
pub mod spp;
pub mod students;
pub mod transactions;
