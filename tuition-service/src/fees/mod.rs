//! The fee computation core: itemized-fee aggregation, the SPP school-year
//! calendar, payment reconciliation, and report rollups. Everything here is
//! pure and synchronous; the store calls into it and persists the results.

pub mod aggregate;
pub mod calendar;
pub mod reconcile;
pub mod report;
