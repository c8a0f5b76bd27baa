//! Fee-item aggregation: a student's money fields are sums over the
//! itemized breakdown, never independently mutated.

use crate::models::{BiayaItem, Student};
use serde::Serialize;

/// Aggregate of an itemized fee breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeTotals {
    pub total_biaya: i64,
    pub terbayar: i64,
    pub tunggakan: i64,
}

/// Sum a fee breakdown. Per-item `terbayar <= jumlah` is enforced at the
/// request boundary; the summation trusts its input.
pub fn totals(items: &[BiayaItem]) -> FeeTotals {
    let total_biaya: i64 = items.iter().map(|item| item.jumlah).sum();
    let terbayar: i64 = items.iter().map(|item| item.terbayar).sum();
    FeeTotals {
        total_biaya,
        terbayar,
        tunggakan: total_biaya - terbayar,
    }
}

impl Student {
    /// Rederive each line item and the cached aggregates from the breakdown.
    pub fn refresh_totals(&mut self) {
        for item in &mut self.rincian_biaya {
            item.rederive();
        }
        let sums = totals(&self.rincian_biaya);
        self.total_biaya = sums.total_biaya;
        self.terbayar = sums.terbayar;
        self.tunggakan = sums.tunggakan;
    }
}
