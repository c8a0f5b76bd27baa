//! Payment reconciliation against the itemized fee ledger.
//!
//! The rincian biaya breakdown is the single source of truth: a payment is
//! allocated across unpaid items in order and the student aggregates are then
//! rederived. Nothing ever writes the aggregates directly, so tunggakan can
//! not go negative and the breakdown can not drift from the totals.

use crate::models::Student;

/// Outcome of applying a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    /// Amount actually absorbed by the fee items.
    pub applied: i64,
    /// Portion of the payment that exceeded the outstanding balance.
    pub remainder: i64,
}

/// Allocate `amount` across the student's unpaid items, oldest entry first,
/// then refresh the aggregates.
pub fn apply_payment(student: &mut Student, amount: i64) -> Applied {
    let mut remaining = amount.max(0);

    for item in &mut student.rincian_biaya {
        if remaining == 0 {
            break;
        }
        let outstanding = (item.jumlah - item.terbayar).max(0);
        let take = outstanding.min(remaining);
        item.terbayar += take;
        remaining -= take;
    }

    student.refresh_totals();

    Applied {
        applied: amount.max(0) - remaining,
        remainder: remaining,
    }
}

/// Reverse a previously applied amount, newest allocation first. Used when a
/// student-linked income entry is deleted.
pub fn rollback_payment(student: &mut Student, amount: i64) -> i64 {
    let mut remaining = amount.max(0);

    for item in student.rincian_biaya.iter_mut().rev() {
        if remaining == 0 {
            break;
        }
        let take = item.terbayar.min(remaining);
        item.terbayar -= take;
        remaining -= take;
    }

    student.refresh_totals();

    amount.max(0) - remaining
}
