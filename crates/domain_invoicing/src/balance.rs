//! Balance derivation
//!
//! The stored total/amount-paid/balance-due fields on an invoice are only a
//! creation-time snapshot. Every correctness-critical path (detail reads,
//! payment acceptance) derives the figures fresh from the invoice's line
//! items and payments through [`compute_balance`]. Recomputing on every read
//! costs O(lines + payments) per request and eliminates stale-aggregate bugs
//! entirely; both the read path and the write path go through this one
//! function so they can never disagree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::invoice::{InvoiceStatus, LineItem};
use crate::payment::Payment;

/// Derived financial state of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InvoiceBalance {
    /// Sum of all line totals
    pub total: Decimal,
    /// Sum of all payment amounts
    pub amount_paid: Decimal,
    /// `total - amount_paid`
    pub balance_due: Decimal,
}

impl InvoiceBalance {
    /// Returns the status shown to callers
    ///
    /// `Paid` once the balance reaches exactly zero, otherwise the stored
    /// status. A negative balance (only reachable through the accepted
    /// concurrent-payment race) keeps the stored status.
    pub fn effective_status(&self, stored: InvoiceStatus) -> InvoiceStatus {
        if self.balance_due.is_zero() {
            InvoiceStatus::Paid
        } else {
            stored
        }
    }
}

/// Derives an invoice's financial state from its child records
///
/// Pure function of its inputs; ordering of lines and payments is
/// irrelevant. Empty inputs yield all-zero figures, so an invoice with no
/// lines is immediately `Paid` by the zero-balance rule.
pub fn compute_balance(lines: &[LineItem], payments: &[Payment]) -> InvoiceBalance {
    let total: Decimal = lines.iter().map(|line| line.line_total).sum();
    let amount_paid: Decimal = payments.iter().map(|payment| payment.amount).sum();

    InvoiceBalance {
        total,
        amount_paid,
        balance_due: total - amount_paid,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use core_kernel::InvoiceId;
    use proptest::prelude::*;

    fn cents(minor: i64) -> Decimal {
        Decimal::new(minor, 2)
    }

    proptest! {
        #[test]
        fn balance_equals_total_minus_paid(
            line_cents in proptest::collection::vec(0i64..10_000_000, 0..20),
            payment_cents in proptest::collection::vec(1i64..10_000_000, 0..20),
        ) {
            let id = InvoiceId::new_v7();
            let lines: Vec<LineItem> = line_cents
                .iter()
                .map(|c| LineItem::new(id, "item", Decimal::ONE, cents(*c)))
                .collect();
            let payments: Vec<Payment> = payment_cents
                .iter()
                .map(|c| Payment::new(id, cents(*c), None))
                .collect();

            let balance = compute_balance(&lines, &payments);

            let expected_total: Decimal = line_cents.iter().map(|c| cents(*c)).sum();
            let expected_paid: Decimal = payment_cents.iter().map(|c| cents(*c)).sum();

            prop_assert_eq!(balance.total, expected_total);
            prop_assert_eq!(balance.amount_paid, expected_paid);
            prop_assert_eq!(balance.balance_due, expected_total - expected_paid);
        }

        #[test]
        fn recomputation_is_idempotent(
            line_cents in proptest::collection::vec(0i64..10_000_000, 0..10),
            payment_cents in proptest::collection::vec(1i64..10_000_000, 0..10),
        ) {
            let id = InvoiceId::new_v7();
            let lines: Vec<LineItem> = line_cents
                .iter()
                .map(|c| LineItem::new(id, "item", Decimal::ONE, cents(*c)))
                .collect();
            let payments: Vec<Payment> = payment_cents
                .iter()
                .map(|c| Payment::new(id, cents(*c), None))
                .collect();

            let first = compute_balance(&lines, &payments);
            let second = compute_balance(&lines, &payments);

            prop_assert_eq!(first, second);
        }
    }
}
