//! Payment records
//!
//! A payment is an amount applied against one invoice's balance. Payments
//! are append-only: once recorded they are never mutated or deleted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{InvoiceId, PaymentId};

/// A payment applied against an invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,
    /// Invoice being paid
    pub invoice_id: InvoiceId,
    /// Amount paid, strictly positive
    pub amount: Decimal,
    /// When the payment was made
    pub payment_date: DateTime<Utc>,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Creates a new payment record
    ///
    /// The payment date defaults to the current time when not supplied.
    pub fn new(invoice_id: InvoiceId, amount: Decimal, payment_date: Option<DateTime<Utc>>) -> Self {
        let now = Utc::now();

        Self {
            id: PaymentId::new_v7(),
            invoice_id,
            amount,
            payment_date: payment_date.unwrap_or(now),
            created_at: now,
        }
    }
}
