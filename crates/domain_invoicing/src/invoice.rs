//! Invoice and line item entities
//!
//! An invoice is owned by exactly one user and is composed of line items
//! created alongside it. The monetary fields stored on the invoice are a
//! convenience snapshot written at creation; the authoritative figures are
//! always recomputed from child records (see [`crate::balance`]).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{InvoiceId, LineItemId, UserId};

/// Stored lifecycle status of an invoice
///
/// `Paid` and `Overdue` can also be set directly at creation; the status
/// shown to callers on detail reads is the *effective* status, which
/// overrides to `Paid` once the derived balance reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    /// Awaiting payment
    Pending,
    /// Fully settled
    Paid,
    /// Past its due date
    Overdue,
}

impl InvoiceStatus {
    /// Returns the canonical string form, as persisted and serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "Pending",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Overdue => "Overdue",
        }
    }

    /// Parses the canonical string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(InvoiceStatus::Pending),
            "Paid" => Some(InvoiceStatus::Paid),
            "Overdue" => Some(InvoiceStatus::Overdue),
            _ => None,
        }
    }
}

/// An invoice raised against a customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier
    pub id: InvoiceId,
    /// User who owns this invoice
    pub owner_id: UserId,
    /// Human-readable invoice number, unique across the system
    pub invoice_number: String,
    /// Customer being billed
    pub customer_name: String,
    /// Stored lifecycle status
    pub status: InvoiceStatus,
    /// Date the invoice was issued
    pub issue_date: NaiveDate,
    /// Payment due date
    pub due_date: NaiveDate,
    /// Snapshot of the billed total at creation
    pub total: Decimal,
    /// Snapshot of the amount paid (zero at creation)
    pub amount_paid: Decimal,
    /// Snapshot of the outstanding balance at creation
    pub balance_due: Decimal,
    /// Soft-delete flag
    pub is_archived: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Creates a new invoice with zeroed monetary snapshots
    pub fn new(
        owner_id: UserId,
        invoice_number: impl Into<String>,
        customer_name: impl Into<String>,
        status: InvoiceStatus,
        issue_date: NaiveDate,
        due_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: InvoiceId::new_v7(),
            owner_id,
            invoice_number: invoice_number.into(),
            customer_name: customer_name.into(),
            status,
            issue_date,
            due_date,
            total: Decimal::ZERO,
            amount_paid: Decimal::ZERO,
            balance_due: Decimal::ZERO,
            is_archived: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Writes the creation-time snapshot once line totals are known
    ///
    /// No payment can exist at this point, so the outstanding balance
    /// equals the total.
    pub fn record_initial_total(&mut self, total: Decimal) {
        self.total = total;
        self.balance_due = total;
        self.updated_at = Utc::now();
    }
}

/// A billable line on an invoice
///
/// Created only as part of invoice creation and immutable thereafter;
/// `line_total` is fixed at `quantity * unit_price` on construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Unique identifier
    pub id: LineItemId,
    /// Invoice this line belongs to
    pub invoice_id: InvoiceId,
    /// What is being billed
    pub description: String,
    /// Number of units, strictly positive
    pub quantity: Decimal,
    /// Price per unit, non-negative
    pub unit_price: Decimal,
    /// `quantity * unit_price`, computed at creation
    pub line_total: Decimal,
}

impl LineItem {
    /// Creates a new line item, computing its total
    pub fn new(
        invoice_id: InvoiceId,
        description: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Self {
        Self {
            id: LineItemId::new_v7(),
            invoice_id,
            description: description.into(),
            quantity,
            unit_price,
            line_total: quantity * unit_price,
        }
    }
}
