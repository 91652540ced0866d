//! Invoice service
//!
//! Orchestrates invoice creation and payment recording over the
//! [`InvoiceStore`] port: ownership checks first, then fresh balance
//! derivation, then validation, then the write. The service holds no state
//! of its own; every call is request-scoped.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;

use core_kernel::{InvoiceId, UserId};

use crate::balance::compute_balance;
use crate::error::InvoicingError;
use crate::guard::ensure_owner;
use crate::invoice::{Invoice, InvoiceStatus, LineItem};
use crate::payment::Payment;
use crate::ports::InvoiceStore;
use crate::validation::validate_payment;

/// Input for a line item supplied at invoice creation
#[derive(Debug, Clone)]
pub struct NewLineItem {
    /// What is being billed
    pub description: String,
    /// Number of units, strictly positive
    pub quantity: Decimal,
    /// Price per unit, non-negative
    pub unit_price: Decimal,
}

/// Input for creating an invoice
#[derive(Debug, Clone)]
pub struct NewInvoice {
    /// Unique human-readable invoice number
    pub invoice_number: String,
    /// Customer being billed
    pub customer_name: String,
    /// Date the invoice was issued
    pub issue_date: NaiveDate,
    /// Payment due date; not required to follow the issue date
    pub due_date: NaiveDate,
    /// Initial stored status, defaulting to `Pending`
    pub status: Option<InvoiceStatus>,
    /// Lines to bill; an invoice may be created with none
    pub lines: Vec<NewLineItem>,
}

/// An invoice merged with its derived figures and child collections
///
/// The embedded invoice carries the recomputed total, amount paid, and
/// balance due, and its status is the effective status.
#[derive(Debug, Clone)]
pub struct InvoiceDetail {
    pub invoice: Invoice,
    pub lines: Vec<LineItem>,
    pub payments: Vec<Payment>,
}

/// Application service for the invoice ledger
pub struct InvoiceService {
    store: Arc<dyn InvoiceStore>,
}

impl InvoiceService {
    /// Creates a service over the given datastore
    pub fn new(store: Arc<dyn InvoiceStore>) -> Self {
        Self { store }
    }

    /// Creates an invoice together with its line items
    ///
    /// Line totals and the invoice total are computed here; the total is
    /// recorded on the invoice as a creation-time snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`InvoicingError::Validation`] when the invoice number is
    /// blank or already in use, the customer name is blank, or any line has
    /// a blank description, non-positive quantity, or negative unit price.
    pub async fn create_invoice(
        &self,
        owner_id: UserId,
        new_invoice: NewInvoice,
    ) -> Result<Invoice, InvoicingError> {
        let invoice_number = new_invoice.invoice_number.trim();
        if invoice_number.is_empty() {
            return Err(InvoicingError::validation("invoice number is required"));
        }
        if new_invoice.customer_name.trim().is_empty() {
            return Err(InvoicingError::validation("customer name is required"));
        }
        for line in &new_invoice.lines {
            if line.description.trim().is_empty() {
                return Err(InvoicingError::validation("line description is required"));
            }
            if line.quantity <= Decimal::ZERO {
                return Err(InvoicingError::validation(
                    "line quantity must be greater than zero",
                ));
            }
            if line.unit_price < Decimal::ZERO {
                return Err(InvoicingError::validation(
                    "line unit price cannot be negative",
                ));
            }
        }

        if self.store.find_by_number(invoice_number).await?.is_some() {
            return Err(InvoicingError::validation(format!(
                "invoice number '{}' is already in use",
                invoice_number
            )));
        }

        let mut invoice = Invoice::new(
            owner_id,
            invoice_number,
            new_invoice.customer_name.trim(),
            new_invoice.status.unwrap_or(InvoiceStatus::Pending),
            new_invoice.issue_date,
            new_invoice.due_date,
        );
        self.store.insert_invoice(&invoice).await?;

        let mut total = Decimal::ZERO;
        for line in &new_invoice.lines {
            let item = LineItem::new(invoice.id, line.description.trim(), line.quantity, line.unit_price);
            total += item.line_total;
            self.store.insert_line(&item).await?;
        }

        invoice.record_initial_total(total);
        self.store.update_invoice(&invoice).await?;

        info!(
            invoice_id = %invoice.id,
            owner_id = %owner_id,
            lines = new_invoice.lines.len(),
            total = %total,
            "Invoice created"
        );

        Ok(invoice)
    }

    /// Loads an invoice with freshly derived figures and its child records
    ///
    /// # Errors
    ///
    /// [`InvoicingError::NotFound`] for an unknown id and
    /// [`InvoicingError::AccessDenied`] when the invoice belongs to another
    /// user.
    pub async fn invoice_detail(
        &self,
        owner_id: UserId,
        invoice_id: InvoiceId,
    ) -> Result<InvoiceDetail, InvoicingError> {
        let mut invoice = self.load_owned_invoice(owner_id, invoice_id).await?;

        let lines = self.store.lines_for_invoice(invoice_id).await?;
        let payments = self.store.payments_for_invoice(invoice_id).await?;

        // The stored snapshot is never returned from the detail path; the
        // figures shown are derived from the child records just loaded.
        let balance = compute_balance(&lines, &payments);
        invoice.total = balance.total;
        invoice.amount_paid = balance.amount_paid;
        invoice.balance_due = balance.balance_due;
        invoice.status = balance.effective_status(invoice.status);

        Ok(InvoiceDetail {
            invoice,
            lines,
            payments,
        })
    }

    /// Records a payment against an invoice
    ///
    /// The outstanding balance is recomputed from current child records
    /// before the acceptance rules run. The invoice's stored status is not
    /// rewritten; effective status remains a read-time derivation.
    ///
    /// # Errors
    ///
    /// [`InvoicingError::NotFound`] / [`InvoicingError::AccessDenied`] as on
    /// detail reads, and [`InvoicingError::Payment`] with the specific
    /// rejection when the acceptance rules fail.
    pub async fn record_payment(
        &self,
        owner_id: UserId,
        invoice_id: InvoiceId,
        amount: Decimal,
        payment_date: Option<DateTime<Utc>>,
    ) -> Result<Payment, InvoicingError> {
        let invoice = self.load_owned_invoice(owner_id, invoice_id).await?;

        let lines = self.store.lines_for_invoice(invoice_id).await?;
        let payments = self.store.payments_for_invoice(invoice_id).await?;
        let balance = compute_balance(&lines, &payments);

        validate_payment(balance.balance_due, amount)?;

        let payment = Payment::new(invoice.id, amount, payment_date);
        self.store.insert_payment(&payment).await?;

        info!(
            invoice_id = %invoice.id,
            payment_id = %payment.id,
            amount = %amount,
            remaining = %(balance.balance_due - amount),
            "Payment recorded"
        );

        Ok(payment)
    }

    /// Lists the caller's invoices, most recently created first
    ///
    /// List views show the stored snapshot fields only; the detail read is
    /// the authoritative financial view.
    pub async fn list_invoices(&self, owner_id: UserId) -> Result<Vec<Invoice>, InvoicingError> {
        Ok(self.store.list_for_owner(owner_id).await?)
    }

    /// Loads an invoice and checks ownership
    async fn load_owned_invoice(
        &self,
        owner_id: UserId,
        invoice_id: InvoiceId,
    ) -> Result<Invoice, InvoicingError> {
        let invoice = self
            .store
            .find_invoice(invoice_id)
            .await?
            .ok_or_else(|| InvoicingError::not_found("invoice not found"))?;

        ensure_owner(owner_id, &invoice)?;
        Ok(invoice)
    }
}
