//! Invoicing Domain - Invoice Ledger Core
//!
//! This crate holds the ledger logic of the system: the invoice, line item,
//! and payment entities, the pure balance calculator, the payment acceptance
//! rules, the ownership guard, and the invoice service orchestrating them
//! over the [`InvoiceStore`] datastore port.
//!
//! # Recompute-over-cache
//!
//! The monetary fields stored on an invoice are a creation-time snapshot.
//! Every decision — status display, payment acceptance — derives total,
//! amount paid, and balance due fresh from the invoice's child records via
//! [`balance::compute_balance`].
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_invoicing::{InvoiceService, NewInvoice, NewLineItem};
//!
//! let service = InvoiceService::new(store);
//! let invoice = service.create_invoice(owner, new_invoice).await?;
//! let payment = service.record_payment(owner, invoice.id, amount, None).await?;
//! ```

pub mod balance;
pub mod error;
pub mod guard;
pub mod invoice;
pub mod payment;
pub mod ports;
pub mod service;
pub mod validation;

pub use balance::{compute_balance, InvoiceBalance};
pub use error::InvoicingError;
pub use guard::ensure_owner;
pub use invoice::{Invoice, InvoiceStatus, LineItem};
pub use payment::Payment;
pub use ports::InvoiceStore;
pub use service::{InvoiceDetail, InvoiceService, NewInvoice, NewLineItem};
pub use validation::{validate_payment, PaymentRejection};

#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MemoryInvoiceStore;
