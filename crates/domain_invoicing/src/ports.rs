//! Invoicing Domain Ports
//!
//! The [`InvoiceStore`] trait defines everything the invoicing domain needs
//! from its datastore collaborator. Adapters implement it to provide either
//! the real PostgreSQL-backed store (infra_db) or the in-memory mock used by
//! tests.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_invoicing::{InvoiceService, InvoiceStore};
//! use std::sync::Arc;
//!
//! let store: Arc<dyn InvoiceStore> = Arc::new(PostgresInvoiceStore::new(pool));
//! let service = InvoiceService::new(store);
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, InvoiceId, PortError, UserId};

use crate::invoice::{Invoice, LineItem};
use crate::payment::Payment;

/// Datastore port for invoices, line items, and payments
///
/// Line items and payments are append-only child collections looked up by
/// parent invoice id; invoices support metadata updates but are never
/// deleted. All methods return `Result<_, PortError>` so adapters share one
/// error taxonomy.
#[async_trait]
pub trait InvoiceStore: DomainPort + HealthCheckable {
    /// Persists a new invoice
    ///
    /// # Errors
    ///
    /// Returns `PortError::Conflict` if the invoice number is already taken.
    async fn insert_invoice(&self, invoice: &Invoice) -> Result<(), PortError>;

    /// Rewrites an existing invoice's fields
    async fn update_invoice(&self, invoice: &Invoice) -> Result<(), PortError>;

    /// Looks up an invoice by id
    async fn find_invoice(&self, id: InvoiceId) -> Result<Option<Invoice>, PortError>;

    /// Looks up an invoice by its unique invoice number
    async fn find_by_number(&self, invoice_number: &str) -> Result<Option<Invoice>, PortError>;

    /// Returns all invoices owned by a user, most recently created first
    async fn list_for_owner(&self, owner_id: UserId) -> Result<Vec<Invoice>, PortError>;

    /// Persists a new line item
    async fn insert_line(&self, line: &LineItem) -> Result<(), PortError>;

    /// Returns all line items belonging to an invoice
    async fn lines_for_invoice(&self, invoice_id: InvoiceId) -> Result<Vec<LineItem>, PortError>;

    /// Persists a new payment
    async fn insert_payment(&self, payment: &Payment) -> Result<(), PortError>;

    /// Returns all payments recorded against an invoice
    async fn payments_for_invoice(&self, invoice_id: InvoiceId) -> Result<Vec<Payment>, PortError>;
}

/// In-memory implementation of [`InvoiceStore`] for testing
///
/// Stores everything in RwLock-guarded maps and is useful for unit and
/// HTTP-level testing without a database.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use core_kernel::{AdapterHealth, HealthCheckResult};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory mock implementation of [`InvoiceStore`]
    #[derive(Debug, Default)]
    pub struct MemoryInvoiceStore {
        invoices: Arc<RwLock<HashMap<InvoiceId, Invoice>>>,
        lines: Arc<RwLock<HashMap<InvoiceId, Vec<LineItem>>>>,
        payments: Arc<RwLock<HashMap<InvoiceId, Vec<Payment>>>>,
    }

    impl MemoryInvoiceStore {
        /// Creates a new empty store
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl DomainPort for MemoryInvoiceStore {}

    #[async_trait]
    impl HealthCheckable for MemoryInvoiceStore {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "memory-invoice-store".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: None,
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl InvoiceStore for MemoryInvoiceStore {
        async fn insert_invoice(&self, invoice: &Invoice) -> Result<(), PortError> {
            let mut invoices = self.invoices.write().await;

            if invoices
                .values()
                .any(|existing| existing.invoice_number == invoice.invoice_number)
            {
                return Err(PortError::conflict(format!(
                    "invoice number '{}' already exists",
                    invoice.invoice_number
                )));
            }

            invoices.insert(invoice.id, invoice.clone());
            Ok(())
        }

        async fn update_invoice(&self, invoice: &Invoice) -> Result<(), PortError> {
            let mut invoices = self.invoices.write().await;
            if !invoices.contains_key(&invoice.id) {
                return Err(PortError::not_found("Invoice", invoice.id));
            }
            invoices.insert(invoice.id, invoice.clone());
            Ok(())
        }

        async fn find_invoice(&self, id: InvoiceId) -> Result<Option<Invoice>, PortError> {
            Ok(self.invoices.read().await.get(&id).cloned())
        }

        async fn find_by_number(&self, invoice_number: &str) -> Result<Option<Invoice>, PortError> {
            Ok(self
                .invoices
                .read()
                .await
                .values()
                .find(|invoice| invoice.invoice_number == invoice_number)
                .cloned())
        }

        async fn list_for_owner(&self, owner_id: UserId) -> Result<Vec<Invoice>, PortError> {
            let mut results: Vec<Invoice> = self
                .invoices
                .read()
                .await
                .values()
                .filter(|invoice| invoice.owner_id == owner_id)
                .cloned()
                .collect();

            // Most recently created first; v7 ids break created_at ties
            results.sort_by(|a, b| {
                b.created_at
                    .cmp(&a.created_at)
                    .then(b.id.as_uuid().cmp(a.id.as_uuid()))
            });

            Ok(results)
        }

        async fn insert_line(&self, line: &LineItem) -> Result<(), PortError> {
            self.lines
                .write()
                .await
                .entry(line.invoice_id)
                .or_default()
                .push(line.clone());
            Ok(())
        }

        async fn lines_for_invoice(
            &self,
            invoice_id: InvoiceId,
        ) -> Result<Vec<LineItem>, PortError> {
            Ok(self
                .lines
                .read()
                .await
                .get(&invoice_id)
                .cloned()
                .unwrap_or_default())
        }

        async fn insert_payment(&self, payment: &Payment) -> Result<(), PortError> {
            self.payments
                .write()
                .await
                .entry(payment.invoice_id)
                .or_default()
                .push(payment.clone());
            Ok(())
        }

        async fn payments_for_invoice(
            &self,
            invoice_id: InvoiceId,
        ) -> Result<Vec<Payment>, PortError> {
            Ok(self
                .payments
                .read()
                .await
                .get(&invoice_id)
                .cloned()
                .unwrap_or_default())
        }
    }
}
