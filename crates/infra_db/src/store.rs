//! PostgreSQL invoice store
//!
//! Implements the [`InvoiceStore`] port over three tables: `invoices`,
//! `invoice_lines`, and `payments`. Queries are runtime-bound so the crate
//! builds without a live database; uniqueness of invoice numbers is enforced
//! by a unique index and surfaced as a conflict.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use std::time::Instant;
use uuid::Uuid;

use core_kernel::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, InvoiceId, PortError, UserId,
};
use domain_invoicing::{Invoice, InvoiceStatus, InvoiceStore, LineItem, Payment};

use crate::error::DatabaseError;

/// PostgreSQL-backed implementation of [`InvoiceStore`]
#[derive(Debug, Clone)]
pub struct PostgresInvoiceStore {
    pool: PgPool,
}

impl PostgresInvoiceStore {
    /// Creates a new store over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row for an invoice
#[derive(Debug, FromRow)]
struct InvoiceRow {
    invoice_id: Uuid,
    owner_id: Uuid,
    invoice_number: String,
    customer_name: String,
    status: String,
    issue_date: NaiveDate,
    due_date: NaiveDate,
    total: Decimal,
    amount_paid: Decimal,
    balance_due: Decimal,
    is_archived: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<InvoiceRow> for Invoice {
    type Error = DatabaseError;

    fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
        let status = InvoiceStatus::parse(&row.status).ok_or_else(|| {
            DatabaseError::CorruptRow(format!(
                "invoice {} has unknown status '{}'",
                row.invoice_id, row.status
            ))
        })?;

        Ok(Invoice {
            id: InvoiceId::from(row.invoice_id),
            owner_id: UserId::from(row.owner_id),
            invoice_number: row.invoice_number,
            customer_name: row.customer_name,
            status,
            issue_date: row.issue_date,
            due_date: row.due_date,
            total: row.total,
            amount_paid: row.amount_paid,
            balance_due: row.balance_due,
            is_archived: row.is_archived,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Database row for a line item
#[derive(Debug, FromRow)]
struct LineItemRow {
    line_id: Uuid,
    invoice_id: Uuid,
    description: String,
    quantity: Decimal,
    unit_price: Decimal,
    line_total: Decimal,
}

impl From<LineItemRow> for LineItem {
    fn from(row: LineItemRow) -> Self {
        LineItem {
            id: row.line_id.into(),
            invoice_id: row.invoice_id.into(),
            description: row.description,
            quantity: row.quantity,
            unit_price: row.unit_price,
            line_total: row.line_total,
        }
    }
}

/// Database row for a payment
#[derive(Debug, FromRow)]
struct PaymentRow {
    payment_id: Uuid,
    invoice_id: Uuid,
    amount: Decimal,
    payment_date: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        Payment {
            id: row.payment_id.into(),
            invoice_id: row.invoice_id.into(),
            amount: row.amount,
            payment_date: row.payment_date,
            created_at: row.created_at,
        }
    }
}

impl DomainPort for PostgresInvoiceStore {}

#[async_trait]
impl HealthCheckable for PostgresInvoiceStore {
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();
        let outcome = sqlx::query("SELECT 1").execute(&self.pool).await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(_) => HealthCheckResult {
                adapter_id: "postgres-invoice-store".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: "postgres-invoice-store".to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(e.to_string()),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl InvoiceStore for PostgresInvoiceStore {
    async fn insert_invoice(&self, invoice: &Invoice) -> Result<(), PortError> {
        sqlx::query(
            r#"
            INSERT INTO invoices (
                invoice_id, owner_id, invoice_number, customer_name, status,
                issue_date, due_date, total, amount_paid, balance_due,
                is_archived, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(invoice.id.as_uuid())
        .bind(invoice.owner_id.as_uuid())
        .bind(&invoice.invoice_number)
        .bind(&invoice.customer_name)
        .bind(invoice.status.as_str())
        .bind(invoice.issue_date)
        .bind(invoice.due_date)
        .bind(invoice.total)
        .bind(invoice.amount_paid)
        .bind(invoice.balance_due)
        .bind(invoice.is_archived)
        .bind(invoice.created_at)
        .bind(invoice.updated_at)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(())
    }

    async fn update_invoice(&self, invoice: &Invoice) -> Result<(), PortError> {
        let result = sqlx::query(
            r#"
            UPDATE invoices SET
                invoice_number = $2, customer_name = $3, status = $4,
                issue_date = $5, due_date = $6, total = $7, amount_paid = $8,
                balance_due = $9, is_archived = $10, updated_at = $11
            WHERE invoice_id = $1
            "#,
        )
        .bind(invoice.id.as_uuid())
        .bind(&invoice.invoice_number)
        .bind(&invoice.customer_name)
        .bind(invoice.status.as_str())
        .bind(invoice.issue_date)
        .bind(invoice.due_date)
        .bind(invoice.total)
        .bind(invoice.amount_paid)
        .bind(invoice.balance_due)
        .bind(invoice.is_archived)
        .bind(invoice.updated_at)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        if result.rows_affected() == 0 {
            return Err(PortError::not_found("Invoice", invoice.id));
        }
        Ok(())
    }

    async fn find_invoice(&self, id: InvoiceId) -> Result<Option<Invoice>, PortError> {
        let row = sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT invoice_id, owner_id, invoice_number, customer_name, status,
                   issue_date, due_date, total, amount_paid, balance_due,
                   is_archived, created_at, updated_at
            FROM invoices
            WHERE invoice_id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        row.map(Invoice::try_from)
            .transpose()
            .map_err(PortError::from)
    }

    async fn find_by_number(&self, invoice_number: &str) -> Result<Option<Invoice>, PortError> {
        let row = sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT invoice_id, owner_id, invoice_number, customer_name, status,
                   issue_date, due_date, total, amount_paid, balance_due,
                   is_archived, created_at, updated_at
            FROM invoices
            WHERE invoice_number = $1
            "#,
        )
        .bind(invoice_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        row.map(Invoice::try_from)
            .transpose()
            .map_err(PortError::from)
    }

    async fn list_for_owner(&self, owner_id: UserId) -> Result<Vec<Invoice>, PortError> {
        let rows = sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT invoice_id, owner_id, invoice_number, customer_name, status,
                   issue_date, due_date, total, amount_paid, balance_due,
                   is_archived, created_at, updated_at
            FROM invoices
            WHERE owner_id = $1
            ORDER BY created_at DESC, invoice_id DESC
            "#,
        )
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        rows.into_iter()
            .map(|row| Invoice::try_from(row).map_err(PortError::from))
            .collect()
    }

    async fn insert_line(&self, line: &LineItem) -> Result<(), PortError> {
        sqlx::query(
            r#"
            INSERT INTO invoice_lines (
                line_id, invoice_id, description, quantity, unit_price, line_total
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(line.id.as_uuid())
        .bind(line.invoice_id.as_uuid())
        .bind(&line.description)
        .bind(line.quantity)
        .bind(line.unit_price)
        .bind(line.line_total)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(())
    }

    async fn lines_for_invoice(&self, invoice_id: InvoiceId) -> Result<Vec<LineItem>, PortError> {
        let rows = sqlx::query_as::<_, LineItemRow>(
            r#"
            SELECT line_id, invoice_id, description, quantity, unit_price, line_total
            FROM invoice_lines
            WHERE invoice_id = $1
            ORDER BY line_id
            "#,
        )
        .bind(invoice_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(rows.into_iter().map(LineItem::from).collect())
    }

    async fn insert_payment(&self, payment: &Payment) -> Result<(), PortError> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                payment_id, invoice_id, amount, payment_date, created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.invoice_id.as_uuid())
        .bind(payment.amount)
        .bind(payment.payment_date)
        .bind(payment.created_at)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(())
    }

    async fn payments_for_invoice(&self, invoice_id: InvoiceId) -> Result<Vec<Payment>, PortError> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT payment_id, invoice_id, amount, payment_date, created_at
            FROM payments
            WHERE invoice_id = $1
            ORDER BY created_at, payment_id
            "#,
        )
        .bind(invoice_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(rows.into_iter().map(Payment::from).collect())
    }
}
