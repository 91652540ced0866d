//! Invoice DTOs
//!
//! Monetary fields serialize as decimal strings; request-side shape checks
//! use `validator`, while the domain rules (duplicate numbers, quantity and
//! amount bounds) stay in `domain_invoicing`.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_invoicing::{
    Invoice, InvoiceDetail, InvoiceStatus, LineItem, NewInvoice, NewLineItem, Payment,
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLineItemRequest {
    #[validate(length(min = 1, message = "line description is required"))]
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInvoiceRequest {
    #[validate(length(min = 1, message = "invoice number is required"))]
    pub invoice_number: String,
    #[validate(length(min = 1, message = "customer name is required"))]
    pub customer_name: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: Option<InvoiceStatus>,
    #[serde(default)]
    #[validate(nested)]
    pub lines: Vec<CreateLineItemRequest>,
}

impl From<CreateInvoiceRequest> for NewInvoice {
    fn from(request: CreateInvoiceRequest) -> Self {
        NewInvoice {
            invoice_number: request.invoice_number,
            customer_name: request.customer_name,
            issue_date: request.issue_date,
            due_date: request.due_date,
            status: request.status,
            lines: request
                .lines
                .into_iter()
                .map(|line| NewLineItem {
                    description: line.description,
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    pub amount: Decimal,
    pub payment_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    pub id: Uuid,
    pub invoice_number: String,
    pub customer_name: String,
    pub status: InvoiceStatus,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub total: Decimal,
    pub amount_paid: Decimal,
    pub balance_due: Decimal,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        Self {
            id: invoice.id.into(),
            invoice_number: invoice.invoice_number,
            customer_name: invoice.customer_name,
            status: invoice.status,
            issue_date: invoice.issue_date,
            due_date: invoice.due_date,
            total: invoice.total,
            amount_paid: invoice.amount_paid,
            balance_due: invoice.balance_due,
            is_archived: invoice.is_archived,
            created_at: invoice.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LineItemResponse {
    pub id: Uuid,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

impl From<LineItem> for LineItemResponse {
    fn from(line: LineItem) -> Self {
        Self {
            id: line.id.into(),
            description: line.description,
            quantity: line.quantity,
            unit_price: line.unit_price,
            line_total: line.line_total,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub id: Uuid,
    pub invoice_id: Uuid,
    pub amount: Decimal,
    pub payment_date: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id.into(),
            invoice_id: payment.invoice_id.into(),
            amount: payment.amount,
            payment_date: payment.payment_date,
        }
    }
}

/// Detail view: the invoice with derived figures plus its child collections
#[derive(Debug, Serialize)]
pub struct InvoiceDetailResponse {
    pub invoice: InvoiceResponse,
    pub lines: Vec<LineItemResponse>,
    pub payments: Vec<PaymentResponse>,
}

impl From<InvoiceDetail> for InvoiceDetailResponse {
    fn from(detail: InvoiceDetail) -> Self {
        Self {
            invoice: detail.invoice.into(),
            lines: detail.lines.into_iter().map(LineItemResponse::from).collect(),
            payments: detail
                .payments
                .into_iter()
                .map(PaymentResponse::from)
                .collect(),
        }
    }
}
