//! Invoice handlers
//!
//! Thin translation layer: extract the authenticated user, convert DTOs,
//! and delegate to the invoice service. All ownership and ledger rules live
//! in the domain crate.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use domain_invoicing::InvoiceService;

use crate::dto::invoices::*;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::AppState;

/// Lists the caller's invoices, most recently created first
pub async fn list_invoices(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<Vec<InvoiceResponse>>, ApiError> {
    let service = InvoiceService::new(state.store.clone());
    let invoices = service.list_invoices(user_id).await?;

    Ok(Json(
        invoices.into_iter().map(InvoiceResponse::from).collect(),
    ))
}

/// Gets an invoice with derived figures, lines, and payments
pub async fn get_invoice(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<InvoiceDetailResponse>, ApiError> {
    let service = InvoiceService::new(state.store.clone());
    let detail = service.invoice_detail(user_id, id.into()).await?;

    Ok(Json(detail.into()))
}

/// Creates an invoice together with its line items
pub async fn create_invoice(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(request): Json<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<InvoiceResponse>), ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let service = InvoiceService::new(state.store.clone());
    let invoice = service.create_invoice(user_id, request.into()).await?;

    Ok((StatusCode::CREATED, Json(invoice.into())))
}

/// Records a payment against an invoice
pub async fn record_payment(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let service = InvoiceService::new(state.store.clone());
    let payment = service
        .record_payment(user_id, id.into(), request.amount, request.payment_date)
        .await?;

    Ok(Json(payment.into()))
}
