//! Invoicing domain errors

use thiserror::Error;

use core_kernel::PortError;

use crate::validation::PaymentRejection;

/// Errors that can occur in the invoicing domain
#[derive(Debug, Error)]
pub enum InvoicingError {
    /// Bad or duplicate input
    #[error("Validation error: {0}")]
    Validation(String),

    /// A proposed payment failed the acceptance rules
    #[error(transparent)]
    Payment(#[from] PaymentRejection),

    /// Referenced invoice does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The acting user does not own the invoice
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// The datastore collaborator failed
    #[error("Storage error: {0}")]
    Store(#[from] PortError),
}

impl InvoicingError {
    pub fn validation(message: impl Into<String>) -> Self {
        InvoicingError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        InvoicingError::NotFound(message.into())
    }

    pub fn access_denied(message: impl Into<String>) -> Self {
        InvoicingError::AccessDenied(message.into())
    }
}
