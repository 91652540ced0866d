//! Ownership guard
//!
//! Every read or write against an invoice must come from its owner. The
//! check lives in one place so the detail and payment paths cannot drift.

use core_kernel::UserId;

use crate::error::InvoicingError;
use crate::invoice::Invoice;

/// Authorizes that `user_id` owns the invoice
///
/// Returns [`InvoicingError::AccessDenied`] on mismatch. The caller is
/// assumed to be authenticated already; this guard only decides ownership.
pub fn ensure_owner(user_id: UserId, invoice: &Invoice) -> Result<(), InvoicingError> {
    if invoice.owner_id != user_id {
        return Err(InvoicingError::access_denied(format!(
            "invoice {} does not belong to the requesting user",
            invoice.invoice_number
        )));
    }
    Ok(())
}
