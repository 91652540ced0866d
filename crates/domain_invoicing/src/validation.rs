//! Payment acceptance rules
//!
//! A proposed payment is checked against the freshly derived balance. The
//! rules run in a fixed order and the first failing rule wins; each rule has
//! its own rejection variant so callers can surface the specific reason.

use rust_decimal::Decimal;
use thiserror::Error;

/// Why a proposed payment was rejected
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaymentRejection {
    /// The invoice carries no outstanding balance
    #[error("invoice is already fully paid; no payment is needed")]
    AlreadyPaid,

    /// The proposed amount is zero or negative
    #[error("payment amount must be greater than zero")]
    NonPositiveAmount,

    /// The proposed amount is larger than the outstanding balance
    #[error("payment cannot exceed the remaining balance of {balance_due:.2}")]
    ExceedsBalance {
        /// Balance derived at the moment of validation
        balance_due: Decimal,
    },
}

/// Decides whether a proposed payment is acceptable
///
/// `balance_due` must be the value freshly computed by
/// [`crate::balance::compute_balance`], never a stored snapshot; the balance
/// echoed in [`PaymentRejection::ExceedsBalance`] is exactly this value.
pub fn validate_payment(balance_due: Decimal, amount: Decimal) -> Result<(), PaymentRejection> {
    if balance_due <= Decimal::ZERO {
        return Err(PaymentRejection::AlreadyPaid);
    }

    if amount <= Decimal::ZERO {
        return Err(PaymentRejection::NonPositiveAmount);
    }

    if amount > balance_due {
        return Err(PaymentRejection::ExceedsBalance { balance_due });
    }

    Ok(())
}
