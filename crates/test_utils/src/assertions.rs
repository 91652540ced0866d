//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use domain_invoicing::InvoiceBalance;
use rust_decimal::Decimal;

/// Asserts that two decimal amounts are equal, normalizing scale
///
/// `70` and `70.00` compare equal even though their internal scales differ.
///
/// # Panics
///
/// Panics with both values when the normalized amounts differ.
pub fn assert_amount_eq(actual: Decimal, expected: Decimal) {
    assert_eq!(
        actual.normalize(),
        expected.normalize(),
        "Amounts differ: actual={}, expected={}",
        actual,
        expected
    );
}

/// Asserts every figure of a derived balance in one call
pub fn assert_balance(balance: &InvoiceBalance, total: Decimal, paid: Decimal, due: Decimal) {
    assert_amount_eq(balance.total, total);
    assert_amount_eq(balance.amount_paid, paid);
    assert_amount_eq(balance.balance_due, due);
}

/// Asserts that a balance is internally consistent
///
/// `balance_due` must always equal `total - amount_paid` regardless of how
/// the figures were produced.
pub fn assert_balance_consistent(balance: &InvoiceBalance) {
    assert_eq!(
        balance.balance_due,
        balance.total - balance.amount_paid,
        "Balance is not consistent: total={}, paid={}, due={}",
        balance.total,
        balance.amount_paid,
        balance.balance_due
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_eq_ignores_scale() {
        assert_amount_eq(dec!(70), dec!(70.00));
    }

    #[test]
    #[should_panic(expected = "Amounts differ")]
    fn test_amount_eq_panics_on_difference() {
        assert_amount_eq(dec!(70), dec!(70.01));
    }
}
