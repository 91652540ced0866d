//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use domain_invoicing::NewLineItem;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for positive amounts expressed in cents (0.01 ..= 10,000,000.00)
pub fn positive_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for non-negative amounts in cents (0.00 ..= 10,000,000.00)
pub fn non_negative_amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for valid line quantities (0.01 ..= 10,000.00 units)
pub fn quantity_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=1_000_000i64).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

/// Strategy for a single valid line item input
pub fn line_item_strategy() -> impl Strategy<Value = NewLineItem> {
    (quantity_strategy(), non_negative_amount_strategy(), "[a-z]{1,16}").prop_map(
        |(quantity, unit_price, description)| NewLineItem {
            description,
            quantity,
            unit_price,
        },
    )
}

/// Strategy for a set of valid line item inputs
pub fn line_items_strategy(max: usize) -> impl Strategy<Value = Vec<NewLineItem>> {
    proptest::collection::vec(line_item_strategy(), 0..=max)
}

/// Strategy for a run of positive payment amounts
pub fn payment_amounts_strategy(max: usize) -> impl Strategy<Value = Vec<Decimal>> {
    proptest::collection::vec(positive_amount_strategy(), 0..=max)
}
