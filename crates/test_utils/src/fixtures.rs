//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the invoice
//! ledger. These fixtures are designed to be consistent and predictable for
//! unit tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_kernel::{InvoiceId, UserId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for monetary amounts
pub struct AmountFixtures;

impl AmountFixtures {
    /// The canonical invoice total used across examples: 100.00
    pub fn hundred() -> Decimal {
        dec!(100.00)
    }

    /// A typical partial payment: 30.00
    pub fn thirty() -> Decimal {
        dec!(30.00)
    }

    /// The remaining balance after the partial payment: 70.00
    pub fn seventy() -> Decimal {
        dec!(70.00)
    }

    /// One cent, the smallest representable positive amount
    pub fn one_cent() -> Decimal {
        dec!(0.01)
    }

    /// A negative amount for rejection scenarios
    pub fn negative() -> Decimal {
        dec!(-5.00)
    }
}

/// Fixture for temporal test data
pub struct DateFixtures;

impl DateFixtures {
    /// Standard issue date (Jan 15, 2024)
    pub fn issue_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    /// Standard due date, 30 days after issue (Feb 14, 2024)
    pub fn due_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 14).unwrap()
    }

    /// A due date before the issue date; accepted input, never rejected
    pub fn due_before_issue() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    /// A fixed payment timestamp for deterministic assertions
    pub fn payment_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 20, 10, 30, 0).unwrap()
    }
}

/// Fixture for string test data
pub struct StringFixtures;

impl StringFixtures {
    /// A well-formed invoice number
    pub fn invoice_number() -> &'static str {
        "INV-2024-0001"
    }

    /// A second, distinct invoice number
    pub fn other_invoice_number() -> &'static str {
        "INV-2024-0002"
    }

    /// A typical customer name
    pub fn customer_name() -> &'static str {
        "Acme Pty Ltd"
    }
}

/// Fixture for identifiers
pub struct IdFixtures;

impl IdFixtures {
    /// A fresh owner id
    pub fn owner() -> UserId {
        UserId::new_v7()
    }

    /// A fresh id for "somebody else" in ownership tests
    pub fn intruder() -> UserId {
        UserId::new_v7()
    }

    /// An invoice id that exists in no store
    pub fn unknown_invoice() -> InvoiceId {
        InvoiceId::new_v7()
    }
}
