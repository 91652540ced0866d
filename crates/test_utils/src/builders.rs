//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible
//! defaults. Tests specify only the fields they care about.

use chrono::NaiveDate;
use domain_invoicing::{InvoiceStatus, NewInvoice, NewLineItem};
use rust_decimal::Decimal;

use crate::fixtures::{DateFixtures, StringFixtures};

/// Builder for [`NewInvoice`] inputs
///
/// Defaults to a pending invoice with the standard fixture number, customer,
/// and dates, and no lines.
pub struct TestInvoiceBuilder {
    invoice_number: String,
    customer_name: String,
    issue_date: NaiveDate,
    due_date: NaiveDate,
    status: Option<InvoiceStatus>,
    lines: Vec<NewLineItem>,
}

impl Default for TestInvoiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestInvoiceBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            invoice_number: StringFixtures::invoice_number().to_string(),
            customer_name: StringFixtures::customer_name().to_string(),
            issue_date: DateFixtures::issue_date(),
            due_date: DateFixtures::due_date(),
            status: None,
            lines: Vec::new(),
        }
    }

    /// Sets the invoice number
    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.invoice_number = number.into();
        self
    }

    /// Sets the customer name
    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer_name = customer.into();
        self
    }

    /// Sets the issue date
    pub fn with_issue_date(mut self, date: NaiveDate) -> Self {
        self.issue_date = date;
        self
    }

    /// Sets the due date
    pub fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = date;
        self
    }

    /// Sets the initial stored status
    pub fn with_status(mut self, status: InvoiceStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Appends a line item
    pub fn with_line(
        mut self,
        description: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Self {
        self.lines.push(NewLineItem {
            description: description.into(),
            quantity,
            unit_price,
        });
        self
    }

    /// Builds the invoice input
    pub fn build(self) -> NewInvoice {
        NewInvoice {
            invoice_number: self.invoice_number,
            customer_name: self.customer_name,
            issue_date: self.issue_date,
            due_date: self.due_date,
            status: self.status,
            lines: self.lines,
        }
    }
}
