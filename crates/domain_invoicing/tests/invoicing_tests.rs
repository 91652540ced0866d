//! Comprehensive tests for domain_invoicing
//!
//! Drives the invoice service over the in-memory store and checks the
//! ledger rules end to end: derived balances, payment acceptance, ownership,
//! and listing behavior.

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use domain_invoicing::{
    compute_balance, InvoiceService, InvoiceStatus, InvoicingError, LineItem, MemoryInvoiceStore,
    PaymentRejection,
};
use test_utils::{
    assert_amount_eq, assert_balance, assert_balance_consistent, AmountFixtures, DateFixtures,
    IdFixtures, StringFixtures, TestInvoiceBuilder,
};

fn service() -> InvoiceService {
    InvoiceService::new(Arc::new(MemoryInvoiceStore::new()))
}

/// Builder for the canonical 100.00 invoice used across the suite
fn hundred_dollar_invoice() -> TestInvoiceBuilder {
    TestInvoiceBuilder::new().with_line("Consulting", dec!(10), dec!(10.00))
}

// ============================================================================
// Invoice Creation Tests
// ============================================================================

mod creation_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_computes_line_and_invoice_totals() {
        let service = service();
        let owner = IdFixtures::owner();

        let invoice = service
            .create_invoice(
                owner,
                TestInvoiceBuilder::new()
                    .with_line("Design", dec!(10), dec!(8.50))
                    .with_line("Hosting", dec!(2), dec!(7.25))
                    .build(),
            )
            .await
            .unwrap();

        assert_eq!(invoice.owner_id, owner);
        assert_amount_eq(invoice.total, dec!(99.50));
        assert_amount_eq(invoice.balance_due, dec!(99.50));
        assert_amount_eq(invoice.amount_paid, Decimal::ZERO);

        let detail = service.invoice_detail(owner, invoice.id).await.unwrap();
        assert_eq!(detail.lines.len(), 2);
        assert_amount_eq(detail.lines[0].line_total, dec!(85.00));
        assert_amount_eq(detail.lines[1].line_total, dec!(14.50));
    }

    #[tokio::test]
    async fn test_create_defaults_to_pending() {
        let service = service();
        let invoice = service
            .create_invoice(IdFixtures::owner(), TestInvoiceBuilder::new().build())
            .await
            .unwrap();

        assert_eq!(invoice.status, InvoiceStatus::Pending);
        assert!(!invoice.is_archived);
    }

    #[tokio::test]
    async fn test_create_keeps_supplied_status() {
        let service = service();
        let invoice = service
            .create_invoice(
                IdFixtures::owner(),
                hundred_dollar_invoice()
                    .with_status(InvoiceStatus::Overdue)
                    .build(),
            )
            .await
            .unwrap();

        assert_eq!(invoice.status, InvoiceStatus::Overdue);
    }

    #[tokio::test]
    async fn test_create_with_zero_lines_has_zero_total() {
        let service = service();
        let owner = IdFixtures::owner();

        let invoice = service
            .create_invoice(owner, TestInvoiceBuilder::new().build())
            .await
            .unwrap();

        assert_amount_eq(invoice.total, Decimal::ZERO);

        // Zero balance means the detail view reports it as Paid
        let detail = service.invoice_detail(owner, invoice.id).await.unwrap();
        assert_eq!(detail.invoice.status, InvoiceStatus::Paid);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_invoice_number() {
        let service = service();

        service
            .create_invoice(IdFixtures::owner(), TestInvoiceBuilder::new().build())
            .await
            .unwrap();

        // Same number, different owner: still rejected, uniqueness is global
        let result = service
            .create_invoice(IdFixtures::owner(), TestInvoiceBuilder::new().build())
            .await;

        match result {
            Err(InvoicingError::Validation(message)) => {
                assert!(message.contains(StringFixtures::invoice_number()));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_blank_invoice_number() {
        let service = service();
        let result = service
            .create_invoice(
                IdFixtures::owner(),
                TestInvoiceBuilder::new().with_number("   ").build(),
            )
            .await;

        assert!(matches!(result, Err(InvoicingError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_customer() {
        let service = service();
        let result = service
            .create_invoice(
                IdFixtures::owner(),
                TestInvoiceBuilder::new().with_customer("").build(),
            )
            .await;

        assert!(matches!(result, Err(InvoicingError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_non_positive_quantity() {
        let service = service();

        for quantity in [Decimal::ZERO, dec!(-1)] {
            let result = service
                .create_invoice(
                    IdFixtures::owner(),
                    TestInvoiceBuilder::new()
                        .with_line("Widgets", quantity, dec!(5))
                        .build(),
                )
                .await;

            assert!(matches!(result, Err(InvoicingError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_create_rejects_negative_unit_price() {
        let service = service();
        let result = service
            .create_invoice(
                IdFixtures::owner(),
                TestInvoiceBuilder::new()
                    .with_line("Discount line", dec!(1), dec!(-10))
                    .build(),
            )
            .await;

        assert!(matches!(result, Err(InvoicingError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_accepts_due_date_before_issue_date() {
        // Accepted input; date ordering is not enforced
        let service = service();
        let result = service
            .create_invoice(
                IdFixtures::owner(),
                TestInvoiceBuilder::new()
                    .with_due_date(DateFixtures::due_before_issue())
                    .build(),
            )
            .await;

        assert!(result.is_ok());
    }
}

// ============================================================================
// Detail Read Tests
// ============================================================================

mod detail_tests {
    use super::*;

    #[tokio::test]
    async fn test_detail_derives_figures_from_children() {
        let service = service();
        let owner = IdFixtures::owner();
        let invoice = service
            .create_invoice(owner, hundred_dollar_invoice().build())
            .await
            .unwrap();

        service
            .record_payment(owner, invoice.id, AmountFixtures::thirty(), None)
            .await
            .unwrap();

        let detail = service.invoice_detail(owner, invoice.id).await.unwrap();

        assert_amount_eq(detail.invoice.total, AmountFixtures::hundred());
        assert_amount_eq(detail.invoice.amount_paid, AmountFixtures::thirty());
        assert_amount_eq(detail.invoice.balance_due, AmountFixtures::seventy());
        assert_eq!(detail.invoice.status, InvoiceStatus::Pending);
        assert_eq!(detail.payments.len(), 1);

        // An independent recompute from the returned children agrees
        let balance = compute_balance(&detail.lines, &detail.payments);
        assert_balance(
            &balance,
            AmountFixtures::hundred(),
            AmountFixtures::thirty(),
            AmountFixtures::seventy(),
        );
    }

    #[tokio::test]
    async fn test_detail_is_idempotent() {
        let service = service();
        let owner = IdFixtures::owner();
        let invoice = service
            .create_invoice(owner, hundred_dollar_invoice().build())
            .await
            .unwrap();
        service
            .record_payment(owner, invoice.id, dec!(12.34), None)
            .await
            .unwrap();

        let first = service.invoice_detail(owner, invoice.id).await.unwrap();
        let second = service.invoice_detail(owner, invoice.id).await.unwrap();

        assert_eq!(first.invoice.total, second.invoice.total);
        assert_eq!(first.invoice.amount_paid, second.invoice.amount_paid);
        assert_eq!(first.invoice.balance_due, second.invoice.balance_due);
        assert_eq!(first.invoice.status, second.invoice.status);
    }

    #[tokio::test]
    async fn test_detail_unknown_invoice_is_not_found() {
        let service = service();
        let result = service
            .invoice_detail(IdFixtures::owner(), IdFixtures::unknown_invoice())
            .await;

        assert!(matches!(result, Err(InvoicingError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_detail_denies_non_owner() {
        let service = service();
        let owner = IdFixtures::owner();
        let invoice = service
            .create_invoice(owner, hundred_dollar_invoice().build())
            .await
            .unwrap();

        let result = service
            .invoice_detail(IdFixtures::intruder(), invoice.id)
            .await;

        assert!(matches!(result, Err(InvoicingError::AccessDenied(_))));
    }

    #[tokio::test]
    async fn test_detail_keeps_stored_status_while_balance_remains() {
        let service = service();
        let owner = IdFixtures::owner();
        let invoice = service
            .create_invoice(
                owner,
                hundred_dollar_invoice()
                    .with_status(InvoiceStatus::Overdue)
                    .build(),
            )
            .await
            .unwrap();

        let detail = service.invoice_detail(owner, invoice.id).await.unwrap();
        assert_eq!(detail.invoice.status, InvoiceStatus::Overdue);
    }
}

// ============================================================================
// Payment Recording Tests
// ============================================================================

mod payment_tests {
    use super::*;

    #[tokio::test]
    async fn test_partial_payment_is_accepted() {
        let service = service();
        let owner = IdFixtures::owner();
        let invoice = service
            .create_invoice(owner, hundred_dollar_invoice().build())
            .await
            .unwrap();

        let payment = service
            .record_payment(owner, invoice.id, AmountFixtures::thirty(), None)
            .await
            .unwrap();

        assert_eq!(payment.invoice_id, invoice.id);
        assert_amount_eq(payment.amount, AmountFixtures::thirty());
    }

    #[tokio::test]
    async fn test_explicit_payment_date_is_persisted() {
        let service = service();
        let owner = IdFixtures::owner();
        let invoice = service
            .create_invoice(owner, hundred_dollar_invoice().build())
            .await
            .unwrap();

        let payment = service
            .record_payment(
                owner,
                invoice.id,
                dec!(10),
                Some(DateFixtures::payment_date()),
            )
            .await
            .unwrap();

        assert_eq!(payment.payment_date, DateFixtures::payment_date());

        let detail = service.invoice_detail(owner, invoice.id).await.unwrap();
        assert_eq!(detail.payments[0].payment_date, DateFixtures::payment_date());
    }

    #[tokio::test]
    async fn test_payment_of_exact_balance_settles_invoice() {
        let service = service();
        let owner = IdFixtures::owner();
        let invoice = service
            .create_invoice(owner, hundred_dollar_invoice().build())
            .await
            .unwrap();

        service
            .record_payment(owner, invoice.id, AmountFixtures::thirty(), None)
            .await
            .unwrap();
        service
            .record_payment(owner, invoice.id, AmountFixtures::seventy(), None)
            .await
            .unwrap();

        let detail = service.invoice_detail(owner, invoice.id).await.unwrap();
        assert_amount_eq(detail.invoice.balance_due, Decimal::ZERO);
        assert_eq!(detail.invoice.status, InvoiceStatus::Paid);
    }

    #[tokio::test]
    async fn test_overpayment_is_rejected_citing_exact_balance() {
        let service = service();
        let owner = IdFixtures::owner();
        let invoice = service
            .create_invoice(owner, hundred_dollar_invoice().build())
            .await
            .unwrap();
        service
            .record_payment(owner, invoice.id, AmountFixtures::thirty(), None)
            .await
            .unwrap();

        let result = service
            .record_payment(owner, invoice.id, dec!(70.01), None)
            .await;

        match result {
            Err(InvoicingError::Payment(rejection)) => {
                assert_eq!(
                    rejection,
                    PaymentRejection::ExceedsBalance {
                        balance_due: dec!(70.00)
                    }
                );
                assert!(rejection.to_string().contains("70.00"));
            }
            other => panic!("expected payment rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_positive_amounts_are_rejected() {
        let service = service();
        let owner = IdFixtures::owner();
        let invoice = service
            .create_invoice(owner, hundred_dollar_invoice().build())
            .await
            .unwrap();

        for amount in [Decimal::ZERO, AmountFixtures::negative()] {
            let result = service.record_payment(owner, invoice.id, amount, None).await;
            assert!(matches!(
                result,
                Err(InvoicingError::Payment(PaymentRejection::NonPositiveAmount))
            ));
        }
    }

    #[tokio::test]
    async fn test_settled_invoice_rejects_any_amount() {
        let service = service();
        let owner = IdFixtures::owner();
        let invoice = service
            .create_invoice(owner, hundred_dollar_invoice().build())
            .await
            .unwrap();
        service
            .record_payment(owner, invoice.id, AmountFixtures::hundred(), None)
            .await
            .unwrap();

        for amount in [AmountFixtures::one_cent(), dec!(100), AmountFixtures::negative()] {
            let result = service.record_payment(owner, invoice.id, amount, None).await;
            assert!(matches!(
                result,
                Err(InvoicingError::Payment(PaymentRejection::AlreadyPaid))
            ));
        }
    }

    #[tokio::test]
    async fn test_zero_line_invoice_rejects_payments() {
        let service = service();
        let owner = IdFixtures::owner();
        let invoice = service
            .create_invoice(owner, TestInvoiceBuilder::new().build())
            .await
            .unwrap();

        let result = service
            .record_payment(owner, invoice.id, dec!(10), None)
            .await;

        assert!(matches!(
            result,
            Err(InvoicingError::Payment(PaymentRejection::AlreadyPaid))
        ));
    }

    #[tokio::test]
    async fn test_payment_does_not_rewrite_stored_status() {
        let service = service();
        let owner = IdFixtures::owner();
        let invoice = service
            .create_invoice(owner, hundred_dollar_invoice().build())
            .await
            .unwrap();
        service
            .record_payment(owner, invoice.id, AmountFixtures::hundred(), None)
            .await
            .unwrap();

        // The list view exposes stored fields: status stays Pending and the
        // snapshot balance is untouched, while the detail view derives Paid.
        let listed = &service.list_invoices(owner).await.unwrap()[0];
        assert_eq!(listed.status, InvoiceStatus::Pending);
        assert_amount_eq(listed.balance_due, AmountFixtures::hundred());

        let detail = service.invoice_detail(owner, invoice.id).await.unwrap();
        assert_eq!(detail.invoice.status, InvoiceStatus::Paid);
    }

    #[tokio::test]
    async fn test_payment_on_unknown_invoice_is_not_found() {
        let service = service();
        let result = service
            .record_payment(
                IdFixtures::owner(),
                IdFixtures::unknown_invoice(),
                dec!(10),
                None,
            )
            .await;

        assert!(matches!(result, Err(InvoicingError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_payment_denies_non_owner() {
        let service = service();
        let owner = IdFixtures::owner();
        let invoice = service
            .create_invoice(owner, hundred_dollar_invoice().build())
            .await
            .unwrap();

        let result = service
            .record_payment(IdFixtures::intruder(), invoice.id, dec!(10), None)
            .await;

        assert!(matches!(result, Err(InvoicingError::AccessDenied(_))));
    }

    #[tokio::test]
    async fn test_paying_down_in_steps_until_settled() {
        let service = service();
        let owner = IdFixtures::owner();
        let invoice = service
            .create_invoice(owner, hundred_dollar_invoice().build())
            .await
            .unwrap();

        for amount in [dec!(25), dec!(25), dec!(49.99), dec!(0.01)] {
            service
                .record_payment(owner, invoice.id, amount, None)
                .await
                .unwrap();
        }

        let detail = service.invoice_detail(owner, invoice.id).await.unwrap();
        assert_amount_eq(detail.invoice.balance_due, Decimal::ZERO);
        assert_eq!(detail.invoice.status, InvoiceStatus::Paid);
        assert_eq!(detail.payments.len(), 4);

        // Settled for good: the next cent is rejected
        let result = service
            .record_payment(owner, invoice.id, AmountFixtures::one_cent(), None)
            .await;
        assert!(matches!(
            result,
            Err(InvoicingError::Payment(PaymentRejection::AlreadyPaid))
        ));
    }
}

// ============================================================================
// Listing Tests
// ============================================================================

mod listing_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let service = service();
        let owner = IdFixtures::owner();

        for number in ["INV-A", "INV-B", "INV-C"] {
            service
                .create_invoice(owner, TestInvoiceBuilder::new().with_number(number).build())
                .await
                .unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let listed = service.list_invoices(owner).await.unwrap();
        let numbers: Vec<&str> = listed
            .iter()
            .map(|invoice| invoice.invoice_number.as_str())
            .collect();

        assert_eq!(numbers, vec!["INV-C", "INV-B", "INV-A"]);
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_owner() {
        let service = service();
        let owner = IdFixtures::owner();
        let other = IdFixtures::intruder();

        service
            .create_invoice(owner, TestInvoiceBuilder::new().with_number("INV-MINE").build())
            .await
            .unwrap();
        service
            .create_invoice(
                other,
                TestInvoiceBuilder::new().with_number("INV-THEIRS").build(),
            )
            .await
            .unwrap();

        let listed = service.list_invoices(owner).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].invoice_number, "INV-MINE");
    }

    #[tokio::test]
    async fn test_list_for_user_with_no_invoices_is_empty() {
        let service = service();
        assert!(service
            .list_invoices(IdFixtures::owner())
            .await
            .unwrap()
            .is_empty());
    }
}

// ============================================================================
// Calculator Property Tests
// ============================================================================

mod calculator_properties {
    use super::*;
    use core_kernel::InvoiceId;
    use proptest::prelude::*;
    use test_utils::{line_items_strategy, payment_amounts_strategy};

    proptest! {
        #[test]
        fn derived_total_matches_independent_sum(
            new_lines in line_items_strategy(12),
            amounts in payment_amounts_strategy(8),
        ) {
            let invoice_id = InvoiceId::new_v7();
            let lines: Vec<LineItem> = new_lines
                .iter()
                .map(|line| {
                    LineItem::new(invoice_id, line.description.clone(), line.quantity, line.unit_price)
                })
                .collect();
            let payments: Vec<domain_invoicing::Payment> = amounts
                .iter()
                .map(|amount| domain_invoicing::Payment::new(invoice_id, *amount, None))
                .collect();

            let balance = compute_balance(&lines, &payments);

            let independent_total: Decimal = new_lines
                .iter()
                .map(|line| line.quantity * line.unit_price)
                .sum();
            let independent_paid: Decimal = amounts.iter().copied().sum();

            prop_assert_eq!(balance.total, independent_total);
            prop_assert_eq!(balance.amount_paid, independent_paid);
            assert_balance_consistent(&balance);
        }
    }
}
