mod common;

use rust_decimal_macros::dec;

use common::{date, setup, TestApp};
use fleet_rental::domain::{
    AuthContext, DomainError, PaymentMethod, PaymentStatus, RefundDecision, RefundStatus,
    Reservation, ReservationStatus,
};

/// Paid reservation worth 200 (two days at 100)
async fn paid_reservation(app: &TestApp, ctx: &AuthContext) -> Reservation {
    let car = app.vehicle(dec!(100)).await;
    let r = app
        .book(ctx, car.id, date(2024, 6, 1), date(2024, 6, 3))
        .await
        .unwrap();
    assert_eq!(r.total_price, dec!(200));
    app.services
        .payments
        .process(ctx, r.id, PaymentMethod::BankTransfer)
        .await
        .unwrap();
    r
}

#[tokio::test]
async fn second_payment_is_rejected() {
    let app = setup(date(2024, 5, 1)).await;
    let alice = app.client("alice@example.com").await;
    let r = paid_reservation(&app, &alice).await;

    let err = app
        .services
        .payments
        .process(&alice, r.id, PaymentMethod::CreditCard)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidState(_)));

    let history = app.services.payments.history(&alice).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].method, PaymentMethod::BankTransfer);
}

#[tokio::test]
async fn payment_rules() {
    let app = setup(date(2024, 5, 1)).await;
    let alice = app.client("alice@example.com").await;
    let bob = app.client("bob@example.com").await;
    let car = app.vehicle(dec!(60)).await;

    let r = app
        .book(&alice, car.id, date(2024, 6, 1), date(2024, 6, 3))
        .await
        .unwrap();

    let foreign = app
        .services
        .payments
        .process(&bob, r.id, PaymentMethod::CreditCard)
        .await
        .unwrap_err();
    assert!(matches!(foreign, DomainError::NotFound { .. }));

    app.services.reservations.cancel(&alice, r.id).await.unwrap();
    let cancelled = app
        .services
        .payments
        .process(&alice, r.id, PaymentMethod::CreditCard)
        .await
        .unwrap_err();
    assert!(matches!(cancelled, DomainError::InvalidState(_)));
}

#[tokio::test]
async fn refund_after_completion_is_eighty_percent() {
    let app = setup(date(2024, 5, 1)).await;
    let alice = app.client("alice@example.com").await;
    let r = paid_reservation(&app, &alice).await;

    // Confirmed reservations are not refundable yet
    let early = app
        .services
        .refunds
        .request(&alice, r.id, None)
        .await
        .unwrap_err();
    assert!(matches!(early, DomainError::InvalidState(_)));

    app.services
        .reservations
        .update_status(&app.admin, r.id, "completed")
        .await
        .unwrap();

    let refund = app
        .services
        .refunds
        .request(&alice, r.id, Some("Trip cut short".into()))
        .await
        .unwrap();
    assert_eq!(refund.amount, dec!(160));
    assert_eq!(refund.status, RefundStatus::Pending);
    assert_eq!(refund.reservation_id, Some(r.id));
    assert_eq!(refund.requested_by, alice.user_id);

    let listed = app.services.refunds.list(&alice).await.unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn refund_on_cancelled_reservation() {
    let app = setup(date(2024, 5, 1)).await;
    let alice = app.client("alice@example.com").await;
    let r = paid_reservation(&app, &alice).await;

    app.services.reservations.cancel(&alice, r.id).await.unwrap();
    let refund = app
        .services
        .refunds
        .request(&alice, r.id, None)
        .await
        .unwrap();
    assert_eq!(refund.amount, dec!(160));
}

#[tokio::test]
async fn refund_decisions_are_final() {
    let app = setup(date(2024, 5, 1)).await;
    let alice = app.client("alice@example.com").await;
    let bob = app.client("bob@example.com").await;
    let r = paid_reservation(&app, &alice).await;
    app.services.reservations.cancel(&alice, r.id).await.unwrap();
    let refund = app
        .services
        .refunds
        .request(&alice, r.id, None)
        .await
        .unwrap();

    let stranger = app
        .services
        .refunds
        .decide(&bob, refund.id, RefundDecision::Approved)
        .await
        .unwrap_err();
    assert!(matches!(stranger, DomainError::Unauthorized(_)));

    let approved = app
        .services
        .refunds
        .decide(&alice, refund.id, RefundDecision::Approved)
        .await
        .unwrap();
    assert_eq!(approved.status, RefundStatus::Approved);
    assert!(approved.processed_at.is_some());

    let history = app.services.payments.history(&alice).await.unwrap();
    assert_eq!(history[0].status, PaymentStatus::Refunded);

    let again = app
        .services
        .refunds
        .decide(&alice, refund.id, RefundDecision::Rejected)
        .await
        .unwrap_err();
    assert!(matches!(again, DomainError::InvalidState(_)));

    let missing = app
        .services
        .refunds
        .decide(&alice, 4_242, RefundDecision::Rejected)
        .await
        .unwrap_err();
    assert!(matches!(missing, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn rejected_refund_keeps_payment() {
    let app = setup(date(2024, 5, 1)).await;
    let alice = app.client("alice@example.com").await;
    let r = paid_reservation(&app, &alice).await;
    app.services
        .reservations
        .update_status(&app.admin, r.id, "completed")
        .await
        .unwrap();
    let refund = app
        .services
        .refunds
        .request(&alice, r.id, None)
        .await
        .unwrap();

    let rejected = app
        .services
        .refunds
        .decide(&alice, refund.id, RefundDecision::Rejected)
        .await
        .unwrap();
    assert_eq!(rejected.status, RefundStatus::Rejected);

    let history = app.services.payments.history(&alice).await.unwrap();
    assert_eq!(history[0].status, PaymentStatus::Completed);

    let reservation = app.services.reservations.get(&alice, r.id).await.unwrap();
    assert_eq!(reservation.status, ReservationStatus::Completed);
}

#[tokio::test]
async fn one_payment_is_refunded_once() {
    let app = setup(date(2024, 5, 1)).await;
    let alice = app.client("alice@example.com").await;
    let r = paid_reservation(&app, &alice).await;
    app.services
        .reservations
        .update_status(&app.admin, r.id, "completed")
        .await
        .unwrap();

    let first = app.services.refunds.request(&alice, r.id, None).await.unwrap();
    let second = app.services.refunds.request(&alice, r.id, None).await.unwrap();

    app.services
        .refunds
        .decide(&alice, first.id, RefundDecision::Approved)
        .await
        .unwrap();
    let err = app
        .services
        .refunds
        .decide(&alice, second.id, RefundDecision::Approved)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidState(_)));

    // The failed approval rolled back; the second request is still open
    let refunds = app.services.refunds.list(&alice).await.unwrap();
    let statuses: Vec<_> = refunds
        .iter()
        .map(|refund| (refund.id, refund.status))
        .collect();
    assert!(statuses.contains(&(first.id, RefundStatus::Approved)));
    assert!(statuses.contains(&(second.id, RefundStatus::Pending)));

    let history = app.services.payments.history(&alice).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, PaymentStatus::Refunded);
}

#[tokio::test]
async fn unpaid_cancellation_is_approved_once() {
    let app = setup(date(2024, 5, 1)).await;
    let alice = app.client("alice@example.com").await;
    let car = app.vehicle(dec!(100)).await;
    let r = app
        .book(&alice, car.id, date(2024, 6, 1), date(2024, 6, 3))
        .await
        .unwrap();
    app.services.reservations.cancel(&alice, r.id).await.unwrap();

    let first = app.services.refunds.request(&alice, r.id, None).await.unwrap();
    let second = app.services.refunds.request(&alice, r.id, None).await.unwrap();

    app.services
        .refunds
        .decide(&alice, first.id, RefundDecision::Approved)
        .await
        .unwrap();
    let err = app
        .services
        .refunds
        .decide(&alice, second.id, RefundDecision::Approved)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidState(_)));

    // Rejecting the duplicate is still allowed
    let rejected = app
        .services
        .refunds
        .decide(&alice, second.id, RefundDecision::Rejected)
        .await
        .unwrap();
    assert_eq!(rejected.status, RefundStatus::Rejected);
}

#[tokio::test]
async fn refunded_completed_reservation_can_be_paid_again() {
    let app = setup(date(2024, 5, 1)).await;
    let alice = app.client("alice@example.com").await;
    let r = paid_reservation(&app, &alice).await;
    app.services
        .reservations
        .update_status(&app.admin, r.id, "completed")
        .await
        .unwrap();
    let refund = app.services.refunds.request(&alice, r.id, None).await.unwrap();
    app.services
        .refunds
        .decide(&alice, refund.id, RefundDecision::Approved)
        .await
        .unwrap();

    let receipt = app
        .services
        .payments
        .process(&alice, r.id, PaymentMethod::CreditCard)
        .await
        .unwrap();
    assert_eq!(receipt.payment.status, PaymentStatus::Completed);
    assert_eq!(receipt.payment.amount, dec!(200));
    assert_eq!(receipt.reservation_status, ReservationStatus::Completed);

    // The payment row is superseded in place, never duplicated
    let history = app.services.payments.history(&alice).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].method, PaymentMethod::CreditCard);
}
