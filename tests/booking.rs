mod common;

use rust_decimal_macros::dec;

use common::{date, setup};
use fleet_rental::application::CreateReservation;
use fleet_rental::domain::{
    DamageReportUpdate, DamageStatus, DomainError, NewDamageReport, PaymentMethod, PaymentStatus,
    RentalTier, ReservationStatus, VehicleStatus,
};

#[tokio::test]
async fn book_pay_damage_then_conflict() {
    let app = setup(date(2024, 5, 1)).await;
    let alice = app.client("alice@example.com").await;
    let car = app.vehicle(dec!(50)).await;

    let reservation = app
        .book(&alice, car.id, date(2024, 6, 1), date(2024, 6, 3))
        .await
        .unwrap();
    assert_eq!(reservation.total_price, dec!(100));
    assert_eq!(reservation.status, ReservationStatus::Pending);
    assert_eq!(reservation.damage_charge, dec!(0));

    let receipt = app
        .services
        .payments
        .process(&alice, reservation.id, PaymentMethod::CreditCard)
        .await
        .unwrap();
    assert_eq!(receipt.reservation_status, ReservationStatus::Confirmed);
    assert_eq!(receipt.payment.status, PaymentStatus::Completed);
    assert_eq!(receipt.payment.amount, dec!(100));
    assert!(receipt.payment.transaction_id.starts_with("txn_"));

    let report = app
        .services
        .damage
        .report(
            &alice,
            NewDamageReport {
                reservation_id: reservation.id,
                description: "Scratched rear bumper".into(),
                repair_cost: dec!(75),
            },
        )
        .await
        .unwrap();
    assert_eq!(report.status, DamageStatus::Reported);

    let details = app.services.fleet.get_vehicle(car.id).await.unwrap();
    assert_eq!(details.vehicle.status, VehicleStatus::Maintenance);
    let charged = app
        .services
        .reservations
        .get(&alice, reservation.id)
        .await
        .unwrap();
    assert_eq!(charged.damage_charge, dec!(75));

    let bob = app.client("bob@example.com").await;
    let err = app
        .book(&bob, car.id, date(2024, 6, 2), date(2024, 6, 4))
        .await
        .unwrap_err();
    match err {
        DomainError::BookingConflict {
            vehicle_id,
            conflicts,
            ..
        } => {
            assert_eq!(vehicle_id, car.id);
            assert_eq!(conflicts.len(), 1);
            assert_eq!(conflicts[0].id, reservation.id);
        }
        other => panic!("expected booking conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn touching_dates_conflict() {
    let app = setup(date(2024, 5, 1)).await;
    let alice = app.client("alice@example.com").await;
    let car = app.vehicle(dec!(40)).await;

    app.book(&alice, car.id, date(2024, 6, 1), date(2024, 6, 5))
        .await
        .unwrap();

    let err = app
        .book(&alice, car.id, date(2024, 6, 5), date(2024, 6, 8))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::BookingConflict { .. }));

    app.book(&alice, car.id, date(2024, 6, 6), date(2024, 6, 8))
        .await
        .unwrap();
}

#[tokio::test]
async fn cancelled_reservation_frees_the_interval() {
    let app = setup(date(2024, 5, 1)).await;
    let alice = app.client("alice@example.com").await;
    let bob = app.client("bob@example.com").await;
    let car = app.vehicle(dec!(40)).await;

    let first = app
        .book(&alice, car.id, date(2024, 6, 1), date(2024, 6, 5))
        .await
        .unwrap();
    let cancelled = app
        .services
        .reservations
        .cancel(&alice, first.id)
        .await
        .unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);

    // Cancelling twice is a no-op
    let again = app
        .services
        .reservations
        .cancel(&alice, first.id)
        .await
        .unwrap();
    assert_eq!(again.status, ReservationStatus::Cancelled);

    app.book(&bob, car.id, date(2024, 6, 2), date(2024, 6, 4))
        .await
        .unwrap();
}

#[tokio::test]
async fn completed_reservation_still_blocks_its_dates() {
    let app = setup(date(2024, 5, 1)).await;
    let alice = app.client("alice@example.com").await;
    let car = app.vehicle(dec!(40)).await;

    let r = app
        .book(&alice, car.id, date(2024, 6, 1), date(2024, 6, 3))
        .await
        .unwrap();
    app.services
        .payments
        .process(&alice, r.id, PaymentMethod::DebitCard)
        .await
        .unwrap();
    app.services
        .reservations
        .update_status(&app.admin, r.id, "completed")
        .await
        .unwrap();

    let err = app
        .book(&alice, car.id, date(2024, 6, 2), date(2024, 6, 4))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::BookingConflict { .. }));
}

#[tokio::test]
async fn rejects_bad_requests() {
    let app = setup(date(2024, 5, 1)).await;
    let alice = app.client("alice@example.com").await;
    let car = app.vehicle(dec!(40)).await;

    let past = app
        .book(&alice, car.id, date(2024, 4, 20), date(2024, 4, 22))
        .await
        .unwrap_err();
    assert!(matches!(past, DomainError::Validation(_)));

    let inverted = app
        .book(&alice, car.id, date(2024, 6, 5), date(2024, 6, 1))
        .await
        .unwrap_err();
    assert!(matches!(inverted, DomainError::Validation(_)));

    let same_day = app
        .book(&alice, car.id, date(2024, 6, 5), date(2024, 6, 5))
        .await
        .unwrap_err();
    assert!(matches!(same_day, DomainError::Validation(_)));

    let missing = app
        .book(&alice, 9_999, date(2024, 6, 1), date(2024, 6, 3))
        .await
        .unwrap_err();
    assert!(matches!(missing, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn prices_follow_the_rental_tier() {
    let app = setup(date(2024, 5, 1)).await;
    let alice = app.client("alice@example.com").await;
    let car = app.vehicle(dec!(50)).await;

    let monthly = app
        .services
        .reservations
        .create(
            &alice,
            CreateReservation {
                vehicle_id: car.id,
                start_date: date(2024, 6, 1),
                end_date: date(2024, 6, 4),
                rental_tier: RentalTier::Monthly,
            },
        )
        .await
        .unwrap();
    // Flat: 50 * 30 * 0.9 regardless of the interval length
    assert_eq!(monthly.total_price, dec!(1350));
    assert_eq!(monthly.rental_tier, RentalTier::Monthly);
}

#[tokio::test]
async fn maintenance_blocks_booking_until_cleared() {
    let app = setup(date(2024, 5, 1)).await;
    let alice = app.client("alice@example.com").await;
    let car = app.vehicle(dec!(30)).await;

    let r = app
        .book(&alice, car.id, date(2024, 6, 1), date(2024, 6, 2))
        .await
        .unwrap();
    app.services
        .damage
        .report(
            &alice,
            NewDamageReport {
                reservation_id: r.id,
                description: "Cracked windscreen".into(),
                repair_cost: dec!(120),
            },
        )
        .await
        .unwrap();

    let err = app
        .book(&alice, car.id, date(2024, 7, 1), date(2024, 7, 3))
        .await
        .unwrap_err();
    match err {
        DomainError::BookingConflict { conflicts, .. } => assert!(conflicts.is_empty()),
        other => panic!("expected booking conflict, got {other:?}"),
    }

    let availability = app
        .services
        .reservations
        .check_availability(car.id, date(2024, 7, 1), date(2024, 7, 3))
        .await
        .unwrap();
    assert!(!availability.is_available());
    assert!(availability.conflicts.is_empty());

    let cleared = app
        .services
        .fleet
        .clear_maintenance(&app.admin, car.id)
        .await
        .unwrap();
    assert_eq!(cleared.status, VehicleStatus::Available);

    app.book(&alice, car.id, date(2024, 7, 1), date(2024, 7, 3))
        .await
        .unwrap();
}

#[tokio::test]
async fn damage_update_propagates_latest_cost() {
    let app = setup(date(2024, 5, 1)).await;
    let alice = app.client("alice@example.com").await;
    let car = app.vehicle(dec!(30)).await;
    let r = app
        .book(&alice, car.id, date(2024, 6, 1), date(2024, 6, 2))
        .await
        .unwrap();

    let report = app
        .services
        .damage
        .report(
            &alice,
            NewDamageReport {
                reservation_id: r.id,
                description: "Dent".into(),
                repair_cost: dec!(40),
            },
        )
        .await
        .unwrap();

    let updated = app
        .services
        .damage
        .update(
            &app.admin,
            report.id,
            DamageReportUpdate {
                status: Some(DamageStatus::Inspected),
                repair_cost: Some(dec!(55.50)),
                description: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, DamageStatus::Inspected);
    assert_eq!(updated.repair_cost, dec!(55.50));

    let reservation = app.services.reservations.get(&alice, r.id).await.unwrap();
    assert_eq!(reservation.damage_charge, dec!(55.50));

    let forbidden = app
        .services
        .damage
        .update(&alice, report.id, DamageReportUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(forbidden, DomainError::Forbidden(_)));
}

#[tokio::test]
async fn damage_on_cancelled_reservation_is_rejected() {
    let app = setup(date(2024, 5, 1)).await;
    let alice = app.client("alice@example.com").await;
    let car = app.vehicle(dec!(30)).await;
    let r = app
        .book(&alice, car.id, date(2024, 6, 1), date(2024, 6, 2))
        .await
        .unwrap();
    app.services.reservations.cancel(&alice, r.id).await.unwrap();

    let err = app
        .services
        .damage
        .report(
            &alice,
            NewDamageReport {
                reservation_id: r.id,
                description: "Dent".into(),
                repair_cost: dec!(40),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidState(_)));
}

#[tokio::test]
async fn other_clients_cannot_see_a_reservation() {
    let app = setup(date(2024, 5, 1)).await;
    let alice = app.client("alice@example.com").await;
    let mallory = app.client("mallory@example.com").await;
    let car = app.vehicle(dec!(30)).await;
    let r = app
        .book(&alice, car.id, date(2024, 6, 1), date(2024, 6, 2))
        .await
        .unwrap();

    let err = app.services.reservations.get(&mallory, r.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
    let err = app.services.reservations.cancel(&mallory, r.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));

    let mine = app.services.reservations.list_for_user(&alice).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert!(mine[0].payment.is_none());
    assert!(app
        .services
        .reservations
        .list_for_user(&mallory)
        .await
        .unwrap()
        .is_empty());
}
