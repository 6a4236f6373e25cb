mod common;

use rust_decimal_macros::dec;

use common::{date, setup, ADMIN_EMAIL, PASSWORD};
use fleet_rental::application::Registration;
use fleet_rental::domain::{
    DomainError, InsuranceKind, Location, NewDamageReport, NewInsurance, PaymentMethod,
    ReservationStatus, Role, VehicleSearch, VehicleStatus, VehicleType,
};
use fleet_rental::shared::validate_pagination;

#[tokio::test]
async fn status_machine_follows_the_lifecycle() {
    let app = setup(date(2024, 5, 1)).await;
    let alice = app.client("alice@example.com").await;
    let car = app.vehicle(dec!(50)).await;
    let r = app
        .book(&alice, car.id, date(2024, 6, 1), date(2024, 6, 3))
        .await
        .unwrap();
    let status = &app.services.reservations;

    let skipped = status
        .update_status(&app.admin, r.id, "completed")
        .await
        .unwrap_err();
    assert!(matches!(skipped, DomainError::InvalidState(_)));

    let unknown = status
        .update_status(&app.admin, r.id, "archived")
        .await
        .unwrap_err();
    assert!(matches!(unknown, DomainError::Validation(_)));

    let by_client = status
        .update_status(&alice, r.id, "confirmed")
        .await
        .unwrap_err();
    assert!(matches!(by_client, DomainError::Forbidden(_)));

    let confirmed = status
        .update_status(&app.admin, r.id, "confirmed")
        .await
        .unwrap();
    assert_eq!(confirmed.status, ReservationStatus::Confirmed);

    // Same status again is a no-op
    let unchanged = status
        .update_status(&app.admin, r.id, "confirmed")
        .await
        .unwrap();
    assert_eq!(unchanged.status, ReservationStatus::Confirmed);

    let back = status
        .update_status(&app.admin, r.id, "pending")
        .await
        .unwrap_err();
    assert!(matches!(back, DomainError::InvalidState(_)));

    let completed = status
        .update_status(&app.admin, r.id, "completed")
        .await
        .unwrap();
    assert_eq!(completed.status, ReservationStatus::Completed);

    let cancel_completed = status.cancel(&alice, r.id).await.unwrap_err();
    assert!(matches!(cancel_completed, DomainError::InvalidState(_)));
}

#[tokio::test]
async fn payment_never_moves_status_backwards() {
    let app = setup(date(2024, 5, 1)).await;
    let alice = app.client("alice@example.com").await;
    let car = app.vehicle(dec!(50)).await;
    let r = app
        .book(&alice, car.id, date(2024, 6, 1), date(2024, 6, 3))
        .await
        .unwrap();
    app.services
        .reservations
        .update_status(&app.admin, r.id, "confirmed")
        .await
        .unwrap();

    let receipt = app
        .services
        .payments
        .process(&alice, r.id, PaymentMethod::CreditCard)
        .await
        .unwrap();
    assert_eq!(receipt.reservation_status, ReservationStatus::Confirmed);
}

#[tokio::test]
async fn delete_cascades_but_keeps_refunds() {
    let app = setup(date(2024, 5, 1)).await;
    let alice = app.client("alice@example.com").await;
    let car = app.vehicle(dec!(100)).await;
    let r = app
        .book(&alice, car.id, date(2024, 6, 1), date(2024, 6, 3))
        .await
        .unwrap();
    app.services
        .payments
        .process(&alice, r.id, PaymentMethod::CreditCard)
        .await
        .unwrap();
    app.services
        .damage
        .report(
            &alice,
            NewDamageReport {
                reservation_id: r.id,
                description: "Broken mirror".into(),
                repair_cost: dec!(30),
            },
        )
        .await
        .unwrap();
    app.services.reservations.cancel(&alice, r.id).await.unwrap();
    let refund = app
        .services
        .refunds
        .request(&alice, r.id, None)
        .await
        .unwrap();

    let forbidden = app
        .services
        .reservations
        .delete(&alice, r.id)
        .await
        .unwrap_err();
    assert!(matches!(forbidden, DomainError::Forbidden(_)));

    app.services.reservations.delete(&app.admin, r.id).await.unwrap();

    let gone = app.services.reservations.get(&alice, r.id).await.unwrap_err();
    assert!(matches!(gone, DomainError::NotFound { .. }));
    assert!(app.services.payments.history(&alice).await.unwrap().is_empty());
    assert!(app.services.damage.list(&app.admin).await.unwrap().is_empty());

    let refunds = app.services.refunds.list(&alice).await.unwrap();
    assert_eq!(refunds.len(), 1);
    assert_eq!(refunds[0].id, refund.id);
    assert_eq!(refunds[0].reservation_id, None);

    let missing = app
        .services
        .reservations
        .delete(&app.admin, r.id)
        .await
        .unwrap_err();
    assert!(matches!(missing, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn vehicle_with_history_cannot_be_deleted() {
    let app = setup(date(2024, 5, 1)).await;
    let alice = app.client("alice@example.com").await;
    let busy = app.vehicle(dec!(50)).await;
    let idle = app.vehicle(dec!(50)).await;
    app.book(&alice, busy.id, date(2024, 6, 1), date(2024, 6, 3))
        .await
        .unwrap();

    let err = app
        .services
        .fleet
        .delete_vehicle(&app.admin, busy.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));

    app.services.fleet.add_favorite(&alice, idle.id).await.unwrap();
    app.services
        .fleet
        .delete_vehicle(&app.admin, idle.id)
        .await
        .unwrap();
    let err = app.services.fleet.get_vehicle(idle.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
    assert!(app
        .services
        .fleet
        .list_favorites(&alice)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn fleet_registry_rules() {
    let app = setup(date(2024, 5, 1)).await;
    let alice = app.client("alice@example.com").await;
    let sedan = app.vehicle(dec!(40)).await;
    let jeep = app
        .vehicle_of(dec!(90), VehicleType::FourByFour, Location::Desert)
        .await;

    let err = app
        .services
        .fleet
        .add_vehicle(
            &alice,
            fleet_rental::domain::NewVehicle {
                make: "Fiat".into(),
                model: "Panda".into(),
                year: 2020,
                daily_rate: dec!(20),
                vehicle_type: VehicleType::Sedan,
                location: Location::City,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));

    let cheap = app
        .services
        .fleet
        .search(VehicleSearch {
            max_price: Some(dec!(50)),
            ..VehicleSearch::default()
        })
        .await
        .unwrap();
    assert_eq!(cheap.len(), 1);
    assert_eq!(cheap[0].id, sedan.id);

    let desert = app.services.fleet.by_terrain(Location::Desert).await.unwrap();
    assert_eq!(desert.len(), 1);
    assert_eq!(desert[0].id, jeep.id);

    let insurance = app
        .services
        .fleet
        .add_insurance(
            &app.admin,
            NewInsurance {
                vehicle_id: jeep.id,
                provider: "Allied".into(),
                kind: InsuranceKind::Full,
                expiry_date: date(2025, 1, 1),
                coverage_amount: dec!(25000),
            },
        )
        .await
        .unwrap();
    let details = app.services.fleet.get_vehicle(jeep.id).await.unwrap();
    assert_eq!(details.insurances.len(), 1);
    assert_eq!(details.insurances[0].id, insurance.id);

    app.services.fleet.add_favorite(&alice, jeep.id).await.unwrap();
    let dup = app
        .services
        .fleet
        .add_favorite(&alice, jeep.id)
        .await
        .unwrap_err();
    assert!(matches!(dup, DomainError::Conflict(_)));

    let available = app.services.fleet.list_available().await.unwrap();
    assert_eq!(available.len(), 2);
    assert!(available.iter().all(|v| v.status == VehicleStatus::Available));
}

#[tokio::test]
async fn identity_rules() {
    let app = setup(date(2024, 5, 1)).await;

    // Bootstrap runs once
    assert!(!app
        .services
        .identity
        .ensure_bootstrap_admin(ADMIN_EMAIL, "whatever")
        .await
        .unwrap());

    let alice = app.client("alice@example.com").await;
    let dup = app
        .services
        .identity
        .register(
            None,
            Registration {
                email: "ALICE@example.com".into(),
                password: PASSWORD.into(),
                role: Role::Client,
                first_name: None,
                last_name: None,
                phone: None,
                driving_license: Some("DL-2".into()),
                permissions: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(dup, DomainError::Conflict(_)));

    let admin_request = Registration {
        email: "ops@example.com".into(),
        password: PASSWORD.into(),
        role: Role::Admin,
        first_name: None,
        last_name: None,
        phone: None,
        driving_license: None,
        permissions: Some("all".into()),
    };
    let err = app
        .services
        .identity
        .register(Some(&alice), admin_request.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));
    let ops = app
        .services
        .identity
        .register(Some(&app.admin), admin_request)
        .await
        .unwrap();
    assert_eq!(ops.role(), Role::Admin);

    let bad = app
        .services
        .identity
        .login("alice@example.com", "wrong-password")
        .await
        .unwrap_err();
    assert!(matches!(bad, DomainError::Unauthorized(_)));

    let session = app
        .services
        .identity
        .login("alice@example.com", PASSWORD)
        .await
        .unwrap();
    assert_eq!(session.user.id, alice.user_id);
    assert!(!session.token.is_empty());

    let users = app
        .services
        .identity
        .list_users(&app.admin, validate_pagination(None, None))
        .await
        .unwrap();
    assert_eq!(users.total, 3);
    let err = app
        .services
        .identity
        .list_users(&alice, validate_pagination(None, None))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));
}

#[tokio::test]
async fn stats_summarize_the_fleet() {
    let app = setup(date(2024, 5, 1)).await;
    let alice = app.client("alice@example.com").await;
    let popular = app.vehicle(dec!(50)).await;
    let quiet = app.vehicle(dec!(80)).await;

    let first = app
        .book(&alice, popular.id, date(2024, 6, 1), date(2024, 6, 3))
        .await
        .unwrap();
    app.book(&alice, popular.id, date(2024, 7, 1), date(2024, 7, 2))
        .await
        .unwrap();
    app.book(&alice, quiet.id, date(2024, 6, 1), date(2024, 6, 2))
        .await
        .unwrap();

    app.services
        .payments
        .process(&alice, first.id, PaymentMethod::CreditCard)
        .await
        .unwrap();
    app.services
        .damage
        .report(
            &alice,
            NewDamageReport {
                reservation_id: first.id,
                description: "Chipped paint".into(),
                repair_cost: dec!(12.25),
            },
        )
        .await
        .unwrap();

    let stats = app.services.reporting.stats(&app.admin).await.unwrap();
    assert_eq!(stats.total_reservations, 3);
    assert_eq!(stats.revenue, dec!(100));
    assert_eq!(stats.damage_costs, dec!(12.25));
    assert_eq!(stats.top_vehicles[0].vehicle_id, popular.id);
    assert_eq!(stats.top_vehicles[0].reservations, 2);
    assert_eq!(stats.top_vehicles[1].vehicle_id, quiet.id);

    let err = app.services.reporting.stats(&alice).await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));
}
