mod common;

use std::sync::Arc;

use rust_decimal_macros::dec;
use tokio::task::JoinSet;

use common::{date, setup};
use fleet_rental::domain::{DomainError, PaymentMethod, ReservationStatus};

const CONTENDERS: usize = 8;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn overlapping_bookings_have_one_winner() {
    let app = setup(date(2024, 5, 1)).await;
    let car = app.vehicle(dec!(45)).await;

    let mut clients = Vec::new();
    for i in 0..CONTENDERS {
        clients.push(app.client(&format!("racer{i}@example.com")).await);
    }

    let app = Arc::new(app);
    let mut tasks = JoinSet::new();
    for (i, ctx) in clients.into_iter().enumerate() {
        let app = app.clone();
        let vehicle_id = car.id;
        tasks.spawn(async move {
            // Every interval shares 2024-06-10 with every other one
            let start = date(2024, 6, 1 + i as u32);
            app.book(&ctx, vehicle_id, start, date(2024, 6, 10)).await
        });
    }

    let mut won = 0;
    let mut conflicted = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined.unwrap() {
            Ok(_) => won += 1,
            Err(DomainError::BookingConflict { .. }) => conflicted += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
    assert_eq!(won, 1);
    assert_eq!(conflicted, CONTENDERS - 1);

    let page = app
        .services
        .reservations
        .list_all(&app.admin, fleet_rental::shared::validate_pagination(None, None))
        .await
        .unwrap();
    assert_eq!(page.total, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_payments_charge_once() {
    let app = setup(date(2024, 5, 1)).await;
    let alice = app.client("alice@example.com").await;
    let car = app.vehicle(dec!(45)).await;
    let reservation_id = app
        .book(&alice, car.id, date(2024, 6, 1), date(2024, 6, 3))
        .await
        .unwrap()
        .id;

    let app = Arc::new(app);
    let mut tasks = JoinSet::new();
    for _ in 0..4 {
        let app = app.clone();
        tasks.spawn(async move {
            app.services
                .payments
                .process(&alice, reservation_id, PaymentMethod::CreditCard)
                .await
        });
    }

    let mut paid = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined.unwrap() {
            Ok(receipt) => {
                assert_eq!(receipt.reservation_status, ReservationStatus::Confirmed);
                paid += 1;
            }
            Err(DomainError::InvalidState(_)) => {}
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
    assert_eq!(paid, 1);
    assert_eq!(app.services.payments.history(&alice).await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn disjoint_bookings_all_succeed() {
    let app = Arc::new(setup(date(2024, 5, 1)).await);
    let alice = app.client("alice@example.com").await;
    let car = app.vehicle(dec!(45)).await;

    let mut tasks = JoinSet::new();
    for week in 0..4u32 {
        let app = app.clone();
        let vehicle_id = car.id;
        tasks.spawn(async move {
            let start = date(2024, 6, 1 + week * 7);
            let end = date(2024, 6, 4 + week * 7);
            app.book(&alice, vehicle_id, start, end).await
        });
    }
    while let Some(joined) = tasks.join_next().await {
        joined.unwrap().unwrap();
    }
    assert_eq!(
        app.services.reservations.list_for_user(&alice).await.unwrap().len(),
        4
    );
}
