#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

use fleet_rental::application::{CreateReservation, Registration, RentalServices};
use fleet_rental::domain::{
    AuthContext, Location, NewVehicle, RentalTier, Reservation, Role, Vehicle, VehicleType,
};
use fleet_rental::infrastructure::crypto::{JwtConfig, PasswordHasher};
use fleet_rental::shared::{FixedClock, KeyedLocks};
use fleet_rental::{init_database, DatabaseConfig, Migrator, SeaOrmRepositoryProvider};

pub const ADMIN_EMAIL: &str = "admin@fleet.test";
pub const ADMIN_PASSWORD: &str = "admin-secret";
pub const PASSWORD: &str = "client-secret";

pub struct TestApp {
    pub services: Arc<RentalServices>,
    pub db: DatabaseConnection,
    pub admin: AuthContext,
    pub jwt_config: JwtConfig,
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Fresh migrated in-memory database with the clock frozen on `today`
pub async fn setup(today: NaiveDate) -> TestApp {
    let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    let jwt_config = JwtConfig::new("integration-test-secret", 1);
    let services = Arc::new(RentalServices::new(
        Arc::new(SeaOrmRepositoryProvider::new(db.clone())),
        KeyedLocks::shared(Duration::from_secs(10)),
        Arc::new(FixedClock::on(today)),
        jwt_config.clone(),
        PasswordHasher::with_cost(4),
    ));

    assert!(services
        .identity
        .ensure_bootstrap_admin(ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .unwrap());
    let admin = services
        .identity
        .login(ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .unwrap()
        .user
        .auth_context();

    TestApp {
        services,
        db,
        admin,
        jwt_config,
    }
}

impl TestApp {
    pub async fn client(&self, email: &str) -> AuthContext {
        self.services
            .identity
            .register(
                None,
                Registration {
                    email: email.to_string(),
                    password: PASSWORD.to_string(),
                    role: Role::Client,
                    first_name: Some("Test".into()),
                    last_name: None,
                    phone: None,
                    driving_license: Some(format!("DL-{}", email)),
                    permissions: None,
                },
            )
            .await
            .unwrap()
            .auth_context()
    }

    pub async fn vehicle(&self, daily_rate: Decimal) -> Vehicle {
        self.vehicle_of(daily_rate, VehicleType::Sedan, Location::City)
            .await
    }

    pub async fn vehicle_of(
        &self,
        daily_rate: Decimal,
        vehicle_type: VehicleType,
        location: Location,
    ) -> Vehicle {
        self.services
            .fleet
            .add_vehicle(
                &self.admin,
                NewVehicle {
                    make: "Toyota".into(),
                    model: "Corolla".into(),
                    year: 2022,
                    daily_rate,
                    vehicle_type,
                    location,
                },
            )
            .await
            .unwrap()
    }

    pub async fn book(
        &self,
        ctx: &AuthContext,
        vehicle_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> fleet_rental::domain::DomainResult<Reservation> {
        self.services
            .reservations
            .create(
                ctx,
                CreateReservation {
                    vehicle_id,
                    start_date: start,
                    end_date: end,
                    rental_tier: RentalTier::Daily,
                },
            )
            .await
    }
}
