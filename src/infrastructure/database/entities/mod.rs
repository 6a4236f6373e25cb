//! Database entities module

pub mod damage_report;
pub mod favorite;
pub mod insurance;
pub mod payment;
pub mod refund;
pub mod reservation;
pub mod user;
pub mod vehicle;

pub use damage_report::Entity as DamageReport;
pub use favorite::Entity as Favorite;
pub use insurance::Entity as Insurance;
pub use payment::Entity as Payment;
pub use refund::Entity as Refund;
pub use reservation::Entity as Reservation;
pub use user::Entity as User;
pub use vehicle::Entity as Vehicle;
