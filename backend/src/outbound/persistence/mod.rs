//! PostgreSQL persistence adapters.
//!
//! Diesel repositories implementing the shipment and user store ports, the
//! shared connection pool and the embedded schema migrations. Row structs and
//! the generated schema stay private to this module.

mod diesel_basic_error_mapping;
mod diesel_shipment_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_shipment_repository::DieselShipmentRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
