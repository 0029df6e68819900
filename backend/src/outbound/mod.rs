//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM
//! - **memory**: process-local repositories for development and tests
//! - **cache**: the in-process shipment page cache
//! - **security**: JWT signing and Argon2 password verification
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business rules.

pub mod cache;
pub mod memory;
pub mod persistence;
pub mod security;
