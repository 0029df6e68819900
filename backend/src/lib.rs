//! Shipment tracking backend library.
//!
//! Hexagonal layout: [`domain`] holds the model, services and ports,
//! [`inbound`] adapts HTTP requests onto the driving ports, and [`outbound`]
//! implements the driven ports over PostgreSQL, process-local stores and
//! credential primitives.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
