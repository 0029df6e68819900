//! Domain primitives, services and ports.
//!
//! Purpose: define the shipment and account model, the rules for listing and
//! editing shipments, the role gate, and the ports adapters plug into. Nothing
//! here knows about HTTP, SQL or token formats.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Shipment, ShipmentInput and friends: the tracked record and its rules.
//! - CompiledFilter / ShipmentListParams: filter compilation and paging.
//! - authorize / Operation: the access table.
//! - ShipmentService / AuthService: driving port implementations.

pub mod auth;
pub mod auth_service;
pub mod authorization;
pub mod error;
pub mod ports;
pub mod shipment;
pub mod shipment_filter;
pub mod shipment_listing;
pub mod shipment_service;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    AccessClaims, AccessToken, LoginCredentials, LoginValidationError, Principal, Role,
};
pub use self::auth_service::{AuthService, DEFAULT_TOKEN_TTL};
pub use self::authorization::{Access, Authorized, KnownRole, Operation, access_for, authorize};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::shipment::{
    DEFAULT_CURRENCY, SPECIAL_INSTRUCTIONS_MAX, Shipment, ShipmentDetails, ShipmentId,
    ShipmentInput, ShipmentStatus, ShipmentStatusParseError, ShipmentValidationError,
};
pub use self::shipment_filter::{
    CompiledFilter, FieldPredicate, ShipmentFilter, ShipmentPredicate, TextField,
};
pub use self::shipment_listing::{
    DEFAULT_SORT, ShipmentListParams, ShipmentPageRequest, ShipmentSortField, UnknownSortField,
    compare_shipments,
};
pub use self::shipment_service::ShipmentService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserAccount, UserId};
