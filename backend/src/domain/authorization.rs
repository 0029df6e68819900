//! Role-based access gate.
//!
//! Every API operation is listed in one static table with the roles allowed
//! to call it. Inbound adapters consult [`authorize`] before invoking any
//! service so a denied call has no side effects, cache reads included.

use std::fmt;

use super::{Error, Principal, Role};

/// Operations exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Login,
    Me,
    ListShipments,
    GetShipment,
    CreateShipment,
    UpdateShipment,
    DeleteShipment,
    FlagShipment,
}

impl Operation {
    /// Operation name used in logs and error messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Me => "me",
            Self::ListShipments => "shipments",
            Self::GetShipment => "shipment",
            Self::CreateShipment => "createShipment",
            Self::UpdateShipment => "updateShipment",
            Self::DeleteShipment => "deleteShipment",
            Self::FlagShipment => "flagShipment",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who may call an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No identity required.
    Open,
    /// An identity holding one of the listed roles.
    Roles(&'static [KnownRole]),
}

/// Roles that appear in the access table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownRole {
    Admin,
    Employee,
}

impl KnownRole {
    fn grants(self, role: &Role) -> bool {
        matches!(
            (self, role),
            (Self::Admin, Role::Admin) | (Self::Employee, Role::Employee)
        )
    }
}

const STAFF: &[KnownRole] = &[KnownRole::Admin, KnownRole::Employee];
const ADMIN_ONLY: &[KnownRole] = &[KnownRole::Admin];

/// The access table.
pub const ACCESS_TABLE: [(Operation, Access); 8] = [
    (Operation::Login, Access::Open),
    (Operation::Me, Access::Roles(STAFF)),
    (Operation::ListShipments, Access::Roles(STAFF)),
    (Operation::GetShipment, Access::Roles(STAFF)),
    (Operation::CreateShipment, Access::Roles(STAFF)),
    (Operation::UpdateShipment, Access::Roles(STAFF)),
    (Operation::DeleteShipment, Access::Roles(ADMIN_ONLY)),
    (Operation::FlagShipment, Access::Roles(STAFF)),
];

/// Access rule for `operation`.
pub fn access_for(operation: Operation) -> Access {
    ACCESS_TABLE
        .iter()
        .find(|(op, _)| *op == operation)
        .map_or(Access::Roles(&[]), |(_, access)| *access)
}

/// Outcome of a successful gate check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorized<'a> {
    /// The operation is open; any caller passes.
    Anyone,
    /// The caller's role is listed for the operation.
    Principal(&'a Principal),
}

impl<'a> Authorized<'a> {
    /// The admitted principal, if the operation required one.
    pub fn principal(&self) -> Option<&'a Principal> {
        match self {
            Self::Anyone => None,
            Self::Principal(principal) => Some(principal),
        }
    }
}

/// Decide whether `caller` may perform `operation`.
///
/// Returns `unauthorized` when a role is required and no identity was
/// established, and `forbidden` when the identity lacks a listed role.
///
/// # Examples
/// ```
/// use tracking_backend::domain::{authorize, ErrorCode, Operation, Principal, Role};
///
/// let employee = Principal::new("employee", Role::Employee);
/// assert!(authorize(Operation::ListShipments, Some(&employee)).is_ok());
///
/// let err = authorize(Operation::DeleteShipment, Some(&employee)).expect_err("admin only");
/// assert_eq!(err.code(), ErrorCode::Forbidden);
/// ```
pub fn authorize(
    operation: Operation,
    caller: Option<&Principal>,
) -> Result<Authorized<'_>, Error> {
    match access_for(operation) {
        Access::Open => Ok(Authorized::Anyone),
        Access::Roles(roles) => {
            let Some(principal) = caller else {
                return Err(Error::unauthorized("authentication required"));
            };
            if roles.iter().any(|known| known.grants(principal.role())) {
                Ok(Authorized::Principal(principal))
            } else {
                Err(Error::forbidden(format!(
                    "role {} may not perform {operation}",
                    principal.role()
                )))
            }
        }
    }
}
