//! Shipment records and the rules for creating and editing them.
//!
//! A [`Shipment`] is built from a validated [`ShipmentInput`] by
//! [`Shipment::create`] and edited in place by [`Shipment::apply_update`] and
//! [`Shipment::set_flagged`]. Persistence adapters rebuild stored rows with
//! [`Shipment::restore`].

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use uuid::Uuid;

/// Currency applied when a new shipment does not name one.
pub const DEFAULT_CURRENCY: &str = "USD";
/// Upper bound on special instructions, in characters.
pub const SPECIAL_INSTRUCTIONS_MAX: usize = 1000;

/// Opaque shipment identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShipmentId(Uuid);

impl ShipmentId {
    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a fresh identifier for a new shipment.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ShipmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ShipmentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Lifecycle status. Transitions between statuses are unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShipmentStatus {
    /// Registered, not yet collected.
    #[default]
    Pending,
    /// Collected from the shipper.
    PickedUp,
    /// Moving between hubs.
    InTransit,
    /// On the final delivery leg.
    OutForDelivery,
    /// Handed to the consignee.
    Delivered,
    /// Withdrawn before delivery.
    Cancelled,
    /// Behind schedule.
    Delayed,
}

impl ShipmentStatus {
    /// Every status, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Pending,
        Self::PickedUp,
        Self::InTransit,
        Self::OutForDelivery,
        Self::Delivered,
        Self::Cancelled,
        Self::Delayed,
    ];

    /// Canonical upper-snake-case name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::PickedUp => "PICKED_UP",
            Self::InTransit => "IN_TRANSIT",
            Self::OutForDelivery => "OUT_FOR_DELIVERY",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
            Self::Delayed => "DELAYED",
        }
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a status name is not one of [`ShipmentStatus::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown shipment status: {0}")]
pub struct ShipmentStatusParseError(pub String);

impl FromStr for ShipmentStatus {
    type Err = ShipmentStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ShipmentStatusParseError(s.to_owned()))
    }
}

/// Caller-supplied shipment fields for create and update.
///
/// `status` and `currency` are optional: create fills the defaults, update
/// keeps the stored value. Every other field is taken as given.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShipmentInput {
    pub shipment_number: String,
    pub shipper_name: String,
    pub shipper_email: Option<String>,
    pub shipper_phone: Option<String>,
    pub carrier_name: String,
    pub carrier_contact: Option<String>,
    pub pickup_location: String,
    pub pickup_date: Option<String>,
    pub delivery_location: String,
    pub delivery_date: Option<String>,
    pub tracking_number: Option<String>,
    pub status: Option<ShipmentStatus>,
    pub weight: Option<f64>,
    pub dimensions: Option<String>,
    pub rate: Option<f64>,
    pub currency: Option<String>,
    pub special_instructions: Option<String>,
}

/// Why a [`ShipmentInput`] was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShipmentValidationError {
    /// A required text field was blank.
    #[error("{field} is required")]
    Required {
        /// Wire name of the blank field.
        field: &'static str,
    },
    /// The shipper email is not an address.
    #[error("invalid email format")]
    InvalidEmail,
    /// A numeric amount was negative or not finite.
    #[error("{field} must be a finite number greater than or equal to zero")]
    InvalidAmount {
        /// Wire name of the offending amount.
        field: &'static str,
    },
    /// Special instructions exceed [`SPECIAL_INSTRUCTIONS_MAX`].
    #[error("specialInstructions must be at most {max} characters")]
    SpecialInstructionsTooLong {
        /// Maximum accepted length.
        max: usize,
    },
}

impl ShipmentValidationError {
    /// Wire name of the field the error concerns.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Required { field } | Self::InvalidAmount { field } => field,
            Self::InvalidEmail => "shipperEmail",
            Self::SpecialInstructionsTooLong { .. } => "specialInstructions",
        }
    }

    /// Machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Required { .. } => "required",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidAmount { .. } => "invalid_amount",
            Self::SpecialInstructionsTooLong { .. } => "too_long",
        }
    }
}

static EMAIL_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn email_regex() -> Option<&'static Regex> {
    EMAIL_RE
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok())
        .as_ref()
}

fn is_email(value: &str) -> bool {
    email_regex().is_some_and(|re| re.is_match(value))
}

impl ShipmentInput {
    /// Check required fields, amounts, email shape and length limits.
    ///
    /// Shipment number uniqueness depends on the store and is checked by the
    /// service.
    ///
    /// # Examples
    /// ```
    /// use tracking_backend::domain::{ShipmentInput, ShipmentValidationError};
    ///
    /// let input = ShipmentInput {
    ///     shipment_number: "SHP-1".into(),
    ///     shipper_name: "Acme".into(),
    ///     carrier_name: "FastFreight".into(),
    ///     pickup_location: "NYC".into(),
    ///     delivery_location: "".into(),
    ///     ..ShipmentInput::default()
    /// };
    /// assert_eq!(
    ///     input.validate(),
    ///     Err(ShipmentValidationError::Required { field: "deliveryLocation" })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), ShipmentValidationError> {
        let required = [
            ("shipmentNumber", &self.shipment_number),
            ("shipperName", &self.shipper_name),
            ("carrierName", &self.carrier_name),
            ("pickupLocation", &self.pickup_location),
            ("deliveryLocation", &self.delivery_location),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ShipmentValidationError::Required { field: *field });
        }

        let email = self.shipper_email.as_deref().unwrap_or_default();
        if !email.is_empty() && !is_email(email) {
            return Err(ShipmentValidationError::InvalidEmail);
        }

        for (field, amount) in [("weight", self.weight), ("rate", self.rate)] {
            if amount.is_some_and(|value| !(value.is_finite() && value >= 0.0)) {
                return Err(ShipmentValidationError::InvalidAmount { field });
            }
        }

        if self
            .special_instructions
            .as_deref()
            .is_some_and(|text| text.chars().count() > SPECIAL_INSTRUCTIONS_MAX)
        {
            return Err(ShipmentValidationError::SpecialInstructionsTooLong {
                max: SPECIAL_INSTRUCTIONS_MAX,
            });
        }

        Ok(())
    }
}

/// Stored, caller-editable part of a shipment.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentDetails {
    pub shipment_number: String,
    pub shipper_name: String,
    pub shipper_email: Option<String>,
    pub shipper_phone: Option<String>,
    pub carrier_name: String,
    pub carrier_contact: Option<String>,
    pub pickup_location: String,
    pub pickup_date: Option<String>,
    pub delivery_location: String,
    pub delivery_date: Option<String>,
    pub tracking_number: Option<String>,
    pub status: ShipmentStatus,
    pub weight: Option<f64>,
    pub dimensions: Option<String>,
    pub rate: Option<f64>,
    pub currency: String,
    pub special_instructions: Option<String>,
}

/// A tracked shipment.
///
/// ## Invariants
/// - `updated_at >= created_at`, and `updated_at` never moves backwards.
/// - `created_at` and `id` never change after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Shipment {
    id: ShipmentId,
    details: ShipmentDetails,
    flagged: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Shipment {
    /// Build a new shipment from validated input.
    ///
    /// Status defaults to [`ShipmentStatus::Pending`], currency to
    /// [`DEFAULT_CURRENCY`]; `flagged` always starts false.
    pub fn create(id: ShipmentId, input: ShipmentInput, now: DateTime<Utc>) -> Self {
        let ShipmentInput {
            shipment_number,
            shipper_name,
            shipper_email,
            shipper_phone,
            carrier_name,
            carrier_contact,
            pickup_location,
            pickup_date,
            delivery_location,
            delivery_date,
            tracking_number,
            status,
            weight,
            dimensions,
            rate,
            currency,
            special_instructions,
        } = input;

        Self {
            id,
            details: ShipmentDetails {
                shipment_number,
                shipper_name,
                shipper_email,
                shipper_phone,
                carrier_name,
                carrier_contact,
                pickup_location,
                pickup_date,
                delivery_location,
                delivery_date,
                tracking_number,
                status: status.unwrap_or_default(),
                weight,
                dimensions,
                rate,
                currency: currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_owned()),
                special_instructions,
            },
            flagged: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a stored shipment.
    ///
    /// A stored `updated_at` earlier than `created_at` is raised to it.
    pub fn restore(
        id: ShipmentId,
        details: ShipmentDetails,
        flagged: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            details,
            flagged,
            created_at,
            updated_at: updated_at.max(created_at),
        }
    }

    /// Overwrite the editable fields from `input`.
    ///
    /// Every field is replaced, absent values included, except `status` and
    /// `currency`, which change only when supplied. `flagged` and
    /// `created_at` are untouched.
    pub fn apply_update(&mut self, input: ShipmentInput, now: DateTime<Utc>) {
        let ShipmentInput {
            shipment_number,
            shipper_name,
            shipper_email,
            shipper_phone,
            carrier_name,
            carrier_contact,
            pickup_location,
            pickup_date,
            delivery_location,
            delivery_date,
            tracking_number,
            status,
            weight,
            dimensions,
            rate,
            currency,
            special_instructions,
        } = input;

        let details = &mut self.details;
        details.shipment_number = shipment_number;
        details.shipper_name = shipper_name;
        details.shipper_email = shipper_email;
        details.shipper_phone = shipper_phone;
        details.carrier_name = carrier_name;
        details.carrier_contact = carrier_contact;
        details.pickup_location = pickup_location;
        details.pickup_date = pickup_date;
        details.delivery_location = delivery_location;
        details.delivery_date = delivery_date;
        details.tracking_number = tracking_number;
        if let Some(status) = status {
            details.status = status;
        }
        details.weight = weight;
        details.dimensions = dimensions;
        details.rate = rate;
        if let Some(currency) = currency {
            details.currency = currency;
        }
        details.special_instructions = special_instructions;
        self.touch(now);
    }

    /// Set the review flag. No other field changes apart from `updated_at`.
    pub fn set_flagged(&mut self, flagged: bool, now: DateTime<Utc>) {
        self.flagged = flagged;
        self.touch(now);
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = self.updated_at.max(now);
    }

    /// Stable identifier.
    pub fn id(&self) -> ShipmentId {
        self.id
    }

    /// Editable fields.
    pub fn details(&self) -> &ShipmentDetails {
        &self.details
    }

    /// Shortcut for the unique shipment number.
    pub fn shipment_number(&self) -> &str {
        self.details.shipment_number.as_str()
    }

    /// Whether the shipment is flagged for review.
    pub fn flagged(&self) -> bool {
        self.flagged
    }

    /// Creation instant.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification instant.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Consume the shipment, keeping its editable fields.
    pub fn into_details(self) -> ShipmentDetails {
        self.details
    }
}
