//! Shipment filter compilation.
//!
//! An optional [`ShipmentFilter`] compiles to a [`CompiledFilter`]: either
//! [`CompiledFilter::Unfiltered`] (no field set) or a conjunction of
//! independent [`FieldPredicate`]s. Stores evaluate the predicate list
//! directly or translate each entry into a bound query parameter; nothing is
//! ever spliced into query text.

use super::{Shipment, ShipmentStatus};

/// Optional criteria for listing shipments. Every field is independent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShipmentFilter {
    pub shipper_name: Option<String>,
    pub carrier_name: Option<String>,
    pub status: Option<ShipmentStatus>,
    pub pickup_location: Option<String>,
    pub delivery_location: Option<String>,
    pub flagged: Option<bool>,
}

/// Free-text shipment columns that support substring matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    /// Shipper name.
    ShipperName,
    /// Carrier name.
    CarrierName,
    /// Pickup location.
    PickupLocation,
    /// Delivery location.
    DeliveryLocation,
}

impl TextField {
    /// Wire name used in signatures and error details.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ShipperName => "shipperName",
            Self::CarrierName => "carrierName",
            Self::PickupLocation => "pickupLocation",
            Self::DeliveryLocation => "deliveryLocation",
        }
    }

    /// Read the field from a shipment.
    pub fn value(self, shipment: &Shipment) -> &str {
        let details = shipment.details();
        match self {
            Self::ShipperName => details.shipper_name.as_str(),
            Self::CarrierName => details.carrier_name.as_str(),
            Self::PickupLocation => details.pickup_location.as_str(),
            Self::DeliveryLocation => details.delivery_location.as_str(),
        }
    }
}

/// One field test. A shipment passes a predicate when it passes every entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPredicate {
    /// Case-insensitive substring containment. An empty needle matches all.
    Contains {
        /// Column under test.
        field: TextField,
        /// Substring as supplied by the caller.
        needle: String,
    },
    /// Exact status equality.
    StatusIs(ShipmentStatus),
    /// Exact flag equality.
    FlaggedIs(bool),
}

impl FieldPredicate {
    /// Evaluate against one shipment.
    pub fn matches(&self, shipment: &Shipment) -> bool {
        match self {
            Self::Contains { field, needle } => field
                .value(shipment)
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            Self::StatusIs(status) => shipment.details().status == *status,
            Self::FlaggedIs(flagged) => shipment.flagged() == *flagged,
        }
    }

    fn signature(&self) -> String {
        // Length-prefix free text so no needle can forge a separator.
        match self {
            Self::Contains { field, needle } => {
                let folded = needle.to_lowercase();
                format!("{}~{}:{}", field.name(), folded.len(), folded)
            }
            Self::StatusIs(status) => format!("status={status}"),
            Self::FlaggedIs(flagged) => format!("flagged={flagged}"),
        }
    }
}

/// A non-empty conjunction of field predicates in canonical field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentPredicate {
    clauses: Vec<FieldPredicate>,
}

impl ShipmentPredicate {
    /// The individual field tests.
    pub fn clauses(&self) -> &[FieldPredicate] {
        &self.clauses
    }

    /// Whether `shipment` passes every clause.
    pub fn matches(&self, shipment: &Shipment) -> bool {
        self.clauses.iter().all(|clause| clause.matches(shipment))
    }
}

/// Result of compiling an optional filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompiledFilter {
    /// No constraint: stores take the plain scan path.
    Unfiltered,
    /// At least one field constraint.
    Predicate(ShipmentPredicate),
}

impl CompiledFilter {
    /// Compile an optional filter.
    ///
    /// A missing filter and a filter with every field unset both compile to
    /// [`CompiledFilter::Unfiltered`]. An empty string is a real constraint.
    ///
    /// # Examples
    /// ```
    /// use tracking_backend::domain::{CompiledFilter, ShipmentFilter};
    ///
    /// assert_eq!(CompiledFilter::compile(None), CompiledFilter::Unfiltered);
    /// assert_eq!(
    ///     CompiledFilter::compile(Some(&ShipmentFilter::default())),
    ///     CompiledFilter::Unfiltered
    /// );
    ///
    /// let filter = ShipmentFilter { carrier_name: Some(String::new()), ..ShipmentFilter::default() };
    /// assert!(matches!(CompiledFilter::compile(Some(&filter)), CompiledFilter::Predicate(_)));
    /// ```
    pub fn compile(filter: Option<&ShipmentFilter>) -> Self {
        let Some(filter) = filter else {
            return Self::Unfiltered;
        };

        let text = [
            (TextField::ShipperName, &filter.shipper_name),
            (TextField::CarrierName, &filter.carrier_name),
            (TextField::PickupLocation, &filter.pickup_location),
            (TextField::DeliveryLocation, &filter.delivery_location),
        ];
        let mut clauses: Vec<FieldPredicate> = text
            .into_iter()
            .filter_map(|(field, value)| {
                value.as_ref().map(|needle| FieldPredicate::Contains {
                    field,
                    needle: needle.clone(),
                })
            })
            .collect();
        clauses.extend(filter.status.map(FieldPredicate::StatusIs));
        clauses.extend(filter.flagged.map(FieldPredicate::FlaggedIs));

        if clauses.is_empty() {
            Self::Unfiltered
        } else {
            Self::Predicate(ShipmentPredicate { clauses })
        }
    }

    /// The predicate to apply, or `None` on the unfiltered path.
    pub fn predicate(&self) -> Option<&ShipmentPredicate> {
        match self {
            Self::Unfiltered => None,
            Self::Predicate(predicate) => Some(predicate),
        }
    }

    /// Whether `shipment` is in the filtered set.
    pub fn matches(&self, shipment: &Shipment) -> bool {
        self.predicate()
            .is_none_or(|predicate| predicate.matches(shipment))
    }

    /// Canonical text form. Filters selecting the same records under
    /// case-insensitive matching share a signature.
    pub fn signature(&self) -> String {
        match self {
            Self::Unfiltered => "*".to_owned(),
            Self::Predicate(predicate) => predicate
                .clauses
                .iter()
                .map(FieldPredicate::signature)
                .collect::<Vec<_>>()
                .join("&"),
        }
    }
}
