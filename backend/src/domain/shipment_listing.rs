//! Page and sort resolution for shipment listings.
//!
//! Caller parameters arrive as raw optional values; [`ShipmentListParams::resolve`]
//! turns them into a [`ShipmentPageRequest`] or a validation [`Error`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use pagination::{PageParams, PageRequest, PageRequestError, SortDirection, SortOrder};
use serde_json::json;

use super::{Error, Shipment};

/// Concrete page request over shipments.
pub type ShipmentPageRequest = PageRequest<ShipmentSortField>;

/// Keys a shipment listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShipmentSortField {
    Id,
    ShipmentNumber,
    ShipperName,
    CarrierName,
    PickupLocation,
    PickupDate,
    DeliveryLocation,
    DeliveryDate,
    TrackingNumber,
    Status,
    Weight,
    Rate,
    Currency,
    Flagged,
    CreatedAt,
    UpdatedAt,
}

impl ShipmentSortField {
    /// Every sortable key.
    pub const ALL: [Self; 16] = [
        Self::Id,
        Self::ShipmentNumber,
        Self::ShipperName,
        Self::CarrierName,
        Self::PickupLocation,
        Self::PickupDate,
        Self::DeliveryLocation,
        Self::DeliveryDate,
        Self::TrackingNumber,
        Self::Status,
        Self::Weight,
        Self::Rate,
        Self::Currency,
        Self::Flagged,
        Self::CreatedAt,
        Self::UpdatedAt,
    ];

    /// camelCase key as accepted in `sortBy`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::ShipmentNumber => "shipmentNumber",
            Self::ShipperName => "shipperName",
            Self::CarrierName => "carrierName",
            Self::PickupLocation => "pickupLocation",
            Self::PickupDate => "pickupDate",
            Self::DeliveryLocation => "deliveryLocation",
            Self::DeliveryDate => "deliveryDate",
            Self::TrackingNumber => "trackingNumber",
            Self::Status => "status",
            Self::Weight => "weight",
            Self::Rate => "rate",
            Self::Currency => "currency",
            Self::Flagged => "flagged",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }

    /// Ascending comparison of two shipments on this key.
    ///
    /// Missing optional values sort after present ones, matching PostgreSQL's
    /// default `NULLS LAST` for ascending order.
    pub fn compare(self, a: &Shipment, b: &Shipment) -> Ordering {
        let (da, db) = (a.details(), b.details());
        match self {
            Self::Id => a.id().cmp(&b.id()),
            Self::ShipmentNumber => da.shipment_number.cmp(&db.shipment_number),
            Self::ShipperName => da.shipper_name.cmp(&db.shipper_name),
            Self::CarrierName => da.carrier_name.cmp(&db.carrier_name),
            Self::PickupLocation => da.pickup_location.cmp(&db.pickup_location),
            Self::PickupDate => nulls_last(&da.pickup_date, &db.pickup_date, Ord::cmp),
            Self::DeliveryLocation => da.delivery_location.cmp(&db.delivery_location),
            Self::DeliveryDate => nulls_last(&da.delivery_date, &db.delivery_date, Ord::cmp),
            Self::TrackingNumber => {
                nulls_last(&da.tracking_number, &db.tracking_number, Ord::cmp)
            }
            Self::Status => da.status.as_str().cmp(db.status.as_str()),
            Self::Weight => nulls_last(&da.weight, &db.weight, f64::total_cmp),
            Self::Rate => nulls_last(&da.rate, &db.rate, f64::total_cmp),
            Self::Currency => da.currency.cmp(&db.currency),
            Self::Flagged => a.flagged().cmp(&b.flagged()),
            Self::CreatedAt => a.created_at().cmp(&b.created_at()),
            Self::UpdatedAt => a.updated_at().cmp(&b.updated_at()),
        }
    }
}

fn nulls_last<T>(a: &Option<T>, b: &Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl fmt::Display for ShipmentSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when `sortBy` names no sortable key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported sort key: {0}")]
pub struct UnknownSortField(pub String);

impl FromStr for ShipmentSortField {
    type Err = UnknownSortField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownSortField(s.to_owned()))
    }
}

/// Ordering used when the caller names no sort key.
pub const DEFAULT_SORT: SortOrder<ShipmentSortField> =
    SortOrder::new(ShipmentSortField::CreatedAt, SortDirection::Descending);

/// Order two shipments under `sort`, breaking ties by id ascending.
pub fn compare_shipments(
    sort: &SortOrder<ShipmentSortField>,
    a: &Shipment,
    b: &Shipment,
) -> Ordering {
    let primary = sort.key().compare(a, b);
    let primary = if sort.direction().is_descending() {
        primary.reverse()
    } else {
        primary
    };
    primary.then_with(|| a.id().cmp(&b.id()))
}

/// Raw paging and sorting parameters for a shipment listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShipmentListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
}

impl ShipmentListParams {
    /// Resolve into a concrete page request.
    ///
    /// An absent or empty `sortBy` selects [`DEFAULT_SORT`]. Otherwise the
    /// direction is descending only when `sortDirection` is `DESC` in any
    /// case.
    ///
    /// # Examples
    /// ```
    /// use pagination::SortDirection;
    /// use tracking_backend::domain::{ShipmentListParams, ShipmentSortField};
    ///
    /// let request = ShipmentListParams {
    ///     sort_by: Some("weight".into()),
    ///     sort_direction: Some("desc".into()),
    ///     ..ShipmentListParams::default()
    /// }
    /// .resolve()
    /// .expect("valid params");
    /// assert_eq!(*request.sort().key(), ShipmentSortField::Weight);
    /// assert_eq!(request.sort().direction(), SortDirection::Descending);
    /// assert_eq!(request.size(), 10);
    /// ```
    pub fn resolve(&self) -> Result<ShipmentPageRequest, Error> {
        let sort = match self.sort_by.as_deref().filter(|key| !key.is_empty()) {
            None => DEFAULT_SORT,
            Some(key) => {
                let field = key.parse::<ShipmentSortField>().map_err(|err| {
                    Error::invalid_request(err.to_string())
                        .with_details(json!({ "field": "sortBy", "code": "unsupported" }))
                })?;
                SortOrder::new(
                    field,
                    SortDirection::from_param(self.sort_direction.as_deref()),
                )
            }
        };

        PageRequest::from_params(PageParams::new(self.page, self.size), sort)
            .map_err(map_page_error)
    }
}

fn map_page_error(error: PageRequestError) -> Error {
    let field = match error {
        PageRequestError::InvalidPage { .. } => "page",
        PageRequestError::InvalidSize { .. } => "size",
    };
    Error::invalid_request(error.to_string())
        .with_details(json!({ "field": field, "code": "out_of_range" }))
}

#[cfg(test)]
mod tests {
    //! Resolution defaults, validation and comparator behaviour.
    use super::*;
    use crate::domain::{ErrorCode, ShipmentId, ShipmentInput};
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn params(sort_by: Option<&str>, direction: Option<&str>) -> ShipmentListParams {
        ShipmentListParams {
            sort_by: sort_by.map(str::to_owned),
            sort_direction: direction.map(str::to_owned),
            ..ShipmentListParams::default()
        }
    }

    #[rstest]
    fn defaults_to_created_at_descending() {
        let request = ShipmentListParams::default().resolve().expect("defaults");
        assert_eq!(request.page(), 0);
        assert_eq!(request.size(), 10);
        assert_eq!(*request.sort(), DEFAULT_SORT);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("ASC"))]
    #[case(Some("DESC"))]
    fn empty_sort_key_selects_default(#[case] direction: Option<&str>) {
        let request = params(Some(""), direction).resolve().expect("valid");
        assert_eq!(*request.sort(), DEFAULT_SORT);
    }

    #[rstest]
    #[case(Some("DESC"), SortDirection::Descending)]
    #[case(Some("desc"), SortDirection::Descending)]
    #[case(Some("ASC"), SortDirection::Ascending)]
    #[case(Some("sideways"), SortDirection::Ascending)]
    #[case(None, SortDirection::Ascending)]
    fn explicit_key_direction(#[case] direction: Option<&str>, #[case] expected: SortDirection) {
        let request = params(Some("shipperName"), direction)
            .resolve()
            .expect("valid");
        assert_eq!(*request.sort().key(), ShipmentSortField::ShipperName);
        assert_eq!(request.sort().direction(), expected);
    }

    #[rstest]
    fn unknown_sort_key_is_rejected() {
        let err = params(Some("password"), None).resolve().expect_err("unknown");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({ "field": "sortBy", "code": "unsupported" }))
        );
    }

    #[rstest]
    #[case(Some(-1), None, "page")]
    #[case(None, Some(0), "size")]
    #[case(None, Some(-5), "size")]
    fn out_of_range_paging_is_rejected(
        #[case] page: Option<i64>,
        #[case] size: Option<i64>,
        #[case] field: &str,
    ) {
        let err = ShipmentListParams {
            page,
            size,
            ..ShipmentListParams::default()
        }
        .resolve()
        .expect_err("out of range");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details().and_then(|d| d.get("field")), Some(&json!(field)));
    }

    #[rstest]
    fn large_page_sizes_are_accepted() {
        let request = ShipmentListParams {
            size: Some(5_000),
            ..ShipmentListParams::default()
        }
        .resolve()
        .expect("no upper bound");
        assert_eq!(request.size(), 5_000);
    }

    #[rstest]
    fn every_key_round_trips() {
        for field in ShipmentSortField::ALL {
            assert_eq!(field.as_str().parse::<ShipmentSortField>(), Ok(field));
        }
    }

    fn shipment(number: &str, weight: Option<f64>) -> Shipment {
        Shipment::create(
            ShipmentId::random(),
            ShipmentInput {
                shipment_number: number.into(),
                shipper_name: "Acme".into(),
                carrier_name: "FastFreight".into(),
                pickup_location: "NYC".into(),
                delivery_location: "LA".into(),
                weight,
                ..ShipmentInput::default()
            },
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single().expect("valid time"),
        )
    }

    #[rstest]
    fn missing_values_sort_last_ascending_and_first_descending() {
        let heavy = shipment("A", Some(10.0));
        let light = shipment("B", Some(1.0));
        let unknown = shipment("C", None);
        let mut rows = vec![unknown.clone(), heavy.clone(), light.clone()];

        let asc = SortOrder::new(ShipmentSortField::Weight, SortDirection::Ascending);
        rows.sort_by(|a, b| compare_shipments(&asc, a, b));
        assert_eq!(rows, vec![light.clone(), heavy.clone(), unknown.clone()]);

        let desc = SortOrder::new(ShipmentSortField::Weight, SortDirection::Descending);
        rows.sort_by(|a, b| compare_shipments(&desc, a, b));
        assert_eq!(rows, vec![unknown, heavy, light]);
    }

    #[rstest]
    fn ties_break_by_id_ascending() {
        let a = shipment("A", None);
        let b = shipment("B", None);
        let sort = SortOrder::new(ShipmentSortField::CreatedAt, SortDirection::Descending);
        let expected = a.id().cmp(&b.id());
        assert_eq!(compare_shipments(&sort, &a, &b), expected);
    }
}
