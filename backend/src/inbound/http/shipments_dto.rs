//! Wire types for the shipment endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Error, Shipment, ShipmentFilter, ShipmentInput, ShipmentListParams, ShipmentStatus,
};

fn parse_status(value: &str) -> Result<ShipmentStatus, Error> {
    value.parse::<ShipmentStatus>().map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "status", "code": "invalid_status" }))
    })
}

/// Query string of `GET /api/v1/shipments`.
///
/// Filter fields are independent and combined with AND. Free-text filters
/// match case-insensitive substrings.
#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ShipmentListQuery {
    pub shipper_name: Option<String>,
    pub carrier_name: Option<String>,
    /// Exact status, e.g. `IN_TRANSIT`.
    pub status: Option<String>,
    pub pickup_location: Option<String>,
    pub delivery_location: Option<String>,
    pub flagged: Option<bool>,
    /// Zero-based page index (default 0).
    pub page: Option<i64>,
    /// Page size (default 10).
    pub size: Option<i64>,
    /// Sort key; defaults to `createdAt` descending when absent.
    pub sort_by: Option<String>,
    /// `DESC` (any case) for descending; anything else sorts ascending.
    pub sort_direction: Option<String>,
}

impl ShipmentListQuery {
    /// Split into the domain filter and paging parameters.
    pub fn into_parts(self) -> Result<(ShipmentFilter, ShipmentListParams), Error> {
        let status = self.status.as_deref().map(parse_status).transpose()?;
        let filter = ShipmentFilter {
            shipper_name: self.shipper_name,
            carrier_name: self.carrier_name,
            status,
            pickup_location: self.pickup_location,
            delivery_location: self.delivery_location,
            flagged: self.flagged,
        };
        let params = ShipmentListParams {
            page: self.page,
            size: self.size,
            sort_by: self.sort_by,
            sort_direction: self.sort_direction,
        };
        Ok((filter, params))
    }
}

/// Request body for creating or updating a shipment.
///
/// Missing required strings are treated as blank and rejected by validation.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentRequest {
    #[serde(default)]
    #[schema(example = "SHP-1")]
    pub shipment_number: String,
    #[serde(default)]
    #[schema(example = "Acme")]
    pub shipper_name: String,
    pub shipper_email: Option<String>,
    pub shipper_phone: Option<String>,
    #[serde(default)]
    #[schema(example = "FastFreight")]
    pub carrier_name: String,
    pub carrier_contact: Option<String>,
    #[serde(default)]
    #[schema(example = "NYC")]
    pub pickup_location: String,
    pub pickup_date: Option<String>,
    #[serde(default)]
    #[schema(example = "LA")]
    pub delivery_location: String,
    pub delivery_date: Option<String>,
    pub tracking_number: Option<String>,
    /// Defaults to `PENDING` on create; left unchanged on update when absent.
    #[schema(example = "PENDING")]
    pub status: Option<String>,
    pub weight: Option<f64>,
    pub dimensions: Option<String>,
    pub rate: Option<f64>,
    /// Defaults to `USD` on create; left unchanged on update when absent.
    pub currency: Option<String>,
    pub special_instructions: Option<String>,
}

impl TryFrom<ShipmentRequest> for ShipmentInput {
    type Error = Error;

    fn try_from(value: ShipmentRequest) -> Result<Self, Self::Error> {
        let status = value.status.as_deref().map(parse_status).transpose()?;
        Ok(Self {
            shipment_number: value.shipment_number,
            shipper_name: value.shipper_name,
            shipper_email: value.shipper_email,
            shipper_phone: value.shipper_phone,
            carrier_name: value.carrier_name,
            carrier_contact: value.carrier_contact,
            pickup_location: value.pickup_location,
            pickup_date: value.pickup_date,
            delivery_location: value.delivery_location,
            delivery_date: value.delivery_date,
            tracking_number: value.tracking_number,
            status,
            weight: value.weight,
            dimensions: value.dimensions,
            rate: value.rate,
            currency: value.currency,
            special_instructions: value.special_instructions,
        })
    }
}

/// Request body for `PUT /api/v1/shipments/{id}/flag`.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, ToSchema)]
pub struct FlagRequest {
    pub flagged: bool,
}

/// A shipment as returned to clients.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
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
    pub status: String,
    pub weight: Option<f64>,
    pub dimensions: Option<String>,
    pub rate: Option<f64>,
    pub currency: String,
    pub special_instructions: Option<String>,
    pub flagged: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Shipment> for ShipmentResponse {
    fn from(shipment: Shipment) -> Self {
        let id = shipment.id().to_string();
        let flagged = shipment.flagged();
        let created_at = shipment.created_at();
        let updated_at = shipment.updated_at();
        let details = shipment.into_details();
        Self {
            id,
            shipment_number: details.shipment_number,
            shipper_name: details.shipper_name,
            shipper_email: details.shipper_email,
            shipper_phone: details.shipper_phone,
            carrier_name: details.carrier_name,
            carrier_contact: details.carrier_contact,
            pickup_location: details.pickup_location,
            pickup_date: details.pickup_date,
            delivery_location: details.delivery_location,
            delivery_date: details.delivery_date,
            tracking_number: details.tracking_number,
            status: details.status.as_str().to_owned(),
            weight: details.weight,
            dimensions: details.dimensions,
            rate: details.rate,
            currency: details.currency,
            special_instructions: details.special_instructions,
            flagged,
            created_at,
            updated_at,
        }
    }
}

/// OpenAPI schema for a page of shipments.
#[derive(ToSchema)]
#[schema(as = ShipmentPage, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ShipmentPageSchema {
    content: Vec<ShipmentResponse>,
    total_elements: u64,
    total_pages: u64,
    current_page: u32,
    page_size: u32,
    has_next: bool,
    has_previous: bool,
}
