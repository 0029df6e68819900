//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{shipments, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub role: String,
}

/// Insertable struct for seeding user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
    pub email: &'a str,
    pub role: &'a str,
}

/// Row struct for reading from the shipments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = shipments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ShipmentRow {
    pub id: Uuid,
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

/// Insertable struct for creating shipment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = shipments)]
pub(crate) struct NewShipmentRow<'a> {
    pub id: Uuid,
    #[diesel(embed)]
    pub fields: ShipmentUpdate<'a>,
    pub created_at: DateTime<Utc>,
}

/// Changeset struct for updating existing shipment records.
///
/// `Option` fields are written as `NULL` when absent: an update replaces
/// every editable column.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = shipments)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ShipmentUpdate<'a> {
    pub shipment_number: &'a str,
    pub shipper_name: &'a str,
    pub shipper_email: Option<&'a str>,
    pub shipper_phone: Option<&'a str>,
    pub carrier_name: &'a str,
    pub carrier_contact: Option<&'a str>,
    pub pickup_location: &'a str,
    pub pickup_date: Option<&'a str>,
    pub delivery_location: &'a str,
    pub delivery_date: Option<&'a str>,
    pub tracking_number: Option<&'a str>,
    pub status: &'a str,
    pub weight: Option<f64>,
    pub dimensions: Option<&'a str>,
    pub rate: Option<f64>,
    pub currency: &'a str,
    pub special_instructions: Option<&'a str>,
    pub flagged: bool,
    pub updated_at: DateTime<Utc>,
}
