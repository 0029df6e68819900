//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Seeded user accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name.
        username -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        /// Unique contact address.
        email -> Varchar,
        /// Role name (`ADMIN`, `EMPLOYEE`, or any other stored value).
        role -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tracked shipments.
    shipments (id) {
        id -> Uuid,
        /// Unique business identifier (`idx_shipment_number`).
        shipment_number -> Varchar,
        shipper_name -> Varchar,
        shipper_email -> Nullable<Varchar>,
        shipper_phone -> Nullable<Varchar>,
        carrier_name -> Varchar,
        carrier_contact -> Nullable<Varchar>,
        pickup_location -> Varchar,
        pickup_date -> Nullable<Varchar>,
        delivery_location -> Varchar,
        delivery_date -> Nullable<Varchar>,
        tracking_number -> Nullable<Varchar>,
        /// Upper-snake-case status name.
        status -> Varchar,
        weight -> Nullable<Float8>,
        dimensions -> Nullable<Varchar>,
        rate -> Nullable<Float8>,
        currency -> Varchar,
        special_instructions -> Nullable<Varchar>,
        flagged -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
