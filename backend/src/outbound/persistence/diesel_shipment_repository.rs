//! PostgreSQL-backed `ShipmentRepository` implementation using Diesel ORM.
//!
//! Filters are applied clause by clause to a boxed query. Substring clauses
//! become `ILIKE` with a bound pattern in which `%`, `_` and `\` are escaped,
//! so caller text is never interpreted as SQL or as a wildcard.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::PgTextExpressionMethods;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ShipmentRepository, ShipmentRepositoryError, ShipmentSlice};
use crate::domain::{
    CompiledFilter, FieldPredicate, Shipment, ShipmentDetails, ShipmentId, ShipmentPageRequest,
    ShipmentSortField, ShipmentStatus, TextField,
};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewShipmentRow, ShipmentRow, ShipmentUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::shipments;

/// Diesel-backed implementation of the shipment repository port.
#[derive(Clone)]
pub struct DieselShipmentRepository {
    pool: DbPool,
}

impl DieselShipmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ShipmentRepositoryError {
    map_basic_pool_error(error, ShipmentRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ShipmentRepositoryError {
    map_basic_diesel_error(
        error,
        ShipmentRepositoryError::query,
        ShipmentRepositoryError::connection,
    )
}

/// Escape `LIKE` metacharacters so `needle` only matches itself.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn filtered(filter: &CompiledFilter) -> shipments::BoxedQuery<'static, Pg> {
    let mut query = shipments::table.into_boxed();
    let Some(predicate) = filter.predicate() else {
        return query;
    };
    for clause in predicate.clauses() {
        query = match clause {
            FieldPredicate::Contains { field, needle } => {
                let pattern = like_pattern(needle);
                match field {
                    TextField::ShipperName => query.filter(shipments::shipper_name.ilike(pattern)),
                    TextField::CarrierName => query.filter(shipments::carrier_name.ilike(pattern)),
                    TextField::PickupLocation => {
                        query.filter(shipments::pickup_location.ilike(pattern))
                    }
                    TextField::DeliveryLocation => {
                        query.filter(shipments::delivery_location.ilike(pattern))
                    }
                }
            }
            FieldPredicate::StatusIs(status) => {
                query.filter(shipments::status.eq(status.as_str()))
            }
            FieldPredicate::FlaggedIs(flagged) => query.filter(shipments::flagged.eq(*flagged)),
        };
    }
    query
}

fn ordered(
    query: shipments::BoxedQuery<'static, Pg>,
    request: &ShipmentPageRequest,
) -> shipments::BoxedQuery<'static, Pg> {
    let descending = request.sort().direction().is_descending();
    macro_rules! order_by {
        ($column:expr) => {
            if descending {
                query.order_by($column.desc())
            } else {
                query.order_by($column.asc())
            }
        };
    }

    let query = match request.sort().key() {
        ShipmentSortField::Id => order_by!(shipments::id),
        ShipmentSortField::ShipmentNumber => order_by!(shipments::shipment_number),
        ShipmentSortField::ShipperName => order_by!(shipments::shipper_name),
        ShipmentSortField::CarrierName => order_by!(shipments::carrier_name),
        ShipmentSortField::PickupLocation => order_by!(shipments::pickup_location),
        ShipmentSortField::PickupDate => order_by!(shipments::pickup_date),
        ShipmentSortField::DeliveryLocation => order_by!(shipments::delivery_location),
        ShipmentSortField::DeliveryDate => order_by!(shipments::delivery_date),
        ShipmentSortField::TrackingNumber => order_by!(shipments::tracking_number),
        ShipmentSortField::Status => order_by!(shipments::status),
        ShipmentSortField::Weight => order_by!(shipments::weight),
        ShipmentSortField::Rate => order_by!(shipments::rate),
        ShipmentSortField::Currency => order_by!(shipments::currency),
        ShipmentSortField::Flagged => order_by!(shipments::flagged),
        ShipmentSortField::CreatedAt => order_by!(shipments::created_at),
        ShipmentSortField::UpdatedAt => order_by!(shipments::updated_at),
    };
    query.then_order_by(shipments::id.asc())
}

/// Convert a database row into a domain shipment.
fn row_to_shipment(row: ShipmentRow) -> Result<Shipment, ShipmentRepositoryError> {
    let ShipmentRow {
        id,
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
        flagged,
        created_at,
        updated_at,
    } = row;

    let status = status
        .parse::<ShipmentStatus>()
        .map_err(|err| ShipmentRepositoryError::query(err.to_string()))?;

    Ok(Shipment::restore(
        ShipmentId::from_uuid(id),
        ShipmentDetails {
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
        },
        flagged,
        created_at,
        updated_at,
    ))
}

fn update_row(shipment: &Shipment) -> ShipmentUpdate<'_> {
    let details = shipment.details();
    ShipmentUpdate {
        shipment_number: details.shipment_number.as_str(),
        shipper_name: details.shipper_name.as_str(),
        shipper_email: details.shipper_email.as_deref(),
        shipper_phone: details.shipper_phone.as_deref(),
        carrier_name: details.carrier_name.as_str(),
        carrier_contact: details.carrier_contact.as_deref(),
        pickup_location: details.pickup_location.as_str(),
        pickup_date: details.pickup_date.as_deref(),
        delivery_location: details.delivery_location.as_str(),
        delivery_date: details.delivery_date.as_deref(),
        tracking_number: details.tracking_number.as_deref(),
        status: details.status.as_str(),
        weight: details.weight,
        dimensions: details.dimensions.as_deref(),
        rate: details.rate,
        currency: details.currency.as_str(),
        special_instructions: details.special_instructions.as_deref(),
        flagged: shipment.flagged(),
        updated_at: shipment.updated_at(),
    }
}

/// `(LIMIT, OFFSET)` for `request`, or `None` when the page starts beyond
/// any offset PostgreSQL accepts. Such a page is necessarily empty.
fn page_window(request: &ShipmentPageRequest) -> Option<(i64, i64)> {
    let limit = i64::try_from(request.limit()).ok()?;
    let offset = i64::try_from(request.offset()).ok()?;
    Some((limit, offset))
}

#[async_trait]
impl ShipmentRepository for DieselShipmentRepository {
    async fn save(&self, shipment: &Shipment) -> Result<(), ShipmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewShipmentRow {
            id: *shipment.id().as_uuid(),
            fields: update_row(shipment),
            created_at: shipment.created_at(),
        };

        diesel::insert_into(shipments::table)
            .values(&new_row)
            .on_conflict(shipments::id)
            .do_update()
            .set(&update_row(shipment))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    ShipmentRepositoryError::duplicate_number(shipment.shipment_number())
                } else {
                    map_diesel_error(err)
                }
            })
    }

    async fn find_by_id(
        &self,
        id: &ShipmentId,
    ) -> Result<Option<Shipment>, ShipmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = shipments::table
            .filter(shipments::id.eq(id.as_uuid()))
            .select(ShipmentRow::as_select())
            .first::<ShipmentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_shipment).transpose()
    }

    async fn find_by_number(
        &self,
        shipment_number: &str,
    ) -> Result<Option<Shipment>, ShipmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = shipments::table
            .filter(shipments::shipment_number.eq(shipment_number))
            .select(ShipmentRow::as_select())
            .first::<ShipmentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_shipment).transpose()
    }

    async fn scan(
        &self,
        filter: &CompiledFilter,
        request: &ShipmentPageRequest,
    ) -> Result<ShipmentSlice, ShipmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = filtered(filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let total = u64::try_from(total).unwrap_or_default();
        let Some((limit, offset)) = page_window(request) else {
            return Ok(ShipmentSlice {
                items: Vec::new(),
                total,
            });
        };

        let rows: Vec<ShipmentRow> = ordered(filtered(filter), request)
            .limit(limit)
            .offset(offset)
            .select(ShipmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let items = rows
            .into_iter()
            .map(row_to_shipment)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ShipmentSlice { items, total })
    }

    async fn delete(&self, id: &ShipmentId) -> Result<bool, ShipmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(shipments::table.filter(shipments::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }
}
