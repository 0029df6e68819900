//! Shipment API handlers.
//!
//! ```text
//! GET    /api/v1/shipments?shipperName=acme&status=IN_TRANSIT&page=0&size=10
//! GET    /api/v1/shipments/{id}
//! POST   /api/v1/shipments
//! PUT    /api/v1/shipments/{id}
//! DELETE /api/v1/shipments/{id}
//! PUT    /api/v1/shipments/{id}/flag {"flagged":true}
//! ```
//!
//! Every handler consults the authorization gate before parsing the id, the
//! query string or the body, and before calling any service. Query and body
//! extractors are therefore taken as `Result`s and only unwrapped once the
//! caller has been admitted.

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::Page;
use serde_json::json;

use crate::domain::{Error, Operation, ShipmentId, ShipmentInput, authorize};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::Caller;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::shipments_dto::{
    FlagRequest, ShipmentListQuery, ShipmentPageSchema, ShipmentRequest, ShipmentResponse,
};
use crate::inbound::http::state::HttpState;

/// Unwrap an extractor result once the gate has admitted the caller.
///
/// The extractor configs in [`configure_api`](super::configure_api) already
/// wrap failures as `invalid_request`; anything else is reported the same way.
fn admitted<T>(extracted: Result<T, actix_web::Error>) -> Result<T, Error> {
    extracted.map_err(|err| {
        err.as_error::<Error>()
            .cloned()
            .unwrap_or_else(|| Error::invalid_request(err.to_string()))
    })
}

fn parse_id(raw: &str) -> Result<ShipmentId, Error> {
    raw.parse().map_err(|_| {
        Error::invalid_request(format!("invalid shipment id: {raw}"))
            .with_details(json!({ "field": "id", "code": "invalid_id" }))
    })
}

/// List shipments matching optional filters, one page at a time.
#[utoipa::path(
    get,
    path = "/api/v1/shipments",
    params(ShipmentListQuery),
    responses(
        (status = 200, description = "One page of shipments", body = ShipmentPageSchema),
        (status = 400, description = "Invalid filter, page or sort", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["shipments"],
    operation_id = "shipments",
    security(("BearerAuth" = []))
)]
#[get("/shipments")]
pub async fn list_shipments(
    state: web::Data<HttpState>,
    caller: Caller,
    query: Result<web::Query<ShipmentListQuery>, actix_web::Error>,
) -> ApiResult<web::Json<Page<ShipmentResponse>>> {
    authorize(Operation::ListShipments, caller.principal())?;
    let (filter, params) = admitted(query)?.into_inner().into_parts()?;
    let page = state.shipments.list(Some(filter), params).await?;
    Ok(web::Json(page.map(ShipmentResponse::from)))
}

/// Fetch one shipment by id.
#[utoipa::path(
    get,
    path = "/api/v1/shipments/{id}",
    params(("id" = String, Path, description = "Shipment id")),
    responses(
        (status = 200, description = "Shipment", body = ShipmentResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["shipments"],
    operation_id = "shipment",
    security(("BearerAuth" = []))
)]
#[get("/shipments/{id}")]
pub async fn get_shipment(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<web::Json<ShipmentResponse>> {
    authorize(Operation::GetShipment, caller.principal())?;
    let id = parse_id(&path)?;
    let shipment = state.shipments.get(&id).await?;
    Ok(web::Json(shipment.into()))
}

/// Create a shipment.
#[utoipa::path(
    post,
    path = "/api/v1/shipments",
    request_body = ShipmentRequest,
    responses(
        (status = 201, description = "Created", body = ShipmentResponse),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["shipments"],
    operation_id = "createShipment",
    security(("BearerAuth" = []))
)]
#[post("/shipments")]
pub async fn create_shipment(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: Result<web::Json<ShipmentRequest>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    authorize(Operation::CreateShipment, caller.principal())?;
    let input = ShipmentInput::try_from(admitted(payload)?.into_inner())?;
    let shipment = state.shipment_commands.create(input).await?;
    Ok(HttpResponse::Created().json(ShipmentResponse::from(shipment)))
}

/// Replace a shipment's editable fields.
///
/// Absent `status` and `currency` keep their stored values; every other
/// field is overwritten, absent values included.
#[utoipa::path(
    put,
    path = "/api/v1/shipments/{id}",
    params(("id" = String, Path, description = "Shipment id")),
    request_body = ShipmentRequest,
    responses(
        (status = 200, description = "Updated", body = ShipmentResponse),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["shipments"],
    operation_id = "updateShipment",
    security(("BearerAuth" = []))
)]
#[put("/shipments/{id}")]
pub async fn update_shipment(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
    payload: Result<web::Json<ShipmentRequest>, actix_web::Error>,
) -> ApiResult<web::Json<ShipmentResponse>> {
    authorize(Operation::UpdateShipment, caller.principal())?;
    let id = parse_id(&path)?;
    let input = ShipmentInput::try_from(admitted(payload)?.into_inner())?;
    let shipment = state.shipment_commands.update(&id, input).await?;
    Ok(web::Json(shipment.into()))
}

/// Delete a shipment. Administrators only.
#[utoipa::path(
    delete,
    path = "/api/v1/shipments/{id}",
    params(("id" = String, Path, description = "Shipment id")),
    responses(
        (status = 200, description = "Deleted", body = bool),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["shipments"],
    operation_id = "deleteShipment",
    security(("BearerAuth" = []))
)]
#[delete("/shipments/{id}")]
pub async fn delete_shipment(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<web::Json<bool>> {
    authorize(Operation::DeleteShipment, caller.principal())?;
    let id = parse_id(&path)?;
    let deleted = state.shipment_commands.delete(&id).await?;
    Ok(web::Json(deleted))
}

/// Set or clear a shipment's review flag.
#[utoipa::path(
    put,
    path = "/api/v1/shipments/{id}/flag",
    params(("id" = String, Path, description = "Shipment id")),
    request_body = FlagRequest,
    responses(
        (status = 200, description = "Flag updated", body = ShipmentResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["shipments"],
    operation_id = "flagShipment",
    security(("BearerAuth" = []))
)]
#[put("/shipments/{id}/flag")]
pub async fn flag_shipment(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
    payload: Result<web::Json<FlagRequest>, actix_web::Error>,
) -> ApiResult<web::Json<ShipmentResponse>> {
    authorize(Operation::FlagShipment, caller.principal())?;
    let id = parse_id(&path)?;
    let flagged = admitted(payload)?.into_inner().flagged;
    let shipment = state.shipment_commands.flag(&id, flagged).await?;
    Ok(web::Json(shipment.into()))
}

#[cfg(test)]
#[path = "shipments_tests.rs"]
mod tests;
