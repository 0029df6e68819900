//! HTTP inbound adapter exposing the REST endpoints.

pub mod error;
pub mod health;
pub mod identity;
pub mod schemas;
pub mod shipments;
pub mod shipments_dto;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::web;

use crate::domain::Error;

pub use error::ApiResult;

/// Register the `/api/v1` handlers and their extractor configuration.
///
/// Malformed JSON bodies, query strings and paths are reported as
/// `invalid_request` errors in the usual error payload.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("malformed request body: {err}")).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("malformed query string: {err}")).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("malformed path: {err}")).into()
    }))
    .service(users::login)
    .service(users::me)
    .service(shipments::list_shipments)
    .service(shipments::create_shipment)
    .service(shipments::get_shipment)
    .service(shipments::update_shipment)
    .service(shipments::delete_shipment)
    .service(shipments::flag_shipment);
}
