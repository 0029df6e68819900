//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{BuildMode, ServerConfig, TrackingSettings};

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use tracking_backend::Trace;
#[cfg(debug_assertions)]
use tracking_backend::doc::ApiDoc;
use tracking_backend::inbound::http::configure_api;
use tracking_backend::inbound::http::health::{HealthState, live, ready};
use tracking_backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api/v1").configure(configure_api);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is bound.
/// - `config`: pre-built [`ServerConfig`] carrying the bind address, token
///   settings and optional database pool.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when building state, binding the socket or
/// starting the server fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config).await?);
    let ServerConfig { bind_addr, .. } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! Route registration through the assembled application.
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{Value, json};
    use tracking_backend::domain::TRACE_ID_HEADER;
    use tracking_backend::outbound::security::FIXTURE_PASSWORD;
    use zeroize::Zeroizing;

    async fn dependencies() -> AppDependencies {
        let addr = "127.0.0.1:0".parse().expect("literal");
        let config = ServerConfig::new(addr, Zeroizing::new(b"server-test-secret".to_vec()));
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        AppDependencies {
            health_state,
            http_state: web::Data::new(build_http_state(&config).await.expect("state")),
        }
    }

    #[actix_web::test]
    async fn health_probes_are_mounted_at_the_root() {
        let app = test::init_service(build_app(dependencies().await)).await;

        for uri in ["/health/ready", "/health/live"] {
            let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(res.status(), StatusCode::OK, "{uri}");
        }
    }

    #[actix_web::test]
    async fn fixture_login_reaches_the_me_endpoint() {
        let app = test::init_service(build_app(dependencies().await)).await;

        let login = test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "username": "employee", "password": FIXTURE_PASSWORD }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, login).await;
        let token = body["token"].as_str().expect("token").to_owned();

        let me = test::TestRequest::get()
            .uri("/api/v1/me")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let res = test::call_service(&app, me).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key(TRACE_ID_HEADER));
        let profile: Value = test::read_body_json(res).await;
        assert_eq!(profile["role"], "EMPLOYEE");
    }

    #[actix_web::test]
    async fn shipments_require_a_token() {
        let app = test::init_service(build_app(dependencies().await)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/shipments").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
