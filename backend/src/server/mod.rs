//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use vacation_planner::Trace;
#[cfg(debug_assertions)]
use vacation_planner::doc::ApiDoc;
use vacation_planner::inbound::http::health::{HealthState, live, ready};
use vacation_planner::inbound::http::preferences::{
    calculate_consensus, create_preference, get_own_preference, list_options, list_preferences,
    update_preference,
};
use vacation_planner::inbound::http::state::HttpState;
use vacation_planner::inbound::http::users::signup;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    // `get_own_preference` matches any segment, so it goes last.
    let api = web::scope("/api")
        .service(signup)
        .service(create_preference)
        .service(update_preference)
        .service(list_preferences)
        .service(calculate_consensus)
        .service(list_options)
        .service(get_own_preference);

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
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let bind_addr = config.bind_addr;
    #[cfg(feature = "metrics")]
    let prometheus = config.prometheus;

    let server = HttpServer::new(move || {
        let app = build_app(server_health_state.clone(), http_state.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
