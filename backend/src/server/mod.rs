//! Server construction and middleware wiring.

mod config;
mod cors;
mod state_builders;

pub use config::{ServerConfig, ServerSettings};

use cors::{cors_policy, log_policy};
use state_builders::build_http_state;

use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use deshidwell::Trace;
#[cfg(debug_assertions)]
use deshidwell::doc::ApiDoc;
use deshidwell::inbound::http::health::{HealthState, live, ready};
use deshidwell::inbound::http::properties;
use deshidwell::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Seconds in-flight requests get to finish after a stop signal.
const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    cors_origins: &[String],
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody + use<>>,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .wrap(cors_policy(cors_origins))
        .service(web::scope("/api").configure(properties::configure))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server over the configured property store.
///
/// The health state is marked ready once the socket is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    let server_health_state = health_state.clone();
    let ServerConfig {
        bind_addr,
        db_pool: _,
        cors_origins,
    } = config;
    log_policy(&cors_origins);

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone(), &cors_origins)
    })
        .shutdown_timeout(SHUTDOWN_TIMEOUT_SECS)
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use actix_web::http::{StatusCode, header};
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use deshidwell::domain::TRACE_ID_HEADER;

    const FRONTEND: &str = "http://localhost:3000";

    fn app_for_origins(
        origins: &[&str],
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody + use<>>,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        let origins: Vec<String> = origins.iter().map(|origin| (*origin).to_owned()).collect();
        let config = ServerConfig::new("127.0.0.1:0".parse().expect("socket address"))
            .with_cors_origins(origins);
        build_app(
            web::Data::new(HealthState::new()),
            build_http_state(&config),
            &config.cors_origins,
        )
    }

    fn app() -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        app_for_origins(&[])
    }

    fn preflight(origin: &str) -> actix_test::TestRequest {
        actix_test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/api/properties")
            .insert_header((header::ORIGIN, origin))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type"))
    }

    fn header_text<B>(res: &ServiceResponse<B>, name: header::HeaderName) -> Option<String> {
        res.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    }

    #[rstest]
    #[actix_web::test]
    async fn api_health_reports_running() {
        let service = actix_test::init_service(app()).await;

        let res = actix_test::call_service(
            &service,
            actix_test::TestRequest::get().uri("/api/health").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key(TRACE_ID_HEADER));
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["message"], "DeshiDwell API is running");
    }

    #[rstest]
    #[case::any_origin(&[])]
    #[case::listed_origin(&[FRONTEND, "https://deshidwell.app"])]
    #[actix_web::test]
    async fn frontend_preflight_is_accepted(#[case] origins: &[&str]) {
        let service = actix_test::init_service(app_for_origins(origins)).await;

        let res = actix_test::call_service(&service, preflight(FRONTEND).to_request()).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            header_text(&res, header::ACCESS_CONTROL_ALLOW_ORIGIN).as_deref(),
            Some(FRONTEND)
        );
        let methods = header_text(&res, header::ACCESS_CONTROL_ALLOW_METHODS)
            .expect("allowed methods advertised");
        assert!(methods.contains("POST"), "{methods}");
    }

    #[rstest]
    #[actix_web::test]
    async fn unlisted_origin_is_refused() {
        let service = actix_test::init_service(app_for_origins(&[FRONTEND])).await;

        let res = actix_test::call_service(
            &service,
            preflight("https://elsewhere.example").to_request(),
        )
        .await;

        assert!(res.status().is_client_error());
        assert!(header_text(&res, header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[rstest]
    #[actix_web::test]
    async fn cross_origin_responses_expose_trace_header() {
        let service = actix_test::init_service(app()).await;

        let res = actix_test::call_service(
            &service,
            actix_test::TestRequest::get()
                .uri("/api/health")
                .insert_header((header::ORIGIN, FRONTEND))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key(TRACE_ID_HEADER));
        let exposed = header_text(&res, header::ACCESS_CONTROL_EXPOSE_HEADERS)
            .expect("exposed headers listed");
        assert!(exposed.to_ascii_lowercase().contains(TRACE_ID_HEADER), "{exposed}");
    }

    #[rstest]
    #[actix_web::test]
    async fn readiness_fails_until_marked() {
        let service = actix_test::init_service(app()).await;

        let res = actix_test::call_service(
            &service,
            actix_test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[rstest]
    #[actix_web::test]
    async fn server_binds_and_marks_ready() {
        let health_state = web::Data::new(HealthState::new());
        let config = ServerConfig::new("127.0.0.1:0".parse().expect("socket address"));

        let server = create_server(health_state.clone(), config).expect("server binds");
        assert!(health_state.is_ready());

        let handle = server.handle();
        actix_web::rt::spawn(server);
        handle.stop(false).await;
    }
}
