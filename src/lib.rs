use actix_cors::Cors;
use actix_files::Files;
use actix_web::middleware::{Compress, Logger};
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod catalog;
pub mod config;
pub mod document;
pub mod enrollment;
pub mod state;

pub use crate::config::AppConfig;
pub use crate::state::AppState;

/// Largest accepted enrollment body, JSON or url-encoded.
pub const MAX_PAYLOAD_BYTES: usize = 64 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::enrollment::handlers::enviar_matricula,
        crate::catalog::handlers::get_catalog,
        crate::catalog::handlers::get_modules
    ),
    components(schemas(enrollment::models::MatriculaRequest)),
    tags(
        (name = "Enrollment", description = "Enrollment form submission and PDF generation."),
        (name = "Catalog", description = "Modules offered per program and year.")
    )
)]
pub struct ApiDoc;

/// Register every route of the application. Files in `public_dir` are served
/// under `/static`.
pub fn routes(public_dir: std::path::PathBuf) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::JsonConfig::default().limit(MAX_PAYLOAD_BYTES))
            .app_data(web::FormConfig::default().limit(MAX_PAYLOAD_BYTES))
            .configure(enrollment::handlers::config)
            .service(web::scope("/api").configure(catalog::handlers::config))
            .service(Files::new("/static", public_dir));
    }
}

pub async fn run() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = match AppState::new(config.clone()) {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            log::error!(
                "Failed to initialise the PDF generator. Check XSLT_STYLESHEET in .env. Error: {}",
                e
            );
            std::process::exit(1);
        }
    };

    let prometheus = PrometheusMetricsBuilder::new("matricula_server")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    log::info!(
        "Using {} and {} (timeout {}s), work dir {}",
        config.xsltproc_bin,
        config.fop_bin,
        config.tool_timeout.as_secs(),
        config.work_dir.display()
    );
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let bind_address = config.bind_address();
    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let cors = config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .expose_headers(vec![header::CONTENT_DISPOSITION])
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(Logger::default())
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .configure(routes(config.public_dir.clone()))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(bind_address)?
    .run()
    .await
}
