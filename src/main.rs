use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use local_business_finder::config::Config;
use local_business_finder::{routes, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let state = match AppState::new(config.clone()) {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to initialize services: {:#}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Starting Local Business Finder MCP server on port {} (search: {}, model: {})",
        config.server.port, config.search.api_url, config.generation.model
    );

    let payload_limit = config.server.max_json_payload_size;

    // Create HTTP server
    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .expose_any_header()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::PayloadConfig::new(payload_limit))
            .wrap(cors)
            .wrap(Logger::default())
            .configure(routes::configure)
    })
    .bind((config.server.host.as_str(), config.server.port))?;

    info!(
        "Server started successfully at http://{}:{} (MCP endpoint: /mcp)",
        config.server.host, config.server.port
    );

    // Run the server
    server.workers(config.server.workers).run().await
}
