use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use volunteer_match::config::{LoggingSettings, Settings, StoreBackend};
use volunteer_match::core::Matcher;
use volunteer_match::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use volunteer_match::services::{CachedStore, InMemoryStore, PostgresClient, Store};

/// `RUST_LOG` wins over the configured level when set
fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

async fn build_store(settings: &Settings) -> std::io::Result<Arc<dyn Store>> {
    let store: Arc<dyn Store> = match settings.store.backend {
        StoreBackend::Memory => {
            let store = if settings.store.seed_demo_data {
                InMemoryStore::seeded()
            } else {
                InMemoryStore::new()
            };
            info!("Using in-memory store (demo data: {})", settings.store.seed_demo_data);
            Arc::new(store)
        }
        StoreBackend::Postgres => {
            let client = PostgresClient::from_settings(
                &settings.database.url,
                settings.database.max_connections,
                settings.database.min_connections,
                settings.database.acquire_timeout_secs,
                settings.database.idle_timeout_secs,
            )
            .await
            .map_err(|e| {
                error!("Failed to connect to PostgreSQL: {}", e);
                std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
            })?;
            info!("PostgreSQL client initialized");
            Arc::new(client)
        }
    };

    if !settings.cache.enabled {
        return Ok(store);
    }

    info!("Event catalog cache enabled (TTL: {}s)", settings.cache.catalog_ttl_secs);
    Ok(Arc::new(CachedStore::new(store, settings.cache.catalog_ttl_secs)))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_tracing(&settings.logging);

    info!("Starting volunteer matching service...");

    let store = build_store(&settings).await?;

    match store.health_check().await {
        Ok(true) => info!("Store health check passed"),
        Ok(false) => warn!("Store reports degraded health"),
        Err(e) => warn!("Store health check failed: {}", e),
    }

    let weights = settings.scoring_weights();
    let matcher = Matcher::new(weights);

    info!("Matcher initialized with weights: {:?}", weights);
    info!("Duplicate assignment policy: {:?}", settings.assignment.duplicate_policy);

    let app_state = AppState::new(
        store,
        matcher,
        settings.assignment.duplicate_policy,
        settings.report_layout(),
    );

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
