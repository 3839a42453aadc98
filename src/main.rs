mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_web::{middleware, web, App, HttpServer};
use crate::config::{EmbeddingProvider, EmbeddingSettings, Settings};
use crate::core::Ranker;
use crate::models::ScoringWeights;
use crate::routes::mentors::AppState;
use crate::services::{EmbeddingModel, HttpEmbedder, MongoMentorStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Build the embedding model selected in the settings
fn build_embedder(settings: &EmbeddingSettings) -> std::io::Result<Arc<dyn EmbeddingModel>> {
    match settings.provider {
        EmbeddingProvider::Http => {
            let embedder = HttpEmbedder::new(
                settings.endpoint.clone(),
                settings.model.clone(),
                settings.api_key.clone(),
                Duration::from_secs(settings.timeout_secs.unwrap_or(30)),
                settings.batch_size.unwrap_or(32),
            )
            .map_err(std::io::Error::other)?;
            info!("Using embeddings endpoint {} (model {})", settings.endpoint, settings.model);
            Ok(Arc::new(embedder))
        }
        #[cfg(feature = "onnx")]
        EmbeddingProvider::Onnx => {
            let embedder = crate::services::OnnxEmbedder::new(
                &settings.model_path,
                &settings.tokenizer_path,
                settings.intra_threads.unwrap_or(4),
            )
            .map_err(std::io::Error::other)?;
            Ok(Arc::new(embedder))
        }
        #[cfg(not(feature = "onnx"))]
        EmbeddingProvider::Onnx => Err(std::io::Error::other(
            "embedding.provider = \"onnx\" requires building with the `onnx` feature",
        )),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(e)
    })?;

    // Initialize logging; RUST_LOG and LOG_LEVEL/LOG_FORMAT win over the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }

    info!("Starting mentor-match suggestion service...");

    // Connect to the mentor store
    let store = MongoMentorStore::connect(
        &settings.database.uri,
        &settings.database.name,
        &settings.database.mentor_collection,
        Duration::from_secs(settings.database.server_selection_timeout_secs.unwrap_or(10)),
    )
    .await
    .map_err(|e| {
        error!("Failed to connect to MongoDB: {}", e);
        std::io::Error::other(e)
    })?;

    info!("MongoDB client initialized");

    // Load the embedding model once for the whole process
    let embedder = build_embedder(&settings.embedding).map_err(|e| {
        error!("Failed to initialize embedding model: {}", e);
        e
    })?;

    info!("Embedding model initialized: {}", embedder.name());

    let weights = ScoringWeights::from(&settings.scoring.weights);
    let ranker = Ranker::new(weights);

    info!("Ranker initialized with weights: {:?}", weights);

    let app_state = AppState {
        store: Arc::new(store),
        embedder,
        ranker,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);
    let allowed_origin = settings.cors.allowed_origin.clone();

    info!("Starting HTTP server on {}:{} (CORS origin {})", host, port, allowed_origin);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .wrap(routes::cors(&allowed_origin))
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
