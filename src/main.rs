mod adapters;
mod application;
mod domain;
mod services;

use std::{sync::Arc, time::Duration};

use adapters::{
    controllers::{
        config_controller::ConfigController, file_controller::FileController,
        health_controller::HealthController,
    },
    repositories::{
        MemoryFileRecordRepository, RestFileRecordRepository, RestUploadConfigRepository,
    },
    state::AppState,
};
use application::{
    repositories::{
        file_record_repository::FileRecordRepository,
        upload_config_repository::UploadConfigRepository,
    },
    services::{upload_manager::UploadManager, UploadTransport},
};
use axum::{
    routing::{get, post},
    Router,
};
use domain::config::{provider::StoreProvider, upload::UploadConfig};
use services::SimulatedTransport;
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let provider = std::env::var("STORE_PROVIDER")
        .unwrap_or_else(|_| "memory".to_string())
        .parse::<StoreProvider>()
        .expect("ERROR: STORE_PROVIDER must be 'memory' or 'rest'");

    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .expect("PORT must be a valid u16");

    tracing::info!("Starting dropzone-service with {:?} record store", provider);

    // Configure CORS
    let cors = if let Ok(allowed_origins) = std::env::var("CORS_ALLOWED_ORIGINS") {
        // Parse comma-separated origins
        let origins: Vec<_> = allowed_origins
            .split(',')
            .map(|s| s.trim().parse().expect("Invalid CORS origin"))
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Allow all origins if not specified (only for development)
        CorsLayer::permissive()
    };

    let repository: Arc<dyn FileRecordRepository> = match provider {
        StoreProvider::Memory => Arc::new(MemoryFileRecordRepository::new()),
        StoreProvider::Rest => {
            let base_url = std::env::var("RECORDS_API_URL")
                .expect("ERROR: RECORDS_API_URL environment variable must be set");
            let api_key = std::env::var("RECORDS_API_KEY")
                .expect("ERROR: RECORDS_API_KEY environment variable must be set");
            let table =
                std::env::var("RECORDS_TABLE").unwrap_or_else(|_| "uploaded_files".to_string());
            Arc::new(RestFileRecordRepository::new(base_url, api_key, table))
        }
    };

    // Handle upload config: fall back to static defaults when the remote
    // provider is absent or unreachable
    let config = match std::env::var("UPLOAD_CONFIG_URL") {
        Ok(config_url) => {
            let config_repository = Arc::new(RestUploadConfigRepository::new(
                config_url,
                std::env::var("RECORDS_API_KEY").ok(),
            )) as Arc<dyn UploadConfigRepository>;

            match config_repository.get_upload_config().await {
                Ok(config) => {
                    tracing::info!("Loaded upload config from remote provider");
                    config
                }
                Err(err) => {
                    tracing::warn!("Could not load remote upload config, using defaults: {}", err);
                    UploadConfig::default()
                }
            }
        }
        Err(_) => UploadConfig::default(),
    };

    let failure_rate = std::env::var("UPLOAD_FAILURE_RATE")
        .ok()
        .and_then(|value| value.parse::<f64>().ok())
        .unwrap_or(services::DEFAULT_FAILURE_RATE);
    let tick_interval = std::env::var("UPLOAD_TICK_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(services::DEFAULT_TICK_INTERVAL);

    let transport =
        Arc::new(SimulatedTransport::new(failure_rate, tick_interval)) as Arc<dyn UploadTransport>;

    let upload_manager = Arc::new(UploadManager::new(
        Arc::clone(&repository),
        transport,
        config.clone(),
    ));

    let app_state = AppState {
        provider,
        config: Arc::new(config),
        repository,
        upload_manager,
    };

    let router = Router::new()
        .route("/api/v1/health", get(HealthController::health_check))
        .route("/api/v1/config", get(ConfigController::get_config))
        .route(
            "/api/v1/files",
            post(FileController::upload_files)
                .get(FileController::list_files)
                .delete(FileController::clear_files),
        )
        .route("/api/v1/files/stats", get(FileController::get_stats))
        .route(
            "/api/v1/files/{file_id}",
            get(FileController::get_file).delete(FileController::remove_file),
        )
        .layer(cors)
        .with_state(app_state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", port);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
