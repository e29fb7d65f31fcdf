//! services/api/src/bin/api.rs

use api_lib::{
    adapters::generation_llm::OpenAiGenerationAdapter,
    config::Config,
    error::ApiError,
    web::{generate_lesson_handler, rest::ApiDoc, state::AppState},
};
use async_openai::{config::OpenAIConfig, Client};
use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::post,
    Router,
};
use lesson_forge_core::{orchestrator::GenerationOrchestrator, ports::LessonGenerationService};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize the Generation Provider (when configured) ---
    // With no API key the service runs offline and answers every request
    // from the template fallback.
    let provider: Option<Arc<dyn LessonGenerationService>> = match &config.openai_api_key {
        Some(api_key) => {
            info!("Provider credential found; live generation enabled");
            let openai_config = OpenAIConfig::new().with_api_key(api_key);
            let openai_client = Client::with_config(openai_config);
            Some(Arc::new(OpenAiGenerationAdapter::new(
                openai_client,
                config.generation_model.clone(),
            )))
        }
        None => {
            info!("No provider credential configured; running in offline mode");
            None
        }
    };

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        orchestrator: GenerationOrchestrator::new(provider),
        config: config.clone(),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // --- 4. Create the Web Router ---
    let api_router = Router::new()
        .route("/lesson-packages", post(generate_lesson_handler))
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
