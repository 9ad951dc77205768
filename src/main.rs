use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, build_router};
use dockcheck_core::{BusinessRules, StoreConfig, ValidationPipeline, ValidatorConfig, open_store};

/// Main entry point for the dockcheck service
///
/// Serves the OpenDock validation webhook over HTTP until interrupted.
///
/// # Environment Variables
/// - `DOCKCHECK_ADDR`: listen address (default: "0.0.0.0:<SERVER_PORT>")
/// - `SERVER_PORT`: listen port when `DOCKCHECK_ADDR` is unset (default: 8080)
/// - `SECRET_TOKEN`: bearer token expected from OpenDock; unset disables the check
/// - `PO_STORE`: `stub` (default) or `file`
/// - `PO_STORE_PATH`: YAML purchase-order list, required for the file store
/// - `DOCKCHECK_RULES`: comma-separated business rules to enforce
/// - `DOCKCHECK_SWAGGER`: serve Swagger UI (default: true)
///
/// # Returns
/// * `Ok(())` - If the server shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, store loading or binding fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dockcheck=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = ValidatorConfig::from_env()?;
    if !cfg.has_secret_token() {
        tracing::warn!("SECRET_TOKEN is not set; webhook requests will not be authenticated");
    }

    match cfg.store() {
        StoreConfig::Stub => tracing::info!("++ Using stub purchase-order store"),
        StoreConfig::File(path) => {
            tracing::info!("++ Using purchase-order store at {}", path.display())
        }
    }
    let lookup = open_store(cfg.store())?;

    let pipeline = ValidationPipeline::new(BusinessRules::from_names(cfg.rules())?);
    if !pipeline.rules().is_empty() {
        tracing::info!(
            "++ Enforcing business rules: {}",
            pipeline.rules().names().join(", ")
        );
    }

    let state = AppState::new(
        pipeline,
        lookup,
        cfg.secret_token().map(str::to_owned),
    );
    let app = build_router(state, cfg.swagger_enabled());

    let listener = tokio::net::TcpListener::bind(cfg.listen_addr()).await?;
    tracing::info!("++ Starting dockcheck on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- dockcheck stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
