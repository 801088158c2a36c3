use axum::{http::HeaderValue, routing::get, Router};
use configuration::{ServerSettings, Settings};
use database::{DataSource, DbRepository};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub data_source: Arc<dyn DataSource>,
    /// Row cap for `GET /animals`.
    pub max_animals: u32,
}

impl AppState {
    pub fn new(data_source: Arc<dyn DataSource>, max_animals: u32) -> Self {
        Self {
            data_source,
            max_animals,
        }
    }
}

/// Installs the global `tracing` subscriber. `RUST_LOG` wins; otherwise `info`.
pub fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Builds the CORS layer. A `"*"` entry (or no entries) allows any origin.
fn cors_layer(server: &ServerSettings) -> CorsLayer {
    let origin = if server.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = server
            .cors_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(%origin, "Ignoring invalid CORS origin.");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any())
}

/// Assembles the application routes around a data source.
pub fn create_router(state: AppState, server: &ServerSettings) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/animals", get(handlers::list_animals))
        .route("/animals/:animal_id", get(handlers::get_animal))
        .route("/animals/:animal_id/resumo", get(handlers::get_animal_summary))
        .route("/animals/:animal_id/:resource", get(handlers::list_animal_records))
        .with_state(Arc::new(state))
        .layer(cors_layer(server))
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
///
/// Tracing must already be initialized by the caller.
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let addr = settings.server.addr()?;

    let db_pool = database::connect(&settings.database).await?;
    if settings.database.run_migrations {
        tracing::info!("Applying database migrations.");
        database::run_migrations(&db_pool).await?;
    }
    let db_repo = DbRepository::new(db_pool, settings.database.query_timeout());

    let state = AppState::new(Arc::new(db_repo), settings.api.max_animals);
    let app = create_router(state, &settings.server);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server started and listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received.");
}
