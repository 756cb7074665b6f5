use axum::Router;
use stepviz_rs::{config, pipeline::load, routes, state};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stepviz_rs=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from_env();

    // The dashboard cannot start without its dataset.
    let dataset = match load::load_path(&config.dataset_path) {
        Ok(dataset) => dataset,
        Err(e) => {
            tracing::error!(
                "Failed to load dataset from {}: {}",
                config.dataset_path.display(),
                e
            );
            std::process::exit(1);
        }
    };
    let state = state::AppState::with_dataset(config.clone(), dataset);

    // Build router
    let serve_dir = ServeDir::new("assets/web")
        .not_found_service(ServeFile::new("assets/web/index.html"));

    let app = Router::new()
        .merge(routes::health::router())
        .merge(routes::options::router())
        .merge(routes::dashboard::router())
        .merge(routes::calendar::router())
        .merge(routes::upload::router())
        .fallback_service(serve_dir)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(axum::extract::DefaultBodyLimit::max(config.max_file_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("StepViz-RS listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("Dashboard: GET http://{}/api/dashboard", addr);
    tracing::info!("Calendar: GET http://{}/api/calendar.png", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
    }
}
