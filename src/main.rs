use std::sync::Arc;

use axum::{routing::get, Router};
use axum_prometheus::PrometheusMetricLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use linkscope_server::config::Config;
use linkscope_server::scrape::{HttpFetcher, ScrapePipeline};
use linkscope_server::state::AppState;
use linkscope_server::store::PgScrapeStore;
use linkscope_server::{db, handlers};

#[tokio::main]
async fn main() {
    // Initialize tracing: JSON in production, human-readable in dev.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "linkscope_server=info,tower_http=info,sqlx=warn"
            .parse()
            .unwrap()
    });

    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("🚀 Linkscope Server starting...");

    let config = Config::from_env().expect("Failed to load configuration");
    info!(
        fetch_timeout = ?config.fetch_timeout,
        concurrency = config.enrich.concurrency,
        delay = ?config.enrich.delay,
        strategy = ?config.enrich.strategy,
        "📝 Configuration loaded"
    );

    // The store owns the only database pool; it lives as long as the process.
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    info!("✅ Database migrations applied");

    db::health_check(&pool)
        .await
        .expect("Database health check failed");
    info!("✅ Database health check passed");

    let fetcher = HttpFetcher::new(config.fetch_timeout).expect("Failed to build HTTP client");
    let pipeline = ScrapePipeline::new(Arc::new(fetcher), config.enrich.clone());

    let cors = if config.is_dev {
        info!("🔓 CORS: permissive (dev mode)");
        CorsLayer::permissive()
    } else {
        tracing::warn!("🔒 CORS: restrictive (production mode)");
        CorsLayer::new()
    };

    let addr = config.server_addr();

    let app_state = AppState {
        store: Arc::new(PgScrapeStore::new(pool)),
        pipeline,
    };

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let app = Router::new()
        // Health check + metrics
        .route("/health", get(handlers::health_check))
        .route(
            "/metrics",
            get(move || async move { metric_handle.render() }),
        )
        // Scraping
        .route("/scrape", get(handlers::scrape::scrape))
        .route("/scrape/content", get(handlers::scrape::page_content))
        // Stored results
        .route("/scrapes", get(handlers::scrapes::list_scrapes))
        .route("/scrapes/:id", get(handlers::scrapes::get_scrape))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(prometheus_layer)
        .layer(cors)
        .with_state(app_state);

    info!("🎧 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
