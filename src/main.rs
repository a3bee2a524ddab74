use mimalloc::MiMalloc;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use nambi::api::GeminiApi;
use nambi::config::Config;
use nambi::content::{ContentAggregator, ContentCache, build_fetcher};
use nambi::db::ItineraryStorage;
use nambi::router::{NambiState, nambi_router};
use nambi::service::ChatService;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.basic.database_url,
        model = %cfg.gemini.model,
        site_urls = cfg.content.site_urls.len(),
        loglevel = %cfg.basic.loglevel
    );
    if cfg.gemini.api_key.is_empty() {
        warn!("GEMINI_API_KEY is not set; chat questions will fail upstream");
    }

    let itineraries = ItineraryStorage::connect(&cfg.basic.database_url).await?;

    let fetcher = build_fetcher(&cfg.content)?;
    info!(fetcher = fetcher.name(), "page fetcher selected");
    let aggregator = ContentAggregator::new(fetcher, cfg.content.site_urls.clone());
    let cache = Arc::new(ContentCache::new(aggregator));

    if cfg.content.preload {
        let cache = cache.clone();
        tokio::spawn(async move {
            cache.get_or_load().await;
        });
    }

    let model = Arc::new(GeminiApi::new(&cfg.gemini)?);
    let chat = Arc::new(ChatService::new(
        cache,
        model,
        Some(cfg.content.fallback_path.clone()),
        cfg.chat.clone(),
    ));

    let state = NambiState::new(chat, itineraries);
    let app = nambi_router(state);

    let listener = TcpListener::bind(cfg.basic.listen_addr.as_str()).await?;
    info!("HTTP server listening on {}", cfg.basic.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
