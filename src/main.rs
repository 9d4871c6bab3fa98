mod app;
mod config;
mod errors;
mod external;
mod logging;
mod models;
mod routes;
mod scraping;
mod services;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use crate::config::{AppConfig, CacheBackend};
use crate::external::gold_page::GoldPageProvider;
use crate::external::telegram::TelegramClient;
use crate::logging::{init_logging, LoggingConfig};
use crate::services::crawl_service::CrawlService;
use crate::services::job_scheduler_service::{JobContext, JobSchedulerService};
use crate::services::job_tracker::JobTracker;
use crate::services::notification_service::NotificationService;
use crate::state::AppState;
use crate::store::memory_store::MemoryStore;
use crate::store::redis_store::RedisStore;
use crate::store::{GoldPriceStore, KeyValueStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(&LoggingConfig::from_env()?).context("failed to initialize logging")?;

    let config = AppConfig::from_env()?;

    let kv: Arc<dyn KeyValueStore> = match config.cache_backend {
        CacheBackend::Redis => {
            let redis = RedisStore::connect(&config.redis_url, config.redis_timeout)
                .await
                .context("Failed to connect to Redis")?;
            Arc::new(redis)
        }
        CacheBackend::Memory => {
            tracing::info!("🧠 Using in-memory cache (CACHE_BACKEND=memory)");
            Arc::new(MemoryStore::new())
        }
    };
    let store = GoldPriceStore::new(kv, config.cache_key_prefix.clone());

    let source = GoldPageProvider::new(config.source_url_template.clone(), config.fetch_timeout)?;
    let crawler = Arc::new(CrawlService::new(Arc::new(source), store));

    let notifier = match &config.telegram {
        Some(tg) => {
            let client = TelegramClient::new(
                tg.api_base.clone(),
                tg.bot_token.clone(),
                tg.chat_id.clone(),
                config.fetch_timeout,
            )?;
            Some(Arc::new(NotificationService::new(crawler.clone(), client, config.notify_offset)))
        }
        None => None,
    };

    if config.initial_crawl {
        tracing::info!("Performing initial gold price crawl...");
        let summary = crawler.crawl_all().await;
        tracing::info!(
            "Initial crawl finished ({} ok, {} failed)",
            summary.processed,
            summary.failed
        );
    }

    let job_tracker = Arc::new(JobTracker::new());
    let mut scheduler = JobSchedulerService::new(JobContext {
        crawler: crawler.clone(),
        notifier,
        tracker: job_tracker.clone(),
    })
    .await?;
    scheduler.start(&config.schedules).await?;

    let app = app::create_app(AppState {
        crawler,
        job_tracker,
    });

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.host, config.port))?;
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Gold price backend running at http://{}/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP server stopped");
    if let Err(e) = scheduler.stop().await {
        tracing::error!("Scheduler shutdown error: {}", e);
    }
    tracing::info!("Application shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Received shutdown signal, initiating graceful shutdown...");
}
