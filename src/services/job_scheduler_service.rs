use crate::errors::AppError;
use crate::services::crawl_service::CrawlService;
use crate::services::job_tracker::JobTracker;
use crate::services::notification_service::NotificationService;
use tokio_cron_scheduler::{JobScheduler, Job};
use tracing::{info, error};
use chrono::Utc;
use std::sync::Arc;

// Context passed to job functions
#[derive(Clone)]
pub struct JobContext {
    pub crawler: Arc<CrawlService>,
    pub notifier: Option<Arc<NotificationService>>,
    pub tracker: Arc<JobTracker>,
}

/// Cron expressions (sec min hour day month weekday) for the recurring jobs.
#[derive(Debug, Clone)]
pub struct JobSchedules {
    pub crawl: String,
    pub notify: String,
    pub test_mode: bool,
}

pub struct JobSchedulerService {
    scheduler: JobScheduler,
    context: JobContext,
}

impl JobSchedulerService {
    pub async fn new(context: JobContext) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::External(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self {
            scheduler,
            context,
        })
    }

    /// Start all scheduled jobs
    pub async fn start(&mut self, schedules: &JobSchedules) -> Result<(), AppError> {
        info!("🚀 Starting job scheduler...");

        if schedules.test_mode {
            info!("⚠️  JOB SCHEDULER IN TEST MODE - Jobs will run every minute!");
        }

        let crawl_schedule = if schedules.test_mode { "0 */1 * * * *" } else { schedules.crawl.as_str() };

        self.schedule_job(
            crawl_schedule,
            "crawl_gold_prices",
            crawl_all_gold_prices
        ).await?;

        let mut job_count = 1;
        if self.context.notifier.is_some() {
            let notify_schedule = if schedules.test_mode { "30 */1 * * * *" } else { schedules.notify.as_str() };

            self.schedule_job(
                notify_schedule,
                "notify_gold_prices",
                send_gold_price_notification
            ).await?;
            job_count += 1;
        } else {
            info!("🔕 Telegram is not configured, notification job disabled");
        }

        self.scheduler.start()
            .await
            .map_err(|e| AppError::External(format!("Failed to start scheduler: {}", e)))?;

        info!("✅ Job scheduler started successfully with {} jobs", job_count);
        Ok(())
    }

    /// Stop the scheduler gracefully
    pub async fn stop(&mut self) -> Result<(), AppError> {
        info!("🛑 Stopping job scheduler...");
        self.scheduler.shutdown()
            .await
            .map_err(|e| AppError::External(format!("Failed to stop scheduler: {}", e)))?;
        info!("✅ Job scheduler stopped");
        Ok(())
    }

    /// Helper to schedule a job with tracking
    async fn schedule_job<F, Fut>(
        &mut self,
        schedule: &str,
        job_name: &'static str,
        job_fn: F,
    ) -> Result<(), AppError>
    where
        F: Fn(JobContext) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<JobResult, AppError>> + Send + 'static,
    {
        let context = self.context.clone();
        let job_fn = Arc::new(job_fn);

        let job = Job::new_async(schedule, move |_uuid, _l| {
            let context = context.clone();
            let job_fn = job_fn.clone();
            Box::pin(async move {
                execute_job_with_tracking(job_name, context, job_fn).await;
            })
        })
        .map_err(|e| AppError::External(format!("Failed to create job {}: {}", job_name, e)))?;

        self.scheduler.add(job)
            .await
            .map_err(|e| AppError::External(format!("Failed to add job {}: {}", job_name, e)))?;

        info!("📅 Scheduled: {} [cron: {}]", job_name, schedule);
        Ok(())
    }
}

// Job tracking wrapper
pub async fn execute_job_with_tracking<F, Fut>(
    job_name: &str,
    context: JobContext,
    job_fn: Arc<F>,
) where
    F: Fn(JobContext) -> Fut,
    Fut: std::future::Future<Output = Result<JobResult, AppError>>,
{
    info!("🏃 Starting job: {}", job_name);
    let started_at = Utc::now();
    let tracker = context.tracker.clone();
    let job_id = tracker.record_start(job_name);

    let result = job_fn(context).await;

    let duration_ms = (Utc::now() - started_at).num_milliseconds();

    match result {
        Ok(job_result) => {
            info!(
                "✅ Job completed: {} (processed: {}, failed: {}, duration: {}ms)",
                job_name, job_result.items_processed, job_result.items_failed, duration_ms
            );
            tracker.record_success(job_id, job_result.items_processed, job_result.items_failed, duration_ms);
        }
        Err(e) => {
            error!("❌ Job failed: {} - {}", job_name, e);
            tracker.record_failure(job_id, &e.to_string(), duration_ms);
        }
    }
}

#[derive(Debug)]
pub struct JobResult {
    pub items_processed: i32,
    pub items_failed: i32,
}

// Job implementation functions
pub async fn crawl_all_gold_prices(ctx: JobContext) -> Result<JobResult, AppError> {
    info!("💰 Running scheduled gold price crawl job...");

    let summary = ctx.crawler.crawl_all().await;

    Ok(JobResult { items_processed: summary.processed, items_failed: summary.failed })
}

pub async fn send_gold_price_notification(ctx: JobContext) -> Result<JobResult, AppError> {
    info!("📨 Sending gold price notification...");

    let notifier = ctx.notifier
        .ok_or_else(|| AppError::Internal("notification service not configured".to_string()))?;

    let included = notifier.send_gold_price_notification()
        .await
        .map_err(|e| AppError::External(format!("Error sending Telegram notification: {}", e)))?;

    Ok(JobResult {
        items_processed: included as i32,
        items_failed: (crate::models::Instrument::ALL.len() - included) as i32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::page_source::stub::StubSource;
    use crate::models::Instrument;
    use crate::scraping::tests::SAMPLE_PAGE;
    use crate::services::job_tracker::JobStatus;
    use crate::store::memory_store::MemoryStore;
    use crate::store::GoldPriceStore;

    fn context(source: StubSource) -> JobContext {
        let store = GoldPriceStore::new(Arc::new(MemoryStore::new()), "gold_price");
        JobContext {
            crawler: Arc::new(CrawlService::new(Arc::new(source), store)),
            notifier: None,
            tracker: Arc::new(JobTracker::new()),
        }
    }

    #[tokio::test]
    async fn test_crawl_job_is_tracked_with_counts() {
        let ctx = context(StubSource::default().with_page(Instrument::Sjc, SAMPLE_PAGE));
        let tracker = ctx.tracker.clone();

        execute_job_with_tracking("crawl_gold_prices", ctx, Arc::new(crawl_all_gold_prices)).await;

        let runs = tracker.recent(10);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].status, JobStatus::Success);
        assert_eq!(runs[0].items_processed, Some(1));
        assert_eq!(runs[0].items_failed, Some(6));
    }

    #[tokio::test]
    async fn test_notification_job_without_notifier_fails() {
        let ctx = context(StubSource::default());
        let tracker = ctx.tracker.clone();

        execute_job_with_tracking("notify_gold_prices", ctx, Arc::new(send_gold_price_notification)).await;

        let runs = tracker.recent(10);
        assert_eq!(runs[0].status, JobStatus::Failed);
        assert!(runs[0].error_message.as_deref().unwrap().contains("not configured"));
    }
}
