use std::sync::Arc;

use crate::services::crawl_service::CrawlService;
use crate::services::job_tracker::JobTracker;

#[derive(Clone)]
pub struct AppState {
    pub crawler: Arc<CrawlService>,
    pub job_tracker: Arc<JobTracker>,
}
