use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

const MAX_RUNS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Running,
    Success,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobRun {
    pub id: u64,
    pub job_name: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub status: JobStatus,
    pub items_processed: Option<i32>,
    pub items_failed: Option<i32>,
    pub duration_ms: Option<i64>,
    pub error_message: Option<String>,
}

/// Keeps the most recent scheduled job runs in memory, newest first.
#[derive(Default)]
pub struct JobTracker {
    runs: Mutex<VecDeque<JobRun>>,
    next_id: AtomicU64,
}

impl JobTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_start(&self, job_name: &str) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let mut runs = self.runs.lock();
        runs.push_front(JobRun {
            id,
            job_name: job_name.to_string(),
            started_at: Utc::now(),
            completed_at: None,
            status: JobStatus::Running,
            items_processed: None,
            items_failed: None,
            duration_ms: None,
            error_message: None,
        });
        runs.truncate(MAX_RUNS);
        id
    }

    pub fn record_success(&self, id: u64, items_processed: i32, items_failed: i32, duration_ms: i64) {
        self.update(id, |run| {
            run.status = JobStatus::Success;
            run.items_processed = Some(items_processed);
            run.items_failed = Some(items_failed);
            run.duration_ms = Some(duration_ms);
        });
    }

    pub fn record_failure(&self, id: u64, error_message: &str, duration_ms: i64) {
        self.update(id, |run| {
            run.status = JobStatus::Failed;
            run.error_message = Some(error_message.to_string());
            run.duration_ms = Some(duration_ms);
        });
    }

    pub fn recent(&self, limit: usize) -> Vec<JobRun> {
        self.runs.lock().iter().take(limit).cloned().collect()
    }

    fn update(&self, id: u64, f: impl FnOnce(&mut JobRun)) {
        let mut runs = self.runs.lock();
        if let Some(run) = runs.iter_mut().find(|r| r.id == id) {
            run.completed_at = Some(Utc::now());
            f(run);
        }
    }
}
