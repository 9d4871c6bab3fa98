pub mod crawl_service;
pub mod job_scheduler_service;
pub mod job_tracker;
pub mod notification_service;
