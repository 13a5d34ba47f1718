pub mod grading;
pub mod quiz_attempt_service;
pub mod quiz_service;
pub mod quiz_stats;
