pub mod performance_cache;
pub mod store_performance;
pub mod store_service;
