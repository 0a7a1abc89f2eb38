//! Customer Cache - customer record service with a cache-aside layer
//!
//! Reads are served from a TTL cache (in memory or Redis) when possible and
//! loaded from the customer store otherwise; writes go to the store and then
//! purge exactly the cache groups they made stale.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod policy;
pub mod service;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use service::{CustomerService, TtlPolicy};
pub use tasks::spawn_cleanup_task;
