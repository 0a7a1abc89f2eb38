//! Response DTOs for the customer API
//!
//! Defines the structure of outgoing HTTP response bodies. The paged and
//! relation responses are also what the cache stores for those keys.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cache::CacheStats;
use crate::models::{Address, Customer};

/// Response body for `GET /api/customers`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPage {
    pub page_size: u32,
    /// Offset plus page size, as reported by the service
    pub total_count: u32,
    pub customers: Vec<Customer>,
}

impl CustomerPage {
    pub fn new(page_size: u32, offset: u32, customers: Vec<Customer>) -> Self {
        Self {
            page_size,
            total_count: offset.saturating_add(page_size),
            customers,
        }
    }
}

/// Response body for `GET /api/customers/:customer_id/address`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddressesResponse {
    pub customer_id: Uuid,
    pub shipping_addresses: Vec<Address>,
}

/// Response body for `GET /stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub backend: String,
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    pub fn new(backend: impl Into<String>, stats: CacheStats) -> Self {
        Self {
            backend: backend.into(),
            hit_rate: stats.hit_rate(),
            stats,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
