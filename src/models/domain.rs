//! Domain records
//!
//! Rows of the customer store. References between records are plain ids;
//! cascade and guard rules live in the store's write path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A customer and the id of their billing address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub created: DateTime<Utc>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub primary_phone: String,
    pub ext: Option<String>,
    pub secondary_phone: Option<String>,
    pub fax: Option<String>,
    /// Must reference an existing `Address` while the customer exists
    pub billing_address_id: Uuid,
}

/// A postal address. Not owned by any single customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: Uuid,
    pub street1: String,
    pub street2: Option<String>,
    /// State or province
    pub dependent_locality: String,
    /// City
    pub locale: String,
    pub postal_code: String,
    pub country_id: Uuid,
    /// Country display name, copied from the referenced `Country`
    pub country: String,
}

/// Marks an address as a shipping destination for a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerShippingAddress {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub address_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: Uuid,
    pub name: String,
}
