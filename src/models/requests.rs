//! Request DTOs for the customer API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;
use uuid::Uuid;

use crate::cache::Page;

/// Largest page a client may request
pub const MAX_PAGE_SIZE: u32 = 500;

/// Query string for `GET /api/customers`
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Offset into the ordered customer list
    #[serde(default)]
    pub current_number: u32,
}

fn default_page_size() -> u32 {
    50
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            current_number: 0,
        }
    }
}

impl PageQuery {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Some(format!("pageSize must be between 1 and {}", MAX_PAGE_SIZE));
        }
        None
    }

    pub fn page(&self) -> Page {
        Page::new(self.page_size, self.current_number)
    }
}

/// Address fields supplied by a client. The id is assigned by the store and
/// the country name is resolved from `country_id`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    pub street1: String,
    #[serde(default)]
    pub street2: Option<String>,
    pub dependent_locality: String,
    pub locale: String,
    pub postal_code: String,
    pub country_id: Uuid,
}

impl AddressRequest {
    pub fn validate(&self) -> Option<String> {
        first_blank(&[
            ("street1", &self.street1),
            ("dependentLocality", &self.dependent_locality),
            ("locale", &self.locale),
            ("postalCode", &self.postal_code),
        ])
    }
}

/// Request body for `POST /api/customers`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub primary_phone: String,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub secondary_phone: Option<String>,
    #[serde(default)]
    pub fax: Option<String>,
    pub billing_address: AddressRequest,
}

impl CreateCustomerRequest {
    pub fn validate(&self) -> Option<String> {
        first_blank(&[
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("email", &self.email),
            ("primaryPhone", &self.primary_phone),
        ])
        .or_else(|| self.billing_address.validate())
    }
}

/// Request body for `POST /api/customers/address/countries`
#[derive(Debug, Clone, Deserialize)]
pub struct CountryRequest {
    pub name: String,
}

impl CountryRequest {
    pub fn validate(&self) -> Option<String> {
        first_blank(&[("name", &self.name)])
    }
}

fn first_blank(fields: &[(&str, &String)]) -> Option<String> {
    fields
        .iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| format!("{} is required", name))
}
