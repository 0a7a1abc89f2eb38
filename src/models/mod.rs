//! Domain records and request/response models
//!
//! Records are what the store holds and what the cache serializes; the DTOs
//! shape HTTP request and response bodies.

pub mod domain;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use domain::{Address, Country, Customer, CustomerShippingAddress};
pub use requests::{AddressRequest, CountryRequest, CreateCustomerRequest, PageQuery};
pub use responses::{
    CustomerPage, ErrorResponse, HealthResponse, ShippingAddressesResponse, StatsResponse,
};
