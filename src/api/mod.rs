//! API Module
//!
//! HTTP handlers and routing for the customer service.
//!
//! # Endpoints
//! - `GET|POST /api/customers` - List a page of customers / create one
//! - `GET|DELETE /api/customers/:customer_id` - Fetch / delete a customer
//! - `GET|POST /api/customers/:customer_id/address` - Shipping addresses
//! - `DELETE /api/customers/:customer_id/address/:address_id` - Remove one
//! - `GET /api/customers/address/countries/all` - Country list
//! - `POST /api/customers/address/countries` - Add a country
//! - `DELETE /api/customers/address/countries/:country_id` - Remove one
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
