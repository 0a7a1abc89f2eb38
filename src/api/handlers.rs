//! API Handlers
//!
//! Thin HTTP adapters over `CustomerService`: validate, call, shape.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::{
    Address, AddressRequest, Country, CountryRequest, CreateCustomerRequest, Customer,
    CustomerPage, HealthResponse, PageQuery, ShippingAddressesResponse, StatsResponse,
};
use crate::service::CustomerService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: CustomerService,
}

impl AppState {
    pub fn new(service: CustomerService) -> Self {
        Self { service }
    }
}

fn reject_invalid(message: Option<String>) -> Result<()> {
    match message {
        Some(msg) => Err(ApiError::BadRequest(msg)),
        None => Ok(()),
    }
}

/// Handler for GET /api/customers
pub async fn list_customers_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<CustomerPage>> {
    reject_invalid(query.validate())?;
    Ok(Json(state.service.list_customers(query).await?))
}

/// Handler for GET /api/customers/:customer_id
pub async fn get_customer_handler(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<Customer>> {
    Ok(Json(state.service.customer(customer_id).await?))
}

/// Handler for POST /api/customers
pub async fn create_customer_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateCustomerRequest>,
) -> Result<Json<Customer>> {
    reject_invalid(req.validate())?;
    Ok(Json(state.service.create_customer(req).await?))
}

/// Handler for DELETE /api/customers/:customer_id
pub async fn delete_customer_handler(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> Result<StatusCode> {
    state.service.delete_customer(customer_id).await?;
    Ok(StatusCode::OK)
}

/// Handler for GET /api/customers/:customer_id/address
pub async fn shipping_addresses_handler(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<ShippingAddressesResponse>> {
    Ok(Json(state.service.shipping_addresses(customer_id).await?))
}

/// Handler for POST /api/customers/:customer_id/address
pub async fn create_shipping_address_handler(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
    Json(req): Json<AddressRequest>,
) -> Result<Json<Address>> {
    reject_invalid(req.validate())?;
    Ok(Json(
        state
            .service
            .create_shipping_address(customer_id, req)
            .await?,
    ))
}

/// Handler for DELETE /api/customers/:customer_id/address/:address_id
pub async fn delete_shipping_address_handler(
    State(state): State<AppState>,
    Path((customer_id, address_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode> {
    state
        .service
        .delete_shipping_address(customer_id, address_id)
        .await?;
    Ok(StatusCode::OK)
}

/// Handler for GET /api/customers/address/countries/all
pub async fn countries_handler(State(state): State<AppState>) -> Result<Json<Vec<Country>>> {
    Ok(Json(state.service.countries().await?))
}

/// Handler for POST /api/customers/address/countries
pub async fn create_country_handler(
    State(state): State<AppState>,
    Json(req): Json<CountryRequest>,
) -> Result<Json<Country>> {
    reject_invalid(req.validate())?;
    Ok(Json(state.service.create_country(req.name).await?))
}

/// Handler for DELETE /api/customers/address/countries/:country_id
pub async fn delete_country_handler(
    State(state): State<AppState>,
    Path(country_id): Path<Uuid>,
) -> Result<StatusCode> {
    state.service.delete_country(country_id).await?;
    Ok(StatusCode::OK)
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.service.cache();
    Json(StatsResponse::new(cache.backend_name(), cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
