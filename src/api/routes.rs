//! API Routes
//!
//! Configures the Axum router with all customer service endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    countries_handler, create_country_handler, create_customer_handler,
    create_shipping_address_handler, delete_country_handler, delete_customer_handler,
    delete_shipping_address_handler, get_customer_handler, health_handler,
    list_customers_handler, shipping_addresses_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/customers",
            get(list_customers_handler).post(create_customer_handler),
        )
        .route(
            "/api/customers/address/countries/all",
            get(countries_handler),
        )
        .route(
            "/api/customers/address/countries",
            post(create_country_handler),
        )
        .route(
            "/api/customers/address/countries/:country_id",
            delete(delete_country_handler),
        )
        .route(
            "/api/customers/:customer_id",
            get(get_customer_handler).delete(delete_customer_handler),
        )
        .route(
            "/api/customers/:customer_id/address",
            get(shipping_addresses_handler).post(create_shipping_address_handler),
        )
        .route(
            "/api/customers/:customer_id/address/:address_id",
            delete(delete_shipping_address_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
