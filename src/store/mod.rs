//! Customer Store
//!
//! The authoritative record store the cache sits in front of. Every call is
//! atomic on its own and reports failure through `StoreError`.

mod memory;
mod seed;

use async_trait::async_trait;
use uuid::Uuid;

use crate::cache::Page;
use crate::error::StoreResult;
use crate::models::{Address, AddressRequest, Country, CreateCustomerRequest, Customer};

pub use memory::MemoryStore;
pub use seed::SEED_COUNTRIES;

/// Keyed, ordered and filtered access to customers, addresses and countries.
#[async_trait]
pub trait CustomerStore: Send + Sync + 'static {
    /// One window of customers ordered by last name, then id.
    async fn list_customers(&self, page: Page) -> StoreResult<Vec<Customer>>;

    async fn customer(&self, id: Uuid) -> StoreResult<Customer>;

    /// Inserts the billing address, the customer, and a shipping link to the
    /// billing address.
    async fn create_customer(&self, request: CreateCustomerRequest) -> StoreResult<Customer>;

    /// Removes the customer, its shipping links, and any of its addresses no
    /// other customer still references.
    async fn delete_customer(&self, id: Uuid) -> StoreResult<()>;

    /// Addresses linked to the customer as shipping destinations. Empty when
    /// there are none.
    async fn shipping_addresses(&self, customer_id: Uuid) -> StoreResult<Vec<Address>>;

    async fn create_shipping_address(
        &self,
        customer_id: Uuid,
        address: AddressRequest,
    ) -> StoreResult<Address>;

    /// Unlinks and removes a shipping address. Rejected while the address is
    /// the customer's billing address.
    async fn delete_shipping_address(&self, customer_id: Uuid, address_id: Uuid)
        -> StoreResult<()>;

    /// All countries ordered by name.
    async fn countries(&self) -> StoreResult<Vec<Country>>;

    async fn create_country(&self, name: String) -> StoreResult<Country>;

    /// Rejected while any address references the country.
    async fn delete_country(&self, id: Uuid) -> StoreResult<()>;
}
