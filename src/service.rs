//! Customer Service
//!
//! The request-handler side of the cache-aside layer. Reads go through
//! `CacheAside::fetch` with the store query as loader; writes go to the store
//! first and, once it has confirmed them, purge what the invalidation policy
//! names for that write.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::cache::keys::{collection_key, entity_key, related_key};
use crate::cache::{CacheAside, CacheStats, EntityKind};
use crate::config::{clamp_ttl, Config};
use crate::error::{StoreError, StoreResult};
use crate::models::{
    Address, AddressRequest, Country, CreateCustomerRequest, Customer, CustomerPage, PageQuery,
    ShippingAddressesResponse,
};
use crate::policy::WriteOp;
use crate::store::CustomerStore;

/// Lifetimes, in seconds, of cached reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlPolicy {
    /// Customer pages, single customers and shipping addresses
    pub records: u64,
    /// The countries reference list
    pub countries: u64,
}

impl TtlPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            records: clamp_ttl(config.cache_ttl),
            countries: clamp_ttl(config.countries_ttl),
        }
    }
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[derive(Clone)]
pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
    cache: CacheAside,
    ttl: TtlPolicy,
}

impl CustomerService {
    pub fn new(store: Arc<dyn CustomerStore>, cache: CacheAside, ttl: TtlPolicy) -> Self {
        Self { store, cache, ttl }
    }

    pub fn cache(&self) -> &CacheAside {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    // == Reads ==

    pub async fn list_customers(&self, query: PageQuery) -> StoreResult<CustomerPage> {
        let page = query.page();
        let key = collection_key(EntityKind::Customers, Some(page));

        self.cache
            .fetch(&key, self.ttl.records, || async {
                let customers = self.store.list_customers(page).await?;
                Ok(CustomerPage::new(page.size, page.offset, customers))
            })
            .await
    }

    pub async fn customer(&self, customer_id: Uuid) -> StoreResult<Customer> {
        let key = entity_key(EntityKind::Customers, customer_id);
        self.cache
            .fetch(&key, self.ttl.records, || self.store.customer(customer_id))
            .await
    }

    /// An empty list is reported as not found and therefore never cached.
    pub async fn shipping_addresses(
        &self,
        customer_id: Uuid,
    ) -> StoreResult<ShippingAddressesResponse> {
        let key = related_key(
            EntityKind::Customers,
            customer_id,
            EntityKind::ShippingAddresses,
        );

        self.cache
            .fetch(&key, self.ttl.records, || async {
                let shipping_addresses = self.store.shipping_addresses(customer_id).await?;
                if shipping_addresses.is_empty() {
                    return Err(StoreError::NotFound(
                        "No addresses exist for the given customer".to_string(),
                    ));
                }
                Ok(ShippingAddressesResponse {
                    customer_id,
                    shipping_addresses,
                })
            })
            .await
    }

    pub async fn countries(&self) -> StoreResult<Vec<Country>> {
        let key = collection_key(EntityKind::Countries, None);
        self.cache
            .fetch(&key, self.ttl.countries, || self.store.countries())
            .await
    }

    // == Writes ==

    pub async fn create_customer(&self, request: CreateCustomerRequest) -> StoreResult<Customer> {
        let customer = self.store.create_customer(request).await?;
        self.invalidate_after(WriteOp::CreateCustomer).await;
        Ok(customer)
    }

    pub async fn delete_customer(&self, customer_id: Uuid) -> StoreResult<()> {
        self.store.delete_customer(customer_id).await?;
        self.invalidate_after(WriteOp::DeleteCustomer { customer_id })
            .await;
        Ok(())
    }

    pub async fn create_shipping_address(
        &self,
        customer_id: Uuid,
        address: AddressRequest,
    ) -> StoreResult<Address> {
        let address = self
            .store
            .create_shipping_address(customer_id, address)
            .await?;
        self.invalidate_after(WriteOp::CreateShippingAddress { customer_id })
            .await;
        Ok(address)
    }

    pub async fn delete_shipping_address(
        &self,
        customer_id: Uuid,
        address_id: Uuid,
    ) -> StoreResult<()> {
        self.store
            .delete_shipping_address(customer_id, address_id)
            .await?;
        self.invalidate_after(WriteOp::DeleteShippingAddress { customer_id })
            .await;
        Ok(())
    }

    pub async fn create_country(&self, name: String) -> StoreResult<Country> {
        let country = self.store.create_country(name).await?;
        self.invalidate_after(WriteOp::CountriesChanged).await;
        Ok(country)
    }

    pub async fn delete_country(&self, country_id: Uuid) -> StoreResult<()> {
        self.store.delete_country(country_id).await?;
        self.invalidate_after(WriteOp::CountriesChanged).await;
        Ok(())
    }

    /// Only reached once the store has confirmed `op`. Never fails the write.
    async fn invalidate_after(&self, op: WriteOp) {
        let outcome = self.cache.invalidate(&op.invalidations()).await;
        if outcome.failed > 0 {
            warn!(?op, failed = outcome.failed, "stale entries left to expire by ttl");
        } else {
            debug!(?op, removed = outcome.removed, "write invalidated cache");
        }
    }
}
