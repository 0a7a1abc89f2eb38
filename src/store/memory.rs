//! In-memory customer store
//!
//! Four tables behind one `RwLock`, so each call is atomic. Cascades and
//! guards run inside the write path before the call returns.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use super::seed::{SAMPLE_COUNTRY, SEED_COUNTRIES};
use super::CustomerStore;
use crate::cache::Page;
use crate::error::{StoreError, StoreResult};
use crate::models::{
    Address, AddressRequest, Country, CreateCustomerRequest, Customer, CustomerShippingAddress,
};

#[derive(Debug, Default)]
struct Tables {
    countries: HashMap<Uuid, Country>,
    addresses: HashMap<Uuid, Address>,
    customers: HashMap<Uuid, Customer>,
    shipping: HashMap<Uuid, CustomerShippingAddress>,
}

impl Tables {
    fn build_address(&self, request: AddressRequest) -> StoreResult<Address> {
        let country = self.countries.get(&request.country_id).ok_or_else(|| {
            StoreError::InvalidRequest(format!("Unknown country id {}", request.country_id))
        })?;

        Ok(Address {
            id: Uuid::new_v4(),
            street1: request.street1,
            street2: request.street2,
            dependent_locality: request.dependent_locality,
            locale: request.locale,
            postal_code: request.postal_code,
            country_id: country.id,
            country: country.name.clone(),
        })
    }

    fn link(&mut self, customer_id: Uuid, address_id: Uuid) {
        let row = CustomerShippingAddress {
            id: Uuid::new_v4(),
            customer_id,
            address_id,
        };
        self.shipping.insert(row.id, row);
    }

    fn is_referenced(&self, address_id: Uuid) -> bool {
        self.customers
            .values()
            .any(|c| c.billing_address_id == address_id)
            || self.shipping.values().any(|s| s.address_id == address_id)
    }

    /// Drops addresses that no customer or shipping link points at anymore.
    fn drop_orphans(&mut self, candidates: impl IntoIterator<Item = Uuid>) -> usize {
        let mut removed = 0;
        for address_id in candidates {
            if !self.is_referenced(address_id) && self.addresses.remove(&address_id).is_some() {
                removed += 1;
            }
        }
        removed
    }
}

// == Memory Store ==
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    offline: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the reference countries only.
    pub fn with_countries() -> Self {
        let mut tables = Tables::default();
        for name in SEED_COUNTRIES {
            let country = Country {
                id: Uuid::new_v4(),
                name: (*name).to_string(),
            };
            tables.countries.insert(country.id, country);
        }

        Self {
            tables: RwLock::new(tables),
            offline: AtomicBool::new(false),
        }
    }

    /// Creates a store with the reference countries and one sample customer
    /// whose billing address is also a shipping address.
    pub fn seeded() -> Self {
        let mut store = Self::with_countries();
        {
            let tables = store.tables.get_mut();
            let country_id = tables
                .countries
                .values()
                .find(|c| c.name == SAMPLE_COUNTRY)
                .map(|c| c.id);

            if let Some(country_id) = country_id {
                let billing = AddressRequest {
                    street1: "555 Green Street".to_string(),
                    street2: Some("333 Red Ave".to_string()),
                    dependent_locality: "Auburn".to_string(),
                    locale: "NY".to_string(),
                    postal_code: "13021".to_string(),
                    country_id,
                };
                let sample = CreateCustomerRequest {
                    first_name: "Joel".to_string(),
                    last_name: "Miller".to_string(),
                    email: "jmiller46@testmail.com".to_string(),
                    primary_phone: "3152443902".to_string(),
                    ext: Some("123".to_string()),
                    secondary_phone: Some("1112223333".to_string()),
                    fax: Some("1234567890".to_string()),
                    billing_address: billing,
                };
                // Countries were inserted just above, so the lookup cannot fail
                if let Ok(customer) = insert_customer(tables, sample) {
                    info!(customer_id = %customer.id, "seeded sample customer");
                }
            }
        }
        store
    }

    /// Makes every subsequent call fail with `StoreError::Failure` until
    /// switched back.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(StoreError::Failure("store is offline".to_string()))
        } else {
            Ok(())
        }
    }
}

fn insert_customer(tables: &mut Tables, request: CreateCustomerRequest) -> StoreResult<Customer> {
    let billing = tables.build_address(request.billing_address)?;

    let customer = Customer {
        id: Uuid::new_v4(),
        created: Utc::now(),
        first_name: request.first_name,
        last_name: request.last_name,
        email: request.email,
        primary_phone: request.primary_phone,
        ext: request.ext,
        secondary_phone: request.secondary_phone,
        fax: request.fax,
        billing_address_id: billing.id,
    };

    tables.addresses.insert(billing.id, billing);
    tables.customers.insert(customer.id, customer.clone());
    tables.link(customer.id, customer.billing_address_id);
    Ok(customer)
}

#[async_trait]
impl CustomerStore for MemoryStore {
    async fn list_customers(&self, page: Page) -> StoreResult<Vec<Customer>> {
        self.ensure_online()?;
        let tables = self.tables.read().await;

        let mut customers: Vec<&Customer> = tables.customers.values().collect();
        customers.sort_by(|a, b| a.last_name.cmp(&b.last_name).then(a.id.cmp(&b.id)));

        Ok(customers
            .into_iter()
            .skip(page.offset as usize)
            .take(page.size as usize)
            .cloned()
            .collect())
    }

    async fn customer(&self, id: Uuid) -> StoreResult<Customer> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        tables
            .customers
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("No customer exists with the provided id".into()))
    }

    async fn create_customer(&self, request: CreateCustomerRequest) -> StoreResult<Customer> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        let customer = insert_customer(&mut tables, request)?;
        debug!(customer_id = %customer.id, "customer created");
        Ok(customer)
    }

    async fn delete_customer(&self, id: Uuid) -> StoreResult<()> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;

        let customer = tables
            .customers
            .remove(&id)
            .ok_or_else(|| StoreError::NotFound("Customer not found".into()))?;

        let mut linked = vec![customer.billing_address_id];
        tables.shipping.retain(|_, row| {
            if row.customer_id == id {
                linked.push(row.address_id);
                false
            } else {
                true
            }
        });
        linked.sort();
        linked.dedup();

        let removed = tables.drop_orphans(linked);
        debug!(customer_id = %id, addresses_removed = removed, "customer deleted");
        Ok(())
    }

    async fn shipping_addresses(&self, customer_id: Uuid) -> StoreResult<Vec<Address>> {
        self.ensure_online()?;
        let tables = self.tables.read().await;

        let mut addresses: Vec<Address> = tables
            .shipping
            .values()
            .filter(|row| row.customer_id == customer_id)
            .filter_map(|row| tables.addresses.get(&row.address_id).cloned())
            .collect();
        addresses.sort_by_key(|a| a.id);
        Ok(addresses)
    }

    async fn create_shipping_address(
        &self,
        customer_id: Uuid,
        address: AddressRequest,
    ) -> StoreResult<Address> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;

        if !tables.customers.contains_key(&customer_id) {
            return Err(StoreError::NotFound("Customer not found".into()));
        }

        let address = tables.build_address(address)?;
        tables.addresses.insert(address.id, address.clone());
        tables.link(customer_id, address.id);
        Ok(address)
    }

    async fn delete_shipping_address(
        &self,
        customer_id: Uuid,
        address_id: Uuid,
    ) -> StoreResult<()> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;

        let billing_address_id = tables
            .customers
            .get(&customer_id)
            .map(|c| c.billing_address_id)
            .ok_or_else(|| StoreError::NotFound("Customer not found".into()))?;

        let linked = tables
            .shipping
            .values()
            .any(|row| row.customer_id == customer_id && row.address_id == address_id);
        if !linked || !tables.addresses.contains_key(&address_id) {
            return Err(StoreError::NotFound("Address not found".into()));
        }

        if billing_address_id == address_id {
            return Err(StoreError::Conflict(
                "Cannot delete current billing address while it is still active.".into(),
            ));
        }

        tables
            .shipping
            .retain(|_, row| !(row.customer_id == customer_id && row.address_id == address_id));
        tables.drop_orphans([address_id]);
        Ok(())
    }

    async fn countries(&self) -> StoreResult<Vec<Country>> {
        self.ensure_online()?;
        let tables = self.tables.read().await;

        let mut countries: Vec<Country> = tables.countries.values().cloned().collect();
        countries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(countries)
    }

    async fn create_country(&self, name: String) -> StoreResult<Country> {
        self.ensure_online()?;
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(StoreError::InvalidRequest("name is required".into()));
        }

        let mut tables = self.tables.write().await;
        if tables
            .countries
            .values()
            .any(|c| c.name.eq_ignore_ascii_case(&name))
        {
            return Err(StoreError::Conflict(format!("Country '{}' already exists", name)));
        }

        let country = Country {
            id: Uuid::new_v4(),
            name,
        };
        tables.countries.insert(country.id, country.clone());
        Ok(country)
    }

    async fn delete_country(&self, id: Uuid) -> StoreResult<()> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;

        if !tables.countries.contains_key(&id) {
            return Err(StoreError::NotFound("Country not found".into()));
        }
        if tables.addresses.values().any(|a| a.country_id == id) {
            return Err(StoreError::Conflict(
                "Country is still referenced by an address".into(),
            ));
        }

        tables.countries.remove(&id);
        Ok(())
    }
}
