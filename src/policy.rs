//! Invalidation Policy
//!
//! Maps each write to the cache entries it makes stale. Collections are
//! always purged as a whole group: a cached page depends on the entire
//! collection, so invalidating one window would leave the others stale.

use uuid::Uuid;

use crate::cache::keys::{collection_group, collection_key, entity_key, related_key};
use crate::cache::{EntityKind, Invalidation};

/// A confirmed write against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    CreateCustomer,
    DeleteCustomer { customer_id: Uuid },
    CreateShippingAddress { customer_id: Uuid },
    DeleteShippingAddress { customer_id: Uuid },
    /// Any insert, update or delete of country reference data
    CountriesChanged,
}

impl WriteOp {
    /// Cache targets this write must purge.
    pub fn invalidations(&self) -> Vec<Invalidation> {
        match *self {
            WriteOp::CreateCustomer => vec![all_customers()],
            WriteOp::DeleteCustomer { customer_id } => vec![
                all_customers(),
                Invalidation::Exact(entity_key(EntityKind::Customers, customer_id)),
                shipping_addresses(customer_id),
            ],
            WriteOp::CreateShippingAddress { customer_id }
            | WriteOp::DeleteShippingAddress { customer_id } => {
                vec![shipping_addresses(customer_id)]
            }
            WriteOp::CountriesChanged => vec![Invalidation::Exact(collection_key(
                EntityKind::Countries,
                None,
            ))],
        }
    }
}

fn all_customers() -> Invalidation {
    Invalidation::Prefix(collection_group(EntityKind::Customers))
}

fn shipping_addresses(customer_id: Uuid) -> Invalidation {
    Invalidation::Exact(related_key(
        EntityKind::Customers,
        customer_id,
        EntityKind::ShippingAddresses,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_customer_purges_every_page() {
        assert_eq!(
            WriteOp::CreateCustomer.invalidations(),
            vec![Invalidation::Prefix("customers:all:".to_string())]
        );
    }

    #[test]
    fn test_delete_customer_targets() {
        let id = Uuid::new_v4();
        let targets = WriteOp::DeleteCustomer { customer_id: id }.invalidations();

        assert_eq!(targets.len(), 3);
        assert!(targets.contains(&Invalidation::Prefix("customers:all:".to_string())));
        assert!(targets.contains(&Invalidation::Exact(format!("customers:id:{}", id))));
        assert!(targets.contains(&Invalidation::Exact(format!(
            "customers:{}:shipping_addresses",
            id
        ))));
    }

    #[test]
    fn test_shipping_address_writes_touch_only_that_customer() {
        let id = Uuid::new_v4();
        let expected = vec![Invalidation::Exact(related_key(
            EntityKind::Customers,
            id,
            EntityKind::ShippingAddresses,
        ))];

        assert_eq!(
            WriteOp::CreateShippingAddress { customer_id: id }.invalidations(),
            expected
        );
        assert_eq!(
            WriteOp::DeleteShippingAddress { customer_id: id }.invalidations(),
            expected
        );
    }

    #[test]
    fn test_countries_changed_targets_countries_list() {
        assert_eq!(
            WriteOp::CountriesChanged.invalidations(),
            vec![Invalidation::Exact("countries:all".to_string())]
        );
    }
}
