//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check key naming and group deletion over arbitrary ids
//! and pagination windows.

use proptest::prelude::*;
use uuid::Uuid;

use crate::cache::keys::{collection_group, collection_key, entity_key, related_key};
use crate::cache::{CacheStore, EntityKind, Page};

// == Strategies ==
fn uuid_strategy() -> impl Strategy<Value = Uuid> {
    any::<u128>().prop_map(Uuid::from_u128)
}

fn page_strategy() -> impl Strategy<Value = Page> {
    (1u32..=500, 0u32..100_000).prop_map(|(size, offset)| Page::new(size, offset))
}

fn kind_strategy() -> impl Strategy<Value = EntityKind> {
    prop_oneof![
        Just(EntityKind::Customers),
        Just(EntityKind::ShippingAddresses),
        Just(EntityKind::Countries),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Identical logical queries name the same key; different windows never do.
    #[test]
    fn prop_collection_keys_injective(a in page_strategy(), b in page_strategy()) {
        let ka = collection_key(EntityKind::Customers, Some(a));
        let kb = collection_key(EntityKind::Customers, Some(b));
        prop_assert_eq!(ka == kb, a == b);
    }

    #[test]
    fn prop_entity_keys_injective(
        ka in kind_strategy(), ia in uuid_strategy(),
        kb in kind_strategy(), ib in uuid_strategy(),
    ) {
        prop_assert_eq!(entity_key(ka, ia) == entity_key(kb, ib), ka == kb && ia == ib);
    }

    // Each customer's relation key stays outside every other group it could
    // be confused with.
    #[test]
    fn prop_related_key_isolated(parent in uuid_strategy(), other in uuid_strategy(), page in page_strategy()) {
        prop_assume!(parent != other);
        let related = related_key(EntityKind::Customers, parent, EntityKind::ShippingAddresses);
        let other_related = related_key(EntityKind::Customers, other, EntityKind::ShippingAddresses);

        prop_assert_ne!(&related, &other_related);
        prop_assert!(!related.starts_with(&collection_group(EntityKind::Customers)));
        prop_assert!(!related.starts_with(&entity_key(EntityKind::Customers, parent)));
        prop_assert!(!collection_key(EntityKind::Customers, Some(page)).starts_with(&related));
    }

    // Deleting the collection group removes every page and nothing else.
    #[test]
    fn prop_group_delete_complete_and_isolated(
        pages in prop::collection::hash_set(page_strategy(), 1..20),
        ids in prop::collection::hash_set(uuid_strategy(), 1..10),
    ) {
        let mut store = CacheStore::new();
        for page in &pages {
            store.set(collection_key(EntityKind::Customers, Some(*page)), "page".into(), 300).unwrap();
        }
        for id in &ids {
            store.set(entity_key(EntityKind::Customers, *id), "entity".into(), 300).unwrap();
            store
                .set(related_key(EntityKind::Customers, *id, EntityKind::ShippingAddresses), "rel".into(), 300)
                .unwrap();
        }

        let removed = store.delete_prefix(&collection_group(EntityKind::Customers));

        prop_assert_eq!(removed, pages.len());
        prop_assert_eq!(store.len(), ids.len() * 2);
        for page in &pages {
            prop_assert!(store.get(&collection_key(EntityKind::Customers, Some(*page))).is_none());
        }
        for id in &ids {
            prop_assert!(store.get(&entity_key(EntityKind::Customers, *id)).is_some());
        }
    }

    // Last write wins for any sequence of sets on one key.
    #[test]
    fn prop_overwrite_semantics(values in prop::collection::vec("[a-z]{1,16}", 1..10)) {
        let mut store = CacheStore::new();
        for value in &values {
            store.set("customers:all:50:0".to_string(), value.clone(), 300).unwrap();
        }
        prop_assert_eq!(store.get("customers:all:50:0"), values.last().cloned());
        prop_assert_eq!(store.len(), 1);
    }
}
