//! Key Namer Module
//!
//! Derives cache keys from logical lookups. Keys are `:`-separated and start
//! with the entity kind, so every pagination window of a collection shares
//! the `"{kind}:all:"` prefix and can be purged as one group.

use std::fmt;

use uuid::Uuid;

// == Entity Kind ==
/// Record kinds that appear in cache keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Customers,
    ShippingAddresses,
    Countries,
}

impl EntityKind {
    /// Key segment for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Customers => "customers",
            EntityKind::ShippingAddresses => "shipping_addresses",
            EntityKind::Countries => "countries",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Page ==
/// A pagination window over an ordered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Page {
    /// Number of records in the window
    pub size: u32,
    /// Number of records skipped before the window
    pub offset: u32,
}

impl Page {
    pub fn new(size: u32, offset: u32) -> Self {
        Self { size, offset }
    }
}

// == Key Functions ==

/// Key for a whole collection, or one pagination window of it.
///
/// `countries:all` and `customers:all:50:0` are typical results.
pub fn collection_key(kind: EntityKind, page: Option<Page>) -> String {
    match page {
        Some(page) => format!("{}{}:{}", collection_group(kind), page.size, page.offset),
        None => format!("{}:all", kind),
    }
}

/// Prefix shared by every paginated variant of a collection.
pub fn collection_group(kind: EntityKind) -> String {
    format!("{}:all:", kind)
}

/// Key for a single record looked up by id.
pub fn entity_key(kind: EntityKind, id: Uuid) -> String {
    format!("{}:id:{}", kind, id)
}

/// Key for the child records attached to one parent.
pub fn related_key(parent: EntityKind, parent_id: Uuid, child: EntityKind) -> String {
    format!("{}:{}:{}", parent, parent_id, child)
}
