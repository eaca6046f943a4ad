//! Remote object store
//!
//! The hosted backend that owns all persistence. This crate only consumes it
//! through [`ObjectStore`]: collection queries, item saves and the per-object
//! `sync` notification fired once a save resolves.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tokio::sync::broadcast;

use crate::domain::{
    items::{data::ItemUpdate, records::ItemId, records::ItemRecord},
    products::records::ProductRecord,
};

pub mod codec;
pub mod errors;
pub mod fixture;
pub mod memory;
pub mod price;
pub mod query;
pub mod rest;

pub use errors::StoreError;
pub use memory::InMemoryStore;
pub use query::{ItemField, ProductField, Query};
pub use rest::{RestStore, RestStoreConfig};

/// Capacity of the `sync` notification channel.
pub(crate) const SYNC_CHANNEL_CAPACITY: usize = 64;

/// Acknowledgement of a persisted save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveAck {
    pub updated_at: Timestamp,
}

/// Fired on an item after its save resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSynced {
    pub item: ItemId,
    pub updated_at: Timestamp,
}

#[automock]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch products matching the query.
    async fn fetch_products(
        &self,
        query: Query<ProductField>,
    ) -> Result<Vec<ProductRecord>, StoreError>;

    /// Fetch items matching the query.
    async fn fetch_items(&self, query: Query<ItemField>) -> Result<Vec<ItemRecord>, StoreError>;

    /// Persist field changes on an existing item.
    async fn save_item(&self, item: ItemId, update: ItemUpdate) -> Result<SaveAck, StoreError>;

    /// Subscribe to `sync` notifications for saved items.
    fn subscribe_sync(&self) -> broadcast::Receiver<ItemSynced>;
}
