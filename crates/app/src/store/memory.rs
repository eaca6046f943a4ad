//! In-memory object store.

use async_trait::async_trait;
use jiff::Timestamp;
use rustc_hash::FxHashMap;
use tokio::sync::{RwLock, broadcast};
use tracing::debug;

use crate::{
    domain::{
        items::{
            data::ItemUpdate,
            records::{ItemId, ItemRecord, ProductLink},
        },
        products::records::{ProductId, ProductRecord},
    },
    store::{
        ItemField, ItemSynced, ObjectStore, ProductField, Query, SYNC_CHANNEL_CAPACITY, SaveAck,
        StoreError, fixture::Fixture,
    },
};

/// Object store kept in process memory.
///
/// Evaluates queries the way the hosted backend does and can be told to
/// reject upcoming saves, which stands in for network failures.
#[derive(Debug)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
    sync: broadcast::Sender<ItemSynced>,
}

#[derive(Debug, Default)]
struct StoreState {
    products: FxHashMap<ProductId, ProductRecord>,
    items: FxHashMap<ItemId, ItemRecord>,
    failing_saves: usize,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::seeded(Vec::new(), Vec::new())
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store holding the given records.
    pub fn seeded(
        products: impl IntoIterator<Item = ProductRecord>,
        items: impl IntoIterator<Item = ItemRecord>,
    ) -> Self {
        let mut state = StoreState::default();

        for product in products {
            state.products.insert(product.id.clone(), product);
        }

        for item in items {
            state.items.insert(item.id.clone(), stored(item));
        }

        let (sync, _receiver) = broadcast::channel(SYNC_CHANNEL_CAPACITY);

        Self {
            state: RwLock::new(state),
            sync,
        }
    }

    pub async fn insert_product(&self, product: ProductRecord) {
        self.state
            .write()
            .await
            .products
            .insert(product.id.clone(), product);
    }

    pub async fn insert_item(&self, item: ItemRecord) {
        self.state
            .write()
            .await
            .items
            .insert(item.id.clone(), stored(item));
    }

    /// Reject the next `count` saves as if the network had failed.
    pub async fn fail_saves(&self, count: usize) {
        self.state.write().await.failing_saves = count;
    }

    /// Current stored state of an item, product not expanded.
    pub async fn item(&self, id: &ItemId) -> Option<ItemRecord> {
        self.state.read().await.items.get(id).cloned()
    }
}

impl From<Fixture> for InMemoryStore {
    fn from(fixture: Fixture) -> Self {
        Self::seeded(fixture.products, fixture.items)
    }
}

#[async_trait]
impl ObjectStore for InMemoryStore {
    async fn fetch_products(
        &self,
        query: Query<ProductField>,
    ) -> Result<Vec<ProductRecord>, StoreError> {
        let state = self.state.read().await;

        Ok(query.apply(state.products.values().cloned()))
    }

    async fn fetch_items(&self, query: Query<ItemField>) -> Result<Vec<ItemRecord>, StoreError> {
        let state = self.state.read().await;

        let mut items = query.apply(state.items.values().cloned());

        if query.includes_field(ItemField::Product) {
            for item in &mut items {
                if let Some(product) = state.products.get(item.product.id()) {
                    item.product = ProductLink::Included(product.clone());
                }
            }
        }

        Ok(items)
    }

    async fn save_item(&self, item: ItemId, update: ItemUpdate) -> Result<SaveAck, StoreError> {
        let mut state = self.state.write().await;

        if state.failing_saves > 0 {
            state.failing_saves -= 1;

            return Err(StoreError::Unavailable(
                "simulated network failure".to_string(),
            ));
        }

        let stored = state.items.get_mut(&item).ok_or(StoreError::NotFound)?;

        stored.sale = update.sale;

        let ack = SaveAck {
            updated_at: Timestamp::now(),
        };

        drop(state);

        let synced = ItemSynced {
            item,
            updated_at: ack.updated_at,
        };

        if self.sync.send(synced).is_err() {
            debug!("no sync subscribers");
        }

        Ok(ack)
    }

    fn subscribe_sync(&self) -> broadcast::Receiver<ItemSynced> {
        self.sync.subscribe()
    }
}

fn stored(mut item: ItemRecord) -> ItemRecord {
    item.product = ProductLink::Pointer(item.product.id().clone());
    item
}
