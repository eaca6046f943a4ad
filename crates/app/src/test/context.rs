//! Test context for service-level tests.

use std::sync::Arc;

use jiff::Timestamp;

use crate::{
    domain::{
        items::{
            StoreItemsService,
            records::{ItemId, ItemRecord, ProductLink},
        },
        products::{
            StoreProductsService,
            records::{ProductId, ProductRecord},
        },
    },
    store::{InMemoryStore, ObjectStore},
};

pub struct TestContext {
    pub store: Arc<InMemoryStore>,
    pub products: StoreProductsService,
    pub items: StoreItemsService,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let shared: Arc<dyn ObjectStore> = store.clone();

        Self {
            products: StoreProductsService::new(shared.clone()),
            items: StoreItemsService::new(shared),
            store,
        }
    }

    pub fn object_store(&self) -> Arc<dyn ObjectStore> {
        self.store.clone()
    }

    pub async fn create_product(&self, title: &str, kind: &str, price: u64) -> ProductRecord {
        let product = ProductRecord::new(ProductId::generate())
            .with_title(title)
            .with_kind(kind)
            .with_price(price);

        self.store.insert_product(product.clone()).await;

        product
    }

    /// Create an available unit, returned with its product included.
    pub async fn create_item(&self, product: &ProductRecord, size: &str) -> ItemRecord {
        let item = ItemRecord::new(
            ItemId::generate(),
            ProductLink::Included(product.clone()),
            size,
        );

        self.store.insert_item(item.clone()).await;

        item
    }

    /// Create a unit sold at `at`, returned with its product included.
    pub async fn create_sold_item(
        &self,
        product: &ProductRecord,
        size: &str,
        at: Timestamp,
    ) -> ItemRecord {
        let item = self.create_item(product, size).await.sold_at(at);

        self.store.insert_item(item.clone()).await;

        item
    }
}
