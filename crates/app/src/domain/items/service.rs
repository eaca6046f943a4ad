//! Items service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    domain::{
        items::{
            errors::ItemsServiceError,
            records::{ItemId, ItemRecord},
        },
        products::records::ProductId,
    },
    store::{ItemField, ObjectStore, Query},
};

#[derive(Clone)]
pub struct StoreItemsService {
    store: Arc<dyn ObjectStore>,
}

impl StoreItemsService {
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }
}

/// Units of one product, available ones first, then by size.
pub(crate) fn product_items_query(product: ProductId) -> Query<ItemField> {
    Query::new()
        .equal_to(ItemField::Product, product)
        .include(ItemField::Product)
        .ascending(ItemField::Sold)
        .ascending(ItemField::Size)
}

/// Sold units, most recent sale first.
pub(crate) fn sold_items_query(limit: Option<usize>) -> Query<ItemField> {
    let query = Query::new()
        .equal_to(ItemField::Sold, true)
        .include(ItemField::Product)
        .descending(ItemField::SoldAt);

    match limit {
        Some(limit) => query.limit(limit),
        None => query,
    }
}

#[async_trait]
impl ItemsService for StoreItemsService {
    #[tracing::instrument(
        name = "items.service.list_product_items",
        skip(self),
        fields(product_id = %product),
        err
    )]
    async fn list_product_items(
        &self,
        product: ProductId,
    ) -> Result<Vec<ItemRecord>, ItemsServiceError> {
        Ok(self.store.fetch_items(product_items_query(product)).await?)
    }

    #[tracing::instrument(name = "items.service.list_sold_items", skip(self), err)]
    async fn list_sold_items(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<ItemRecord>, ItemsServiceError> {
        Ok(self.store.fetch_items(sold_items_query(limit)).await?)
    }

    #[tracing::instrument(
        name = "items.service.get_item",
        skip(self),
        fields(item_id = %item),
        err
    )]
    async fn get_item(&self, item: ItemId) -> Result<ItemRecord, ItemsServiceError> {
        let query = Query::new()
            .equal_to(ItemField::Id, item.into_string())
            .include(ItemField::Product)
            .limit(1);

        self.store
            .fetch_items(query)
            .await?
            .into_iter()
            .next()
            .ok_or(ItemsServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait ItemsService: Send + Sync {
    /// Retrieve the units of one product with the product included.
    async fn list_product_items(
        &self,
        product: ProductId,
    ) -> Result<Vec<ItemRecord>, ItemsServiceError>;

    /// Retrieve sold units, most recent sale first, optionally limited.
    async fn list_sold_items(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<ItemRecord>, ItemsServiceError>;

    /// Retrieve a single unit with its product included.
    async fn get_item(&self, item: ItemId) -> Result<ItemRecord, ItemsServiceError>;
}
