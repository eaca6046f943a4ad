//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    domain::products::{
        errors::ProductsServiceError,
        records::{ProductId, ProductRecord},
    },
    store::{ObjectStore, ProductField, Query},
};

#[derive(Clone)]
pub struct StoreProductsService {
    store: Arc<dyn ObjectStore>,
}

impl StoreProductsService {
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProductsService for StoreProductsService {
    #[tracing::instrument(name = "products.service.list_products", skip(self), err)]
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let query = Query::new().ascending(ProductField::Title);

        Ok(self.store.fetch_products(query).await?)
    }

    #[tracing::instrument(
        name = "products.service.get_product",
        skip(self),
        fields(product_id = %product),
        err
    )]
    async fn get_product(&self, product: ProductId) -> Result<ProductRecord, ProductsServiceError> {
        let query = Query::new()
            .equal_to(ProductField::Id, product.into_string())
            .limit(1);

        self.store
            .fetch_products(query)
            .await?
            .into_iter()
            .next()
            .ok_or(ProductsServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products, ordered by title.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductId) -> Result<ProductRecord, ProductsServiceError>;
}
