//! REST client for a Parse-compatible hosted object store.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use rusty_money::iso::Currency;
use tokio::sync::broadcast;
use tracing::debug;

use crate::{
    domain::{
        items::{
            data::ItemUpdate,
            records::{ItemId, ItemRecord},
        },
        products::records::ProductRecord,
    },
    store::{
        ItemField, ItemSynced, ObjectStore, ProductField, Query, SYNC_CHANNEL_CAPACITY, SaveAck,
        StoreError,
        codec::{
            self, ErrorResponse, ITEM_CLASS, OBJECT_NOT_FOUND, PRODUCT_CLASS, UpdatedResponse,
            WireItem, WireProduct,
        },
    },
};

/// Configuration for connecting to the hosted store.
#[derive(Debug, Clone)]
pub struct RestStoreConfig {
    /// Server URL including the mount path, e.g. `"https://api.example.com/parse"`.
    pub server_url: String,

    /// Application id sent with every request.
    pub application_id: String,

    /// REST API key sent with every request.
    pub rest_api_key: String,

    /// Currency the stored prices are denominated in, in major units.
    pub currency: &'static Currency,
}

/// HTTP client for the hosted object store.
#[derive(Debug, Clone)]
pub struct RestStore {
    config: RestStoreConfig,
    http: Client,
    sync: broadcast::Sender<ItemSynced>,
}

impl RestStore {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: RestStoreConfig) -> Self {
        let (sync, _receiver) = broadcast::channel(SYNC_CHANNEL_CAPACITY);

        Self {
            config,
            http: Client::new(),
            sync,
        }
    }

    fn class_url(&self, class: &str) -> String {
        format!(
            "{}/classes/{class}",
            self.config.server_url.trim_end_matches('/')
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("X-Parse-Application-Id", &self.config.application_id)
            .header("X-Parse-REST-API-Key", &self.config.rest_api_key)
    }

    async fn list(
        &self,
        class: &str,
        params: Vec<(&'static str, String)>,
    ) -> Result<String, StoreError> {
        let request = self.http.get(self.class_url(class)).query(&params);

        let response = self.authorized(request).send().await?;

        Ok(checked(response).await?.text().await?)
    }
}

/// Pass 2xx responses through and turn anything else into a store error.
///
/// A body that cannot be read is a transport failure.
async fn checked(response: Response) -> Result<Response, StoreError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await?;

    Err(map_error(status, &body))
}

/// Map an error response onto a store error.
///
/// The backend reports failures as `{"code": <n>, "error": "<message>"}`;
/// other bodies are passed along verbatim.
fn map_error(status: StatusCode, body: &str) -> StoreError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(error) if error.code == OBJECT_NOT_FOUND => StoreError::NotFound,
        Ok(error) => StoreError::Rejected {
            status: status.as_u16(),
            message: format!("{} (code {})", error.error, error.code),
        },
        Err(_) => StoreError::Rejected {
            status: status.as_u16(),
            message: body.to_string(),
        },
    }
}

#[async_trait]
impl ObjectStore for RestStore {
    #[tracing::instrument(name = "store.rest.fetch_products", skip(self), err)]
    async fn fetch_products(
        &self,
        query: Query<ProductField>,
    ) -> Result<Vec<ProductRecord>, StoreError> {
        let body = self
            .list(PRODUCT_CLASS, codec::query_params(&query))
            .await?;

        codec::decode_results::<WireProduct>(&body, self.config.currency)
    }

    #[tracing::instrument(name = "store.rest.fetch_items", skip(self), err)]
    async fn fetch_items(&self, query: Query<ItemField>) -> Result<Vec<ItemRecord>, StoreError> {
        let body = self.list(ITEM_CLASS, codec::query_params(&query)).await?;

        codec::decode_results::<WireItem>(&body, self.config.currency)
    }

    #[tracing::instrument(name = "store.rest.save_item", skip(self, update), fields(item_id = %item), err)]
    async fn save_item(&self, item: ItemId, update: ItemUpdate) -> Result<SaveAck, StoreError> {
        let url = format!("{}/{}", self.class_url(ITEM_CLASS), item);

        let request = self.http.put(&url).json(&codec::encode_update(&update));

        let response = checked(self.authorized(request).send().await?).await?;
        let parsed: UpdatedResponse = serde_json::from_str(&response.text().await?)?;

        let ack = SaveAck {
            updated_at: parsed.updated_at,
        };

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
