//! App Context

use std::{path::Path, sync::Arc};

use rusty_money::iso::{self, Currency};
use thiserror::Error;

use crate::{
    domain::{
        items::{ItemsService, StoreItemsService},
        products::{ProductsService, StoreProductsService, records::ProductId},
        sales::{
            FailurePolicy, SaleToggle,
            events::{self, ChangeSubscriber},
        },
    },
    store::{
        InMemoryStore, ObjectStore, RestStore, RestStoreConfig,
        fixture::{Fixture, FixtureError},
    },
    views::{ProductItemsView, SalesLedgerView},
};

/// Currency prices are read and shown in when nothing else says otherwise.
pub const DEFAULT_CURRENCY: &Currency = iso::ARS;

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to load fixture")]
    Fixture(#[source] FixtureError),

    #[error("fixture prices are in {fixture} but the configured currency is {configured}")]
    CurrencyMismatch {
        configured: &'static str,
        fixture: &'static str,
    },
}

#[derive(Clone)]
pub struct AppContext {
    pub store: Arc<dyn ObjectStore>,
    pub products: Arc<dyn ProductsService>,
    pub items: Arc<dyn ItemsService>,
    currency: &'static Currency,
    failure_policy: FailurePolicy,
}

impl AppContext {
    /// Build application context on top of any object store whose prices
    /// are in `currency`.
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>, currency: &'static Currency) -> Self {
        Self {
            products: Arc::new(StoreProductsService::new(store.clone())),
            items: Arc::new(StoreItemsService::new(store.clone())),
            store,
            currency,
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Build application context against the hosted store.
    #[must_use]
    pub fn rest(config: RestStoreConfig) -> Self {
        let currency = config.currency;

        Self::new(Arc::new(RestStore::new(config)), currency)
    }

    /// Build application context on an in-memory store, optionally seeded
    /// from a YAML fixture.
    ///
    /// Prices are in `currency` when given, otherwise in the fixture's own
    /// currency, otherwise in [`DEFAULT_CURRENCY`].
    ///
    /// # Errors
    ///
    /// Returns an error when the fixture cannot be read or parsed, or when
    /// its prices are in a currency other than `currency`.
    pub fn in_memory(
        fixture: Option<&Path>,
        currency: Option<&'static Currency>,
    ) -> Result<Self, AppInitError> {
        let Some(path) = fixture else {
            return Ok(Self::new(
                Arc::new(InMemoryStore::new()),
                currency.unwrap_or(DEFAULT_CURRENCY),
            ));
        };

        let fixture = Fixture::load(path).map_err(AppInitError::Fixture)?;

        let currency = match (currency, fixture.currency) {
            (Some(configured), Some(seeded)) if configured != seeded => {
                return Err(AppInitError::CurrencyMismatch {
                    configured: configured.iso_alpha_code,
                    fixture: seeded.iso_alpha_code,
                });
            }
            (Some(configured), _) => configured,
            (None, seeded) => seeded.unwrap_or(DEFAULT_CURRENCY),
        };

        Ok(Self::new(Arc::new(InMemoryStore::from(fixture)), currency))
    }

    /// Currency every price in this context is expressed in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Wire a sale toggle to a fresh change channel.
    ///
    /// The returned subscriber is meant for a single [`SalesLedgerView`].
    #[must_use]
    pub fn sale_toggle(&self) -> (SaleToggle, ChangeSubscriber) {
        let (publisher, subscriber) = events::channel();

        let toggle =
            SaleToggle::new(self.store.clone(), publisher).with_failure_policy(self.failure_policy);

        (toggle, subscriber)
    }

    #[must_use]
    pub fn ledger_view(&self, limit: Option<usize>) -> SalesLedgerView {
        SalesLedgerView::new(self.items.clone(), limit)
    }

    #[must_use]
    pub fn inventory_view(&self, product: ProductId, toggle: SaleToggle) -> ProductItemsView {
        ProductItemsView::new(product, self.items.clone(), toggle)
    }
}
