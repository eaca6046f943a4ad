//! Sales ledger view
//!
//! Holds the last computed [`Ledger`] and rebuilds it from scratch whenever a
//! sold-state change arrives. There is no incremental patching: every refresh
//! re-runs the sold-items query.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::domain::{
    items::ItemsService,
    sales::{Ledger, events::ChangeSubscriber},
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LedgerState {
    #[default]
    Loading,

    Ready(Ledger),

    /// The last refresh failed; carries a message fit for display.
    Failed(String),
}

impl LedgerState {
    #[must_use]
    pub fn ledger(&self) -> Option<&Ledger> {
        match self {
            Self::Ready(ledger) => Some(ledger),
            Self::Loading | Self::Failed(_) => None,
        }
    }
}

pub struct SalesLedgerView {
    items: Arc<dyn ItemsService>,
    limit: Option<usize>,
    state: LedgerState,
}

impl SalesLedgerView {
    /// Create a view over the most recent `limit` sales, or all of them.
    #[must_use]
    pub fn new(items: Arc<dyn ItemsService>, limit: Option<usize>) -> Self {
        Self {
            items,
            limit,
            state: LedgerState::Loading,
        }
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// Re-fetch sold items and recompute the ledger.
    #[tracing::instrument(name = "views.ledger.refresh", skip(self), fields(limit = ?self.limit))]
    pub async fn refresh(&mut self) -> &LedgerState {
        self.state = match self.items.list_sold_items(self.limit).await {
            Ok(items) => match Ledger::from_items(items) {
                Ok(ledger) => LedgerState::Ready(ledger),
                Err(error) => {
                    warn!(%error, "failed to build sales ledger");

                    LedgerState::Failed(error.to_string())
                }
            },
            Err(error) => {
                warn!(%error, "failed to fetch sold items");

                LedgerState::Failed(format!("could not load sales: {error}"))
            }
        };

        &self.state
    }

    /// Load once, then refresh after every received change.
    ///
    /// Each new state is published on `states`. Returns when every publisher
    /// of `changes` has been dropped.
    pub async fn follow(
        mut self,
        mut changes: ChangeSubscriber,
        states: watch::Sender<LedgerState>,
    ) -> LedgerState {
        states.send_replace(self.refresh().await.clone());

        while let Some(change) = changes.recv().await {
            debug!(item_id = %change.item.id, "refreshing ledger after sold-state change");

            states.send_replace(self.refresh().await.clone());
        }

        self.state
    }
}
