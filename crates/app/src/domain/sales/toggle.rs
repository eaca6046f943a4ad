//! Sale toggle
//!
//! The only component that moves an item between available and sold. Each
//! transition is one save round trip; successful saves are announced on the
//! change channel the toggle was built with.

use std::{mem, sync::Arc};

use jiff::Timestamp;
use tracing::{info, warn};

use crate::{
    domain::{
        items::{
            data::ItemUpdate,
            records::{ItemRecord, SaleState},
        },
        sales::{
            errors::{SaleAction, SaleError, SaveFailureNotice},
            events::{ChangePublisher, ItemSoldStateChanged},
        },
    },
    store::{ObjectStore, SaveAck},
};

/// What happens to the local item when its save fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Keep the new local state; the next fetch resyncs it.
    #[default]
    KeepLocal,

    /// Restore the state the item had before the toggle.
    Revert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The item changed state and the store acknowledged it.
    Applied(SaveAck),

    /// The item was already in the requested state; nothing was saved.
    Unchanged,
}

#[derive(Clone)]
pub struct SaleToggle {
    store: Arc<dyn ObjectStore>,
    changes: ChangePublisher,
    on_failure: FailurePolicy,
}

impl SaleToggle {
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>, changes: ChangePublisher) -> Self {
        Self {
            store,
            changes,
            on_failure: FailurePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.on_failure = policy;
        self
    }

    /// Mark an available item as sold now.
    ///
    /// # Errors
    ///
    /// Returns [`SaleError::Persist`] when the store rejects the save. No
    /// change is published in that case.
    #[tracing::instrument(
        name = "sales.toggle.mark_sold",
        skip(self, item),
        fields(item_id = %item.id, size = %item.size),
        err
    )]
    pub async fn mark_sold(&self, item: &mut ItemRecord) -> Result<ToggleOutcome, SaleError> {
        if item.is_sold() {
            return Ok(ToggleOutcome::Unchanged);
        }

        let sale = SaleState::Sold {
            at: Timestamp::now(),
        };

        self.transition(item, sale, SaleAction::Sell).await
    }

    /// Return a sold item to stock, clearing its sale timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`SaleError::Persist`] when the store rejects the save. No
    /// change is published in that case.
    #[tracing::instrument(
        name = "sales.toggle.mark_unsold",
        skip(self, item),
        fields(item_id = %item.id, size = %item.size),
        err
    )]
    pub async fn mark_unsold(&self, item: &mut ItemRecord) -> Result<ToggleOutcome, SaleError> {
        if !item.is_sold() {
            return Ok(ToggleOutcome::Unchanged);
        }

        self.transition(item, SaleState::Available, SaleAction::Undo)
            .await
    }

    /// Sell an available item or undo the sale of a sold one.
    ///
    /// # Errors
    ///
    /// Returns [`SaleError::Persist`] when the store rejects the save.
    pub async fn toggle(&self, item: &mut ItemRecord) -> Result<ToggleOutcome, SaleError> {
        if item.is_sold() {
            self.mark_unsold(item).await
        } else {
            self.mark_sold(item).await
        }
    }

    async fn transition(
        &self,
        item: &mut ItemRecord,
        next: SaleState,
        action: SaleAction,
    ) -> Result<ToggleOutcome, SaleError> {
        let previous = mem::replace(&mut item.sale, next);

        match self
            .store
            .save_item(item.id.clone(), ItemUpdate::from(next))
            .await
        {
            Ok(ack) => {
                info!(item_id = %item.id, sold = item.is_sold(), "item sold state saved");

                self.changes.publish(ItemSoldStateChanged { item: item.clone() });

                Ok(ToggleOutcome::Applied(ack))
            }
            Err(source) => {
                if self.on_failure == FailurePolicy::Revert {
                    item.sale = previous;
                }

                let notice = SaveFailureNotice::for_item(action, item);

                warn!(item_id = %item.id, error = %source, "failed to save item sold state");

                Err(SaleError::Persist { notice, source })
            }
        }
    }
}
