//! Sold-state change notifications.
//!
//! One channel per inventory view. The toggle publishes after every
//! successful save; the sales ledger view is the single subscriber.

use tokio::sync::mpsc;
use tracing::debug;

use crate::domain::items::records::ItemRecord;

/// An item moved between available and sold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSoldStateChanged {
    pub item: ItemRecord,
}

/// Create a connected publisher/subscriber pair.
pub fn channel() -> (ChangePublisher, ChangeSubscriber) {
    let (sender, receiver) = mpsc::unbounded_channel();

    (ChangePublisher { sender }, ChangeSubscriber { receiver })
}

#[derive(Debug, Clone)]
pub struct ChangePublisher {
    sender: mpsc::UnboundedSender<ItemSoldStateChanged>,
}

impl ChangePublisher {
    /// Publish without waiting. Events published after the subscriber is gone
    /// are dropped.
    pub fn publish(&self, event: ItemSoldStateChanged) {
        if let Err(error) = self.sender.send(event) {
            debug!(item_id = %error.0.item.id, "no subscriber for sold-state change");
        }
    }
}

#[derive(Debug)]
pub struct ChangeSubscriber {
    receiver: mpsc::UnboundedReceiver<ItemSoldStateChanged>,
}

impl ChangeSubscriber {
    /// Wait for the next change. Returns `None` once every publisher is dropped.
    pub async fn recv(&mut self) -> Option<ItemSoldStateChanged> {
        self.receiver.recv().await
    }

    /// Take a pending change without waiting.
    pub fn try_recv(&mut self) -> Option<ItemSoldStateChanged> {
        self.receiver.try_recv().ok()
    }
}
