//! Product items view
//!
//! The per-size units of one product, as shown on its detail page.

use std::sync::Arc;

use tracing::debug;

use crate::{
    domain::{
        items::{
            ItemsService,
            records::{ItemId, ItemRecord},
        },
        products::records::ProductId,
        sales::{SaleToggle, ToggleOutcome},
    },
    store::ItemSynced,
    views::errors::InventoryViewError,
};

pub struct ProductItemsView {
    product: ProductId,
    service: Arc<dyn ItemsService>,
    toggle: SaleToggle,
    items: Vec<ItemRecord>,
}

impl ProductItemsView {
    #[must_use]
    pub fn new(product: ProductId, service: Arc<dyn ItemsService>, toggle: SaleToggle) -> Self {
        Self {
            product,
            service,
            toggle,
            items: Vec::new(),
        }
    }

    pub fn product(&self) -> &ProductId {
        &self.product
    }

    /// Items as last loaded, available units first, then by size.
    pub fn items(&self) -> &[ItemRecord] {
        &self.items
    }

    /// Fetch the product's items, replacing whatever was loaded before.
    ///
    /// # Errors
    ///
    /// Returns an error when the query fails; the previous items are kept.
    #[tracing::instrument(name = "views.inventory.load", skip(self), fields(product_id = %self.product), err)]
    pub async fn load(&mut self) -> Result<&[ItemRecord], InventoryViewError> {
        self.items = self
            .service
            .list_product_items(self.product.clone())
            .await?;

        Ok(&self.items)
    }

    /// Sell the unit if it is available, undo its sale otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryViewError::NotListed`] for an item this view has
    /// not loaded, and [`InventoryViewError::Sale`] when the save fails.
    pub async fn toggle(&mut self, item: &ItemId) -> Result<ToggleOutcome, InventoryViewError> {
        let record = listed(&mut self.items, item)?;

        Ok(self.toggle.toggle(record).await?)
    }

    /// Sell a listed unit; a unit that is already sold is left alone.
    ///
    /// # Errors
    ///
    /// Same as [`Self::toggle`].
    pub async fn mark_sold(&mut self, item: &ItemId) -> Result<ToggleOutcome, InventoryViewError> {
        let record = listed(&mut self.items, item)?;

        Ok(self.toggle.mark_sold(record).await?)
    }

    /// Undo the sale of a listed unit; an available unit is left alone.
    ///
    /// # Errors
    ///
    /// Same as [`Self::toggle`].
    pub async fn mark_unsold(
        &mut self,
        item: &ItemId,
    ) -> Result<ToggleOutcome, InventoryViewError> {
        let record = listed(&mut self.items, item)?;

        Ok(self.toggle.mark_unsold(record).await?)
    }

    /// Re-fetch a single item after its save resolved.
    ///
    /// Returns `false` when the item does not belong to this view.
    ///
    /// # Errors
    ///
    /// Returns an error when the item cannot be fetched.
    pub async fn apply_sync(&mut self, synced: &ItemSynced) -> Result<bool, InventoryViewError> {
        let Some(position) = self.items.iter().position(|item| item.id == synced.item) else {
            return Ok(false);
        };

        let fresh = self.service.get_item(synced.item.clone()).await?;

        debug!(item_id = %fresh.id, sold = fresh.is_sold(), "item synced");

        if let Some(slot) = self.items.get_mut(position) {
            *slot = fresh;
        }

        Ok(true)
    }
}

fn listed<'a>(
    items: &'a mut [ItemRecord],
    item: &ItemId,
) -> Result<&'a mut ItemRecord, InventoryViewError> {
    items
        .iter_mut()
        .find(|record| record.id == *item)
        .ok_or_else(|| InventoryViewError::NotListed(item.clone()))
}
