//! Sales ledger aggregation.

use jiff::Timestamp;

use crate::domain::{
    items::records::{ItemId, ItemRecord},
    sales::errors::LedgerError,
};

/// Read-only projection of a sold item for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleRecord {
    pub item: ItemId,
    pub size: String,
    pub sold_at: Timestamp,
    pub title: String,
    pub kind: String,
    pub price: u64,
}

impl SaleRecord {
    /// Project a sold item; `None` for items still in stock.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnresolvedProduct`] if a sold item was fetched
    /// without its product.
    pub fn from_item(item: &ItemRecord) -> Result<Option<Self>, LedgerError> {
        let Some(sold_at) = item.sale_timestamp() else {
            return Ok(None);
        };

        let product = item
            .product
            .product()
            .ok_or_else(|| LedgerError::UnresolvedProduct(item.id.clone()))?;

        Ok(Some(Self {
            item: item.id.clone(),
            size: item.size.clone(),
            sold_at,
            title: product.title.clone(),
            kind: product.kind.clone(),
            price: product.price,
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Counted from the oldest sale in the window, so the most recent sale
    /// carries the highest rank.
    pub rank: usize,
    pub sale: SaleRecord,
}

/// Sold items, most recent first, with their running total.
///
/// The total covers exactly the fetched window.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
    total: u64,
}

impl Ledger {
    /// Build a ledger from fetched items, skipping any that are not sold.
    ///
    /// # Errors
    ///
    /// Returns an error if a sold item lacks its product or the total
    /// overflows.
    pub fn from_items(items: impl IntoIterator<Item = ItemRecord>) -> Result<Self, LedgerError> {
        let mut sales = Vec::new();

        for item in items {
            if let Some(sale) = SaleRecord::from_item(&item)? {
                sales.push(sale);
            }
        }

        sales.sort_by(|a, b| b.sold_at.cmp(&a.sold_at));

        let total = sales
            .iter()
            .try_fold(0_u64, |total, sale| total.checked_add(sale.price))
            .ok_or(LedgerError::TotalOverflow)?;

        let count = sales.len();

        let entries = sales
            .into_iter()
            .enumerate()
            .map(|(index, sale)| LedgerEntry {
                rank: count - index,
                sale,
            })
            .collect();

        Ok(Self { entries, total })
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
