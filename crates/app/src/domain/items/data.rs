//! Item Data

use crate::domain::items::records::SaleState;

/// Field changes sent when saving an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemUpdate {
    pub sale: SaleState,
}

impl From<SaleState> for ItemUpdate {
    fn from(sale: SaleState) -> Self {
        Self { sale }
    }
}
