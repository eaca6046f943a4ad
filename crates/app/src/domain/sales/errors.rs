//! Sales errors.

use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

use crate::{
    domain::items::records::{ItemId, ItemRecord},
    store::StoreError,
};

/// Which toggle failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleAction {
    Sell,
    Undo,
}

/// User-facing description of a failed save.
///
/// Names the product title, product type and item size so the person at the
/// counter can tell which unit to retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFailureNotice {
    pub action: SaleAction,
    pub title: String,
    pub kind: String,
    pub size: String,
}

impl SaveFailureNotice {
    pub fn for_item(action: SaleAction, item: &ItemRecord) -> Self {
        let (title, kind) = match item.product.product() {
            Some(product) => (product.title.clone(), product.kind.clone()),
            None => (item.product.id().to_string(), String::new()),
        };

        Self {
            action,
            title,
            kind,
            size: item.size.clone(),
        }
    }
}

impl Display for SaveFailureNotice {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let verb = match self.action {
            SaleAction::Sell => "save",
            SaleAction::Undo => "undo",
        };

        write!(
            f,
            "could not {verb} \"{}-{}\" size {}; refresh and try again",
            self.title, self.kind, self.size
        )
    }
}

#[derive(Debug, Error)]
pub enum SaleError {
    #[error("{notice}")]
    Persist {
        notice: SaveFailureNotice,

        #[source]
        source: StoreError,
    },
}

impl SaleError {
    pub fn notice(&self) -> &SaveFailureNotice {
        match self {
            Self::Persist { notice, .. } => notice,
        }
    }
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("sold item {0} was fetched without its product")]
    UnresolvedProduct(ItemId),

    #[error("ledger total overflowed")]
    TotalOverflow,
}
