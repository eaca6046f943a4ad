//! View Errors

use thiserror::Error;

use crate::domain::{
    items::{ItemsServiceError, records::ItemId},
    sales::SaleError,
};

#[derive(Debug, Error)]
pub enum InventoryViewError {
    #[error("item {0} is not listed in this view")]
    NotListed(ItemId),

    #[error(transparent)]
    Items(#[from] ItemsServiceError),

    #[error(transparent)]
    Sale(#[from] SaleError),
}
