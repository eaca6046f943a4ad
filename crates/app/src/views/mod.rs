//! Views
//!
//! Headless state holders standing behind whatever renders them: the items
//! of one product and the running sales ledger.

pub mod errors;
pub mod inventory;
pub mod ledger;

pub use errors::InventoryViewError;
pub use inventory::ProductItemsView;
pub use ledger::{LedgerState, SalesLedgerView};
