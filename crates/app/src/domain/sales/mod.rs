//! Sales
//!
//! Moving units between stock and sold, announcing those moves, and
//! aggregating sold units into the sales ledger.

pub mod errors;
pub mod events;
pub mod ledger;
pub mod toggle;

pub use errors::{LedgerError, SaleError};
pub use ledger::Ledger;
pub use toggle::{FailurePolicy, SaleToggle, ToggleOutcome};
