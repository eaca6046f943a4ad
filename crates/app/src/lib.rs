//! Inventory and point-of-sale core: products, per-size items, the sale
//! toggle and the sales ledger it keeps current.

pub mod context;
pub mod domain;
pub mod ids;
pub mod store;
pub mod views;

#[cfg(test)]
mod test;
