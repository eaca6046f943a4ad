//! Stockroom Domain Concerns

pub mod items;
pub mod products;
pub mod sales;
