//! Store Fixtures
//!
//! Seed data for [`InMemoryStore`](crate::store::InMemoryStore), written in
//! YAML:
//!
//! ```yaml
//! products:
//!   remera:
//!     title: Remera
//!     type: lisa
//!     price: "12500 ARS"
//! items:
//!   - product: remera
//!     size: M
//!   - product: remera
//!     size: L
//!     sold_at: "2024-05-01T12:00:00Z"
//! ```

use std::{fs, path::Path};

use jiff::Timestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::iso::{self, Currency};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    domain::{
        items::records::{ItemId, ItemRecord, ProductLink},
        products::records::{ProductId, ProductRecord},
    },
    store::price,
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),
}

#[derive(Debug, Deserialize)]
struct FixtureFile {
    #[serde(default)]
    products: FxHashMap<String, ProductFixture>,

    #[serde(default)]
    items: Vec<ItemFixture>,
}

#[derive(Debug, Deserialize)]
struct ProductFixture {
    title: Option<String>,

    #[serde(rename = "type", default)]
    kind: String,

    /// Price with its currency, e.g. `"12500 ARS"`.
    price: String,
}

#[derive(Debug, Deserialize)]
struct ItemFixture {
    id: Option<String>,
    product: String,
    size: String,
    sold_at: Option<Timestamp>,
}

/// Products and items loaded from a fixture.
#[derive(Debug, Default)]
pub struct Fixture {
    pub products: Vec<ProductRecord>,
    pub items: Vec<ItemRecord>,
    pub currency: Option<&'static Currency>,
}

impl Fixture {
    /// Load a fixture from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Parse a fixture from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed YAML, bad prices, mixed currencies or
    /// items referencing unknown products.
    pub fn from_yaml(contents: &str) -> Result<Self, FixtureError> {
        let file: FixtureFile = serde_norway::from_str(contents)?;
        let mut fixture = Self::default();

        for (key, product) in file.products {
            let (price, currency) = parse_price(&product.price)?;

            match fixture.currency {
                Some(existing) if existing != currency => {
                    return Err(FixtureError::CurrencyMismatch(
                        existing.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
                Some(_) => {}
                None => fixture.currency = Some(currency),
            }

            let mut record = ProductRecord::new(ProductId::new(key))
                .with_kind(product.kind)
                .with_price(price);

            if let Some(title) = product.title {
                record = record.with_title(title);
            }

            fixture.products.push(record);
        }

        for item in file.items {
            if !fixture
                .products
                .iter()
                .any(|product| product.id.as_str() == item.product)
            {
                return Err(FixtureError::ProductNotFound(item.product));
            }

            let id = item.id.map_or_else(ItemId::generate, ItemId::new);
            let mut record =
                ItemRecord::new(id, ProductLink::Pointer(ProductId::new(item.product)), item.size);

            if let Some(at) = item.sold_at {
                record = record.sold_at(at);
            }

            fixture.items.push(record);
        }

        Ok(fixture)
    }
}

/// Parse a price string (e.g. `"125.50 ARS"`) into minor units and currency.
///
/// # Errors
///
/// Returns an error unless the string is `AMOUNT CURRENCY` with a known ISO
/// currency and a non-negative amount.
pub fn parse_price(s: &str) -> Result<(u64, &'static Currency), FixtureError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let currency = iso::find(code).ok_or_else(|| FixtureError::UnknownCurrency(code.to_string()))?;

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = price::minor_units(amount, currency)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}
