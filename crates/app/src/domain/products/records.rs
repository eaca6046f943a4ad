//! Product Records

use crate::ids::TypedId;

/// Title given to products stored without one.
pub const DEFAULT_TITLE: &str = "EMPTY TITLE";

/// Product Id
pub type ProductId = TypedId<ProductRecord>;

/// Product Record
///
/// A sellable product definition. Prices are in the minor units of the
/// shop's currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub id: ProductId,
    pub title: String,
    pub kind: String,
    pub price: u64,
}

impl ProductRecord {
    /// Create a product with the default title, an empty type and no price.
    pub fn new(id: ProductId) -> Self {
        Self {
            id,
            title: DEFAULT_TITLE.to_string(),
            kind: String::new(),
            price: 0,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    #[must_use]
    pub fn with_price(mut self, price: u64) -> Self {
        self.price = price;
        self
    }
}
