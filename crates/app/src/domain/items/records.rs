//! Item Records

use jiff::Timestamp;

use crate::{
    domain::products::records::{ProductId, ProductRecord},
    ids::TypedId,
};

/// Item Id
pub type ItemId = TypedId<ItemRecord>;

/// Sale state of a single unit.
///
/// A sale timestamp exists exactly when the unit is sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaleState {
    #[default]
    Available,
    Sold {
        at: Timestamp,
    },
}

impl SaleState {
    pub fn is_sold(&self) -> bool {
        matches!(self, Self::Sold { .. })
    }

    pub fn sold_at(&self) -> Option<Timestamp> {
        match self {
            Self::Available => None,
            Self::Sold { at } => Some(*at),
        }
    }
}

/// Reference from an item to the product it is a unit of.
///
/// Queries that include the product expand the pointer into the full record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductLink {
    Pointer(ProductId),
    Included(ProductRecord),
}

impl ProductLink {
    pub fn id(&self) -> &ProductId {
        match self {
            Self::Pointer(id) => id,
            Self::Included(product) => &product.id,
        }
    }

    pub fn product(&self) -> Option<&ProductRecord> {
        match self {
            Self::Pointer(_) => None,
            Self::Included(product) => Some(product),
        }
    }
}

/// Item Record
///
/// One physical unit of a product in a given size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    pub id: ItemId,
    pub product: ProductLink,
    pub size: String,
    pub sale: SaleState,
}

impl ItemRecord {
    /// Create an unsold unit.
    pub fn new(id: ItemId, product: ProductLink, size: impl Into<String>) -> Self {
        Self {
            id,
            product,
            size: size.into(),
            sale: SaleState::Available,
        }
    }

    #[must_use]
    pub fn sold_at(mut self, at: Timestamp) -> Self {
        self.sale = SaleState::Sold { at };
        self
    }

    pub fn is_sold(&self) -> bool {
        self.sale.is_sold()
    }

    pub fn sale_timestamp(&self) -> Option<Timestamp> {
        self.sale.sold_at()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> ItemRecord {
        ItemRecord::new(
            ItemId::from("i1"),
            ProductLink::Pointer(ProductId::from("p1")),
            "M",
        )
    }

    #[test]
    fn new_items_are_available() {
        let item = item();

        assert!(!item.is_sold());
        assert!(item.sale_timestamp().is_none());
    }

    #[test]
    fn sold_items_carry_their_timestamp() {
        let at = Timestamp::from_second(1_700_000_000).unwrap_or(Timestamp::UNIX_EPOCH);
        let item = item().sold_at(at);

        assert!(item.is_sold());
        assert_eq!(item.sale_timestamp(), Some(at));
    }

    #[test]
    fn link_exposes_product_only_when_included() {
        let pointer = ProductLink::Pointer(ProductId::from("p1"));
        let included = ProductLink::Included(ProductRecord::new(ProductId::from("p1")));

        assert!(pointer.product().is_none());
        assert_eq!(included.product().map(|p| p.id.as_str()), Some("p1"));
        assert_eq!(pointer.id(), included.id());
    }
}
