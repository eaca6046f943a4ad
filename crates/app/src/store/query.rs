//! Store queries
//!
//! A [`Query`] describes what to fetch from a collection: equality filters,
//! which references to expand, ordering keys and an optional limit. Remote
//! backends translate it into their own wire format; in-process backends
//! evaluate it against records implementing [`Queryable`].

use std::{cmp::Ordering, fmt::Debug};

use smallvec::SmallVec;

use crate::domain::{
    items::records::ItemRecord,
    products::records::{ProductId, ProductRecord},
};

/// A queryable field of a stored collection.
pub trait Field: Copy + Eq + Debug + Send + Sync + 'static {
    /// Field name as stored remotely.
    fn name(self) -> &'static str;
}

/// Product collection fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Id,
    Title,
    Kind,
    Price,
}

impl Field for ProductField {
    fn name(self) -> &'static str {
        match self {
            Self::Id => "objectId",
            Self::Title => "title",
            Self::Kind => "type",
            Self::Price => "price",
        }
    }
}

/// Item collection fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Id,
    Product,
    Size,
    Sold,
    SoldAt,
}

impl Field for ItemField {
    fn name(self) -> &'static str {
        match self {
            Self::Id => "objectId",
            Self::Product => "product",
            Self::Size => "size",
            Self::Sold => "sold",
            Self::SoldAt => "soldAt",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order<F> {
    pub field: F,
    pub direction: Direction,
}

/// Value compared by an equality filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Bool(bool),
    Text(String),
    Product(ProductId),
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<ProductId> for FieldValue {
    fn from(value: ProductId) -> Self {
        Self::Product(value)
    }
}

/// Query over a collection whose fields are `F`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query<F> {
    filters: SmallVec<[(F, FieldValue); 2]>,
    includes: SmallVec<[F; 1]>,
    orders: SmallVec<[Order<F>; 2]>,
    limit: Option<usize>,
}

impl<F> Default for Query<F> {
    fn default() -> Self {
        Self {
            filters: SmallVec::new(),
            includes: SmallVec::new(),
            orders: SmallVec::new(),
            limit: None,
        }
    }
}

impl<F: Field> Query<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only records whose `field` equals `value`.
    #[must_use]
    pub fn equal_to(mut self, field: F, value: impl Into<FieldValue>) -> Self {
        self.filters.push((field, value.into()));
        self
    }

    /// Expand the object referenced by `field`.
    #[must_use]
    pub fn include(mut self, field: F) -> Self {
        if !self.includes.contains(&field) {
            self.includes.push(field);
        }

        self
    }

    /// Add an ascending sort key after any existing ones.
    #[must_use]
    pub fn ascending(mut self, field: F) -> Self {
        self.orders.push(Order {
            field,
            direction: Direction::Ascending,
        });
        self
    }

    /// Add a descending sort key after any existing ones.
    #[must_use]
    pub fn descending(mut self, field: F) -> Self {
        self.orders.push(Order {
            field,
            direction: Direction::Descending,
        });
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn filters(&self) -> &[(F, FieldValue)] {
        &self.filters
    }

    pub fn includes(&self) -> &[F] {
        &self.includes
    }

    pub fn includes_field(&self, field: F) -> bool {
        self.includes.contains(&field)
    }

    pub fn orders(&self) -> &[Order<F>] {
        &self.orders
    }

    pub fn max_results(&self) -> Option<usize> {
        self.limit
    }

    pub fn matches<R: Queryable<F>>(&self, record: &R) -> bool {
        self.filters
            .iter()
            .all(|(field, value)| record.field_equals(*field, value))
    }

    /// Compare two records by the query's sort keys, in order.
    pub fn compare<R: Queryable<F>>(&self, a: &R, b: &R) -> Ordering {
        self.orders
            .iter()
            .map(|order| {
                let ordering = a.compare_field(b, order.field);

                match order.direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Filter, sort and limit `records` in process.
    pub fn apply<R: Queryable<F>>(&self, records: impl IntoIterator<Item = R>) -> Vec<R> {
        let mut matched: Vec<R> = records
            .into_iter()
            .filter(|record| self.matches(record))
            .collect();

        matched.sort_by(|a, b| self.compare(a, b));

        if let Some(limit) = self.limit {
            matched.truncate(limit);
        }

        matched
    }
}

/// Records that can be filtered and ordered by the fields `F`.
pub trait Queryable<F> {
    fn field_equals(&self, field: F, value: &FieldValue) -> bool;

    fn compare_field(&self, other: &Self, field: F) -> Ordering;
}

impl Queryable<ProductField> for ProductRecord {
    fn field_equals(&self, field: ProductField, value: &FieldValue) -> bool {
        match (field, value) {
            (ProductField::Id, FieldValue::Text(id)) => self.id.as_str() == id,
            (ProductField::Id, FieldValue::Product(id)) => &self.id == id,
            (ProductField::Title, FieldValue::Text(title)) => &self.title == title,
            (ProductField::Kind, FieldValue::Text(kind)) => &self.kind == kind,
            _ => false,
        }
    }

    fn compare_field(&self, other: &Self, field: ProductField) -> Ordering {
        match field {
            ProductField::Id => self.id.cmp(&other.id),
            ProductField::Title => self.title.cmp(&other.title),
            ProductField::Kind => self.kind.cmp(&other.kind),
            ProductField::Price => self.price.cmp(&other.price),
        }
    }
}

impl Queryable<ItemField> for ItemRecord {
    fn field_equals(&self, field: ItemField, value: &FieldValue) -> bool {
        match (field, value) {
            (ItemField::Id, FieldValue::Text(id)) => self.id.as_str() == id,
            (ItemField::Product, FieldValue::Product(id)) => self.product.id() == id,
            (ItemField::Size, FieldValue::Text(size)) => &self.size == size,
            (ItemField::Sold, FieldValue::Bool(sold)) => self.is_sold() == *sold,
            _ => false,
        }
    }

    fn compare_field(&self, other: &Self, field: ItemField) -> Ordering {
        match field {
            ItemField::Id => self.id.cmp(&other.id),
            ItemField::Product => self.product.id().cmp(other.product.id()),
            ItemField::Size => self.size.cmp(&other.size),
            ItemField::Sold => self.is_sold().cmp(&other.is_sold()),
            ItemField::SoldAt => self.sale_timestamp().cmp(&other.sale_timestamp()),
        }
    }
}
