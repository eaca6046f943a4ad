//! Wire codec for the Parse-compatible REST backend.
//!
//! Translates [`Query`] values into `where` / `order` / `include` / `limit`
//! parameters, item updates into request bodies, and response objects into
//! records.

use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Map, Number, Value, json};
use tracing::warn;

use crate::{
    domain::{
        items::{
            data::ItemUpdate,
            records::{ItemId, ItemRecord, ProductLink, SaleState},
        },
        products::records::{ProductId, ProductRecord},
    },
    store::{
        StoreError, price,
        query::{Direction, Field, FieldValue, Query},
    },
};

pub(crate) const PRODUCT_CLASS: &str = "Product";
pub(crate) const ITEM_CLASS: &str = "Item";

/// Error code the backend uses for missing objects.
pub(crate) const OBJECT_NOT_FOUND: i64 = 101;

/// Encode a query into URL parameters.
pub(crate) fn query_params<F: Field>(query: &Query<F>) -> Vec<(&'static str, String)> {
    let mut params = Vec::with_capacity(4);

    if !query.filters().is_empty() {
        let constraints: Map<String, Value> = query
            .filters()
            .iter()
            .map(|(field, value)| (field.name().to_string(), encode_value(value)))
            .collect();

        params.push(("where", Value::Object(constraints).to_string()));
    }

    if !query.orders().is_empty() {
        let order = query
            .orders()
            .iter()
            .map(|order| match order.direction {
                Direction::Ascending => order.field.name().to_string(),
                Direction::Descending => format!("-{}", order.field.name()),
            })
            .collect::<Vec<_>>()
            .join(",");

        params.push(("order", order));
    }

    if !query.includes().is_empty() {
        let include = query
            .includes()
            .iter()
            .map(|field| field.name())
            .collect::<Vec<_>>()
            .join(",");

        params.push(("include", include));
    }

    if let Some(limit) = query.max_results() {
        params.push(("limit", limit.to_string()));
    }

    params
}

fn encode_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Bool(value) => Value::Bool(*value),
        FieldValue::Text(value) => Value::String(value.clone()),
        FieldValue::Product(id) => json!({
            "__type": "Pointer",
            "className": PRODUCT_CLASS,
            "objectId": id.as_str(),
        }),
    }
}

/// Encode the body of an item save.
///
/// Undoing a sale deletes both fields rather than writing `false`/`null`.
pub(crate) fn encode_update(update: &ItemUpdate) -> Value {
    match update.sale {
        SaleState::Sold { at } => json!({
            "sold": true,
            "soldAt": { "__type": "Date", "iso": at.to_string() },
        }),
        SaleState::Available => json!({
            "sold": { "__op": "Delete" },
            "soldAt": { "__op": "Delete" },
        }),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Results<T> {
    pub results: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdatedResponse {
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub code: i64,
    pub error: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireProduct {
    object_id: String,
    title: Option<String>,

    #[serde(rename = "type", default)]
    kind: String,

    #[serde(default)]
    price: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "__type")]
enum WireProductRef {
    Pointer {
        #[serde(rename = "objectId")]
        object_id: String,
    },
    Object(WireProduct),
}

#[derive(Debug, Deserialize)]
struct WireDate {
    iso: Timestamp,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireItem {
    object_id: String,
    product: WireProductRef,

    #[serde(default)]
    size: String,

    #[serde(default)]
    sold: Option<bool>,

    #[serde(default)]
    sold_at: Option<WireDate>,
}

/// A wire object that decodes into a record.
///
/// Prices on the wire are plain numbers in the store currency's major unit.
pub(crate) trait WireRecord: DeserializeOwned {
    type Record;

    fn into_record(self, currency: &Currency) -> Result<Self::Record, StoreError>;
}

impl WireRecord for WireProduct {
    type Record = ProductRecord;

    fn into_record(self, currency: &Currency) -> Result<ProductRecord, StoreError> {
        let price = match self.price {
            None | Some(Value::Null) => 0,
            Some(Value::Number(number)) => decode_price(&number, currency).ok_or_else(|| {
                StoreError::Decode(format!(
                    "product {} has an invalid price {number}",
                    self.object_id
                ))
            })?,
            Some(other) => {
                return Err(StoreError::Decode(format!(
                    "product {} has a non-numeric price {other}",
                    self.object_id
                )));
            }
        };

        let mut product = ProductRecord::new(ProductId::new(self.object_id))
            .with_kind(self.kind)
            .with_price(price);

        if let Some(title) = self.title {
            product = product.with_title(title);
        }

        Ok(product)
    }
}

/// Minor units for a non-negative JSON number, integral or not.
fn decode_price(number: &Number, currency: &Currency) -> Option<u64> {
    let text = number.to_string();

    let amount = text
        .parse::<Decimal>()
        .or_else(|_err| Decimal::from_scientific(&text))
        .ok()?;

    price::minor_units(amount, currency)
}

impl WireRecord for WireItem {
    type Record = ItemRecord;

    fn into_record(self, currency: &Currency) -> Result<ItemRecord, StoreError> {
        let product = match self.product {
            WireProductRef::Pointer { object_id } => ProductLink::Pointer(ProductId::new(object_id)),
            WireProductRef::Object(product) => ProductLink::Included(product.into_record(currency)?),
        };

        let sale = match (self.sold.unwrap_or(false), self.sold_at) {
            (true, Some(date)) => SaleState::Sold { at: date.iso },
            (true, None) => {
                return Err(StoreError::Decode(format!(
                    "item {} is marked sold without a sale timestamp",
                    self.object_id
                )));
            }
            (false, Some(_)) => {
                warn!(item_id = %self.object_id, "ignoring sale timestamp on unsold item");
                SaleState::Available
            }
            (false, None) => SaleState::Available,
        };

        Ok(ItemRecord {
            id: ItemId::new(self.object_id),
            product,
            size: self.size,
            sale,
        })
    }
}

/// Decode a `{"results": [...]}` listing into records.
pub(crate) fn decode_results<W: WireRecord>(
    body: &str,
    currency: &Currency,
) -> Result<Vec<W::Record>, StoreError> {
    let listing: Results<W> = serde_json::from_str(body)?;

    listing
        .results
        .into_iter()
        .map(|wire| wire.into_record(currency))
        .collect()
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{ARS, JPY};
    use testresult::TestResult;

    use crate::{
        domain::products::records::DEFAULT_TITLE,
        store::query::{ItemField, ProductField},
    };

    use super::*;

    fn param<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }

    #[test]
    fn product_items_query_encodes_pointer_include_and_order() -> TestResult {
        let query = Query::new()
            .equal_to(ItemField::Product, ProductId::from("p1"))
            .include(ItemField::Product)
            .ascending(ItemField::Sold)
            .ascending(ItemField::Size);

        let params = query_params(&query);

        let constraints: Value = serde_json::from_str(param(&params, "where").ok_or("no where")?)?;

        assert_eq!(
            constraints,
            json!({
                "product": { "__type": "Pointer", "className": "Product", "objectId": "p1" }
            })
        );
        assert_eq!(param(&params, "order"), Some("sold,size"));
        assert_eq!(param(&params, "include"), Some("product"));
        assert_eq!(param(&params, "limit"), None);

        Ok(())
    }

    #[test]
    fn ledger_query_encodes_descending_sale_date() {
        let query = Query::new()
            .equal_to(ItemField::Sold, true)
            .descending(ItemField::SoldAt)
            .limit(50);

        let params = query_params(&query);

        assert_eq!(param(&params, "where"), Some(r#"{"sold":true}"#));
        assert_eq!(param(&params, "order"), Some("-soldAt"));
        assert_eq!(param(&params, "limit"), Some("50"));
    }

    #[test]
    fn empty_query_has_no_params() {
        assert!(query_params(&Query::<ProductField>::new()).is_empty());
    }

    #[test]
    fn sale_update_sets_date_and_undo_deletes_fields() -> TestResult {
        let at: Timestamp = "2024-05-01T12:00:00Z".parse()?;

        assert_eq!(
            encode_update(&SaleState::Sold { at }.into()),
            json!({
                "sold": true,
                "soldAt": { "__type": "Date", "iso": "2024-05-01T12:00:00Z" }
            })
        );
        assert_eq!(
            encode_update(&SaleState::Available.into()),
            json!({ "sold": { "__op": "Delete" }, "soldAt": { "__op": "Delete" } })
        );

        Ok(())
    }

    #[test]
    fn decodes_included_product_and_sale() -> TestResult {
        let body = r#"{"results":[{
            "objectId": "i1",
            "size": "M",
            "sold": true,
            "soldAt": { "__type": "Date", "iso": "2024-05-01T12:00:00.000Z" },
            "product": {
                "__type": "Object", "className": "Product",
                "objectId": "p1", "title": "Remera", "type": "lisa", "price": 125
            }
        }]}"#;

        let items: Vec<ItemRecord> = decode_results::<WireItem>(body, ARS)?;
        let item = items.first().ok_or("no item")?;

        assert_eq!(item.id, ItemId::from("i1"));
        assert_eq!(item.sale_timestamp(), Some("2024-05-01T12:00:00Z".parse()?));

        let product = item.product.product().ok_or("product not included")?;

        assert_eq!(product.title, "Remera");
        assert_eq!(product.kind, "lisa");
        assert_eq!(product.price, 12_500, "125 pesos in centavos");

        Ok(())
    }

    #[test]
    fn decodes_pointer_and_defaults() -> TestResult {
        let body = r#"{"results":[{
            "objectId": "i2", "size": "L",
            "product": { "__type": "Pointer", "className": "Product", "objectId": "p9" }
        }]}"#;

        let items: Vec<ItemRecord> = decode_results::<WireItem>(body, ARS)?;
        let item = items.first().ok_or("no item")?;

        assert!(!item.is_sold());
        assert_eq!(item.product, ProductLink::Pointer(ProductId::from("p9")));

        let products: Vec<ProductRecord> =
            decode_results::<WireProduct>(r#"{"results":[{"objectId":"p9"}]}"#, ARS)?;

        assert_eq!(products.first().map(|p| p.title.as_str()), Some(DEFAULT_TITLE));

        Ok(())
    }

    #[test]
    fn sold_without_timestamp_is_rejected() {
        let body = r#"{"results":[{
            "objectId": "i3", "sold": true,
            "product": { "__type": "Pointer", "className": "Product", "objectId": "p1" }
        }]}"#;

        let result = decode_results::<WireItem>(body, ARS);

        assert!(
            matches!(result, Err(StoreError::Decode(_))),
            "expected Decode, got {result:?}"
        );
    }

    #[test]
    fn stray_timestamp_on_unsold_item_is_dropped() -> TestResult {
        let body = r#"{"results":[{
            "objectId": "i4", "sold": false,
            "soldAt": { "__type": "Date", "iso": "2024-05-01T12:00:00Z" },
            "product": { "__type": "Pointer", "className": "Product", "objectId": "p1" }
        }]}"#;

        let items: Vec<ItemRecord> = decode_results::<WireItem>(body, ARS)?;

        assert!(items.iter().all(|item| item.sale == SaleState::Available));

        Ok(())
    }

    #[test]
    fn negative_price_is_rejected() {
        let result = decode_results::<WireProduct>(
            r#"{"results":[{"objectId":"p1","price":-5}]}"#,
            ARS,
        );

        assert!(
            matches!(result, Err(StoreError::Decode(_))),
            "expected Decode, got {result:?}"
        );
    }

    #[test]
    fn fractional_prices_scale_to_minor_units() -> TestResult {
        let body = r#"{"results":[
            {"objectId":"p1","price":12.5},
            {"objectId":"p2","price":700},
            {"objectId":"p3","price":0.125}
        ]}"#;

        let prices: Vec<u64> = decode_results::<WireProduct>(body, ARS)?
            .iter()
            .map(|product| product.price)
            .collect();

        assert_eq!(prices, [1_250, 70_000, 13]);

        Ok(())
    }

    #[test]
    fn zero_exponent_currencies_keep_whole_units() -> TestResult {
        let products =
            decode_results::<WireProduct>(r#"{"results":[{"objectId":"p1","price":700}]}"#, JPY)?;

        assert_eq!(products.first().map(|product| product.price), Some(700));

        Ok(())
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let result = decode_results::<WireProduct>(
            r#"{"results":[{"objectId":"p1","price":"12.5"}]}"#,
            ARS,
        );

        assert!(
            matches!(result, Err(StoreError::Decode(ref message)) if message.contains("non-numeric")),
            "expected Decode, got {result:?}"
        );
    }
}
