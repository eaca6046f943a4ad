//! Table rendering for products, items and the sales ledger.

use std::io;

use jiff::{Timestamp, tz::TimeZone};
use rusty_money::{Money, iso::Currency};
use stockroom_app::domain::{
    items::records::{ItemRecord, SaleState},
    products::records::ProductRecord,
    sales::Ledger,
};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Errors that can occur when rendering output.
#[derive(Debug, Error)]
pub(crate) enum RenderError {
    /// Failed to write to the output stream.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    /// Amount does not fit the money type.
    #[error("amount {0} is too large to display")]
    AmountTooLarge(u64),
}

/// Renders records as tables, prices in one currency and dates in one zone.
#[derive(Debug, Clone)]
pub(crate) struct Renderer {
    currency: &'static Currency,
    zone: TimeZone,
}

impl Renderer {
    pub(crate) fn new(currency: &'static Currency, zone: TimeZone) -> Self {
        Self { currency, zone }
    }

    /// Format an amount in minor units, e.g. `700` as `$7,00` for ARS.
    pub(crate) fn money(&self, minor: u64) -> Result<String, RenderError> {
        let amount = i64::try_from(minor).map_err(|_err| RenderError::AmountTooLarge(minor))?;

        Ok(format!("{}", Money::from_minor(amount, self.currency)))
    }

    fn date(&self, at: Timestamp) -> String {
        at.to_zoned(self.zone.clone()).strftime(DATE_FORMAT).to_string()
    }

    pub(crate) fn write_products(
        &self,
        mut out: impl io::Write,
        products: &[ProductRecord],
    ) -> Result<(), RenderError> {
        if products.is_empty() {
            writeln!(out, "no products")?;

            return Ok(());
        }

        let mut builder = Builder::default();

        builder.push_record(["Id", "Title", "Type", "Price"]);

        for product in products {
            builder.push_record([
                product.id.to_string(),
                product.title.clone(),
                product.kind.clone(),
                self.money(product.price)?,
            ]);
        }

        write_table(&mut out, builder, Some(3), None)
    }

    pub(crate) fn write_items(
        &self,
        mut out: impl io::Write,
        product: &ProductRecord,
        items: &[ItemRecord],
    ) -> Result<(), RenderError> {
        writeln!(
            out,
            "{}-{} ({})",
            product.title,
            product.kind,
            self.money(product.price)?
        )?;

        if items.is_empty() {
            writeln!(out, "no items")?;

            return Ok(());
        }

        let mut builder = Builder::default();

        builder.push_record(["Id", "Size", "Status"]);

        for item in items {
            builder.push_record([item.id.to_string(), item.size.clone(), self.status(item)]);
        }

        write_table(&mut out, builder, None, None)
    }

    pub(crate) fn write_item(
        &self,
        mut out: impl io::Write,
        item: &ItemRecord,
    ) -> Result<(), RenderError> {
        let label = item.product.product().map_or_else(
            || item.product.id().to_string(),
            |product| format!("{}-{}", product.title, product.kind),
        );

        writeln!(
            out,
            "{label} size {} ({}): {}",
            item.size,
            item.id,
            self.status(item)
        )?;

        Ok(())
    }

    pub(crate) fn write_ledger(
        &self,
        mut out: impl io::Write,
        ledger: &Ledger,
    ) -> Result<(), RenderError> {
        if ledger.is_empty() {
            writeln!(out, "no sales")?;

            return Ok(());
        }

        let mut builder = Builder::default();

        builder.push_record(["#", "Sold at", "Product", "Type", "Size", "Price"]);

        for entry in ledger.entries() {
            builder.push_record([
                format!("{:<3}", entry.rank),
                self.date(entry.sale.sold_at),
                entry.sale.title.clone(),
                entry.sale.kind.clone(),
                entry.sale.size.clone(),
                self.money(entry.sale.price)?,
            ]);
        }

        let total_row = builder.count_records();

        builder.push_record([
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            "Total".to_string(),
            self.money(ledger.total())?,
        ]);

        write_table(&mut out, builder, Some(5), Some(total_row))
    }

    fn status(&self, item: &ItemRecord) -> String {
        match item.sale {
            SaleState::Available => "available".to_string(),
            SaleState::Sold { at } => format!("sold {}", self.date(at)),
        }
    }
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    price_column: Option<usize>,
    footer_row: Option<usize>,
) -> Result<(), RenderError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    if let Some(row) = footer_row {
        theme.insert_horizontal_line(row, separator);
    }

    table.with(theme);
    table.modify(Rows::first(), Alignment::center());

    if let Some(column) = price_column {
        table.modify(Columns::new(column..column + 1), Alignment::right());
    }

    writeln!(out, "{table}")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use stockroom_app::domain::{
        items::records::{ItemId, ProductLink},
        products::records::ProductId,
    };
    use testresult::TestResult;

    use super::*;

    fn renderer() -> Renderer {
        Renderer::new(GBP, TimeZone::UTC)
    }

    fn remera() -> ProductRecord {
        ProductRecord::new(ProductId::from("p1"))
            .with_title("Remera")
            .with_kind("lisa")
            .with_price(700)
    }

    fn rendered(write: impl FnOnce(&mut Vec<u8>) -> Result<(), RenderError>) -> TestResult<String> {
        let mut out = Vec::new();

        write(&mut out)?;

        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn formats_minor_units_in_the_configured_currency() -> TestResult {
        assert_eq!(renderer().money(700)?, "£7.00");
        assert_eq!(renderer().money(0)?, "£0.00");

        Ok(())
    }

    #[test]
    fn oversized_amounts_are_an_error() {
        let result = renderer().money(u64::MAX);

        assert!(
            matches!(result, Err(RenderError::AmountTooLarge(u64::MAX))),
            "expected AmountTooLarge, got {result:?}"
        );
    }

    #[test]
    fn product_table_lists_each_product() -> TestResult {
        let output = rendered(|out| renderer().write_products(out, &[remera()]))?;

        assert!(output.contains("Remera"), "output: {output}");
        assert!(output.contains("lisa"), "output: {output}");
        assert!(output.contains("£7.00"), "output: {output}");

        Ok(())
    }

    #[test]
    fn item_status_shows_sale_time() -> TestResult {
        let sold = ItemRecord::new(
            ItemId::from("i1"),
            ProductLink::Included(remera()),
            "M",
        )
        .sold_at(Timestamp::from_second(1_700_000_000)?);

        let output = rendered(|out| renderer().write_item(out, &sold))?;

        assert_eq!(output, "Remera-lisa size M (i1): sold 2023-11-14 22:13\n");

        Ok(())
    }

    #[test]
    fn ledger_table_shows_ranks_and_total() -> TestResult {
        let first = ItemRecord::new(ItemId::from("i1"), ProductLink::Included(remera()), "S")
            .sold_at(Timestamp::from_second(1_700_000_000)?);
        let second = ItemRecord::new(ItemId::from("i2"), ProductLink::Included(remera()), "L")
            .sold_at(Timestamp::from_second(1_700_000_600)?);

        let ledger = Ledger::from_items([first, second])?;
        let output = rendered(|out| renderer().write_ledger(out, &ledger))?;

        let newest = output.find("22:23").ok_or("newest sale missing")?;
        let oldest = output.find("22:13").ok_or("oldest sale missing")?;

        assert!(newest < oldest, "most recent sale first:\n{output}");
        assert!(output.contains("Total"), "output: {output}");
        assert!(output.contains("£14.00"), "output: {output}");

        Ok(())
    }

    #[test]
    fn empty_ledger_says_so() -> TestResult {
        let output = rendered(|out| renderer().write_ledger(out, &Ledger::default()))?;

        assert_eq!(output, "no sales\n");

        Ok(())
    }
}
