//! Command dispatch.

use std::io;

use clap::{Args, Subcommand};
use stockroom_app::{
    context::{AppContext, AppInitError, DEFAULT_CURRENCY},
    domain::{items::ItemsServiceError, products::ProductsServiceError},
    views::InventoryViewError,
};
use thiserror::Error;

use crate::{
    config::{CliConfig, ConfigError, store::Backend},
    render::{RenderError, Renderer},
};

mod catalog;
mod sales;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// List products by title
    Products,

    /// List the units of one product
    Items(ItemsArgs),

    /// Mark a unit as sold and show the refreshed ledger
    Sell(ToggleArgs),

    /// Return a sold unit to stock and show the refreshed ledger
    Undo(ToggleArgs),

    /// Show the sales ledger, most recent sale first
    Ledger(LedgerArgs),
}

#[derive(Debug, Args)]
pub(crate) struct ItemsArgs {
    /// Product object id
    pub product: String,
}

#[derive(Debug, Args)]
pub(crate) struct ToggleArgs {
    /// Item object id
    pub item: String,

    /// Only show the most recent sales in the ledger
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub(crate) struct LedgerArgs {
    /// Only show the most recent sales
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Error)]
pub(crate) enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to initialise store: {0}")]
    Init(#[from] AppInitError),

    #[error(transparent)]
    Products(#[from] ProductsServiceError),

    #[error(transparent)]
    Items(#[from] ItemsServiceError),

    #[error(transparent)]
    Inventory(#[from] InventoryViewError),

    #[error("{0}")]
    Ledger(String),

    #[error("ledger view stopped unexpectedly")]
    LedgerTask(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Build the app context the configuration asks for.
pub(crate) fn app_context(config: &CliConfig) -> Result<AppContext, CommandError> {
    let currency = config.display.currency()?;

    let ctx = match config.store.backend {
        Backend::Memory => AppContext::in_memory(config.store.fixture.as_deref(), currency)?,
        Backend::Rest => {
            AppContext::rest(config.store.rest(currency.unwrap_or(DEFAULT_CURRENCY))?)
        }
    };

    Ok(ctx.with_failure_policy(config.sales.failure_policy()))
}

/// Run the configured command, writing its output to stdout.
pub(crate) async fn run(config: CliConfig) -> Result<(), CommandError> {
    let ctx = app_context(&config)?;
    let renderer = Renderer::new(ctx.currency(), jiff::tz::TimeZone::system());

    execute(config.command, &ctx, &renderer, io::stdout().lock()).await
}

pub(crate) async fn execute(
    command: Command,
    ctx: &AppContext,
    renderer: &Renderer,
    mut out: impl io::Write,
) -> Result<(), CommandError> {
    match command {
        Command::Products => catalog::products(ctx, renderer, &mut out).await,
        Command::Items(args) => catalog::items(ctx, renderer, &mut out, args).await,
        Command::Sell(args) => sales::toggle(ctx, renderer, &mut out, args, sales::Action::Sell).await,
        Command::Undo(args) => sales::toggle(ctx, renderer, &mut out, args, sales::Action::Undo).await,
        Command::Ledger(args) => sales::ledger(ctx, renderer, &mut out, args).await,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;
    use jiff::tz::TimeZone;
    use rusty_money::iso::JPY;
    use tempfile::NamedTempFile;
    use testresult::TestResult;

    use super::*;

    const SHOP: &str = r#"
products:
  remera:
    title: Remera
    type: lisa
    price: "7.00 GBP"
  buzo:
    title: Buzo
    type: lana
    price: "15.00 GBP"
items:
  - id: remera-m
    product: remera
    size: M
  - id: buzo-l
    product: buzo
    size: L
"#;

    fn shop() -> TestResult<AppContext> {
        let mut file = NamedTempFile::new()?;

        file.write_all(SHOP.as_bytes())?;

        Ok(AppContext::in_memory(Some(file.path()), None)?)
    }

    async fn output(ctx: &AppContext, command: Command) -> Result<String, CommandError> {
        let renderer = Renderer::new(ctx.currency(), TimeZone::UTC);
        let mut out = Vec::new();

        execute(command, ctx, &renderer, &mut out).await?;

        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    fn sell(item: &str) -> Command {
        Command::Sell(ToggleArgs {
            item: item.to_string(),
            limit: None,
        })
    }

    #[tokio::test]
    async fn products_lists_titles_in_order() -> TestResult {
        let ctx = shop()?;

        let listing = output(&ctx, Command::Products).await?;

        let buzo = listing.find("Buzo").ok_or("Buzo missing")?;
        let remera = listing.find("Remera").ok_or("Remera missing")?;

        assert!(buzo < remera, "products ordered by title:\n{listing}");
        assert!(listing.contains("£15.00"), "listing: {listing}");

        Ok(())
    }

    #[tokio::test]
    async fn selling_prints_the_refreshed_ledger() -> TestResult {
        let ctx = shop()?;

        let printed = output(&ctx, sell("remera-m")).await?;

        assert!(printed.contains("Remera-lisa size M (remera-m): sold"), "printed: {printed}");
        assert!(printed.contains("Total"), "printed: {printed}");
        assert!(printed.contains("£7.00"), "printed: {printed}");

        let ledger = output(&ctx, Command::Ledger(LedgerArgs { limit: None })).await?;

        assert!(ledger.contains("Remera"), "ledger: {ledger}");

        Ok(())
    }

    #[tokio::test]
    async fn selling_twice_is_a_no_op() -> TestResult {
        let ctx = shop()?;

        output(&ctx, sell("remera-m")).await?;

        let printed = output(&ctx, sell("remera-m")).await?;

        assert!(
            printed.contains("item remera-m is already sold; nothing to do"),
            "printed: {printed}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn undo_returns_the_item_to_stock() -> TestResult {
        let ctx = shop()?;

        output(&ctx, sell("buzo-l")).await?;

        let printed = output(
            &ctx,
            Command::Undo(ToggleArgs {
                item: "buzo-l".to_string(),
                limit: None,
            }),
        )
        .await?;

        assert!(printed.contains("Buzo-lana size L (buzo-l): available"), "printed: {printed}");
        assert!(printed.ends_with("no sales\n"), "printed: {printed}");

        Ok(())
    }

    #[tokio::test]
    async fn unknown_item_is_not_found() -> TestResult {
        let ctx = shop()?;

        let result = output(&ctx, sell("missing")).await;

        assert!(
            matches!(result, Err(CommandError::Items(ItemsServiceError::NotFound))),
            "expected Items(NotFound), got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn prices_follow_the_fixture_currency() -> TestResult {
        let mut file = NamedTempFile::new()?;

        file.write_all(
            br#"
products:
  remera:
    title: Remera
    type: lisa
    price: "700 JPY"
"#,
        )?;

        let path = file.path().to_string_lossy().into_owned();
        let config = CliConfig::try_parse_from(["stockroom", "--fixture", &path, "products"])?;
        let ctx = app_context(&config)?;

        assert_eq!(ctx.currency(), JPY);

        let listing = output(&ctx, Command::Products).await?;

        assert!(listing.contains("¥700"), "listing: {listing}");

        Ok(())
    }

    #[test]
    fn configured_currency_must_match_the_fixture() -> TestResult {
        let mut file = NamedTempFile::new()?;

        file.write_all(SHOP.as_bytes())?;

        let path = file.path().to_string_lossy().into_owned();
        let config = CliConfig::try_parse_from([
            "stockroom",
            "--fixture",
            &path,
            "--currency",
            "ars",
            "products",
        ])?;

        let result = app_context(&config);

        assert!(
            matches!(result, Err(CommandError::Init(AppInitError::CurrencyMismatch { .. }))),
            "expected CurrencyMismatch, got {:?}",
            result.err()
        );

        Ok(())
    }

    #[test]
    fn rest_backend_needs_connection_settings() -> TestResult {
        let config = CliConfig::try_parse_from([
            "stockroom",
            "--backend",
            "rest",
            "--parse-server-url",
            "https://api.example.com/parse",
            "--parse-application-id",
            "",
            "products",
        ])?;

        let result = app_context(&config);

        assert!(
            matches!(result, Err(CommandError::Config(ConfigError::Missing(_)))),
            "expected a missing setting, got {:?}",
            result.err()
        );

        Ok(())
    }
}
