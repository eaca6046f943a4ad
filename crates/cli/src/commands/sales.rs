//! Selling, undoing sales and the sales ledger.

use std::io;

use stockroom_app::{
    context::AppContext,
    domain::{items::records::ItemId, sales::ToggleOutcome},
    views::LedgerState,
};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::{
    commands::{CommandError, LedgerArgs, ToggleArgs},
    render::Renderer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Action {
    Sell,
    Undo,
}

pub(super) async fn toggle(
    ctx: &AppContext,
    renderer: &Renderer,
    out: &mut impl io::Write,
    args: ToggleArgs,
    action: Action,
) -> Result<(), CommandError> {
    let item_id = ItemId::new(args.item);
    let item = ctx.items.get_item(item_id.clone()).await?;

    let (sale_toggle, changes) = ctx.sale_toggle();
    let (states, _watcher) = watch::channel(LedgerState::Loading);
    let follower = tokio::spawn(ctx.ledger_view(args.limit).follow(changes, states));

    let mut sync = ctx.store.subscribe_sync();
    let mut view = ctx.inventory_view(item.product.id().clone(), sale_toggle);

    view.load().await?;

    let outcome = match action {
        Action::Sell => view.mark_sold(&item_id).await?,
        Action::Undo => view.mark_unsold(&item_id).await?,
    };

    match outcome {
        ToggleOutcome::Applied(ack) => {
            info!(item_id = %item_id, updated_at = %ack.updated_at, "sale toggle applied");

            match sync.recv().await {
                Ok(synced) => {
                    view.apply_sync(&synced).await?;
                }
                Err(error) => debug!(%error, "no sync notification received"),
            }
        }
        ToggleOutcome::Unchanged => {
            let note = match action {
                Action::Sell => "already sold",
                Action::Undo => "not sold",
            };

            writeln!(out, "item {item_id} is {note}; nothing to do").map_err(render_io)?;
        }
    }

    if let Some(record) = view.items().iter().find(|record| record.id == item_id) {
        renderer.write_item(&mut *out, record)?;
    }

    // Dropping the view drops the last change publisher, which ends the follower.
    drop(view);

    let state = follower.await?;

    write_ledger_state(renderer, out, &state)
}

pub(super) async fn ledger(
    ctx: &AppContext,
    renderer: &Renderer,
    out: &mut impl io::Write,
    args: LedgerArgs,
) -> Result<(), CommandError> {
    let mut view = ctx.ledger_view(args.limit);

    let state = view.refresh().await;

    write_ledger_state(renderer, out, state)
}

fn write_ledger_state(
    renderer: &Renderer,
    out: &mut impl io::Write,
    state: &LedgerState,
) -> Result<(), CommandError> {
    match state {
        LedgerState::Ready(ledger) => Ok(renderer.write_ledger(out, ledger)?),
        LedgerState::Failed(message) => Err(CommandError::Ledger(message.clone())),
        LedgerState::Loading => Err(CommandError::Ledger("sales ledger never loaded".to_string())),
    }
}

fn render_io(error: io::Error) -> CommandError {
    CommandError::Render(error.into())
}
