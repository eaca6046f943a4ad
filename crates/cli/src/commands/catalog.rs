//! Product and item listings.

use std::io;

use stockroom_app::{context::AppContext, domain::products::records::ProductId};

use crate::{
    commands::{CommandError, ItemsArgs},
    render::Renderer,
};

pub(super) async fn products(
    ctx: &AppContext,
    renderer: &Renderer,
    out: &mut impl io::Write,
) -> Result<(), CommandError> {
    let products = ctx.products.list_products().await?;

    renderer.write_products(out, &products)?;

    Ok(())
}

pub(super) async fn items(
    ctx: &AppContext,
    renderer: &Renderer,
    out: &mut impl io::Write,
    args: ItemsArgs,
) -> Result<(), CommandError> {
    let product = ctx.products.get_product(ProductId::new(args.product)).await?;
    let items = ctx.items.list_product_items(product.id.clone()).await?;

    renderer.write_items(out, &product, &items)?;

    Ok(())
}
