use anyhow::Result;
use kitgrid_core::api::ListFilter;
use kitgrid_core::view::SortSpec;

use super::Context;
use super::render::print_grid;

pub async fn run(
    ctx: &Context,
    filter: ListFilter,
    page: usize,
    search: Option<String>,
    sort: Option<String>,
) -> Result<()> {
    let screen = ctx.screen()?;
    screen.load(filter).await?;

    if let Some(text) = search {
        screen.set_view_filter(text).await;
    }
    if let Some(raw) = sort {
        screen.set_sort(raw.parse::<SortSpec>()?).await;
    }
    screen.go_to_page(page).await;

    print_grid(&screen.render().await);
    Ok(())
}
