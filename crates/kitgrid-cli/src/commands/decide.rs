use anyhow::{Result, bail};
use colored::Colorize;
use kitgrid_core::api::{Decision, ListFilter};
use kitgrid_core::record::RecordId;
use kitgrid_core::selection::ToggleOutcome;

use super::Context;
use super::render::print_grid;

pub async fn run(
    ctx: &Context,
    decision: Decision,
    filter: ListFilter,
    ids: Vec<RecordId>,
    page: Option<usize>,
) -> Result<()> {
    let screen = ctx.screen()?;
    screen.load(filter).await?;

    match page {
        Some(page) => {
            screen.go_to_page(page).await;
            let added = screen.select_all_eligible_on_page().await;
            println!("Selected {} eligible record(s) on page {}", added, page);
        }
        None => {
            for id in ids {
                if screen.toggle_row(id).await == ToggleOutcome::Ignored {
                    println!("{} record {} is not eligible, skipped", "!".yellow(), id);
                }
            }
        }
    }

    let button = screen.bulk_action_button(decision).await;
    if !button.enabled {
        bail!("Nothing to submit: no eligible record selected");
    }
    println!("{}", button.label.bold());

    match screen.submit(decision).await {
        Ok(report) => {
            println!(
                "{} {} record(s): {:?}",
                "✓".green(),
                decision.resulting_status().to_lowercase(),
                report.batch.ids
            );
            if !report.refreshed {
                println!("{} dataset could not be refreshed", "!".yellow());
            }
            print_grid(&screen.render().await);
            Ok(())
        }
        Err(e) => bail!("Bulk {} failed, selection kept: {}", decision, e),
    }
}
