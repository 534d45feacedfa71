use anyhow::Result;
use kitgrid_core::record::RecordId;

use super::Context;

pub async fn run(ctx: &Context, id: RecordId) -> Result<()> {
    let screen = ctx.screen()?;
    let record = screen.record_detail(id).await?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
