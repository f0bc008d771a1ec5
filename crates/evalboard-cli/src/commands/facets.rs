//! The `evalboard facets` command.

use anyhow::Result;

use super::Context;
use crate::output::{print_json, Format};

pub fn execute(ctx: &Context, format: Format) -> Result<()> {
    let facets = ctx.engine.facets();

    match format {
        Format::Json => print_json(&facets)?,
        Format::Text => {
            println!("Models: {}", facets.models.join(", "));
            println!("Datasets: {}", facets.datasets.join(", "));
            let levels: Vec<String> = facets.levels.iter().map(i64::to_string).collect();
            println!("Levels: {}", levels.join(", "));
        }
    }

    Ok(())
}
