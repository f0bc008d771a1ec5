//! The `evalboard compare` command.

use anyhow::Result;
use comfy_table::Cell;

use super::Context;
use crate::output::{percent, print_json, table, Format};

pub fn execute(ctx: &Context, format: Format) -> Result<()> {
    let comparison = ctx.engine.compare_by_dataset();

    match format {
        Format::Json => print_json(&comparison)?,
        Format::Text => {
            if comparison.is_empty() {
                println!("No eval results found.");
                return Ok(());
            }

            for group in comparison.groups() {
                println!("Dataset: {} ({} model(s))", group.dataset, group.runs.len());
                let mut table = table(&["Model", "Accuracy", "Samples", "Minutes"]);
                for s in &group.runs {
                    table.add_row(vec![
                        Cell::new(&s.model),
                        Cell::new(percent(s.accuracy)),
                        Cell::new(s.num_samples),
                        Cell::new(format!("{:.1}", s.time_minutes)),
                    ]);
                }
                println!("{table}\n");
            }
        }
    }

    Ok(())
}
