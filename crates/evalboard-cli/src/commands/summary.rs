//! The `evalboard summary` command.

use anyhow::Result;
use comfy_table::Cell;

use super::Context;
use crate::output::{percent, print_json, table, Format};

pub fn execute(ctx: &Context, format: Format) -> Result<()> {
    let summary = ctx.engine.summarize();

    match format {
        Format::Json => print_json(&summary)?,
        Format::Text => {
            if summary.is_empty() {
                println!("No eval results found.");
                return Ok(());
            }

            let mut table = table(&[
                "Model", "Dataset", "Accuracy", "Samples", "Minutes", "Empty", "Timeout",
            ]);
            for s in &summary {
                table.add_row(vec![
                    Cell::new(&s.model),
                    Cell::new(&s.dataset),
                    Cell::new(percent(s.accuracy)),
                    Cell::new(s.num_samples),
                    Cell::new(format!("{:.1}", s.time_minutes)),
                    Cell::new(s.empty_samples),
                    Cell::new(s.timeout_samples),
                ]);
            }
            println!("{table}");
            println!("{} run(s)", summary.len());
        }
    }

    Ok(())
}
