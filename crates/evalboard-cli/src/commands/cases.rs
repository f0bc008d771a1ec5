//! The `evalboard cases` command.

use anyhow::Result;
use comfy_table::Cell;

use evalboard_core::model::CaseRecord;
use evalboard_core::pagination::paginate;
use evalboard_core::params::CaseQuery;

use super::Context;
use crate::output::{print_json, table, truncate, Format};

const QUESTION_WIDTH: usize = 80;

pub fn execute(ctx: &Context, query: &CaseQuery, format: Format) -> Result<()> {
    let filter = query.filter();
    let request = query.page_request_with_default(ctx.config.per_page);
    tracing::debug!(?filter, ?request, "listing cases");

    let page = paginate(ctx.engine.list_details(&filter), request);

    match format {
        Format::Json => print_json(&page)?,
        Format::Text => {
            let mut table = table(&["Model", "Dataset", "Level", "Correct", "Question"]);
            for record in &page.items {
                table.add_row(row(record));
            }
            if !page.items.is_empty() {
                println!("{table}");
            }
            println!(
                "Page {}/{} ({} matching case(s), {} per page)",
                page.page, page.total_pages, page.total, page.per_page
            );
        }
    }

    Ok(())
}

fn row(record: &CaseRecord<'_>) -> Vec<Cell> {
    let level = record
        .case
        .level()
        .map(|l| l.to_string())
        .unwrap_or_else(|| "-".into());
    let correct = match record.case.is_correct() {
        Some(true) => "yes",
        Some(false) => "no",
        None => "?",
    };
    let question = record.case.question().unwrap_or_default().replace('\n', " ");

    vec![
        Cell::new(record.model),
        Cell::new(record.dataset),
        Cell::new(level),
        Cell::new(correct),
        Cell::new(truncate(&question, QUESTION_WIDTH)),
    ]
}
