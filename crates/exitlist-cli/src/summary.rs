use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use exitlist_core::{InvocationResult, SyncSummary};

pub fn print_summary(result: &InvocationResult) {
    let Some(summary) = &result.report else {
        eprintln!("error: {}", result.message);
        return;
    };
    println!("Table: {}", summary.table);

    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Records")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (label, count) in stage_counts(summary) {
        table.add_row(vec![Cell::new(label), count_cell(count, Color::Reset)]);
    }
    let persist = &summary.persist;
    table.add_row(vec![
        Cell::new("Skipped (no slug)"),
        count_cell(persist.skipped, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Duplicates (collapsed)"),
        count_cell(persist.duplicates, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Failed").fg(Color::Red),
        count_cell(persist.failed_items(), Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Written")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(persist.written).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    print_failed_batches(summary);
    println!("{}", result.message);
}

fn stage_counts(summary: &SyncSummary) -> [(&'static str, usize); 4] {
    [
        ("Structured", summary.structured_records),
        ("Scraped", summary.scraped_records),
        ("Merged", summary.merged_records),
        ("Matched", summary.matched_records),
    ]
}

fn print_failed_batches(summary: &SyncSummary) {
    let failures = &summary.persist.failed_batches;
    if failures.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Batch"),
        header_cell("Items"),
        header_cell("Error"),
    ]);
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    for failure in failures {
        table.add_row(vec![
            Cell::new(failure.batch_index),
            Cell::new(failure.item_count),
            Cell::new(&failure.error).fg(Color::Red),
        ]);
    }
    eprintln!();
    eprintln!("Failed batches:");
    eprintln!("{table}");
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(60);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
