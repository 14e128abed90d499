use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use pow_model::ErrorLog;

use crate::types::{ConvertResult, LinkResult, PartitionResult, PruneResult, SourcesResult};

pub fn print_convert_summary(result: &ConvertResult) {
    println!("Input: {}", result.input.display());
    match &result.outputs {
        Some(outputs) => {
            println!("Data: {}", outputs.data.display());
            println!("Schema: {}", outputs.schema.display());
            println!("Errors: {}", outputs.errors.display());
        }
        None => println!("Dry run: no files written"),
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Output"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Records"), Cell::new(result.records)]);
    table.add_row(vec![Cell::new("Data triples"), Cell::new(result.data_triples)]);
    table.add_row(vec![
        Cell::new("Schema triples"),
        Cell::new(result.schema_triples),
    ]);
    table.add_row(vec![
        Cell::new("Error records"),
        count_cell(result.errors.len(), Color::Yellow),
    ]);
    println!("{table}");
    print_error_table(&result.errors);
}

fn print_error_table(errors: &ErrorLog) {
    if errors.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Errors")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (column, count) in errors.count_by_column() {
        table.add_row(vec![Cell::new(column), count_cell(count, Color::Yellow)]);
    }
    println!();
    println!("Errors by column:");
    println!("{table}");
}

pub fn print_prune_summary(result: &PruneResult) {
    println!("Output: {}", result.output.display());
    let report = &result.report;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Records"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Public"), Cell::new(report.public)]);
    table.add_row(vec![
        Cell::new("Died recently"),
        count_cell(report.died_recently, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Possibly alive"),
        count_cell(report.possibly_alive, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Already pruned"),
        count_cell(report.already_pruned, Color::DarkGrey),
    ]);
    table.add_row(vec![
        Cell::new("Removed triples"),
        count_cell(report.removed_triples, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Census names"),
        dim_cell(result.census_names),
    ]);
    table.add_row(vec![
        Cell::new("Triples written").add_attribute(Attribute::Bold),
        Cell::new(result.triples).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn print_partition_summary(result: &PartitionResult) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Part"), header_cell("File"), header_cell("Triples")]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Public").fg(Color::Green),
        Cell::new(result.public.display()),
        Cell::new(result.public_triples),
    ]);
    table.add_row(vec![
        Cell::new("Restricted").fg(Color::Red),
        Cell::new(result.restricted.display()),
        Cell::new(result.restricted_triples),
    ]);
    println!("{table}");
}

pub fn print_link_summary(result: &LinkResult) {
    println!("Task: {}", result.task);
    println!("Output: {}", result.output.display());
    let report = &result.report;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Outcome"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Accepted"),
        count_cell(report.accepted, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Rejected"),
        count_cell(report.rejected, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("No candidates"),
        count_cell(report.no_results, Color::Yellow),
    ]);
    table.add_row(vec![Cell::new("Failed"), count_cell(report.failed, Color::Red)]);
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.total()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn print_sources_summary(result: &SourcesResult) {
    println!("Output: {}", result.output.display());
    let report = &result.report;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Sources"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Indexed"), dim_cell(result.indexed)]);
    table.add_row(vec![
        Cell::new("Created"),
        count_cell(report.created, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("References rewritten"),
        count_cell(report.rewritten, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Triples written").add_attribute(Attribute::Bold),
        Cell::new(result.triples).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
