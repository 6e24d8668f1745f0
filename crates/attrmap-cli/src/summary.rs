use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use attrmap_rules::RuleSetSummary;

use crate::types::{MapRunResult, RulesReport};

pub fn print_map_summary(result: &MapRunResult) {
    println!("Rules: {}", result.rules_path.display());
    if let Some(path) = &result.output {
        println!("Output: {}", path.display());
    }
    let totals = &result.totals;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Rules loaded"), Cell::new(result.rules.loaded)]);
    table.add_row(vec![
        Cell::new("Rules rejected"),
        count_cell(result.rules.rejected, Color::Red),
    ]);
    table.add_row(vec![Cell::new("Products"), Cell::new(totals.products)]);
    table.add_row(vec![
        Cell::new("Supplier attributes"),
        Cell::new(totals.supplier_attributes),
    ]);
    table.add_row(vec![Cell::new("Mapped"), Cell::new(totals.mapped)]);
    table.add_row(vec![
        Cell::new("Unmapped"),
        count_cell(totals.unmapped, Color::Yellow),
    ]);
    table.add_row(vec![Cell::new("From titles"), Cell::new(totals.title_mapped)]);
    table.add_row(vec![
        Cell::new("Merged")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(totals.merged).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn print_rules_summary(report: &RulesReport) {
    println!("Rules: {}", report.rules_path.display());
    println!("{}", breakdown_table(&report.summary));
    if !report.rejected.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Line"), header_cell("Reason")]);
        apply_table_style(&mut table);
        align_column(&mut table, 0, CellAlignment::Right);
        for rejected in &report.rejected {
            table.add_row(vec![
                Cell::new(rejected.line).fg(Color::Red),
                Cell::new(&rejected.error),
            ]);
        }
        eprintln!("Rejected rows:");
        eprintln!("{table}");
    }
}

fn breakdown_table(summary: &RuleSetSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("Value"),
        header_cell("Rules"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for (kind, count) in &summary.by_kind {
        table.add_row(vec![dim_cell("kind"), Cell::new(kind), Cell::new(count)]);
    }
    for (scope, count) in &summary.by_scope {
        table.add_row(vec![dim_cell("category"), Cell::new(scope), Cell::new(count)]);
    }
    table.add_row(vec![
        dim_cell("title"),
        Cell::new("title regex"),
        Cell::new(summary.title_rules),
    ]);
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new("active"),
        Cell::new(summary.loaded).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        dim_cell("-"),
        Cell::new("inactive"),
        count_cell(summary.inactive, Color::DarkGrey),
    ]);
    table.add_row(vec![
        dim_cell("-"),
        Cell::new("rejected"),
        count_cell(summary.rejected, Color::Red),
    ]);
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count).fg(color)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
