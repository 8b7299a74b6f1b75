use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use rrm_cli::types::MergeRunResult;

pub fn print_summary(result: &MergeRunResult) {
    println!("Report: {}", result.report_path.display());
    println!("Rules: {}", result.rules_path.display());
    if result.duplicate_rule_keys > 0 {
        println!(
            "Note: {} group(s) of equivalent rule hrefs in the rules file; first match wins",
            result.duplicate_rule_keys
        );
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Output"),
        header_cell("Format"),
        header_cell("Records"),
        header_cell("Matched"),
        header_cell("Unmatched"),
    ]);
    apply_table_style(&mut table);
    for index in 2..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(result.output_path.display()),
        Cell::new("CSV"),
        Cell::new(result.report_rows),
        count_cell(result.matched, Color::Green),
        count_cell(result.unmatched, Color::Yellow),
    ]);
    if let (Some(path), Some(records)) = (&result.json_path, result.json_records) {
        table.add_row(vec![
            Cell::new(path.display()),
            Cell::new("JSON"),
            Cell::new(records),
            dim_cell("-"),
            dim_cell("-"),
        ]);
    }
    println!("{table}");
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}
