use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use nmea_core::RunSummary;

pub fn print_summary(summary: &RunSummary) {
    if let Some(path) = &summary.output {
        println!("Output: {}", path.display());
    }
    println!("Primary table: {}", summary.primary);
    println!("Types: {}", summary.types);

    let mut table = Table::new();
    table.set_header(vec![header_cell("Ticks"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Processed"), Cell::new(summary.ticks)]);
    table.add_row(vec![Cell::new("Matched"), Cell::new(summary.matched)]);
    table.add_row(vec![
        Cell::new("GNSS gap"),
        count_cell(summary.gnss_gaps, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("DR behind"),
        count_cell(summary.dr_behind, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Ignored"),
        count_cell(summary.ignored, Color::Red),
    ]);
    println!("{table}");

    let mut table = Table::new();
    table.set_header(vec![header_cell("Sentence"), header_cell("Lines")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let counts = &summary.sentences;
    for (label, count) in [
        ("GGA", counts.gga),
        ("RMC", counts.rmc),
        ("GSV", counts.gsv),
        ("GSA", counts.gsa),
    ] {
        table.add_row(vec![Cell::new(label), Cell::new(count)]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(counts.total()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        Cell::new(count).fg(Color::DarkGrey)
    } else {
        Cell::new(count).fg(color)
    }
}
