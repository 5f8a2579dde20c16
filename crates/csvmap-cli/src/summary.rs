use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use csvmap_cli::session::ColumnMapper;
use csvmap_map::TransformPlan;
use csvmap_model::{FieldLabelTable, OutputRecord, RawTable};
use csvmap_submit::{SubmitReceipt, SubmitSettings};

pub fn print_headers(path: &Path, table: &RawTable) {
    println!("File: {}", path.display());
    println!("Rows: {}", table.row_count());
    let mut out = Table::new();
    out.set_header(vec![
        header_cell("#"),
        header_cell("Header"),
        header_cell("First value"),
    ]);
    apply_table_style(&mut out);
    align_column(&mut out, 0, CellAlignment::Right);
    for (index, header) in table.headers.iter().enumerate() {
        let sample = match table.cell(0, index) {
            Some(value) if !value.is_empty() => Cell::new(value),
            _ => dim_cell("-"),
        };
        out.add_row(vec![dim_cell(index), Cell::new(header), sample]);
    }
    println!("{out}");
}

pub fn print_fields(labels: &FieldLabelTable) {
    let mut out = Table::new();
    out.set_header(vec![
        header_cell("Field"),
        header_cell("Form label"),
        header_cell("Backend label"),
    ]);
    apply_table_style(&mut out);
    for (field, label) in labels.iter() {
        out.add_row(vec![
            Cell::new(field.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(field.form_label()),
            Cell::new(label),
        ]);
    }
    println!("{out}");
}

pub fn print_preview(mapper: &ColumnMapper, records: &[OutputRecord], limit: usize) {
    let summary = mapper.summary();
    println!(
        "Mapped fields: {}/{}  Custom fields: {}  Records: {}  Unresolved: {}",
        summary.mapped_fields,
        summary.total_fields,
        summary.custom_fields,
        records.len(),
        summary.stale_selections.len() + summary.unresolved_custom_fields
    );

    let columns = output_columns(mapper);
    if columns.is_empty() {
        println!("Nothing mapped yet.");
        return;
    }
    let mut out = Table::new();
    out.set_header(columns.iter().map(|name| header_cell(name)).collect::<Vec<_>>());
    apply_preview_table_style(&mut out);
    for record in records.iter().take(limit) {
        out.add_row(
            columns
                .iter()
                .map(|name| match record.get(name) {
                    Some(value) if !value.is_empty() => Cell::new(value),
                    _ => dim_cell("-"),
                })
                .collect::<Vec<_>>(),
        );
    }
    println!("{out}");
    if records.len() > limit {
        println!("... {} more record(s)", records.len() - limit);
    }
}

pub fn print_receipt(settings: &SubmitSettings, receipt: &SubmitReceipt) {
    println!(
        "Uploaded {} record(s) to {} (status {})",
        receipt.records, settings.endpoint, receipt.status
    );
    if !receipt.body.is_empty() {
        println!("Response: {}", receipt.body);
    }
}

/// Output keys in write order, duplicates collapsed to their first position.
fn output_columns(mapper: &ColumnMapper) -> Vec<String> {
    let plan = TransformPlan::new(&mapper.table().headers, mapper.mapping(), &mapper.labels());
    let mut columns: Vec<String> = Vec::new();
    for (key, _) in plan.columns() {
        if !columns.contains(key) {
            columns.push(key.clone());
        }
    }
    columns
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_preview_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
