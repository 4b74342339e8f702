use comfy_table::{presets::UTF8_BORDERS_ONLY, Cell, ContentArrangement, Row, Table};
use roster_rs_sdk::{Page, Record, UploadSummary};
use serde::Serialize;

const RECORD_HEADER: [&str; 8] = [
    "id",
    "group_tag",
    "primary_name",
    "secondary_id",
    "sensitive_id",
    "location",
    "notes",
    "updated_at",
];

pub fn print_summary_table(summary: &UploadSummary) {
    let mut table = new_table();
    table.set_header(Row::from(vec![Cell::new("metric"), Cell::new("count")]));
    for (label, count) in summary_rows(summary) {
        table.add_row(Row::from(vec![Cell::new(label), Cell::new(count)]));
    }

    println!("{table}");
    println!("{}", summary.message);
}

pub fn print_summary_json(summary: &UploadSummary) {
    print_json(summary);
}

pub fn print_page_table(page: &Page<Record>) {
    let mut table = new_table();
    table.set_header(Row::from(RECORD_HEADER.iter().map(Cell::new).collect::<Vec<_>>()));
    for record in &page.items {
        table.add_row(Row::from(
            record_cells(record)
                .into_iter()
                .map(Cell::new)
                .collect::<Vec<_>>(),
        ));
    }

    println!("{table}");
    println!(
        "(page {}, {} rows, limit {})",
        page.current_page, page.total_count, page.limit
    );
}

pub fn print_page_json(page: &Page<Record>) {
    print_json(page);
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn summary_rows(summary: &UploadSummary) -> [(&'static str, usize); 7] {
    [
        ("submitted", summary.submitted),
        ("duplicates dropped", summary.duplicates_dropped),
        ("existing matched", summary.existing_matched),
        ("placeholders absorbed", summary.placeholders_absorbed),
        ("inserted", summary.inserted),
        ("updated", summary.updated),
        ("affected", summary.affected),
    ]
}

fn record_cells(record: &Record) -> [String; 8] {
    [
        record.id.to_string(),
        record.group_tag.clone().unwrap_or_default(),
        record.primary_name.clone(),
        record.secondary_id.clone(),
        record.sensitive_id.clone(),
        record.location.clone().unwrap_or_default(),
        record.notes.clone().unwrap_or_default(),
        record.updated_at.to_string(),
    ]
}

fn print_json<T: Serialize>(payload: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(payload).unwrap_or_else(|_| "{}".to_string())
    );
}
