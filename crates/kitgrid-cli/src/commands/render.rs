use colored::Colorize;
use kitgrid_core::record::{OPERATION_ORDER_STATUS, Record, STORE_REQUEST_STATUS};
use kitgrid_core::selection::HeaderCheckState;
use kitgrid_core::view::{GridView, RowView};

const DISPLAY_COLUMNS: [&str; 3] = ["Project", "Requester", "RequestDate"];

fn checkbox(row: &RowView) -> String {
    match (row.checked, row.selectable) {
        (true, _) => "[x]".green().to_string(),
        (false, true) => "[ ]".to_string(),
        (false, false) => " - ".dimmed().to_string(),
    }
}

fn header_box(state: HeaderCheckState) -> &'static str {
    match state {
        HeaderCheckState::Unchecked => "[ ]",
        HeaderCheckState::Indeterminate => "[-]",
        HeaderCheckState::Checked => "[x]",
    }
}

fn cell(record: &Record, column: &str) -> String {
    record.text_field(column).unwrap_or_default()
}

pub fn print_grid(view: &GridView) {
    println!(
        "{} {:>6}  {:<10} {:<10} {:<14} {:<18} {}",
        header_box(view.header),
        "Id",
        "Request",
        "Order",
        DISPLAY_COLUMNS[0],
        DISPLAY_COLUMNS[1],
        DISPLAY_COLUMNS[2]
    );
    for row in &view.rows {
        let record = &row.record;
        let line = format!(
            "{:>6}  {:<10} {:<10} {:<14} {:<18} {}",
            record.id,
            cell(record, STORE_REQUEST_STATUS),
            cell(record, OPERATION_ORDER_STATUS),
            cell(record, DISPLAY_COLUMNS[0]),
            cell(record, DISPLAY_COLUMNS[1]),
            cell(record, DISPLAY_COLUMNS[2]),
        );
        if row.selectable || row.checked {
            println!("{} {}", checkbox(row), line);
        } else {
            println!("{} {}", checkbox(row), line.dimmed());
        }
    }
    println!(
        "Page {}/{} - {} row(s), {} selected",
        view.page_index, view.total_pages, view.total_rows, view.selected_count
    );
}
