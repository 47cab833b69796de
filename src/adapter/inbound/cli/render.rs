//! Plain-text rendering of display tables.

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::application::DisplayTable;

/// Header of the row-label column.
const LABEL_HEADER: &str = "Detector";

/// Render a table, keeping at most `max_columns` data columns.
///
/// Row labels, when present, become a leading column that does not count
/// towards the cap.
#[must_use]
pub fn render_table(table: &DisplayTable, max_columns: Option<usize>) -> String {
    let capped;
    let table = match max_columns {
        Some(max) if max < table.column_count() => {
            capped = table.truncated(max);
            &capped
        }
        _ => table,
    };

    let mut builder = Builder::default();
    let mut header: Vec<String> = Vec::with_capacity(table.headers.len() + 1);
    if table.row_labels.is_some() {
        header.push(LABEL_HEADER.to_string());
    }
    header.extend(table.headers.iter().cloned());
    builder.push_record(header);

    for (i, row) in table.rows.iter().enumerate() {
        let mut record: Vec<String> = Vec::with_capacity(row.len() + 1);
        if let Some(labels) = &table.row_labels {
            record.push(labels.get(i).cloned().unwrap_or_default());
        }
        record.extend(row.iter().map(ToString::to_string));
        builder.push_record(record);
    }

    let mut rendered = builder.build();
    rendered.with(Style::modern());
    rendered.to_string()
}
