//! Plain-text rendering of register records.

use crate::config::SEPARATOR_WIDTH;
use crate::types::RegisterRecord;

/// Render one record followed by its separator.
#[must_use]
pub fn render_record(record: &RegisterRecord) -> String {
    let mut out = String::new();

    if let Some(section) = &record.section {
        out.push_str(section);
        out.push(' ');
    }
    out.push_str(&format!(
        "{}\n\nAddress offset: {}\nReset value: {}\n\n",
        record.full_name, record.address_offset, record.reset_value
    ));

    if !record.content.is_empty() {
        out.push_str(&record.content);
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&"=".repeat(SEPARATOR_WIDTH));
    out.push_str("\n\n");
    out
}

/// Render all records in order.
#[must_use]
pub fn render_text(records: &[RegisterRecord]) -> String {
    records.iter().map(render_record).collect()
}
