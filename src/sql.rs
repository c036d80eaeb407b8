//! Textual INSERT construction for the remote `execute_sql` RPC.
//!
//! The endpoint takes one opaque SQL string, so values are escaped and inlined
//! rather than bound. Doubling single quotes is the only escaping applied.

use crate::record::LoadRow;

/// `None` → `NULL`; otherwise a single-quoted literal with `'` doubled.
pub fn escape_literal(value: Option<&str>) -> String {
    match value {
        None => "NULL".to_string(),
        Some(s) => format!("'{}'", s.replace('\'', "''")),
    }
}

/// One parenthesised value tuple, cells in row order.
pub fn value_tuple(row: &LoadRow) -> String {
    let cells: Vec<String> = row
        .cells
        .iter()
        .map(|cell| escape_literal(cell.as_deref()))
        .collect();
    format!("({})", cells.join(", "))
}

/// `INSERT INTO <table> (<columns>) VALUES (..), (..);` covering all of `rows`.
pub fn build_insert(table: &str, columns: &[&str], rows: &[LoadRow]) -> String {
    let values: Vec<String> = rows.iter().map(value_tuple).collect();
    format!(
        "INSERT INTO {} ({}) VALUES {};",
        table,
        columns.join(", "),
        values.join(", ")
    )
}
