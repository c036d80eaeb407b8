//! Reading and writing the staged CSV artifact that hands rows from the
//! transform stage to the load stage.

use crate::{
    error::{EtlError, Result},
    record::{LoadRow, StagedRow, STAGED_COLUMNS},
};
use csv::{ReaderBuilder, Writer};
use std::{fs, path::Path};
use tracing::debug;

/// Write `rows` under a header of `STAGED_COLUMNS`, replacing any existing file.
/// `None` cells are written as empty fields.
pub fn write_staged(path: &Path, rows: &[StagedRow]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = Writer::from_path(path)?;
    if rows.is_empty() {
        // serialize() only emits the header alongside the first record
        writer.write_record(STAGED_COLUMNS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    debug!(path = %path.display(), rows = rows.len(), "wrote staged artifact");
    Ok(())
}

/// The staged table as the load stage sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedTable {
    pub rows: Vec<LoadRow>,
    /// Whether the header carried an `extracted_at` column at all.
    pub has_extracted_at: bool,
}

/// Read the whole artifact into memory.
///
/// Cells are matched to `STAGED_COLUMNS` by header name; columns the header lacks
/// come back as `None`, unknown columns are ignored.
pub fn read_staged(path: &Path) -> Result<StagedTable> {
    if !path.exists() {
        return Err(EtlError::MissingInput(format!(
            "missing file: {}",
            path.display()
        )));
    }

    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let positions: Vec<Option<usize>> = STAGED_COLUMNS
        .iter()
        .map(|col| headers.iter().position(|h| h.trim() == *col))
        .collect();
    let has_extracted_at = positions[STAGED_COLUMNS.len() - 1].is_some();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let cells = positions
            .iter()
            .map(|pos| {
                pos.and_then(|i| record.get(i))
                    .filter(|cell| !cell.is_empty())
                    .map(str::to_string)
            })
            .collect();
        rows.push(LoadRow { cells });
    }

    debug!(path = %path.display(), rows = rows.len(), "read staged artifact");
    Ok(StagedTable {
        rows,
        has_extracted_at,
    })
}
