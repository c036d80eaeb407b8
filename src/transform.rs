use crate::{
    config::Config,
    error::{EtlError, Result},
    record::{RawRecord, StagedRow},
    staged,
};
use chrono::Local;
use glob::{glob, Pattern};
use serde_json::Value;
use std::{
    fs::{self, File},
    io::BufReader,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

pub const RAW_FILE_PATTERN: &str = "nasa_*.json";

/// Pick the raw snapshot with the greatest file name.
///
/// Names are assumed to carry a sortable date stamp (`nasa_2024-05-01.json`);
/// modification times are not consulted.
pub fn latest_raw_file(raw_dir: &Path) -> Result<PathBuf> {
    let pattern = format!(
        "{}/{}",
        Pattern::escape(&raw_dir.to_string_lossy()),
        RAW_FILE_PATTERN
    );
    let mut latest: Option<PathBuf> = None;
    for entry in glob(&pattern)? {
        let path = entry.map_err(|e| EtlError::Io(e.into_error()))?;
        let newer = match &latest {
            Some(current) => path.file_name() > current.file_name(),
            None => true,
        };
        if newer {
            latest = Some(path);
        }
    }
    latest.ok_or_else(|| {
        EtlError::MissingInput(format!(
            "no NASA raw files found in {}",
            raw_dir.display()
        ))
    })
}

/// Parse a raw snapshot. A top-level array contributes only its first element,
/// which must be a JSON object like a bare snapshot.
pub fn read_raw_record(path: &Path) -> Result<RawRecord> {
    let file = File::open(path)?;
    let value: Value = serde_json::from_reader(BufReader::new(file))?;
    let record = match &value {
        Value::Array(items) => items.first().ok_or_else(|| {
            EtlError::Json(serde::de::Error::custom(format!(
                "{} contains an empty array",
                path.display()
            )))
        })?,
        other => other,
    };
    if !record.is_object() {
        return Err(EtlError::Json(serde::de::Error::custom(format!(
            "{} does not hold a JSON object record",
            path.display()
        ))));
    }
    Ok(RawRecord::from_value(record))
}

/// Stage the latest raw snapshot as a single-row CSV at `cfg.staged_path`.
#[tracing::instrument(level = "info", skip(cfg), fields(raw_dir = %cfg.raw_dir.display()))]
pub fn transform(cfg: &Config) -> Result<StagedRow> {
    if let Some(dir) = cfg.staged_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let latest = latest_raw_file(&cfg.raw_dir)?;
    debug!(file = %latest.display(), "selected latest raw file");

    let raw = read_raw_record(&latest)?;
    let row = StagedRow::new(raw, Local::now().naive_local());

    staged::write_staged(&cfg.staged_path, std::slice::from_ref(&row))?;
    info!(
        "transformed 1 NASA record(s) saved to: {}",
        cfg.staged_path.display()
    );
    Ok(row)
}
