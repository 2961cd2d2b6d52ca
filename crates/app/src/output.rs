use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use driftnet_core::domain::PostRecord;
use driftnet_core::types::{Community, FieldFilter, ResolvedRange};

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub fn output_path(dir: &Path, community: &Community, range: &ResolvedRange) -> PathBuf {
    dir.join(format!(
        "{}-{}-{}.json",
        community,
        range.start.format("%Y-%m-%d"),
        range.end.format("%Y-%m-%d"),
    ))
}

/// Single-shot write of the whole run; an interrupted run leaves no file.
pub fn write_records(
    path: &Path,
    records: &[PostRecord],
    filter: Option<&FieldFilter>,
) -> Result<(), OutputError> {
    let values = render_records(records, filter);
    let file = File::create(path)?;
    serde_json::to_writer(BufWriter::new(file), &values)?;
    Ok(())
}

fn render_records(records: &[PostRecord], filter: Option<&FieldFilter>) -> Vec<Value> {
    records
        .iter()
        .map(|record| record.to_output_value(filter))
        .collect()
}
