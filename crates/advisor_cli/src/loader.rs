//! CSV dataset loading
//!
//! Reads a headed CSV file into a string `Dataset`. Header names have
//! spaces replaced by underscores; cells are kept verbatim apart from
//! surrounding whitespace.

use advisor_core::{normalize_column_name, Dataset};
use std::io::Read;
use std::path::Path;

use crate::errors::CliError;

/// Load a dataset from a CSV file with a header row
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset, CliError> {
    let path = path.as_ref();
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| CliError::Io(format!("failed to open {}: {e}", path.display())))?;

    read_dataset(reader).map_err(|e| match e {
        CliError::Dataset(msg) => CliError::Dataset(format!("{}: {msg}", path.display())),
        other => other,
    })
}

/// Load a dataset from any CSV source with a header row
pub fn load_dataset_from_reader<R: Read>(source: R) -> Result<Dataset, CliError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);
    read_dataset(reader)
}

fn read_dataset<R: Read>(mut reader: csv::Reader<R>) -> Result<Dataset, CliError> {
    let header: Vec<String> = reader
        .headers()
        .map_err(|e| CliError::Dataset(format!("invalid header: {e}")))?
        .iter()
        .map(normalize_column_name)
        .collect();

    if header.is_empty() {
        return Err(CliError::Dataset("missing header row".into()));
    }

    let mut rows = Vec::new();
    for (line_idx, record) in reader.records().enumerate() {
        let record = record
            .map_err(|e| CliError::Dataset(format!("row {}: {e}", line_idx + 1)))?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    tracing::debug!(columns = header.len(), rows = rows.len(), "loaded CSV");

    Ok(Dataset::from_rows(&header, &rows)?)
}
