//! Advisor CLI - train an ID3 advisor from CSV data and advise a test set
//!
//! Loads a training table and a test table, fits the codebook, learns the
//! tree and produces one report line per test record.

pub mod config;
pub mod errors;
pub mod loader;
pub mod report;

use advisor_core::{Advisor, Prediction};
use std::path::Path;

pub use config::AdvisorConfig;
pub use errors::CliError;
pub use loader::{load_dataset, load_dataset_from_reader};
pub use report::{format_prediction, Summary};

/// Train an advisor directly from a CSV file using the provided configuration.
pub fn train_from_csv(path: &Path, config: &AdvisorConfig) -> Result<Advisor, CliError> {
    let dataset = load_dataset(path)?;
    tracing::info!(
        rows = dataset.row_count(),
        columns = dataset.columns().len(),
        "loaded training set"
    );
    Ok(Advisor::train(&dataset, &config.predictors, &config.output)?)
}

/// Advise every row of a CSV file
pub fn advise_csv(advisor: &Advisor, path: &Path, config: &AdvisorConfig) -> Result<Vec<Prediction>, CliError> {
    let dataset = load_dataset(path)?;
    if let Some(key) = config.key.as_deref() {
        if dataset.column(key).is_none() {
            return Err(CliError::Config(format!(
                "key column {key:?} is absent from {}",
                path.display()
            )));
        }
    }
    let records: Vec<_> = dataset.records().collect();
    Ok(advisor.advise_all(&records, config.key.as_deref())?)
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
