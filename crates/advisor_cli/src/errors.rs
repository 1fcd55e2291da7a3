use thiserror::Error;

/// Errors returned by the advisor command line front end.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("dataset error: {0}")]
    Dataset(String),

    #[error(transparent)]
    Advisor(#[from] advisor_core::AdvisorError),
}
