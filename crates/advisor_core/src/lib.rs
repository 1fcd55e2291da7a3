//! Advisor Core - categorical codification and ID3 decision trees
//!
//! Learns a symbolic decision tree from string-valued tables and uses it to
//! advise a label for unseen records.
//!
//! Modules:
//! - `table`: Named string columns, datasets and records
//! - `codebook`: Per-column symbol tables (label <-> dense code)
//! - `variable`: Decision variables and their declared arities
//! - `entropy`: Class counts, entropy and information gain
//! - `id3`: Deterministic, unpruned ID3 learner
//! - `tree`: Learned tree and inference
//! - `pipeline`: Encode -> decide -> decode over raw records
//! - `serialization`: Canonical JSON and BLAKE3 fingerprints

pub mod codebook;
pub mod entropy;
pub mod errors;
pub mod id3;
pub mod pipeline;
pub mod serialization;
pub mod table;
pub mod tree;
pub mod variable;

pub use codebook::{Code, Codebook, SymbolTable};
pub use errors::{AdvisorError, Result};
pub use id3::Id3Learning;
pub use pipeline::{Advisor, Prediction};
pub use table::{normalize_column_name, Column, Dataset, Record};
pub use tree::{DecisionTree, Node};
pub use variable::{DecisionVariable, PredictorSpec};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
