//! Decision variables
//!
//! A decision variable names a predictor column and declares how many
//! symbols it may take. The declared arity can exceed what the training
//! sample actually contains (a binary flag stays arity 2 even if only one
//! value was observed).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::codebook::Codebook;
use crate::errors::{AdvisorError, Result};

/// Predictor column with its declared symbol arity
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecisionVariable {
    pub name: String,
    pub arity: usize,
}

impl DecisionVariable {
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        Self {
            name: name.into(),
            arity,
        }
    }

    /// Variable whose arity is the number of symbols the codebook learned
    pub fn from_codebook(codebook: &Codebook, name: &str) -> Result<Self> {
        Ok(Self::new(name, codebook.symbol_count(name)?))
    }
}

/// Predictor as configured; the arity falls back to the observed symbol count
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictorSpec {
    pub name: String,
    #[serde(default)]
    pub arity: Option<usize>,
}

impl PredictorSpec {
    pub fn declared(name: impl Into<String>, arity: usize) -> Self {
        Self {
            name: name.into(),
            arity: Some(arity),
        }
    }

    pub fn observed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arity: None,
        }
    }

    pub fn resolve(&self, codebook: &Codebook) -> Result<DecisionVariable> {
        match self.arity {
            Some(arity) => Ok(DecisionVariable::new(self.name.clone(), arity)),
            None => DecisionVariable::from_codebook(codebook, &self.name),
        }
    }
}

/// Reject empty lists, zero arities and duplicate names
pub fn validate_variables(variables: &[DecisionVariable]) -> Result<()> {
    if variables.is_empty() {
        return Err(AdvisorError::config("at least one decision variable is required"));
    }

    let mut names = HashSet::new();
    for variable in variables {
        if variable.arity == 0 {
            return Err(AdvisorError::config(format!(
                "decision variable {:?} has arity 0",
                variable.name
            )));
        }
        if !names.insert(variable.name.as_str()) {
            return Err(AdvisorError::config(format!(
                "decision variable {:?} is declared twice",
                variable.name
            )));
        }
    }

    Ok(())
}
