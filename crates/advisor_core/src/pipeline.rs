//! Training and inference pipeline
//!
//! `Advisor` ties a fitted `Codebook` to the `DecisionTree` learned from the
//! same table. Inference encodes a raw record, walks the tree and reverts the
//! predicted code to its label. Failures are per record: one bad record never
//! stops the rest.

use crate::codebook::{Code, Codebook};
use crate::errors::{AdvisorError, Result};
use crate::id3::Id3Learning;
use crate::table::{Dataset, Record};
use crate::tree::DecisionTree;
use crate::variable::{DecisionVariable, PredictorSpec};

/// Outcome of advising a single record
#[derive(Debug)]
pub struct Prediction {
    /// Caller-supplied identifier, echoed verbatim
    pub key: String,
    pub result: Result<String>,
}

impl Prediction {
    pub fn label(&self) -> Option<&str> {
        self.result.as_deref().ok()
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Fitted codebook plus learned tree for one output column
#[derive(Clone, Debug)]
pub struct Advisor {
    codebook: Codebook,
    tree: DecisionTree,
    output: String,
}

impl Advisor {
    /// Fit the codebook and learn a tree from a raw training table
    pub fn train(dataset: &Dataset, predictors: &[PredictorSpec], output: &str) -> Result<Self> {
        if predictors.iter().any(|p| p.name == output) {
            return Err(AdvisorError::config(format!(
                "output column {output:?} is also a predictor"
            )));
        }

        let mut columns: Vec<&str> = predictors.iter().map(|p| p.name.as_str()).collect();
        columns.push(output);
        let codebook = Codebook::fit(dataset, &columns)?;

        let variables = predictors
            .iter()
            .map(|p| p.resolve(&codebook))
            .collect::<Result<Vec<DecisionVariable>>>()?;
        let learner = Id3Learning::new(variables, codebook.symbol_count(output)?)?;

        let inputs = codebook.encode_dataset(dataset, &columns[..predictors.len()])?;
        let outputs = codebook.encode_column(dataset, output)?;

        let tree = learner.learn(&inputs, &outputs)?;
        let training_error = tree.training_error(&inputs, &outputs)?;
        tracing::info!(output, training_error, "advisor trained");

        Ok(Self::from_parts(codebook, tree, output))
    }

    /// Assemble from an existing codebook and tree
    pub fn from_parts(codebook: Codebook, tree: DecisionTree, output: impl Into<String>) -> Self {
        Self {
            codebook,
            tree,
            output: output.into(),
        }
    }

    pub fn codebook(&self) -> &Codebook {
        &self.codebook
    }

    pub fn tree(&self) -> &DecisionTree {
        &self.tree
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Encode the predictor cells of a record in variable order
    pub fn encode_record(&self, record: &Record) -> Result<Vec<Code>> {
        self.tree
            .variables()
            .iter()
            .map(|variable| {
                let value = record.require(&variable.name)?;
                self.codebook.encode(&variable.name, value)
            })
            .collect()
    }

    /// Predict the output label for one record
    pub fn advise(&self, record: &Record) -> Result<String> {
        let features = self.encode_record(record)?;
        let code = self.tree.decide(&features)?;
        Ok(self.codebook.decode(&self.output, code)?.to_string())
    }

    /// Advise every record, tagging each with `key_column` or its 1-based position
    ///
    /// Record-level failures are returned in place; anything else aborts.
    pub fn advise_all<'a, I>(&self, records: I, key_column: Option<&str>) -> Result<Vec<Prediction>>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut predictions = Vec::new();

        for (idx, record) in records.into_iter().enumerate() {
            let key = match key_column {
                Some(column) => record.get(column).unwrap_or_default().to_string(),
                None => (idx + 1).to_string(),
            };

            let result = self.advise(record);
            match &result {
                Err(err) if !err.is_record_failure() => {
                    return Err(AdvisorError::config(format!("record {key}: {err}")))
                }
                Err(err) => tracing::warn!(%key, %err, "could not advise record"),
                Ok(label) => tracing::debug!(%key, %label, "advised record"),
            }

            predictions.push(Prediction { key, result });
        }

        Ok(predictions)
    }
}
