//! Advisor configuration file
//!
//! ```toml
//! output = "advies"
//! key = "studentnummer"
//! subject = "Student"
//!
//! [[predictors]]
//! name = "was_aanwezig"
//! arity = 2
//!
//! [[predictors]]
//! name = "competenties"   # arity taken from the training data
//! ```

use advisor_core::PredictorSpec;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::errors::CliError;

fn default_subject() -> String {
    "Student".to_string()
}

/// Training and reporting configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdvisorConfig {
    /// Output column to predict
    pub output: String,
    /// Identifier column echoed in reports
    #[serde(default)]
    pub key: Option<String>,
    /// Noun used in report lines
    #[serde(default = "default_subject")]
    pub subject: String,
    /// Predictor columns in feature order
    pub predictors: Vec<PredictorSpec>,
}

impl AdvisorConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, CliError> {
        let config: Self =
            toml::from_str(content).map_err(|e| CliError::Config(format!("failed to parse: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::Io(format!("failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject configurations no learner could accept
    pub fn validate(&self) -> Result<(), CliError> {
        if self.output.trim().is_empty() {
            return Err(CliError::Config("output column must not be empty".into()));
        }
        if self.predictors.is_empty() {
            return Err(CliError::Config("at least one predictor is required".into()));
        }

        let mut names = HashSet::new();
        for predictor in &self.predictors {
            if predictor.name == self.output {
                return Err(CliError::Config(format!(
                    "predictor {:?} is the output column",
                    predictor.name
                )));
            }
            if predictor.arity == Some(0) {
                return Err(CliError::Config(format!(
                    "predictor {:?} has arity 0",
                    predictor.name
                )));
            }
            if !names.insert(predictor.name.as_str()) {
                return Err(CliError::Config(format!(
                    "predictor {:?} is listed twice",
                    predictor.name
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
output = "advies"
key = "studentnummer"

[[predictors]]
name = "was_aanwezig"
arity = 2

[[predictors]]
name = "competenties"
"#;

    #[test]
    fn test_parse_sample() {
        let config = AdvisorConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.output, "advies");
        assert_eq!(config.key.as_deref(), Some("studentnummer"));
        assert_eq!(config.subject, "Student");
        assert_eq!(
            config.predictors,
            vec![
                PredictorSpec::declared("was_aanwezig", 2),
                PredictorSpec::observed("competenties"),
            ]
        );
    }

    #[test]
    fn test_rejects_bad_predictors() {
        let zero = "output = \"y\"\n[[predictors]]\nname = \"x\"\narity = 0\n";
        assert!(matches!(
            AdvisorConfig::from_toml_str(zero),
            Err(CliError::Config(_))
        ));

        let twice = "output = \"y\"\n[[predictors]]\nname = \"x\"\n[[predictors]]\nname = \"x\"\n";
        assert!(AdvisorConfig::from_toml_str(twice).is_err());

        let is_output = "output = \"y\"\n[[predictors]]\nname = \"y\"\n";
        assert!(AdvisorConfig::from_toml_str(is_output).is_err());

        let none = "output = \"y\"\npredictors = []\n";
        assert!(AdvisorConfig::from_toml_str(none).is_err());
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let extra = "output = \"y\"\nmax_depth = 3\n[[predictors]]\nname = \"x\"\n";
        assert!(AdvisorConfig::from_toml_str(extra).is_err());
    }
}
