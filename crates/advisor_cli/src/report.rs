//! Report lines for advised records

use advisor_core::Prediction;

/// Human-readable line for a single prediction
pub fn format_prediction(subject: &str, prediction: &Prediction) -> String {
    match prediction.label() {
        Some(label) => format!("{} {}: {}", subject, prediction.key, label),
        None => format!(
            "Could not generate advice for {} {}",
            subject.to_lowercase(),
            prediction.key
        ),
    }
}

/// Count of advised and skipped records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub advised: usize,
    pub skipped: usize,
}

impl Summary {
    pub fn of(predictions: &[Prediction]) -> Self {
        let advised = predictions.iter().filter(|p| p.is_ok()).count();
        Self {
            advised,
            skipped: predictions.len() - advised,
        }
    }
}
