//! Shapes returned by the prediction service and the outcome shown to users.

use serde::{Deserialize, Serialize};

use crate::reservoir::FieldStage;

/// One natural-language factor behind a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub text: String,
    /// Whether the factor supports the verdict.
    pub positive: bool,
}

/// Verdict from the prediction service. `explanations` keep the service's order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub suitable: bool,
    pub confidence: f64,
    pub field_stage: FieldStage,
    pub explanations: Vec<Explanation>,
}

impl PredictionResult {
    /// Same result with `confidence` rounded to the nearest integer.
    pub fn rounded(mut self) -> Self {
        self.confidence = self.confidence.round();
        self
    }

    /// Stand-in result carrying an error message, so a renderer only ever
    /// deals with one result shape.
    pub fn from_error(message: impl Into<String>, field_stage: FieldStage) -> Self {
        Self {
            suitable: false,
            confidence: 0.0,
            field_stage,
            explanations: vec![Explanation {
                text: message.into(),
                positive: false,
            }],
        }
    }
}

/// What a submission settled to.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Success(PredictionResult),
    Failure {
        message: String,
        field_stage: FieldStage,
    },
}

impl PredictionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PredictionOutcome::Success(_))
    }

    /// Result to display: the real one, or the synthetic error result.
    pub fn display_result(&self) -> PredictionResult {
        match self {
            PredictionOutcome::Success(result) => result.clone(),
            PredictionOutcome::Failure {
                message,
                field_stage,
            } => PredictionResult::from_error(message.clone(), *field_stage),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positives: u64,
    pub true_negatives: u64,
    pub false_positives: u64,
    pub false_negatives: u64,
}

impl ConfusionMatrix {
    pub fn total(&self) -> u64 {
        self.true_positives + self.true_negatives + self.false_positives + self.false_negatives
    }
}

/// Evaluation summary from the prediction service. Percentages are 0-100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub confusion_matrix: ConfusionMatrix,
    pub total_cases: u64,
}

impl TestMetrics {
    /// The service owns this invariant; we only report on it.
    pub fn is_consistent(&self) -> bool {
        self.total_cases == self.confusion_matrix.total()
    }
}

/// Body of `/load-test-data`, fed back into `evaluate` unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestDataset {
    pub test_cases: Vec<serde_json::Value>,
    pub actual_labels: Vec<serde_json::Value>,
}
