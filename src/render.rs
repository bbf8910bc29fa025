//! Plain-text rendering for the CLI.

use std::fmt::Write;

use crate::prediction::{PredictionResult, TestMetrics};
use crate::presets::Preset;
use crate::reservoir::{FormField, ReservoirFeatures};

const METER_WIDTH: usize = 20;

fn meter(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * METER_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(METER_WIDTH - filled))
}

pub fn render_result(result: &PredictionResult) -> String {
    let mut out = String::new();
    let verdict = if result.suitable {
        "SUITABLE for fracture flooding"
    } else {
        "NOT SUITABLE for fracture flooding"
    };
    let _ = writeln!(out, "Verdict:     {verdict}");
    let _ = writeln!(out, "Field stage: {}", result.field_stage.label());
    let _ = writeln!(
        out,
        "Confidence:  {} {:.0}%",
        meter(result.confidence),
        result.confidence
    );
    if !result.explanations.is_empty() {
        let _ = writeln!(out, "Factors:");
        for explanation in &result.explanations {
            let mark = if explanation.positive { '+' } else { '-' };
            let _ = writeln!(out, "  {mark} {}", explanation.text);
        }
    }
    out
}

pub fn render_features(features: &ReservoirFeatures) -> String {
    let mut out = String::new();
    for field in FormField::ALL {
        let _ = writeln!(
            out,
            "  {:<20} {:>10} {}",
            field.label(),
            field.value_of(features),
            field.unit()
        );
    }
    let _ = writeln!(out, "  {:<20} {:>10}", "Field Stage", features.field_stage.as_str());
    out
}

/// Badge shown next to a percentage metric.
fn grade(percent: f64) -> &'static str {
    if percent >= 90.0 {
        "Excellent"
    } else if percent >= 80.0 {
        "Good"
    } else {
        "Needs Improvement"
    }
}

pub fn render_metrics(metrics: &TestMetrics) -> String {
    let mut out = String::new();
    for (name, value) in [
        ("Accuracy", metrics.accuracy),
        ("Precision", metrics.precision),
        ("Recall", metrics.recall),
    ] {
        let _ = writeln!(out, "{name:<10} {} {value:>6.2}%  {}", meter(value), grade(value));
    }
    let _ = writeln!(
        out,
        "{:<10} {} {:>6.2}%",
        "F1 Score",
        meter(metrics.f1_score),
        metrics.f1_score
    );
    let cm = &metrics.confusion_matrix;
    let _ = writeln!(out, "Confusion matrix ({} cases):", metrics.total_cases);
    let _ = writeln!(out, "                 predicted +  predicted -");
    let _ = writeln!(out, "  actual +       {:>11}  {:>11}", cm.true_positives, cm.false_negatives);
    let _ = writeln!(out, "  actual -       {:>11}  {:>11}", cm.false_positives, cm.true_negatives);
    out
}

pub fn render_presets(presets: &[Preset]) -> String {
    let mut out = String::new();
    for preset in presets {
        let expected = if preset.expected_suitable { "suitable" } else { "not suitable" };
        let _ = writeln!(out, "{} ({expected}): {}", preset.name, preset.description);
        out.push_str(&render_features(&preset.features));
    }
    out
}
