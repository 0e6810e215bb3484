use super::WarningRule;
use crate::models::{ParameterStatus, SoilAnalysis, Warning, WarningSeverity};

pub struct LowMoistureRule;

impl WarningRule for LowMoistureRule {
    fn id(&self) -> &'static str {
        "low_moisture"
    }

    fn name(&self) -> &'static str {
        "Low Moisture"
    }

    fn evaluate(&self, analysis: &SoilAnalysis) -> Option<Warning> {
        if !analysis.moisture.is(ParameterStatus::Low) {
            return None;
        }

        Some(Warning::new(
            self.name(),
            WarningSeverity::Medium,
            "Increase irrigation to maintain optimal moisture levels.",
        ))
    }
}

/// Waterlogged soil, root rot risk.
pub struct HighMoistureRule;

impl WarningRule for HighMoistureRule {
    fn id(&self) -> &'static str {
        "high_moisture"
    }

    fn name(&self) -> &'static str {
        "High Moisture"
    }

    fn evaluate(&self, analysis: &SoilAnalysis) -> Option<Warning> {
        if !analysis.moisture.is(ParameterStatus::High) {
            return None;
        }

        Some(Warning::new(
            self.name(),
            WarningSeverity::Medium,
            "Excessive moisture can cause root rot. Improve drainage.",
        ))
    }
}
