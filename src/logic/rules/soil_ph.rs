use super::WarningRule;
use crate::models::{ParameterStatus, SoilAnalysis, Warning, WarningSeverity};

/// pH below 6.0 locks up nutrients; lime raises it.
pub struct AcidicSoilRule;

impl WarningRule for AcidicSoilRule {
    fn id(&self) -> &'static str {
        "acidic_soil"
    }

    fn name(&self) -> &'static str {
        "Acidic Soil"
    }

    fn evaluate(&self, analysis: &SoilAnalysis) -> Option<Warning> {
        if !analysis.ph.is(ParameterStatus::Low) {
            return None;
        }

        Some(Warning::new(
            self.name(),
            WarningSeverity::High,
            "Acidic soil can limit nutrient availability. Consider applying lime.",
        ))
    }
}

/// pH above 7.5 causes micronutrient deficiencies; sulfur lowers it.
pub struct AlkalineSoilRule;

impl WarningRule for AlkalineSoilRule {
    fn id(&self) -> &'static str {
        "alkaline_soil"
    }

    fn name(&self) -> &'static str {
        "Alkaline Soil"
    }

    fn evaluate(&self, analysis: &SoilAnalysis) -> Option<Warning> {
        if !analysis.ph.is(ParameterStatus::High) {
            return None;
        }

        Some(Warning::new(
            self.name(),
            WarningSeverity::High,
            "Alkaline soil can cause nutrient deficiencies. Consider applying sulfur.",
        ))
    }
}
