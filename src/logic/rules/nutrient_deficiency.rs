use super::WarningRule;
use crate::models::{ParameterStatus, SoilAnalysis, SoilParameter, Warning, WarningSeverity};

/// Fires when N, P or K falls below its optimal band.
///
/// Nitrogen and phosphorus deficiencies are high severity; potassium is medium.
pub struct NutrientDeficiencyRule {
    nutrient: SoilParameter,
    id: &'static str,
    name: &'static str,
    severity: WarningSeverity,
    message: &'static str,
}

impl NutrientDeficiencyRule {
    pub fn nitrogen() -> Self {
        Self {
            nutrient: SoilParameter::Nitrogen,
            id: "nitrogen_deficiency",
            name: "Nitrogen Deficiency",
            severity: WarningSeverity::High,
            message: "Low nitrogen can reduce crop growth and yield. Apply nitrogen-rich fertilizers.",
        }
    }

    pub fn phosphorus() -> Self {
        Self {
            nutrient: SoilParameter::Phosphorus,
            id: "phosphorus_deficiency",
            name: "Phosphorus Deficiency",
            severity: WarningSeverity::High,
            message: "Low phosphorus affects root development. Apply phosphate fertilizers.",
        }
    }

    pub fn potassium() -> Self {
        Self {
            nutrient: SoilParameter::Potassium,
            id: "potassium_deficiency",
            name: "Potassium Deficiency",
            severity: WarningSeverity::Medium,
            message: "Low potassium reduces disease resistance. Apply potash fertilizers.",
        }
    }
}

impl WarningRule for NutrientDeficiencyRule {
    fn id(&self) -> &'static str {
        self.id
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn evaluate(&self, analysis: &SoilAnalysis) -> Option<Warning> {
        if analysis.status(self.nutrient) != ParameterStatus::Low {
            return None;
        }

        Some(Warning::new(self.name, self.severity, self.message))
    }
}
