use super::{
    moisture::{HighMoistureRule, LowMoistureRule},
    nutrient_deficiency::NutrientDeficiencyRule,
    soil_ph::{AcidicSoilRule, AlkalineSoilRule},
    WarningRule,
};
use crate::models::{SoilAnalysis, Warning};

/// Evaluates warning rules in a fixed order. Each rule fires at most once.
///
/// There are deliberately no rules for excess N/P/K or for temperature.
pub struct WarningEngine {
    rules: Vec<Box<dyn WarningRule>>,
}

impl WarningEngine {
    pub fn new() -> Self {
        let rules: Vec<Box<dyn WarningRule>> = vec![
            Box::new(NutrientDeficiencyRule::nitrogen()),
            Box::new(NutrientDeficiencyRule::phosphorus()),
            Box::new(NutrientDeficiencyRule::potassium()),
            Box::new(AcidicSoilRule),
            Box::new(AlkalineSoilRule),
            Box::new(LowMoistureRule),
            Box::new(HighMoistureRule),
        ];

        Self { rules }
    }

    /// Warnings in rule order; no severity sorting.
    pub fn evaluate(&self, analysis: &SoilAnalysis) -> Vec<Warning> {
        self.rules
            .iter()
            .filter_map(|rule| {
                let warning = rule.evaluate(analysis)?;
                tracing::trace!(rule = rule.id(), "Warning rule fired");
                Some(warning)
            })
            .collect()
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for WarningEngine {
    fn default() -> Self {
        Self::new()
    }
}

pub fn generate_warnings(analysis: &SoilAnalysis) -> Vec<Warning> {
    WarningEngine::new().evaluate(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::analyzer::analyze_parameters;
    use crate::models::{SoilSample, WarningSeverity};

    fn analysis(n: f64, p: f64, k: f64, ph: f64, moisture: f64, temp: f64) -> SoilAnalysis {
        analyze_parameters(&SoilSample {
            nitrogen: n,
            phosphorus: p,
            potassium: k,
            ph,
            moisture,
            temperature: temp,
            crop: "Wheat".into(),
        })
    }

    #[test]
    fn optimal_sample_has_no_warnings() {
        assert!(generate_warnings(&analysis(50.0, 40.0, 45.0, 6.8, 50.0, 22.0)).is_empty());
    }

    #[test]
    fn warnings_follow_rule_order() {
        let warnings = generate_warnings(&analysis(10.0, 5.0, 5.0, 5.0, 20.0, 22.0));
        let kinds: Vec<&str> = warnings.iter().map(|w| w.kind.as_str()).collect();
        assert_eq!(
            kinds,
            [
                "Nitrogen Deficiency",
                "Phosphorus Deficiency",
                "Potassium Deficiency",
                "Acidic Soil",
                "Low Moisture"
            ]
        );

        let severities: Vec<WarningSeverity> = warnings.iter().map(|w| w.severity).collect();
        assert_eq!(
            severities,
            [
                WarningSeverity::High,
                WarningSeverity::High,
                WarningSeverity::Medium,
                WarningSeverity::High,
                WarningSeverity::Medium
            ]
        );
    }

    #[test]
    fn alkaline_and_wet_soil() {
        let warnings = generate_warnings(&analysis(50.0, 40.0, 45.0, 8.2, 75.0, 22.0));
        let kinds: Vec<&str> = warnings.iter().map(|w| w.kind.as_str()).collect();
        assert_eq!(kinds, ["Alkaline Soil", "High Moisture"]);
    }

    #[test]
    fn excess_nutrients_and_temperature_extremes_do_not_warn() {
        assert!(generate_warnings(&analysis(200.0, 200.0, 200.0, 6.8, 50.0, 45.0)).is_empty());
        assert!(generate_warnings(&analysis(50.0, 40.0, 45.0, 6.8, 50.0, -5.0)).is_empty());
    }

    #[test]
    fn lists_all_rules() {
        let rules = WarningEngine::new().list_rules();
        assert_eq!(rules.len(), 7);
        assert_eq!(rules[0], ("nitrogen_deficiency", "Nitrogen Deficiency"));
        assert_eq!(rules[6].0, "high_moisture");
    }
}
