use crate::models::{ParameterStatus, Recommendation, SoilAnalysis};

/// Correction types and their fixed product, nutrient and dosage.
///
/// Dosages are literal bands, not scaled to the size of the deficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correction {
    Lime,
    Sulfur,
    Urea,
    Dap,
    Mop,
    OrganicRestoration,
    BalancedMaintenance,
}

impl Correction {
    pub fn fertilizer(&self) -> &'static str {
        match self {
            Correction::Lime => "Agricultural Lime",
            Correction::Sulfur => "Elemental Sulfur",
            Correction::Urea => "Urea (46% N)",
            Correction::Dap => "DAP (18-46-0)",
            Correction::Mop => "MOP (0-0-60)",
            Correction::OrganicRestoration => "Organic Compost / No Synthetic Fertilizer",
            Correction::BalancedMaintenance => "N-P-K 15-15-15 (Small Dose)",
        }
    }

    pub fn nutrient(&self) -> &'static str {
        match self {
            Correction::Lime | Correction::Sulfur => "pH Balancer",
            Correction::Urea => "Nitrogen",
            Correction::Dap => "Phosphorus",
            Correction::Mop => "Potassium",
            Correction::OrganicRestoration => "Soil Restoration",
            Correction::BalancedMaintenance => "Balanced Maintenance",
        }
    }

    pub fn dosage(&self) -> &'static str {
        match self {
            Correction::Lime => "2-4 tons/ha",
            Correction::Sulfur => "500-1000 kg/ha",
            Correction::Urea => "100-150 kg/ha",
            Correction::Dap => "75-125 kg/ha",
            Correction::Mop => "50-100 kg/ha",
            Correction::OrganicRestoration => "As needed",
            Correction::BalancedMaintenance => "50 kg/ha",
        }
    }

    fn reason(&self, analysis: &SoilAnalysis, crop: &str) -> String {
        match self {
            Correction::Lime => format!(
                "Soil is acidic (pH {}). Lime is essential to raise pH and unlock nutrient availability.",
                analysis.ph.value
            ),
            Correction::Sulfur => format!(
                "Soil is alkaline (pH {}). Sulfur helps lower pH to a range suitable for {}.",
                analysis.ph.value, crop
            ),
            Correction::Urea => format!(
                "To correct significant nitrogen deficiency and support rapid vegetative \
                 growth in {}.",
                crop
            ),
            Correction::Dap => "High phosphorus content in DAP will stimulate root \
                 development and early plant vigor."
                .to_string(),
            Correction::Mop => format!(
                "Potassium is vital for water regulation and disease resistance, \
                 especially in {}.",
                crop
            ),
            Correction::OrganicRestoration => "Some nutrient levels are excessively high. \
                 Avoid synthetic fertilizers and focus on organic matter to balance soil biology."
                .to_string(),
            Correction::BalancedMaintenance => format!(
                "Nutrient levels are currently optimal. A small maintenance dose will sustain \
                 soil health throughout the growing season for {}.",
                crop
            ),
        }
    }

    pub fn to_recommendation(self, analysis: &SoilAnalysis, crop: &str) -> Recommendation {
        Recommendation {
            fertilizer: self.fertilizer().to_string(),
            nutrient: self.nutrient().to_string(),
            dosage: self.dosage().to_string(),
            reason: self.reason(analysis, crop),
        }
    }
}

/// Ordered corrections for an analyzed sample. Never empty.
///
/// pH correction comes first, then N, P and K. If none of those apply, a single
/// fallback is chosen: organic restoration when any nutrient is high, otherwise a
/// balanced maintenance dose.
pub fn plan_corrections(analysis: &SoilAnalysis) -> Vec<Correction> {
    let mut corrections = Vec::new();

    match analysis.ph.status {
        ParameterStatus::Low => corrections.push(Correction::Lime),
        ParameterStatus::High => corrections.push(Correction::Sulfur),
        ParameterStatus::Optimal => {}
    }

    if analysis.nitrogen.is(ParameterStatus::Low) {
        corrections.push(Correction::Urea);
    }
    if analysis.phosphorus.is(ParameterStatus::Low) {
        corrections.push(Correction::Dap);
    }
    if analysis.potassium.is(ParameterStatus::Low) {
        corrections.push(Correction::Mop);
    }

    if corrections.is_empty() {
        if analysis.any_nutrient_high() {
            corrections.push(Correction::OrganicRestoration);
        } else {
            corrections.push(Correction::BalancedMaintenance);
        }
    }

    corrections
}

pub fn generate_recommendations(analysis: &SoilAnalysis, crop: &str) -> Vec<Recommendation> {
    plan_corrections(analysis)
        .into_iter()
        .map(|c| c.to_recommendation(analysis, crop))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::analyzer::analyze_parameters;
    use crate::models::SoilSample;

    fn analysis(n: f64, p: f64, k: f64, ph: f64) -> SoilAnalysis {
        analyze_parameters(&SoilSample {
            nitrogen: n,
            phosphorus: p,
            potassium: k,
            ph,
            moisture: 50.0,
            temperature: 22.0,
            crop: "Maize".into(),
        })
    }

    #[test]
    fn optimal_soil_gets_maintenance_dose() {
        let recs = generate_recommendations(&analysis(50.0, 40.0, 45.0, 6.8), "Maize");
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].fertilizer, "N-P-K 15-15-15 (Small Dose)");
        assert_eq!(recs[0].dosage, "50 kg/ha");
        assert!(recs[0].reason.contains("for Maize"));
    }

    #[test]
    fn excess_nutrients_get_organic_fallback() {
        let recs = generate_recommendations(&analysis(90.0, 40.0, 45.0, 6.8), "Maize");
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].nutrient, "Soil Restoration");
        assert_eq!(recs[0].dosage, "As needed");
    }

    #[test]
    fn corrections_are_ordered_ph_then_npk() {
        let plan = plan_corrections(&analysis(10.0, 5.0, 5.0, 8.5));
        assert_eq!(
            plan,
            vec![
                Correction::Sulfur,
                Correction::Urea,
                Correction::Dap,
                Correction::Mop
            ]
        );
    }

    #[test]
    fn ph_correction_alone_suppresses_fallback() {
        let plan = plan_corrections(&analysis(90.0, 40.0, 45.0, 5.0));
        assert_eq!(plan, vec![Correction::Lime]);
    }

    #[test]
    fn high_nutrient_does_not_block_deficiency_rows() {
        let plan = plan_corrections(&analysis(90.0, 5.0, 45.0, 6.8));
        assert_eq!(plan, vec![Correction::Dap]);
    }

    #[test]
    fn reasons_interpolate_values_and_crop() {
        let a = analysis(50.0, 40.0, 10.0, 5.5);
        let recs = generate_recommendations(&a, "Cotton");
        assert_eq!(recs[0].fertilizer, "Agricultural Lime");
        assert_eq!(recs[0].dosage, "2-4 tons/ha");
        assert!(recs[0].reason.contains("pH 5.5"));
        assert_eq!(recs[1].fertilizer, "MOP (0-0-60)");
        assert!(recs[1].reason.contains("especially in Cotton"));

        let sulfur = Correction::Sulfur.to_recommendation(&analysis(50.0, 40.0, 45.0, 8.0), "Rice");
        assert!(sulfur.reason.contains("pH 8"));
        assert!(sulfur.reason.contains("suitable for Rice"));
        assert_eq!(sulfur.dosage, "500-1000 kg/ha");
    }

    #[test]
    fn nutrient_reasons_name_the_crop_not_the_reading() {
        let recs = generate_recommendations(&analysis(10.0, 5.0, 5.0, 6.8), "Maize");
        assert_eq!(
            recs[0].reason,
            "To correct significant nitrogen deficiency and support rapid vegetative growth in Maize."
        );
        assert_eq!(
            recs[1].reason,
            "High phosphorus content in DAP will stimulate root development and early plant vigor."
        );
        assert_eq!(
            recs[2].reason,
            "Potassium is vital for water regulation and disease resistance, especially in Maize."
        );
        assert!(recs.iter().all(|r| !r.reason.contains("mg/kg")));
    }

    #[test]
    fn never_empty() {
        for n in [0.0, 50.0, 100.0] {
            for p in [0.0, 40.0, 100.0] {
                for k in [0.0, 45.0, 100.0] {
                    for ph in [4.0, 6.8, 9.0] {
                        let recs = generate_recommendations(&analysis(n, p, k, ph), "x");
                        assert!(!recs.is_empty());
                    }
                }
            }
        }
    }
}
