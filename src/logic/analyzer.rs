use super::crop_tips::crop_recommendation;
use super::fertilizer::generate_recommendations;
use super::rules::generate_warnings;
use crate::models::{
    HealthTier, OverallStatus, ParameterAnalysis, ParameterStatus, SoilAnalysis, SoilParameter,
    SoilReport, SoilSample,
};

/// Fixed three-band thresholds. The optimal band is `[low_below, high_above]`, inclusive.
#[derive(Debug, Clone, Copy)]
pub struct Bands {
    pub low_below: f64,
    pub high_above: f64,
}

pub fn bands(parameter: SoilParameter) -> Bands {
    let (low_below, high_above) = match parameter {
        SoilParameter::Nitrogen => (30.0, 70.0),
        SoilParameter::Phosphorus => (20.0, 60.0),
        SoilParameter::Potassium => (25.0, 65.0),
        SoilParameter::Ph => (6.0, 7.5),
        SoilParameter::Moisture => (40.0, 60.0),
        SoilParameter::Temperature => (15.0, 30.0),
    };
    Bands {
        low_below,
        high_above,
    }
}

pub fn classify(value: f64, parameter: SoilParameter) -> ParameterStatus {
    let bands = bands(parameter);
    if value < bands.low_below {
        ParameterStatus::Low
    } else if value <= bands.high_above {
        ParameterStatus::Optimal
    } else {
        ParameterStatus::High
    }
}

fn status_message(parameter: SoilParameter, status: ParameterStatus) -> String {
    use ParameterStatus::*;
    use SoilParameter::*;

    match (parameter, status) {
        (Nitrogen | Phosphorus | Potassium, Low) => {
            format!("Low {} levels detected", parameter.key())
        }
        (Nitrogen | Phosphorus | Potassium, Optimal) => {
            format!("{} levels are optimal", parameter.as_str())
        }
        (Nitrogen | Phosphorus | Potassium, High) => {
            format!("High {} levels detected", parameter.key())
        }
        (Ph, Low) => "Soil is too acidic".into(),
        (Ph, Optimal) => "pH level is optimal".into(),
        (Ph, High) => "Soil is too alkaline".into(),
        (Moisture, Low) => "Soil moisture is low".into(),
        (Moisture, Optimal) => "Moisture level is optimal".into(),
        (Moisture, High) => "Soil moisture is high".into(),
        (Temperature, Low) => "Soil temperature is low".into(),
        (Temperature, Optimal) => "Temperature is optimal".into(),
        (Temperature, High) => "Soil temperature is high".into(),
    }
}

/// Classify one reading against its fixed band table.
///
/// Out-of-domain values (negative moisture, pH above 14) are not clamped.
pub fn analyze_parameter(value: f64, parameter: SoilParameter) -> ParameterAnalysis {
    let status = classify(value, parameter);
    ParameterAnalysis {
        status,
        message: status_message(parameter, status),
        value,
    }
}

pub fn analyze_parameters(sample: &SoilSample) -> SoilAnalysis {
    let analyze = |p: SoilParameter| analyze_parameter(sample.value(p), p);
    SoilAnalysis {
        nitrogen: analyze(SoilParameter::Nitrogen),
        phosphorus: analyze(SoilParameter::Phosphorus),
        potassium: analyze(SoilParameter::Potassium),
        ph: analyze(SoilParameter::Ph),
        moisture: analyze(SoilParameter::Moisture),
        temperature: analyze(SoilParameter::Temperature),
    }
}

/// Overall health depends only on how many parameters are optimal.
pub fn calculate_overall_status(analysis: &SoilAnalysis) -> OverallStatus {
    let optimal = analysis.count(ParameterStatus::Optimal);
    OverallStatus::from(HealthTier::from_optimal_count(optimal))
}

/// Full diagnosis of a validated sample.
pub fn analyze_soil(sample: &SoilSample) -> SoilReport {
    let analysis = analyze_parameters(sample);
    let overall_status = calculate_overall_status(&analysis);
    let warnings = generate_warnings(&analysis);
    let recommendations = generate_recommendations(&analysis, &sample.crop);
    let crop_tip = crop_recommendation(&sample.crop);

    tracing::debug!(
        crop = %sample.crop,
        status = %overall_status.status,
        warnings = warnings.len(),
        recommendations = recommendations.len(),
        "Soil analysis complete"
    );

    SoilReport {
        analysis,
        overall_status,
        warnings,
        recommendations,
        crop_tip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WarningSeverity;
    use proptest::prelude::*;

    fn sample(n: f64, p: f64, k: f64, ph: f64, moisture: f64, temp: f64) -> SoilSample {
        SoilSample {
            nitrogen: n,
            phosphorus: p,
            potassium: k,
            ph,
            moisture,
            temperature: temp,
            crop: "Rice".into(),
        }
    }

    #[test]
    fn band_boundaries_are_optimal() {
        for parameter in SoilParameter::ALL {
            let bands = bands(parameter);
            assert_eq!(
                classify(bands.low_below, parameter),
                ParameterStatus::Optimal,
                "{} lower bound",
                parameter
            );
            assert_eq!(
                classify(bands.high_above, parameter),
                ParameterStatus::Optimal,
                "{} upper bound",
                parameter
            );
        }
        assert_eq!(classify(6.0, SoilParameter::Ph), ParameterStatus::Optimal);
        assert_eq!(classify(7.5, SoilParameter::Ph), ParameterStatus::Optimal);
    }

    #[test]
    fn values_outside_bands_classify_low_or_high() {
        assert_eq!(classify(29.9, SoilParameter::Nitrogen), ParameterStatus::Low);
        assert_eq!(classify(70.1, SoilParameter::Nitrogen), ParameterStatus::High);
        assert_eq!(classify(19.0, SoilParameter::Phosphorus), ParameterStatus::Low);
        assert_eq!(classify(66.0, SoilParameter::Potassium), ParameterStatus::High);
        assert_eq!(classify(5.99, SoilParameter::Ph), ParameterStatus::Low);
        assert_eq!(classify(7.51, SoilParameter::Ph), ParameterStatus::High);
        assert_eq!(classify(-10.0, SoilParameter::Moisture), ParameterStatus::Low);
        assert_eq!(classify(31.0, SoilParameter::Temperature), ParameterStatus::High);
    }

    #[test]
    fn parameter_messages() {
        assert_eq!(
            analyze_parameter(10.0, SoilParameter::Nitrogen).message,
            "Low nitrogen levels detected"
        );
        assert_eq!(
            analyze_parameter(40.0, SoilParameter::Phosphorus).message,
            "Phosphorus levels are optimal"
        );
        assert_eq!(
            analyze_parameter(90.0, SoilParameter::Potassium).message,
            "High potassium levels detected"
        );
        assert_eq!(analyze_parameter(5.0, SoilParameter::Ph).message, "Soil is too acidic");
        assert_eq!(
            analyze_parameter(70.0, SoilParameter::Moisture).message,
            "Soil moisture is high"
        );
        assert_eq!(
            analyze_parameter(10.0, SoilParameter::Temperature).message,
            "Soil temperature is low"
        );
        assert_eq!(analyze_parameter(10.0, SoilParameter::Temperature).value, 10.0);
    }

    #[test]
    fn all_optimal_sample_is_excellent() {
        let report = analyze_soil(&sample(50.0, 40.0, 45.0, 6.8, 50.0, 22.0));

        assert_eq!(report.overall_status.status, HealthTier::Excellent);
        assert!(report.warnings.is_empty());
        assert_eq!(report.recommendations.len(), 1);
        assert_eq!(report.recommendations[0].nutrient, "Balanced Maintenance");
    }

    #[test]
    fn nitrogen_deficient_sample_is_good() {
        let report = analyze_soil(&sample(10.0, 40.0, 45.0, 6.8, 50.0, 22.0));

        assert_eq!(report.analysis.nitrogen.status, ParameterStatus::Low);
        assert_eq!(report.overall_status.status, HealthTier::Good);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].kind, "Nitrogen Deficiency");
        assert_eq!(report.warnings[0].severity, WarningSeverity::High);
        assert_eq!(report.recommendations.len(), 1);
        assert_eq!(report.recommendations[0].fertilizer, "Urea (46% N)");
    }

    #[test]
    fn acidic_sample_leads_with_lime() {
        let report = analyze_soil(&sample(10.0, 40.0, 45.0, 5.0, 50.0, 22.0));
        assert_eq!(report.recommendations[0].fertilizer, "Agricultural Lime");
        assert_eq!(report.recommendations[1].fertilizer, "Urea (46% N)");

        let report = analyze_soil(&sample(50.0, 40.0, 45.0, 5.0, 50.0, 22.0));
        assert_eq!(report.recommendations.len(), 1);
        assert_eq!(report.recommendations[0].fertilizer, "Agricultural Lime");
    }

    #[test]
    fn overall_status_tiers() {
        // Three optimal: N low, P low, K high
        let report = analyze_soil(&sample(10.0, 5.0, 90.0, 6.8, 50.0, 22.0));
        assert_eq!(report.overall_status.status, HealthTier::Fair);

        // Nothing optimal
        let report = analyze_soil(&sample(10.0, 5.0, 90.0, 4.0, 90.0, 40.0));
        assert_eq!(report.overall_status.status, HealthTier::Poor);
    }

    #[test]
    fn crop_tip_follows_label() {
        let report = analyze_soil(&sample(50.0, 40.0, 45.0, 6.8, 50.0, 22.0));
        assert_eq!(report.crop_tip.best_ph, "6.0 - 7.0");
    }

    fn status_strategy() -> impl Strategy<Value = f64> {
        prop_oneof![Just(0.0), Just(50.0), Just(1000.0)]
    }

    proptest! {
        #[test]
        fn overall_status_depends_only_on_optimal_count(
            a in prop::collection::vec(status_strategy(), 6),
            b in prop::collection::vec(status_strategy(), 6),
        ) {
            // 50.0 sits in every optimal band except pH and temperature.
            let to_sample = |v: &[f64]| {
                let ph = if v[3] == 50.0 { 6.8 } else { v[3] };
                let temp = if v[5] == 50.0 { 22.0 } else { v[5] };
                sample(v[0], v[1], v[2], ph, v[4], temp)
            };
            let sa = to_sample(&a);
            let sb = to_sample(&b);
            let aa = analyze_parameters(&sa);
            let ab = analyze_parameters(&sb);

            if aa.count(ParameterStatus::Optimal) == ab.count(ParameterStatus::Optimal) {
                prop_assert_eq!(
                    calculate_overall_status(&aa).status,
                    calculate_overall_status(&ab).status
                );
            }
        }
    }
}
