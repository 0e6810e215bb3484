use crate::error::Result;
use crate::logic::crop_tips::known_crops;
use crate::models::{
    sort_by_severity, CropMatch, CropTip, SoilParameter, SoilReport, SoilSample, Warning,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// JSON output wrapper shared by every command that prints with `--json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<'a, T: Serialize> {
    pub analyzed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample: Option<&'a SoilSample>,
    pub result: &'a T,
}

pub fn to_json<T: Serialize>(sample: Option<&SoilSample>, result: &T) -> Result<String> {
    let envelope = Envelope {
        analyzed_at: Utc::now(),
        sample,
        result,
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

fn reading(parameter: SoilParameter, value: f64) -> String {
    format!("{}{}", value, parameter.unit())
}

/// Full soil report as text.
pub struct ReportView<'a> {
    pub sample: &'a SoilSample,
    pub report: &'a SoilReport,
}

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;

        writeln!(f, "Soil report for {}", self.sample.crop)?;
        writeln!(
            f,
            "Overall: {} - {}",
            report.overall_status.status.as_str().to_uppercase(),
            report.overall_status.message
        )?;

        writeln!(f)?;
        writeln!(f, "Parameters")?;
        for (parameter, analysis) in report.analysis.iter() {
            writeln!(
                f,
                "  {:<12} {:>12}  {:<8} {}",
                parameter.as_str(),
                reading(parameter, analysis.value),
                analysis.status.as_str(),
                analysis.message
            )?;
        }

        if !report.warnings.is_empty() {
            writeln!(f)?;
            writeln!(f, "Warnings")?;
            for warning in &report.warnings {
                writeln!(
                    f,
                    "  {} {}: {}",
                    warning.severity.symbol(),
                    warning.kind,
                    warning.message
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Fertilizer plan")?;
        for (i, rec) in report.recommendations.iter().enumerate() {
            writeln!(
                f,
                "  {}. {} [{}] {}",
                i + 1,
                rec.fertilizer,
                rec.nutrient,
                rec.dosage
            )?;
            writeln!(f, "     {}", rec.reason)?;
        }

        writeln!(f)?;
        write!(
            f,
            "{}",
            TipView {
                crop: &self.sample.crop,
                tip: &report.crop_tip,
            }
        )
    }
}

/// Warnings only, most severe first.
#[derive(Serialize)]
#[serde(transparent)]
pub struct AlertsView {
    warnings: Vec<Warning>,
}

impl AlertsView {
    pub fn new(warnings: &[Warning]) -> Self {
        let mut warnings = warnings.to_vec();
        sort_by_severity(&mut warnings);
        Self { warnings }
    }
}

impl fmt::Display for AlertsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.warnings.is_empty() {
            return writeln!(f, "No warnings. All monitored conditions are within range.");
        }
        for warning in &self.warnings {
            writeln!(
                f,
                "{} [{}] {}: {}",
                warning.severity.symbol(),
                warning.severity,
                warning.kind,
                warning.message
            )?;
        }
        Ok(())
    }
}

/// Ranked crop matches, truncated to `top`.
pub struct MatchesView<'a> {
    pub matches: &'a [CropMatch],
    pub sample: &'a SoilSample,
    pub top: usize,
}

impl fmt::Display for MatchesView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.matches.is_empty() {
            return writeln!(f, "No crops in catalog.");
        }

        let shown = self.top.min(self.matches.len());
        writeln!(f, "Top {} of {} crops", shown, self.matches.len())?;

        for (i, m) in self.matches.iter().take(shown).enumerate() {
            let profile = &m.profile;
            write!(
                f,
                "{:>3}. {:<16} {:>3}%  {}",
                i + 1,
                profile.display_name(),
                m.match_score,
                m.match_level
            )?;
            let details: Vec<&str> = [Some(profile.category.as_str()), profile.duration.as_deref()]
                .into_iter()
                .flatten()
                .filter(|s| !s.is_empty())
                .collect();
            if !details.is_empty() {
                write!(f, "  ({})", details.join(", "))?;
            }
            writeln!(f)?;

            if !m.match_reasons.is_empty() {
                writeln!(f, "     {}", m.match_reasons.join("; "))?;
            }

            if let Some(ref req) = profile.soil_requirements {
                let ranges: Vec<String> = SoilParameter::ALL
                    .into_iter()
                    .filter_map(|p| {
                        let range = req.range(p)?;
                        let mark = if range.contains(self.sample.value(p)) {
                            "ok"
                        } else {
                            "off"
                        };
                        Some(format!("{} {} {}", p.as_str(), range, mark))
                    })
                    .collect();
                if !ranges.is_empty() {
                    writeln!(f, "     {}", ranges.join(" | "))?;
                }
            }
        }
        Ok(())
    }
}

pub struct TipView<'a> {
    pub crop: &'a str,
    pub tip: &'a CropTip,
}

impl fmt::Display for TipView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tip for {} (best pH {})", self.crop, self.tip.best_ph)?;
        writeln!(f, "  {}", self.tip.notes)?;

        let crop = self.crop.trim();
        if !known_crops().any(|k| k.eq_ignore_ascii_case(crop)) {
            let known: Vec<&str> = known_crops().collect();
            writeln!(f, "  Dedicated tips exist for: {}", known.join(", "))?;
        }
        Ok(())
    }
}

/// Warning rules as (id, name) pairs, in evaluation order.
pub struct RulesView<'a> {
    pub rules: &'a [(&'static str, &'static str)],
}

impl fmt::Display for RulesView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (id, name)) in self.rules.iter().enumerate() {
            writeln!(f, "{:>2}. {:<24} {}", i + 1, id, name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::crop_tips::crop_recommendation;
    use crate::logic::rules::WarningEngine;
    use crate::logic::{analyze_soil, rank_crops};
    use crate::models::{CropProfile, Range, SoilRequirements, WarningSeverity};

    fn sample() -> SoilSample {
        SoilSample {
            nitrogen: 20.0,
            phosphorus: 40.0,
            potassium: 45.0,
            ph: 5.5,
            moisture: 50.0,
            temperature: 22.0,
            crop: "Rice".into(),
        }
    }

    #[test]
    fn report_lists_every_section() {
        let sample = sample();
        let report = analyze_soil(&sample);
        let text = ReportView {
            sample: &sample,
            report: &report,
        }
        .to_string();

        assert!(text.starts_with("Soil report for Rice\n"));
        assert!(text.contains("Overall: GOOD"));
        assert!(text.contains("20 mg/kg"));
        assert!(text.contains("Soil is too acidic"));
        assert!(text.contains("Warnings"));
        assert!(text.contains("  !! Nitrogen Deficiency: Low nitrogen"));
        assert!(text.contains("1. Agricultural Lime [pH Balancer] 2-4 tons/ha"));
        assert!(text.contains("2. Urea (46% N) [Nitrogen] 100-150 kg/ha"));
        assert!(text.contains("Tip for Rice (best pH 6.0 - 7.0)"));
    }

    #[test]
    fn alerts_put_high_severity_first() {
        let warnings = vec![
            Warning::new("Low Moisture", WarningSeverity::Medium, "dry"),
            Warning::new("Acidic Soil", WarningSeverity::High, "acidic"),
        ];
        let text = AlertsView::new(&warnings).to_string();
        assert_eq!(
            text,
            "!! [high] Acidic Soil: acidic\n! [medium] Low Moisture: dry\n"
        );
    }

    #[test]
    fn no_alerts_message() {
        assert!(AlertsView::new(&[]).to_string().starts_with("No warnings"));
    }

    #[test]
    fn matches_are_truncated_and_annotated() {
        let catalog: Vec<CropProfile> = ["rice", "wheat", "maize"]
            .into_iter()
            .map(|id| CropProfile {
                id: id.into(),
                name: id.into(),
                category: "cereal".into(),
                duration: Some("120 days".into()),
                soil_requirements: Some(SoilRequirements {
                    ph: Some(Range::new(5.0, 6.0)),
                    ..Default::default()
                }),
                ..Default::default()
            })
            .collect();
        let sample = sample();
        let matches = rank_crops(&sample, &catalog);

        let text = MatchesView {
            matches: &matches,
            sample: &sample,
            top: 2,
        }
        .to_string();

        assert!(text.starts_with("Top 2 of 3 crops\n"));
        assert!(text.contains("(cereal, 120 days)"));
        assert!(text.contains("pH 5-6 ok"));
        assert!(!text.contains("maize"));
    }

    #[test]
    fn empty_catalog_message() {
        let text = MatchesView {
            matches: &[],
            sample: &sample(),
            top: 9,
        }
        .to_string();
        assert_eq!(text, "No crops in catalog.\n");
    }

    #[test]
    fn unknown_crop_tip_lists_known_crops() {
        let tip = crop_recommendation("Quinoa");
        let text = TipView {
            crop: "Quinoa",
            tip: &tip,
        }
        .to_string();
        assert!(text.contains("Dedicated tips exist for: Rice, Wheat"));

        let tip = crop_recommendation("rice");
        let text = TipView { crop: "rice", tip: &tip }.to_string();
        assert!(!text.contains("Dedicated tips"));
    }

    #[test]
    fn rules_view_numbers_rules() {
        let rules = WarningEngine::new().list_rules();
        let text = RulesView { rules: &rules }.to_string();
        assert!(text.starts_with(" 1. nitrogen_deficiency"));
        assert_eq!(text.lines().count(), 7);
    }

    #[test]
    fn json_envelope_carries_timestamp_and_result() {
        let sample = sample();
        let report = analyze_soil(&sample);
        let json = to_json(Some(&sample), &report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value["analyzedAt"].is_string());
        assert_eq!(value["sample"]["crop"], "Rice");
        assert_eq!(value["result"]["overallStatus"]["status"], "good");
    }
}
