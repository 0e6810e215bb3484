use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningSeverity {
    Medium,
    High,
}

impl WarningSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningSeverity::Medium => "medium",
            WarningSeverity::High => "high",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            WarningSeverity::Medium => "!",
            WarningSeverity::High => "!!",
        }
    }
}

impl std::fmt::Display for WarningSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: WarningSeverity,
    pub message: String,
}

impl Warning {
    pub fn new(
        kind: impl Into<String>,
        severity: WarningSeverity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            severity,
            message: message.into(),
        }
    }
}

/// Reorder warnings for display, most severe first.
///
/// The sort is stable, so warnings of equal severity keep rule order.
pub fn sort_by_severity(warnings: &mut [Warning]) {
    warnings.sort_by(|a, b| b.severity.cmp(&a.severity));
}

/// One fertilizer row of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub fertilizer: String,
    pub nutrient: String,
    pub dosage: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropTip {
    pub notes: String,
    #[serde(rename = "bestPH")]
    pub best_ph: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_by_severity_puts_high_first_and_is_stable() {
        let mut warnings = vec![
            Warning::new("Potassium Deficiency", WarningSeverity::Medium, ""),
            Warning::new("Nitrogen Deficiency", WarningSeverity::High, ""),
            Warning::new("Low Moisture", WarningSeverity::Medium, ""),
            Warning::new("Acidic Soil", WarningSeverity::High, ""),
        ];
        sort_by_severity(&mut warnings);

        let kinds: Vec<&str> = warnings.iter().map(|w| w.kind.as_str()).collect();
        assert_eq!(
            kinds,
            [
                "Nitrogen Deficiency",
                "Acidic Soil",
                "Potassium Deficiency",
                "Low Moisture"
            ]
        );
    }

    #[test]
    fn high_severity_symbol_is_the_louder_one() {
        assert_eq!(WarningSeverity::High.symbol(), "!!");
        assert_eq!(WarningSeverity::Medium.symbol(), "!");
    }

    #[test]
    fn warning_serializes_kind_as_type() {
        let warning = Warning::new("Alkaline Soil", WarningSeverity::High, "msg");
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["type"], "Alkaline Soil");
        assert_eq!(json["severity"], "high");
    }

    #[test]
    fn crop_tip_uses_best_ph_key() {
        let tip = CropTip {
            notes: "n".into(),
            best_ph: "6.0 - 7.0".into(),
        };
        let json = serde_json::to_value(&tip).unwrap();
        assert_eq!(json["bestPH"], "6.0 - 7.0");
    }
}
