use super::recommendation::{CropTip, Recommendation, Warning};
use super::soil_sample::SoilParameter;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterStatus {
    Low,
    Optimal,
    High,
}

impl ParameterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterStatus::Low => "low",
            ParameterStatus::Optimal => "optimal",
            ParameterStatus::High => "high",
        }
    }
}

impl std::fmt::Display for ParameterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterAnalysis {
    pub status: ParameterStatus,
    pub message: String,
    pub value: f64,
}

impl ParameterAnalysis {
    pub fn is(&self, status: ParameterStatus) -> bool {
        self.status == status
    }
}

/// Band classification of all six parameters of one sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilAnalysis {
    pub nitrogen: ParameterAnalysis,
    pub phosphorus: ParameterAnalysis,
    pub potassium: ParameterAnalysis,
    pub ph: ParameterAnalysis,
    pub moisture: ParameterAnalysis,
    pub temperature: ParameterAnalysis,
}

impl SoilAnalysis {
    pub fn get(&self, parameter: SoilParameter) -> &ParameterAnalysis {
        match parameter {
            SoilParameter::Nitrogen => &self.nitrogen,
            SoilParameter::Phosphorus => &self.phosphorus,
            SoilParameter::Potassium => &self.potassium,
            SoilParameter::Ph => &self.ph,
            SoilParameter::Moisture => &self.moisture,
            SoilParameter::Temperature => &self.temperature,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SoilParameter, &ParameterAnalysis)> {
        SoilParameter::ALL.into_iter().map(move |p| (p, self.get(p)))
    }

    pub fn status(&self, parameter: SoilParameter) -> ParameterStatus {
        self.get(parameter).status
    }

    pub fn count(&self, status: ParameterStatus) -> usize {
        self.iter().filter(|(_, a)| a.is(status)).count()
    }

    /// True when any of N, P or K is above its optimal band.
    pub fn any_nutrient_high(&self) -> bool {
        self.iter()
            .any(|(p, a)| p.is_nutrient() && a.is(ParameterStatus::High))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthTier {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl HealthTier {
    /// Tier for a given number of parameters in their optimal band.
    pub fn from_optimal_count(count: usize) -> Self {
        match count {
            6.. => HealthTier::Excellent,
            4..=5 => HealthTier::Good,
            2..=3 => HealthTier::Fair,
            _ => HealthTier::Poor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthTier::Excellent => "excellent",
            HealthTier::Good => "good",
            HealthTier::Fair => "fair",
            HealthTier::Poor => "poor",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            HealthTier::Excellent => {
                "Your soil is in excellent condition! All parameters are within optimal ranges."
            }
            HealthTier::Good => "Your soil is in good condition with minor adjustments needed.",
            HealthTier::Fair => {
                "Your soil needs attention. Several parameters are outside optimal ranges."
            }
            HealthTier::Poor => {
                "Immediate action required! Multiple soil parameters need correction."
            }
        }
    }
}

impl std::fmt::Display for HealthTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallStatus {
    pub status: HealthTier,
    pub message: String,
}

impl From<HealthTier> for OverallStatus {
    fn from(tier: HealthTier) -> Self {
        Self {
            status: tier,
            message: tier.message().to_string(),
        }
    }
}

/// Everything the dashboard, report and alerts views need from one sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilReport {
    pub analysis: SoilAnalysis,
    pub overall_status: OverallStatus,
    pub warnings: Vec<Warning>,
    pub recommendations: Vec<Recommendation>,
    pub crop_tip: CropTip,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_from_optimal_count() {
        assert_eq!(HealthTier::from_optimal_count(6), HealthTier::Excellent);
        assert_eq!(HealthTier::from_optimal_count(5), HealthTier::Good);
        assert_eq!(HealthTier::from_optimal_count(4), HealthTier::Good);
        assert_eq!(HealthTier::from_optimal_count(3), HealthTier::Fair);
        assert_eq!(HealthTier::from_optimal_count(2), HealthTier::Fair);
        assert_eq!(HealthTier::from_optimal_count(1), HealthTier::Poor);
        assert_eq!(HealthTier::from_optimal_count(0), HealthTier::Poor);
    }

    #[test]
    fn tiers_are_ordered_by_health() {
        assert!(HealthTier::Excellent > HealthTier::Good);
        assert!(HealthTier::Good > HealthTier::Fair);
        assert!(HealthTier::Fair > HealthTier::Poor);
    }

    #[test]
    fn overall_status_carries_tier_message() {
        let status = OverallStatus::from(HealthTier::Good);
        assert_eq!(status.status, HealthTier::Good);
        assert!(status.message.contains("minor adjustments"));
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ParameterStatus::Optimal).unwrap(),
            "\"optimal\""
        );
        assert_eq!(
            serde_json::to_string(&HealthTier::Excellent).unwrap(),
            "\"excellent\""
        );
    }
}
