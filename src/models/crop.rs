use super::soil_sample::SoilParameter;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Inclusive `[min, max]` target range, encoded as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    /// Stand-in for a requirement the catalog does not specify.
    pub const UNBOUNDED: Range = Range {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value.as_array()?.as_slice() {
            [min, max] => Some(Range::new(min.as_f64()?, max.as_f64()?)),
            _ => None,
        }
    }
}

impl From<(f64, f64)> for Range {
    fn from((min, max): (f64, f64)) -> Self {
        Range::new(min, max)
    }
}

impl From<Range> for (f64, f64) {
    fn from(range: Range) -> Self {
        (range.min, range.max)
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Ideal soil conditions for a crop. Absent entries mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoilRequirements {
    #[serde(default, deserialize_with = "lenient_range", skip_serializing_if = "Option::is_none")]
    pub ph: Option<Range>,
    #[serde(default, deserialize_with = "lenient_range", skip_serializing_if = "Option::is_none")]
    pub nitrogen: Option<Range>,
    #[serde(default, deserialize_with = "lenient_range", skip_serializing_if = "Option::is_none")]
    pub phosphorus: Option<Range>,
    #[serde(default, deserialize_with = "lenient_range", skip_serializing_if = "Option::is_none")]
    pub potassium: Option<Range>,
    #[serde(default, deserialize_with = "lenient_range", skip_serializing_if = "Option::is_none")]
    pub moisture: Option<Range>,
    #[serde(default, deserialize_with = "lenient_range", skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Range>,
}

impl SoilRequirements {
    pub fn range(&self, parameter: SoilParameter) -> Option<Range> {
        match parameter {
            SoilParameter::Nitrogen => self.nitrogen,
            SoilParameter::Phosphorus => self.phosphorus,
            SoilParameter::Potassium => self.potassium,
            SoilParameter::Ph => self.ph,
            SoilParameter::Moisture => self.moisture,
            SoilParameter::Temperature => self.temperature,
        }
    }

    /// Parameters the catalog entry leaves unspecified.
    pub fn missing(&self) -> Vec<SoilParameter> {
        SoilParameter::ALL
            .into_iter()
            .filter(|p| self.range(*p).is_none())
            .collect()
    }
}

// Anything other than a two-number array decodes as "not specified".
fn lenient_range<'de, D>(deserializer: D) -> std::result::Result<Option<Range>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Range::from_value))
}

fn lenient_requirements<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<SoilRequirements>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .filter(Value::is_object)
        .and_then(|v| serde_json::from_value(v).ok()))
}

/// A crop entry from the external catalog. Read-only to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropProfile {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_requirements",
        skip_serializing_if = "Option::is_none"
    )]
    pub soil_requirements: Option<SoilRequirements>,
}

impl CropProfile {
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MatchLevel {
    Low,
    Fair,
    Good,
    Excellent,
}

impl MatchLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            85.. => MatchLevel::Excellent,
            70..=84 => MatchLevel::Good,
            50..=69 => MatchLevel::Fair,
            _ => MatchLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchLevel::Excellent => "Excellent",
            MatchLevel::Good => "Good",
            MatchLevel::Fair => "Fair",
            MatchLevel::Low => "Low",
        }
    }
}

impl std::fmt::Display for MatchLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of scoring one crop against one sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuitabilityScore {
    pub score: u8,
    pub reasons: Vec<String>,
}

/// A catalog entry annotated with its suitability for a sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropMatch {
    #[serde(flatten)]
    pub profile: CropProfile,
    pub match_score: u8,
    pub match_reasons: Vec<String>,
    pub match_level: MatchLevel,
}

impl CropMatch {
    pub fn new(profile: CropProfile, score: SuitabilityScore) -> Self {
        Self {
            profile,
            match_level: MatchLevel::from_score(score.score),
            match_score: score.score,
            match_reasons: score.reasons,
        }
    }
}
