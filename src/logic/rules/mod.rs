pub mod engine;
pub mod moisture;
pub mod nutrient_deficiency;
pub mod soil_ph;

pub use engine::{generate_warnings, WarningEngine};

use crate::models::{SoilAnalysis, Warning};

/// A single soil warning condition.
pub trait WarningRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Return a warning if the analyzed sample triggers this rule
    fn evaluate(&self, analysis: &SoilAnalysis) -> Option<Warning>;
}
