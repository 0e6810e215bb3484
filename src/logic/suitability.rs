use crate::models::{
    CropMatch, CropProfile, Range, SoilParameter, SoilSample, SuitabilityScore,
};

const FULL_SCORE: f64 = 100.0;
const MAX_REASONS: usize = 3;
const INSUFFICIENT_DATA: &str = "Insufficient crop data";

#[derive(Debug, Clone, Copy)]
enum Distance {
    /// Raw units outside the range.
    Absolute,
    /// Fraction of the violated bound. A non-positive bound yields no penalty.
    Relative,
}

/// Penalty for being on one side of a range: `min(distance * rate, cap)`.
#[derive(Debug, Clone, Copy)]
struct Slope {
    distance: Distance,
    rate: f64,
    cap: f64,
}

impl Slope {
    const fn absolute(rate: f64, cap: f64) -> Self {
        Self {
            distance: Distance::Absolute,
            rate,
            cap,
        }
    }

    const fn relative(rate: f64, cap: f64) -> Self {
        Self {
            distance: Distance::Relative,
            rate,
            cap,
        }
    }

    fn penalty(&self, gap: f64, bound: f64) -> f64 {
        let distance = match self.distance {
            Distance::Absolute => gap,
            Distance::Relative if bound > 0.0 => gap / bound,
            Distance::Relative => return 0.0,
        };
        (distance * self.rate).min(self.cap)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Below,
    Within,
    Above,
}

/// One weighted scoring factor. A below/above reason is only reported when its
/// penalty exceeds `reason_threshold`; being in range is always reported.
#[derive(Debug, Clone, Copy)]
struct Factor {
    parameter: SoilParameter,
    below: Slope,
    above: Slope,
    reason_threshold: f64,
}

// Evaluation order is also reason order.
const FACTORS: [Factor; 6] = [
    Factor {
        parameter: SoilParameter::Ph,
        below: Slope::absolute(15.0, 25.0),
        above: Slope::absolute(15.0, 25.0),
        reason_threshold: 5.0,
    },
    Factor {
        parameter: SoilParameter::Nitrogen,
        below: Slope::relative(15.0, 15.0),
        above: Slope::relative(10.0, 10.0),
        reason_threshold: 3.0,
    },
    Factor {
        parameter: SoilParameter::Phosphorus,
        below: Slope::relative(15.0, 15.0),
        above: Slope::relative(10.0, 10.0),
        reason_threshold: 3.0,
    },
    Factor {
        parameter: SoilParameter::Potassium,
        below: Slope::relative(15.0, 15.0),
        above: Slope::relative(10.0, 10.0),
        reason_threshold: 3.0,
    },
    Factor {
        parameter: SoilParameter::Moisture,
        below: Slope::relative(15.0, 15.0),
        above: Slope::relative(15.0, 15.0),
        reason_threshold: 3.0,
    },
    Factor {
        parameter: SoilParameter::Temperature,
        below: Slope::absolute(2.0, 15.0),
        above: Slope::absolute(2.0, 15.0),
        reason_threshold: 3.0,
    },
];

impl Factor {
    fn assess(&self, value: f64, range: Range) -> (Position, f64) {
        if value < range.min {
            (Position::Below, self.below.penalty(range.min - value, range.min))
        } else if value > range.max {
            (Position::Above, self.above.penalty(value - range.max, range.max))
        } else {
            (Position::Within, 0.0)
        }
    }

    fn reason(&self, position: Position) -> String {
        use Position::*;
        use SoilParameter::*;

        match (self.parameter, position) {
            (Ph, Below) => "pH is slightly low".into(),
            (Ph, Above) => "pH is slightly high".into(),
            (Ph, Within) => "Perfect pH match".into(),
            (Moisture, Below) => "Soil is too dry".into(),
            (Moisture, Above) => "Soil is too wet".into(),
            (Moisture, Within) => "Moisture level is ideal".into(),
            (Temperature, Below) => "Temperature is too low".into(),
            (Temperature, Above) => "Temperature is too high".into(),
            (Temperature, Within) => "Temperature is optimal".into(),
            (nutrient, Below) => format!("{} is too low", nutrient),
            (nutrient, Above) => format!("{} is higher than needed", nutrient),
            (nutrient, Within) => format!("{} is optimal", nutrient),
        }
    }
}

/// Score how well a crop's ideal ranges match a sample, 0-100.
///
/// Penalties are independent per factor and capped by the factor's weight:
/// pH 25, each of N/P/K 15 (deficit) or 10 (excess), moisture 15, temperature 15.
/// A requirement missing from the catalog entry costs nothing. An entry with no
/// requirements at all scores zero.
pub fn calculate_score(crop: &CropProfile, sample: &SoilSample) -> SuitabilityScore {
    let Some(requirements) = crop.soil_requirements.as_ref() else {
        tracing::warn!(crop = %crop.display_name(), "Crop is missing soil requirements");
        return SuitabilityScore {
            score: 0,
            reasons: vec![INSUFFICIENT_DATA.to_string()],
        };
    };

    let mut score = FULL_SCORE;
    let mut reasons = Vec::new();

    for factor in &FACTORS {
        let range = requirements
            .range(factor.parameter)
            .unwrap_or(Range::UNBOUNDED);
        let (position, penalty) = factor.assess(sample.value(factor.parameter), range);

        score -= penalty;
        if position == Position::Within || penalty > factor.reason_threshold {
            reasons.push(factor.reason(position));
        }
    }

    reasons.truncate(MAX_REASONS);
    let score = score.round().clamp(0.0, FULL_SCORE) as u8;

    tracing::debug!(crop = %crop.display_name(), score, "Scored crop");

    SuitabilityScore { score, reasons }
}

/// Score every crop in the catalog and rank best first.
///
/// The sort is stable, so crops with equal scores keep catalog order.
pub fn rank_crops(sample: &SoilSample, catalog: &[CropProfile]) -> Vec<CropMatch> {
    let mut matches: Vec<CropMatch> = catalog
        .iter()
        .map(|crop| CropMatch::new(crop.clone(), calculate_score(crop, sample)))
        .collect();

    matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    matches
}
