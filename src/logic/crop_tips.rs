use crate::models::CropTip;

const KNOWN_TIPS: &[(&str, &str, &str)] = &[
    (
        "Rice",
        "Rice needs consistent water levels. Ensure your soil stays at optimal moisture (40-60%).",
        "6.0 - 7.0",
    ),
    (
        "Wheat",
        "Wheat is sensitive to waterlogging. Ensure good drainage if moisture is high.",
        "6.0 - 7.5",
    ),
    (
        "Maize",
        "Maize is a heavy feeder. Pay close attention to Nitrogen and Phosphorus levels.",
        "5.8 - 7.0",
    ),
    (
        "Cotton",
        "Cotton needs stable temperatures. Keep an eye on soil temperature readings.",
        "5.5 - 7.5",
    ),
    (
        "Sugarcane",
        "Sugarcane needs high Nitrogen for mass. Ensure Nitrogen stays optimal.",
        "6.0 - 8.0",
    ),
];

const GENERIC_NOTES: &str =
    "Maintain balanced N-P-K levels and consistent monitoring for best results.";
const GENERIC_BEST_PH: &str = "6.0 - 7.5";

/// Crops with a dedicated growing tip.
pub fn known_crops() -> impl Iterator<Item = &'static str> {
    KNOWN_TIPS.iter().map(|(name, _, _)| *name)
}

/// Static growing tip for a crop label. Matching ignores case and surrounding space.
pub fn crop_recommendation(crop: &str) -> CropTip {
    let crop = crop.trim();
    let (notes, best_ph) = KNOWN_TIPS
        .iter()
        .find(|(name, _, _)| name.eq_ignore_ascii_case(crop))
        .map(|(_, notes, best_ph)| (*notes, *best_ph))
        .unwrap_or((GENERIC_NOTES, GENERIC_BEST_PH));

    CropTip {
        notes: notes.to_string(),
        best_ph: best_ph.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_crop_tips() {
        assert_eq!(crop_recommendation("Rice").best_ph, "6.0 - 7.0");
        assert_eq!(crop_recommendation("Maize").best_ph, "5.8 - 7.0");
        assert_eq!(crop_recommendation("Sugarcane").best_ph, "6.0 - 8.0");
        assert!(crop_recommendation("Wheat").notes.contains("waterlogging"));
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        assert_eq!(crop_recommendation("  cotton "), crop_recommendation("Cotton"));
    }

    #[test]
    fn unknown_crop_gets_generic_tip() {
        let tip = crop_recommendation("Quinoa");
        assert_eq!(tip.best_ph, "6.0 - 7.5");
        assert!(tip.notes.contains("balanced N-P-K"));
        assert_eq!(crop_recommendation(""), tip);
    }

    #[test]
    fn lists_known_crops() {
        let crops: Vec<&str> = known_crops().collect();
        assert_eq!(crops, ["Rice", "Wheat", "Maize", "Cotton", "Sugarcane"]);
    }
}
