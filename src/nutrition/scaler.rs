//! Portion scaling
//!
//! Catalog values are per 100 g; a logged portion scales them linearly.

use crate::models::{FoodItem, NutrientLabel, NutrientMap, REFERENCE_GRAMS};

/// Scale a food's reference values to `grams`.
///
/// Returns `None` when no positive weight has been entered yet.
pub fn scale(item: &FoodItem, grams: f64) -> Option<NutrientMap> {
    if !(grams.is_finite() && grams > 0.0) {
        return None;
    }

    Some(
        NutrientLabel::ALL
            .into_iter()
            .map(|label| (label, item.nutrition.get(label) * grams / REFERENCE_GRAMS))
            .collect(),
    )
}

/// Parse text typed into a weight field.
///
/// Empty input means "no weight yet"; anything other than digits with at
/// most one decimal point is rejected.
pub fn parse_weight_input(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let dots = trimmed.chars().filter(|c| *c == '.').count();
    let digits_only = trimmed.chars().all(|c| c.is_ascii_digit() || c == '.');
    if dots > 1 || !digits_only {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|w| *w > 0.0)
}
