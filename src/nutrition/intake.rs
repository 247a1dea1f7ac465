//! Recommended daily intake and progress against it
//!
//! Everything here is presentation math over totals produced elsewhere.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{NutrientLabel, NutrientMap};

/// Default daily calorie target (kcal)
pub const DEFAULT_DAILY_CALORIES: f64 = 2000.0;

/// Mifflin-St Jeor activity factor for moderate activity
pub const ACTIVITY_FACTOR: f64 = 1.55;

/// Daily target per nutrient label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendedIntake {
    targets: BTreeMap<NutrientLabel, f64>,
}

impl RecommendedIntake {
    /// The standard table: 2000 kcal, 300 g carbs, 50 g protein, 70 g fat,
    /// 20 g saturated fat, 2300 mg sodium, 50 g sugar
    pub fn standard() -> Self {
        let targets = [
            (NutrientLabel::Calories, DEFAULT_DAILY_CALORIES),
            (NutrientLabel::Carbohydrates, 300.0),
            (NutrientLabel::Protein, 50.0),
            (NutrientLabel::Fat, 70.0),
            (NutrientLabel::SaturatedFat, 20.0),
            (NutrientLabel::Sodium, 2300.0),
            (NutrientLabel::Sugar, 50.0),
        ]
        .into_iter()
        .collect();
        Self { targets }
    }

    /// Replace one target, e.g. the calorie goal from a user's profile
    pub fn with_target(mut self, label: NutrientLabel, target: f64) -> Self {
        self.targets.insert(label, target);
        self
    }

    /// Target for a label; 0 when the table has none
    pub fn target(&self, label: NutrientLabel) -> f64 {
        self.targets.get(&label).copied().unwrap_or(0.0)
    }
}

impl Default for RecommendedIntake {
    fn default() -> Self {
        Self::standard()
    }
}

/// Progress of one nutrient toward its daily target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientProgress {
    pub label: NutrientLabel,
    pub unit: &'static str,
    pub current: f64,
    pub target: f64,
    /// Capped at 100
    pub percent: f64,
}

/// `current` as a percentage of `target`, capped at 100.
///
/// A non-positive target yields 0 rather than NaN or infinity.
pub fn percent_of(current: f64, target: f64) -> f64 {
    share_of_daily(current, target).min(100.0)
}

/// Uncapped percentage of a daily target, for single-food detail views
pub fn share_of_daily(amount: f64, target: f64) -> f64 {
    if !(target > 0.0) {
        return 0.0;
    }
    let percent = amount / target * 100.0;
    if percent.is_finite() {
        percent
    } else {
        0.0
    }
}

/// One progress row per canonical label, in display order
pub fn summarize(totals: &NutrientMap, intake: &RecommendedIntake) -> Vec<NutrientProgress> {
    NutrientLabel::ALL
        .into_iter()
        .map(|label| {
            let current = totals.get(label);
            let target = intake.target(label);
            NutrientProgress {
                label,
                unit: label.unit(),
                current,
                target,
                percent: percent_of(current, target),
            }
        })
        .collect()
}

/// Daily calorie target from raw profile fields.
///
/// `BMR = 10*weight + 6.25*height - 5*age + 5`, target = `BMR * 1.55`
/// truncated to whole kcal. Returns `None` when any field is not a number
/// (age must be a whole number).
pub fn calorie_target(height_cm: &str, weight_kg: &str, age: &str) -> Option<i64> {
    let height: f64 = height_cm.trim().parse().ok()?;
    let weight: f64 = weight_kg.trim().parse().ok()?;
    let age: i64 = age.trim().parse().ok()?;

    if !(height.is_finite() && weight.is_finite()) {
        return None;
    }

    let bmr = 10.0 * weight + 6.25 * height - 5.0 * age as f64 + 5.0;
    Some((bmr * ACTIVITY_FACTOR) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_of_caps_at_100() {
        assert_eq!(percent_of(150.0, 100.0), 100.0);
    }

    #[test]
    fn test_percent_of_zero_target() {
        assert_eq!(percent_of(50.0, 0.0), 0.0);
        assert_eq!(percent_of(0.0, 0.0), 0.0);
        assert_eq!(percent_of(50.0, -10.0), 0.0);
    }

    #[test]
    fn test_percent_of_plain() {
        assert_eq!(percent_of(25.0, 100.0), 25.0);
    }

    #[test]
    fn test_share_of_daily_uncapped() {
        assert_eq!(share_of_daily(4600.0, 2300.0), 200.0);
        assert_eq!(share_of_daily(1.0, 0.0), 0.0);
    }

    #[test]
    fn test_summarize_covers_every_label() {
        let totals = NutrientMap::new()
            .with(NutrientLabel::Calories, 1000.0)
            .with(NutrientLabel::Sodium, 4600.0);
        let rows = summarize(&totals, &RecommendedIntake::standard());

        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0].label, NutrientLabel::Calories);
        assert_eq!(rows[0].percent, 50.0);
        let sodium = rows.iter().find(|r| r.label == NutrientLabel::Sodium).unwrap();
        assert_eq!(sodium.percent, 100.0);
        assert_eq!(sodium.unit, "mg");
        let protein = rows.iter().find(|r| r.label == NutrientLabel::Protein).unwrap();
        assert_eq!(protein.percent, 0.0);
    }

    #[test]
    fn test_with_target_overrides_calories() {
        let intake = RecommendedIntake::standard().with_target(NutrientLabel::Calories, 2100.0);
        assert_eq!(intake.target(NutrientLabel::Calories), 2100.0);
        assert_eq!(intake.target(NutrientLabel::Protein), 50.0);
    }

    #[test]
    fn test_calorie_target_formula() {
        // BMR = 700 + 1093.75 - 150 + 5 = 1648.75; * 1.55 = 2555.5625
        assert_eq!(calorie_target("175", "70", "30"), Some(2555));
    }

    #[test]
    fn test_calorie_target_unavailable_on_bad_input() {
        assert_eq!(calorie_target("abc", "70", "30"), None);
        assert_eq!(calorie_target("175", "", "30"), None);
        assert_eq!(calorie_target("175", "70", "30.5"), None);
    }
}
