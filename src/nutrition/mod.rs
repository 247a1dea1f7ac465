//! Nutrition calculation module
//!
//! Portion scaling and intake progress.

pub mod intake;
pub mod scaler;

pub use intake::{
    calorie_target, percent_of, share_of_daily, summarize, NutrientProgress, RecommendedIntake,
    ACTIVITY_FACTOR, DEFAULT_DAILY_CALORIES,
};
pub use scaler::{parse_weight_input, scale};
