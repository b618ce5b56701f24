//! DailyCal Core Library
//!
//! Nutrition models, calorie goals, log aggregation and the local data store
//! shared by DailyCal front-ends.

pub mod aggregate;
pub mod energy;
pub mod estimate;
pub mod logging;
pub mod models;
pub mod parse;
pub mod store;
pub mod validate;

pub use aggregate::{
    calories_for_date, daily_totals, dates_descending, glasses_for_date, group_by_date, history,
    DailySummary, DayHistory, MacroTotals, DEFAULT_WATER_GOAL,
};
pub use energy::{
    basal_metabolic_rate, calorie_goal, daily_calorie_goal, total_daily_energy_expenditure,
};
pub use estimate::{
    EstimateError, EstimateRequest, EstimateResponse, Estimator, FoodItem, HttpEstimator,
};
pub use logging::{LogMealError, MealLogger, PendingMeal};
pub use models::{
    ActivityLevel, AppData, FoodLogItem, Gender, Goal, MealType, ProfileUpdate, UserProfile,
    WaterLog,
};
pub use parse::parse_food_items;
pub use store::{
    BlobError, BlobStore, FileBlobStore, LogoutPolicy, MemoryBlobStore, Store, StoreError,
};
pub use validate::{Onboarding, ValidationError};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
