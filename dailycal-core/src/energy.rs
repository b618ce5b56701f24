//! Daily energy targets derived from a user profile.
//!
//! BMR uses the Mifflin-St Jeor equation. Every function here accepts a
//! partially filled profile and falls back to fixed defaults instead of
//! failing.

use crate::models::{Gender, Goal, UserProfile};

/// BMR used when weight, height, age or gender is unknown.
pub const FALLBACK_BMR: f64 = 2000.0;

/// Activity factor used when no activity level is set (same as sedentary).
pub const DEFAULT_ACTIVITY_FACTOR: f64 = 1.2;

/// Daily calorie adjustment for the lose and gain goals.
pub const GOAL_ADJUSTMENT: f64 = 500.0;

/// Goal shown when nobody is logged in.
pub const DEFAULT_CALORIE_GOAL: u32 = 2000;

/// Basal metabolic rate in kcal/day.
///
/// `Gender::Other` uses the female constant.
pub fn basal_metabolic_rate(profile: &UserProfile) -> f64 {
    let (Some(weight), Some(height), Some(age), Some(gender)) =
        (profile.weight, profile.height, profile.age, profile.gender)
    else {
        return FALLBACK_BMR;
    };

    let sex_constant = match gender {
        Gender::Male => 5.0,
        Gender::Female | Gender::Other => -161.0,
    };

    10.0 * weight + 6.25 * height - 5.0 * f64::from(age) + sex_constant
}

/// Total daily energy expenditure: BMR scaled by the activity factor.
pub fn total_daily_energy_expenditure(profile: &UserProfile) -> f64 {
    let factor = profile
        .activity_level
        .map(|level| level.factor())
        .unwrap_or(DEFAULT_ACTIVITY_FACTOR);

    basal_metabolic_rate(profile) * factor
}

/// Daily calorie target. Not rounded.
pub fn calorie_goal(profile: &UserProfile) -> f64 {
    let tdee = total_daily_energy_expenditure(profile);
    match profile.goal {
        Some(Goal::Lose) => tdee - GOAL_ADJUSTMENT,
        Some(Goal::Gain) => tdee + GOAL_ADJUSTMENT,
        Some(Goal::Maintain) | None => tdee,
    }
}

/// Rounded calorie goal for display, or the default when logged out.
pub fn daily_calorie_goal(profile: Option<&UserProfile>) -> u32 {
    match profile {
        Some(p) => calorie_goal(p).round().max(0.0) as u32,
        None => DEFAULT_CALORIE_GOAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityLevel;

    fn male_fixture() -> UserProfile {
        UserProfile::new("Sam", "sam@example.com")
            .with_weight(70.0)
            .with_height(175.0)
            .with_age(25)
            .with_gender(Gender::Male)
    }

    #[test]
    fn test_bmr_male() {
        assert_eq!(basal_metabolic_rate(&male_fixture()), 1673.75);
    }

    #[test]
    fn test_bmr_female() {
        let profile = male_fixture().with_gender(Gender::Female);
        assert_eq!(basal_metabolic_rate(&profile), 1507.75);
    }

    #[test]
    fn test_bmr_other_matches_female() {
        let other = male_fixture().with_gender(Gender::Other);
        let female = male_fixture().with_gender(Gender::Female);
        assert_eq!(basal_metabolic_rate(&other), basal_metabolic_rate(&female));
    }

    #[test]
    fn test_bmr_fallback_when_any_input_missing() {
        let full = male_fixture();

        let mut no_weight = full.clone();
        no_weight.weight = None;
        let mut no_height = full.clone();
        no_height.height = None;
        let mut no_age = full.clone();
        no_age.age = None;
        let mut no_gender = full;
        no_gender.gender = None;

        for profile in [no_weight, no_height, no_age, no_gender] {
            assert_eq!(basal_metabolic_rate(&profile), FALLBACK_BMR);
        }
    }

    #[test]
    fn test_tdee_uses_activity_factor() {
        let profile = male_fixture().with_activity_level(ActivityLevel::Moderate);
        assert_eq!(total_daily_energy_expenditure(&profile), 1673.75 * 1.55);
    }

    #[test]
    fn test_tdee_defaults_to_sedentary_factor() {
        let profile = male_fixture();
        assert_eq!(total_daily_energy_expenditure(&profile), 1673.75 * 1.2);
    }

    #[test]
    fn test_activity_factor_table() {
        assert_eq!(ActivityLevel::Sedentary.factor(), 1.2);
        assert_eq!(ActivityLevel::Light.factor(), 1.375);
        assert_eq!(ActivityLevel::Moderate.factor(), 1.55);
        assert_eq!(ActivityLevel::Active.factor(), 1.725);
        assert_eq!(ActivityLevel::VeryActive.factor(), 1.9);
    }

    #[test]
    fn test_calorie_goal_adjustments() {
        let base = male_fixture().with_activity_level(ActivityLevel::Light);
        let tdee = total_daily_energy_expenditure(&base);

        assert_eq!(calorie_goal(&base), tdee);
        assert_eq!(calorie_goal(&base.clone().with_goal(Goal::Maintain)), tdee);
        assert_eq!(calorie_goal(&base.clone().with_goal(Goal::Lose)), tdee - 500.0);
        assert_eq!(calorie_goal(&base.with_goal(Goal::Gain)), tdee + 500.0);
    }

    #[test]
    fn test_bare_profile_uses_fallbacks() {
        let profile = UserProfile::new("New", "new@example.com");
        assert_eq!(calorie_goal(&profile), 2400.0);
    }

    #[test]
    fn test_daily_calorie_goal_rounds() {
        // 1673.75 * 1.55 - 500 = 2094.3125
        let profile = male_fixture()
            .with_activity_level(ActivityLevel::Moderate)
            .with_goal(Goal::Lose);
        assert_eq!(daily_calorie_goal(Some(&profile)), 2094);
        assert_eq!(daily_calorie_goal(None), DEFAULT_CALORIE_GOAL);
    }
}
