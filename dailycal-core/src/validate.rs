//! Form validation for signup, onboarding, profile edits and meal entries.
//!
//! Validation happens before anything touches the store; a rejected form
//! leaves the data untouched.

use thiserror::Error;

use crate::models::{ActivityLevel, Gender, Goal, ProfileUpdate, UserProfile};

/// Minimum length of a meal description.
pub const MIN_MEAL_TEXT_LEN: usize = 10;

/// Minimum length of a display name.
pub const MIN_NAME_LEN: usize = 2;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Name must be at least {} characters.", MIN_NAME_LEN)]
    NameTooShort,

    #[error("Please enter a valid email.")]
    InvalidEmail,

    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{0} must be at least 1")]
    TooSmall(&'static str),

    #[error("Please describe what you ate in at least {} characters.", MIN_MEAL_TEXT_LEN)]
    MealTextTooShort,
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() < MIN_NAME_LEN {
        return Err(ValidationError::NameTooShort);
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail);
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };

    let domain_ok = domain.contains('.')
        && !domain.contains('@')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..");

    if local.is_empty() || !domain_ok {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Validates the signup form and returns the profile to log in with.
pub fn validate_signup(name: &str, email: &str) -> Result<UserProfile, ValidationError> {
    validate_name(name)?;
    validate_email(email)?;
    Ok(UserProfile::new(name.trim(), email.trim()))
}

pub fn validate_meal_text(text: &str) -> Result<(), ValidationError> {
    if text.trim().chars().count() < MIN_MEAL_TEXT_LEN {
        return Err(ValidationError::MealTextTooShort);
    }
    Ok(())
}

/// Weight and height are whole-unit forms: kg and cm, minimum 1.
fn at_least_one(value: Option<f64>, field: &'static str) -> Result<(), ValidationError> {
    match value {
        Some(v) if !(v.is_finite() && v >= 1.0) => Err(ValidationError::TooSmall(field)),
        _ => Ok(()),
    }
}

/// Checks the fields present in a partial profile edit.
pub fn validate_profile_update(update: &ProfileUpdate) -> Result<(), ValidationError> {
    if let Some(name) = &update.name {
        validate_name(name)?;
    }
    if let Some(email) = &update.email {
        validate_email(email)?;
    }
    if update.age == Some(0) {
        return Err(ValidationError::TooSmall("Age"));
    }
    at_least_one(update.weight, "Weight")?;
    at_least_one(update.height, "Height")?;
    Ok(())
}

/// The onboarding form: every physiology field is required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Onboarding {
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub goal: Option<Goal>,
}

impl Onboarding {
    pub fn validate(self) -> Result<ProfileUpdate, ValidationError> {
        let age = self.age.ok_or(ValidationError::Missing("Age"))?;
        let gender = self.gender.ok_or(ValidationError::Missing("Gender"))?;
        let weight = self.weight.ok_or(ValidationError::Missing("Weight"))?;
        let height = self.height.ok_or(ValidationError::Missing("Height"))?;
        let activity_level = self
            .activity_level
            .ok_or(ValidationError::Missing("Activity level"))?;
        let goal = self.goal.ok_or(ValidationError::Missing("Goal"))?;

        let update = ProfileUpdate {
            age: Some(age),
            gender: Some(gender),
            weight: Some(weight),
            height: Some(height),
            activity_level: Some(activity_level),
            goal: Some(goal),
            ..Default::default()
        };
        validate_profile_update(&update)?;
        Ok(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_onboarding() -> Onboarding {
        Onboarding {
            age: Some(29),
            gender: Some(Gender::Female),
            weight: Some(58.0),
            height: Some(165.0),
            activity_level: Some(ActivityLevel::Moderate),
            goal: Some(Goal::Maintain),
        }
    }

    #[test]
    fn test_signup_trims_and_builds_profile() {
        let profile = validate_signup("  Ada ", " ada@example.com ").unwrap();
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.email, "ada@example.com");
        assert!(!profile.is_onboarded());
    }

    #[test]
    fn test_signup_rejects_short_name() {
        assert_eq!(
            validate_signup("A", "a@example.com").unwrap_err(),
            ValidationError::NameTooShort
        );
    }

    #[test]
    fn test_email_validation() {
        for ok in ["a@b.co", "first.last@mail.example.org"] {
            assert!(validate_email(ok).is_ok(), "{ok}");
        }
        for bad in ["", "plain", "@b.co", "a@b", "a@.co", "a@b.co.", "a b@c.de", "a@b@c.de", "a@b..co"] {
            assert_eq!(validate_email(bad), Err(ValidationError::InvalidEmail), "{bad}");
        }
    }

    #[test]
    fn test_meal_text_minimum_length() {
        assert_eq!(
            validate_meal_text(" apple   "),
            Err(ValidationError::MealTextTooShort)
        );
        assert!(validate_meal_text("1, medium apple").is_ok());
    }

    #[test]
    fn test_onboarding_complete() {
        let update = complete_onboarding().validate().unwrap();
        assert_eq!(update.age, Some(29));
        assert_eq!(update.goal, Some(Goal::Maintain));
        assert!(update.name.is_none());
    }

    #[test]
    fn test_onboarding_requires_every_field() {
        let mut form = complete_onboarding();
        form.activity_level = None;
        assert_eq!(
            form.validate().unwrap_err(),
            ValidationError::Missing("Activity level")
        );
    }

    #[test]
    fn test_onboarding_rejects_values_below_one() {
        let mut form = complete_onboarding();
        form.weight = Some(0.0);
        assert_eq!(form.validate().unwrap_err(), ValidationError::TooSmall("Weight"));

        let mut form = complete_onboarding();
        form.height = Some(0.5);
        assert_eq!(form.validate().unwrap_err(), ValidationError::TooSmall("Height"));

        let mut form = complete_onboarding();
        form.weight = Some(1.0);
        assert!(form.validate().is_ok());

        let mut form = complete_onboarding();
        form.age = Some(0);
        assert_eq!(form.validate().unwrap_err(), ValidationError::TooSmall("Age"));
    }

    #[test]
    fn test_profile_update_checks_only_present_fields() {
        assert!(validate_profile_update(&ProfileUpdate::default()).is_ok());

        let update = ProfileUpdate {
            height: Some(-170.0),
            ..Default::default()
        };
        assert_eq!(
            validate_profile_update(&update),
            Err(ValidationError::TooSmall("Height"))
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::MealTextTooShort.to_string(),
            "Please describe what you ate in at least 10 characters."
        );
        assert_eq!(ValidationError::Missing("Goal").to_string(), "Goal is required");
    }
}
