use clap::Args;
use dailycal_core::validate::validate_signup;
use dailycal_core::{ActivityLevel, Gender, Goal, Onboarding};

use super::{require_user, AppStore};

#[derive(Args)]
pub struct SignupArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Email address
    #[arg(long)]
    pub email: String,
}

impl SignupArgs {
    /// Records the user locally. Existing logs are kept.
    pub fn run(&self, store: &mut AppStore) -> Result<(), Box<dyn std::error::Error>> {
        let profile = validate_signup(&self.name, &self.email)?;
        let name = profile.name.clone();
        store.login(profile)?;

        println!("Welcome, {}!", name);
        println!("Next, tell us about yourself with 'dailycal onboard'.");
        Ok(())
    }
}

pub fn run_logout(store: &mut AppStore) -> Result<(), Box<dyn std::error::Error>> {
    if store.user().is_none() {
        println!("Not logged in.");
        return Ok(());
    }
    store.logout()?;
    println!("Logged out.");
    Ok(())
}

#[derive(Args)]
pub struct OnboardArgs {
    /// Age in years
    #[arg(long)]
    pub age: Option<u32>,

    /// Gender (male, female, other)
    #[arg(long)]
    pub gender: Option<Gender>,

    /// Weight in kilograms
    #[arg(long)]
    pub weight: Option<f64>,

    /// Height in centimeters
    #[arg(long)]
    pub height: Option<f64>,

    /// Activity level (sedentary, light, moderate, active, very_active)
    #[arg(long)]
    pub activity: Option<ActivityLevel>,

    /// Goal (lose, maintain, gain)
    #[arg(long)]
    pub goal: Option<Goal>,
}

impl OnboardArgs {
    pub fn run(&self, store: &mut AppStore) -> Result<(), Box<dyn std::error::Error>> {
        if require_user(store)?.is_onboarded() {
            println!("Your profile is already complete.");
            println!("Use 'dailycal profile update' to change it.");
            return Ok(());
        }

        let update = Onboarding {
            age: self.age,
            gender: self.gender,
            weight: self.weight,
            height: self.height,
            activity_level: self.activity,
            goal: self.goal,
        }
        .validate()?;

        store.update_profile(update)?;

        println!("Profile complete! You are all set.");
        if let Some(user) = store.user() {
            println!(
                "Daily calorie goal: {} kcal",
                dailycal_core::daily_calorie_goal(Some(user))
            );
        }
        Ok(())
    }
}
