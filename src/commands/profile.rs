use clap::{Args, Subcommand};
use dailycal_core::validate::validate_profile_update;
use dailycal_core::{
    basal_metabolic_rate, daily_calorie_goal, total_daily_energy_expenditure, ActivityLevel,
    Gender, Goal, ProfileUpdate, UserProfile,
};

use super::{require_user, AppStore, OutputFormat};

#[derive(Args)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand)]
pub enum ProfileSubcommand {
    /// Show your profile and calorie goal
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Change one or more profile fields
    Update {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// Age in years
        #[arg(long)]
        age: Option<u32>,

        /// Gender (male, female, other)
        #[arg(long)]
        gender: Option<Gender>,

        /// Weight in kilograms
        #[arg(long)]
        weight: Option<f64>,

        /// Height in centimeters
        #[arg(long)]
        height: Option<f64>,

        /// Activity level (sedentary, light, moderate, active, very_active)
        #[arg(long)]
        activity: Option<ActivityLevel>,

        /// Goal (lose, maintain, gain)
        #[arg(long)]
        goal: Option<Goal>,
    },
}

impl ProfileCommand {
    pub fn run(&self, store: &mut AppStore) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ProfileSubcommand::Show { format } => {
                let user = require_user(store)?;
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(user)?),
                    OutputFormat::Text => print_profile(user),
                }
                Ok(())
            }

            ProfileSubcommand::Update {
                name,
                email,
                age,
                gender,
                weight,
                height,
                activity,
                goal,
            } => {
                require_user(store)?;

                let update = ProfileUpdate {
                    name: name.clone(),
                    email: email.clone(),
                    age: *age,
                    gender: *gender,
                    weight: *weight,
                    height: *height,
                    activity_level: *activity,
                    goal: *goal,
                };
                if update.is_empty() {
                    return Err("Nothing to update. Pass at least one field.".into());
                }
                validate_profile_update(&update)?;

                store.update_profile(update)?;
                println!("Profile updated.");
                if let Some(user) = store.user() {
                    println!("Daily calorie goal: {} kcal", daily_calorie_goal(Some(user)));
                }
                Ok(())
            }
        }
    }
}

fn print_profile(user: &UserProfile) {
    println!("{}", user);
    println!();
    if user.is_onboarded() {
        println!("BMR:  {:.0} kcal", basal_metabolic_rate(user));
        println!("TDEE: {:.0} kcal", total_daily_energy_expenditure(user));
    } else {
        println!("Profile incomplete. Run 'dailycal onboard' to finish it.");
    }
    println!("Daily calorie goal: {} kcal", daily_calorie_goal(Some(user)));
}
