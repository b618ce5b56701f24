mod account;
mod config_cmd;
mod meal;
mod profile;
mod summary;
mod water;

pub use account::{run_logout, OnboardArgs, SignupArgs};
pub use config_cmd::ConfigCommand;
pub use meal::MealCommand;
pub use profile::ProfileCommand;
pub use summary::SummaryArgs;
pub use water::WaterCommand;

use chrono::{NaiveDate, Utc};
use clap::ValueEnum;
use dailycal_core::{FileBlobStore, Store, UserProfile};

pub type AppStore = Store<FileBlobStore>;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Today's calendar date. Dates are UTC days throughout, matching how food
/// entries are bucketed.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parses an optional YYYY-MM-DD argument, defaulting to today.
pub fn parse_date(date: &Option<String>) -> Result<NaiveDate, String> {
    match date {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .map_err(|_| format!("Invalid date format '{}'. Use YYYY-MM-DD.", d)),
        None => Ok(today()),
    }
}

pub fn require_user(store: &AppStore) -> Result<&UserProfile, String> {
    store
        .user()
        .ok_or_else(|| "Not logged in. Run 'dailycal signup' first.".to_string())
}

/// The dashboard commands need a finished profile.
pub fn require_onboarded(store: &AppStore) -> Result<&UserProfile, String> {
    let user = require_user(store)?;
    if !user.is_onboarded() {
        return Err("Profile incomplete. Run 'dailycal onboard' first.".to_string());
    }
    Ok(user)
}
