use chrono::Utc;
use clap::{Args, Subcommand};
use dailycal_core::validate::validate_meal_text;
use dailycal_core::{
    history, Estimator, FoodLogItem, HttpEstimator, MealLogger, MealType, PendingMeal,
};
use std::io::{self, BufRead, Read, Write};

use super::{require_onboarded, AppStore, OutputFormat};
use crate::config::Config;

#[derive(Args)]
pub struct MealCommand {
    #[command(subcommand)]
    pub command: MealSubcommand,
}

#[derive(Subcommand)]
pub enum MealSubcommand {
    /// Describe a meal, review the estimate, and save it
    Log {
        /// Meal type (breakfast, lunch, dinner, snack)
        #[arg(long = "type", short = 't')]
        meal_type: MealType,

        /// What you ate, one food per line as "quantity, food".
        /// Read from stdin when omitted, which requires --yes.
        description: Option<String>,

        /// Save the estimate without asking
        #[arg(long, short)]
        yes: bool,
    },
    /// Show logged meals grouped by day
    History {
        /// Only show the most recent N days
        #[arg(long)]
        days: Option<usize>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl MealCommand {
    pub fn run(
        &self,
        store: &mut AppStore,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            MealSubcommand::Log {
                meal_type,
                description,
                yes,
            } => {
                require_onboarded(store)?;

                let text = meal_text(description, *yes, io::stdin())?;

                let estimator = HttpEstimator::new(
                    config.estimator.base_url.clone(),
                    config.estimator.api_key.clone().unwrap_or_default(),
                    config.estimator.model.clone(),
                    config.estimator.timeout(),
                )?;
                let logger = MealLogger::new(estimator);

                let confirm = |pending: &PendingMeal| -> io::Result<bool> {
                    print_estimate(pending);
                    if *yes {
                        return Ok(true);
                    }
                    print!("Save this entry? [y/N] ");
                    io::stdout().flush()?;
                    read_confirmation(io::stdin().lock())
                };

                match log_meal(store, &logger, *meal_type, &text, confirm)? {
                    Some(item) => {
                        println!("Saved {} ({:.0} kcal).", item.meal, item.total_calories);
                        println!("Entry ID: {}", item.id);
                    }
                    None => println!("Entry discarded."),
                }
                Ok(())
            }

            MealSubcommand::History { days, format } => {
                require_onboarded(store)?;

                let mut days_view = history(&store.data().food_log);
                if let Some(limit) = days {
                    days_view.truncate(*limit);
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&days_view)?);
                    }
                    OutputFormat::Text => {
                        if days_view.is_empty() {
                            println!("No meals logged yet.");
                            return Ok(());
                        }

                        for (i, day) in days_view.iter().enumerate() {
                            if i > 0 {
                                println!();
                            }
                            println!("{}", day.date.format("%A, %B %-d, %Y"));
                            println!("{}", "-".repeat(10));
                            for entry in &day.entries {
                                println!("{}", entry);
                            }
                            println!("{}", day.totals);
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

/// Estimates `text`, asks `confirm`, and stores the entry when accepted.
///
/// Nothing is written when the estimate fails or is declined.
fn log_meal<E, F>(
    store: &mut AppStore,
    logger: &MealLogger<E>,
    meal: MealType,
    text: &str,
    confirm: F,
) -> Result<Option<FoodLogItem>, Box<dyn std::error::Error>>
where
    E: Estimator,
    F: FnOnce(&PendingMeal) -> io::Result<bool>,
{
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| format!("Failed to create runtime: {}", e))?;
    let pending = rt.block_on(logger.estimate(meal, text))?;

    if !confirm(&pending)? {
        return Ok(None);
    }

    let item = pending.confirm(Utc::now());
    store.add_food_log(item.clone())?;
    Ok(Some(item))
}

/// Takes the meal text from the argument or stdin and validates it before
/// any estimator is built.
///
/// Stdin can't carry both the meal and the answer to the save prompt, so
/// reading the meal from it requires `--yes`.
fn meal_text<R: Read>(
    description: &Option<String>,
    yes: bool,
    mut stdin: R,
) -> Result<String, Box<dyn std::error::Error>> {
    let text = match description {
        Some(text) => text.clone(),
        None if !yes => {
            return Err(
                "Reading the meal from stdin requires --yes. Pass the description as an argument to review the estimate first."
                    .into(),
            );
        }
        None => {
            eprintln!("Describe your meal, one food per line. Finish with Ctrl-D.");
            let mut text = String::new();
            stdin.read_to_string(&mut text)?;
            text
        }
    };

    validate_meal_text(&text)?;
    Ok(text)
}

fn print_estimate(pending: &PendingMeal) {
    let estimate = &pending.estimate;
    println!("Estimated {}:", pending.meal);
    println!("  Calories: {:.0} kcal", estimate.total_calories);
    println!(
        "  Protein: {}g | Carbs: {}g | Fat: {}g",
        estimate.protein, estimate.carbohydrates, estimate.fat
    );
    if !estimate.details.is_empty() {
        println!("  {}", estimate.details);
    }
    println!();
}

/// Reads a y/N answer. Running out of input is an error, not a "no".
fn read_confirmation<R: BufRead>(mut input: R) -> io::Result<bool> {
    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "no answer to the save prompt (use --yes to save without asking)",
        ));
    }
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
