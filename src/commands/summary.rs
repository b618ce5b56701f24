use clap::Args;
use dailycal_core::DailySummary;

use super::{parse_date, require_onboarded, AppStore, OutputFormat};

#[derive(Args)]
pub struct SummaryArgs {
    /// Date (YYYY-MM-DD, defaults to today)
    #[arg(long, short)]
    pub date: Option<String>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl SummaryArgs {
    pub fn run(&self, store: &AppStore, water_goal: u32) -> Result<(), Box<dyn std::error::Error>> {
        let user = require_onboarded(store)?;
        let date = parse_date(&self.date)?;
        let summary = DailySummary::for_date(store.data(), date, water_goal);

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
            OutputFormat::Text => {
                println!("Hi, {}! Here is {}.", user.name, date.format("%A, %B %-d"));
                println!();
                println!(
                    "Calories: {:.0} / {} kcal  {}",
                    summary.consumed_calories,
                    summary.calorie_goal,
                    progress_bar(summary.calorie_percent)
                );
                println!(
                    "Water:    {} / {} glasses  {}",
                    summary.glasses,
                    summary.water_goal,
                    progress_bar(summary.water_percent)
                );
            }
        }
        Ok(())
    }
}

fn progress_bar(percent: u32) -> String {
    let filled = (percent.min(100) / 5) as usize;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        ".".repeat(20 - filled),
        percent
    )
}
