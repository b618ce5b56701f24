use clap::{Args, Subcommand};
use dailycal_core::glasses_for_date;

use super::{parse_date, require_onboarded, AppStore};

#[derive(Args)]
pub struct WaterCommand {
    #[command(subcommand)]
    pub command: WaterSubcommand,
}

#[derive(Subcommand)]
pub enum WaterSubcommand {
    /// Record one glass of water
    Add {
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long, short)]
        date: Option<String>,
    },
    /// Show glasses drunk against the daily goal
    Show {
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long, short)]
        date: Option<String>,
    },
}

impl WaterCommand {
    pub fn run(
        &self,
        store: &mut AppStore,
        water_goal: u32,
    ) -> Result<(), Box<dyn std::error::Error>> {
        require_onboarded(store)?;

        match &self.command {
            WaterSubcommand::Add { date } => {
                let date = parse_date(date)?;
                store.add_water(date)?;

                let glasses = glasses_for_date(&store.data().water_log, date);
                println!("Water on {}: {}/{} glasses", date, glasses, water_goal);
                Ok(())
            }
            WaterSubcommand::Show { date } => {
                let date = parse_date(date)?;
                let glasses = glasses_for_date(&store.data().water_log, date);
                println!("Water on {}: {}/{} glasses", date, glasses, water_goal);
                if glasses >= water_goal {
                    println!("Goal reached!");
                }
                Ok(())
            }
        }
    }
}
