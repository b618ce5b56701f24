use clap::{Parser, Subcommand};
use dailycal_core::{FileBlobStore, Store};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{
    run_logout, ConfigCommand, MealCommand, OnboardArgs, ProfileCommand, SignupArgs,
    SummaryArgs, WaterCommand,
};
use config::Config;

#[derive(Parser)]
#[command(name = "dailycal")]
#[command(version)]
#[command(about = "Track daily calories and water against personal goals", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create your local account
    Signup(SignupArgs),

    /// Sign out of your local account
    Logout,

    /// Complete your profile (age, body, activity, goal)
    Onboard(OnboardArgs),

    /// View or edit your profile
    Profile(ProfileCommand),

    /// Log meals and browse history
    Meal(MealCommand),

    /// Track water intake
    Water(WaterCommand),

    /// Show today's calorie and water progress
    Summary(SummaryArgs),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(cli.config)?;

    let command = match &cli.command {
        Some(command) => command,
        None => {
            println!("Use --help to see available commands");
            return Ok(());
        }
    };

    // Config commands work without touching the data file
    if let Commands::Config(cmd) = command {
        return cmd.run(&config);
    }

    tracing::debug!(data_dir = %config.data_dir.value.display(), "opening store");
    let mut store = Store::open(
        FileBlobStore::new(config.data_dir.value.clone()),
        config.logout_policy.value,
    );

    match command {
        Commands::Signup(cmd) => cmd.run(&mut store),
        Commands::Logout => run_logout(&mut store),
        Commands::Onboard(cmd) => cmd.run(&mut store),
        Commands::Profile(cmd) => cmd.run(&mut store),
        Commands::Meal(cmd) => cmd.run(&mut store, &config),
        Commands::Water(cmd) => cmd.run(&mut store, config.water_goal.value),
        Commands::Summary(cmd) => cmd.run(&store, config.water_goal.value),
        Commands::Config(_) => Ok(()),
    }
}
