use clap::{Args, Subcommand};
use std::fs;
use std::io::Write;
use std::path::Path;

use super::OutputFormat;
use crate::config::Config;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Initialize configuration file
    Init,
}

const DEFAULT_CONFIG: &str = r#"# dailycal configuration

# Directory holding calorie-companion-data.json (default: platform data dir)
# data_dir: ~/.local/share/dailycal

# What logout does to your logs: clear_logs or retain_logs
logout_policy: clear_logs

# Daily water target in glasses
water_goal: 8

# Calorie estimation service (any OpenAI-compatible API).
# The API key is best supplied through DAILYCAL_API_KEY.
estimator:
  base_url: https://api.openai.com/v1
  model: gpt-4o-mini
  timeout_secs: 60
"#;

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => print_config(config),
                }
                Ok(())
            }

            ConfigSubcommand::Init => {
                let config_path = Config::default_config_path();
                if init_config_file(&config_path)? {
                    println!("Created config file: {}", config_path.display());
                    println!("\nEdit this file to customize your settings.");
                } else {
                    println!("Config file already exists: {}", config_path.display());
                    println!("Use 'dailycal config show' to view current configuration.");
                }
                Ok(())
            }
        }
    }
}

fn print_config(config: &Config) {
    println!("Configuration");
    println!("=============\n");

    if let Some(path) = &config.config_file {
        println!("Config file: {}", path.display());
    } else {
        println!(
            "Config file: {} (not found)",
            Config::default_config_path().display()
        );
    }
    println!();

    println!("data_dir: {}", config.data_dir.value.display());
    println!("  source: {}", config.data_dir.source);
    println!();

    println!("logout_policy: {}", config.logout_policy.value);
    println!("  source: {}", config.logout_policy.source);
    println!();

    println!("water_goal: {}", config.water_goal.value);
    println!("  source: {}", config.water_goal.source);
    println!();

    println!("estimator:");
    println!("  base_url: {}", config.estimator.base_url);
    println!("  model: {}", config.estimator.model);
    println!("  timeout_secs: {}", config.estimator.timeout_secs);
    println!(
        "  api_key: {}",
        if config.estimator.is_configured() {
            "(set)"
        } else {
            "(not set)"
        }
    );
}

/// Writes the default config unless one exists. Returns whether it wrote.
fn init_config_file(config_path: &Path) -> std::io::Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = fs::File::create(config_path)?;
    file.write_all(DEFAULT_CONFIG.as_bytes())?;
    Ok(true)
}
