use anyhow::Result;
use colored::Colorize;

use crate::app::DEFAULT_DELAY;
use crate::cli::ConfigCommands;
use crate::config::{Config, DefaultsConfig};
use crate::render::syntax::CodeStyle;

pub fn run(command: ConfigCommands, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load_or_default();
            config.set(&key, &value)?;
            let path = config.save()?;
            if !quiet {
                println!(
                    "{} {key} = {value} ({})",
                    "Saved".green().bold(),
                    path.display()
                );
            }
            Ok(())
        }
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();
    let defaults = config.defaults.unwrap_or_default();

    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("{}", "(not created yet, showing defaults)".dimmed());
    }
    println!();

    let effective = Config {
        defaults: Some(DefaultsConfig {
            delay: Some(
                defaults
                    .delay
                    .unwrap_or(DEFAULT_DELAY.as_millis() as u64),
            ),
            code_style: Some(
                defaults
                    .code_style
                    .unwrap_or_else(|| CodeStyle::default().name().to_string()),
            ),
        }),
    };
    print!("{}", serde_yaml::to_string(&effective)?);
    Ok(())
}
