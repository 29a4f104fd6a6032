mod app;
mod banner;
mod cli;
mod commands;
mod config;
mod deck;
mod input;
mod logging;
mod parser;
mod render;
mod terminal;

use clap::Parser;
use colored::Colorize;

fn main() {
    let cli = cli::Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match logging::init(cli.verbose) {
        Ok(Some(path)) if !cli.quiet => {
            eprintln!("{} {}", "Logging to".dimmed(), path.display());
        }
        Ok(_) => {}
        Err(e) => eprintln!("{} {e:#}", "Warning: logging disabled:".yellow()),
    }

    if let Err(e) = cli.run() {
        tracing::error!("{e:#}");
        eprintln!("{} {e:#}", "Error:".red().bold());
        std::process::exit(1);
    }
}
