use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "termdeck")]
#[command(author, version, about)]
#[command(long_about = "A terminal slide presentation player.\n\n\
    Write a deck as plain text, present it full-screen in your terminal, \
    and edit it while presenting: the deck reloads on the next keypress.\n\n\
    Examples:\n  \
    termdeck talk.deck              Present a deck\n  \
    termdeck talk.deck --slide 4    Open on the fourth slide\n  \
    termdeck talk.deck --delay 0    Draw slides instantly\n  \
    termdeck spec                   Print the deck format reference")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Deck file to present
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Start on a specific slide (1-indexed)
    #[arg(long)]
    pub slide: Option<usize>,

    /// Milliseconds between characters while drawing a slide (0 draws instantly)
    #[arg(long, value_name = "MS")]
    pub delay: Option<u64>,

    /// Write a debug log (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the deck file format reference
    Spec {
        /// Print a concise quick-reference card instead of the full reference
        #[arg(long)]
        short: bool,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (defaults.delay, defaults.code_style)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Config { command }) => crate::commands::config::run(command, self.quiet),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Spec { short }) => {
                crate::commands::spec::run(short);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::banner::print_banner_with_version();
                Ok(())
            }
            None => {
                if let Some(file) = self.file {
                    if !file.exists() {
                        anyhow::bail!("File not found: {}", file.display());
                    }
                    crate::app::run(file, self.slide, self.delay.map(Duration::from_millis))
                } else {
                    use clap::CommandFactory;
                    let mut cmd = Self::command();
                    cmd.print_help()?;
                    println!();
                    Ok(())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_present_flags() {
        let cli = Cli::try_parse_from(["termdeck", "talk.deck", "--slide", "3", "--delay", "0", "-vv"])
            .unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("talk.deck")));
        assert_eq!(cli.slide, Some(3));
        assert_eq!(cli.delay, Some(0));
        assert_eq!(cli.verbose, 2);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_config_set_subcommand() {
        let cli =
            Cli::try_parse_from(["termdeck", "config", "set", "defaults.delay", "2"]).unwrap();
        match cli.command {
            Some(Commands::Config {
                command: ConfigCommands::Set { key, value },
            }) => {
                assert_eq!(key, "defaults.delay");
                assert_eq!(value, "2");
            }
            _ => panic!("expected config set"),
        }
    }

    #[test]
    fn test_rejects_non_numeric_slide() {
        assert!(Cli::try_parse_from(["termdeck", "talk.deck", "--slide", "two"]).is_err());
    }
}
