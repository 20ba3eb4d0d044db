//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// PocketCalc: a four-function calculator for the terminal
#[derive(Parser, Debug)]
#[command(name = "pocketcalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, global = true)]
    pub color: Option<ColorArg>,

    /// YAML configuration file
    #[arg(long, global = true, env = "POCKETCALC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate a key string and print the display
    Eval(EvalArgs),

    /// Run the interactive terminal calculator
    Run(RunArgs),

    /// Inspect or edit a JSON state file
    Store(StoreArgs),

    /// Show configuration
    Config(ConfigArgs),
}

/// Arguments for the eval command
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Keys to press, e.g. "12+30=" (whitespace is ignored)
    pub keys: String,

    /// Print the display after every key
    #[arg(long)]
    pub trace: bool,

    /// Resume from and save to this state file
    #[arg(long)]
    pub state_file: Option<PathBuf>,

    /// Skin that receives the keys
    #[arg(long, value_enum)]
    pub skin: Option<SkinArg>,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Resume from and save to this state file
    #[arg(long)]
    pub state_file: Option<PathBuf>,
}

/// Arguments for the store command
#[derive(Parser, Debug)]
pub struct StoreArgs {
    /// State file to operate on
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Store operation
    #[command(subcommand)]
    pub command: StoreCommand,
}

/// Store operations
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum StoreCommand {
    /// Print the raw value stored under a key
    Get {
        /// Entry key
        key: String,
    },
    /// Store a raw value under a key
    Set {
        /// Entry key
        key: String,
        /// Raw value
        value: String,
    },
    /// Remove a key
    Remove {
        /// Entry key
        key: String,
    },
    /// Remove every key
    Clear,
    /// List stored keys
    List,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Show the config file path being used
    #[arg(long)]
    pub path: bool,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Skin argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkinArg {
    /// Phone-style keypad
    Mobile,
    /// Browser keypad driven through a mock DOM
    Web,
}

impl From<SkinArg> for crate::config::Skin {
    fn from(arg: SkinArg) -> Self {
        match arg {
            SkinArg::Mobile => Self::Mobile,
            SkinArg::Web => Self::Web,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::config::{ColorChoice, Skin};

    #[test]
    fn test_parse_eval_command() {
        let cli = Cli::parse_from(["pocketcalc", "eval", "1+2="]);
        match cli.command {
            Commands::Eval(args) => {
                assert_eq!(args.keys, "1+2=");
                assert!(!args.trace);
                assert!(args.state_file.is_none());
                assert!(args.skin.is_none());
            }
            other => panic!("expected eval, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_eval_options() {
        let cli = Cli::parse_from([
            "pocketcalc",
            "eval",
            "9*9=",
            "--trace",
            "--state-file",
            "calc.json",
            "--skin",
            "web",
        ]);
        let Commands::Eval(args) = cli.command else {
            panic!("expected eval");
        };
        assert!(args.trace);
        assert_eq!(args.state_file, Some(PathBuf::from("calc.json")));
        assert_eq!(args.skin, Some(SkinArg::Web));
    }

    #[test]
    fn test_parse_run_command() {
        let cli = Cli::parse_from(["pocketcalc", "run"]);
        assert!(matches!(cli.command, Commands::Run(RunArgs { state_file: None })));
    }

    #[test]
    fn test_parse_store_commands() {
        let cli = Cli::parse_from(["pocketcalc", "store", "--file", "s.json", "set", "k", "v"]);
        let Commands::Store(args) = cli.command else {
            panic!("expected store");
        };
        assert_eq!(args.file, Some(PathBuf::from("s.json")));
        assert_eq!(
            args.command,
            StoreCommand::Set {
                key: "k".to_string(),
                value: "v".to_string()
            }
        );

        let cli = Cli::parse_from(["pocketcalc", "store", "list"]);
        let Commands::Store(args) = cli.command else {
            panic!("expected store");
        };
        assert_eq!(args.command, StoreCommand::List);
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["pocketcalc", "-vv", "--color", "never", "config"]);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
        assert_eq!(cli.color, Some(ColorArg::Never));
        assert!(matches!(cli.command, Commands::Config(_)));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["pocketcalc", "eval", "1", "-q"]);
        assert!(cli.quiet);
    }

    #[test]
    fn test_color_conversion() {
        assert_eq!(ColorChoice::from(ColorArg::Auto), ColorChoice::Auto);
        assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
        assert_eq!(ColorChoice::from(ColorArg::Never), ColorChoice::Never);
    }

    #[test]
    fn test_skin_conversion() {
        assert_eq!(Skin::from(SkinArg::Mobile), Skin::Mobile);
        assert_eq!(Skin::from(SkinArg::Web), Skin::Web);
    }
}
