//! PocketCalc CLI: a four-function calculator for the terminal
//!
//! ## Usage
//!
//! ```bash
//! pocketcalc eval "12+30="                  # Prints 42
//! pocketcalc eval "5/0=" --trace            # Display after every key
//! pocketcalc run --state-file calc.json     # Interactive, resumable
//! pocketcalc store --file calc.json list    # Inspect a state file
//! ```

use clap::Parser;
use pocketcalc_cli::{
    logging, run_eval, run_store, run_terminal, Cli, CliConfig, CliResult, ColorChoice, Commands,
    ConfigArgs, Verbosity,
};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    // Defaults, then the config file, then flags
    let config = build_config(&cli)?;
    logging::init(&config)?;

    match cli.command {
        Commands::Eval(args) => {
            let skin = args.skin.map_or(config.skin, Into::into);
            let state_file = args.state_file.as_deref().or(config.state_file.as_deref());
            run_eval(&args.keys, skin, state_file, args.trace).map(|_| ())
        }
        Commands::Run(args) => {
            run_terminal(args.state_file.as_deref().or(config.state_file.as_deref()))
        }
        Commands::Store(args) => run_store(args.file.as_deref(), &args.command, &config),
        Commands::Config(args) => run_config(cli.config.as_deref(), &config, &args),
    }
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let mut config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::new(),
    };

    if cli.quiet {
        config = config.with_verbosity(Verbosity::Quiet);
    } else if cli.verbose > 0 {
        let verbosity = match cli.verbose {
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        };
        config = config.with_verbosity(verbosity);
    }

    if let Some(color) = cli.color {
        config = config.with_color(ColorChoice::from(color));
    }

    Ok(config)
}

fn run_config(path: Option<&Path>, config: &CliConfig, args: &ConfigArgs) -> CliResult<()> {
    if args.path {
        match path {
            Some(path) => println!("{}", path.display()),
            None => println!("(defaults, no config file)"),
        }
        return Ok(());
    }
    print!("{}", config.to_yaml()?);
    Ok(())
}
