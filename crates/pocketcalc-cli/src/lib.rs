//! PocketCalc CLI library
//!
//! Command-line front end for the PocketCalc calculator: evaluate key
//! strings, run the terminal skin, and inspect state files.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod commands;
mod config;
mod error;
pub mod logging;
pub mod runner;
pub mod store;
pub mod terminal;

pub use commands::{
    Cli, ColorArg, Commands, ConfigArgs, EvalArgs, RunArgs, SkinArg, StoreArgs, StoreCommand,
};
pub use config::{CliConfig, ColorChoice, Skin, Verbosity};
pub use error::{CliError, CliResult};
pub use runner::{evaluate, parse_keys, run_eval, EvalOutcome, Session, TraceStep};
pub use store::run_store;
pub use terminal::{run_terminal, TerminalSession};
