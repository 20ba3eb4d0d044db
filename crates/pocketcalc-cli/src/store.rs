//! The `store` command: direct access to a JSON state file

use crate::commands::StoreCommand;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use pocketcalc::storage::{JsonFileStore, KeyValueStore};
use std::path::{Path, PathBuf};
use tracing::info;

/// State file for `store`: the flag wins over the configured default
pub fn resolve_path(file: Option<&Path>, config: &CliConfig) -> CliResult<PathBuf> {
    file.or(config.state_file.as_deref())
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            CliError::invalid_argument("no state file: pass --file or set state_file in the config")
        })
}

/// Applies `command` to `store`, returning the lines to print
pub fn apply(store: &mut JsonFileStore, command: &StoreCommand) -> CliResult<Vec<String>> {
    match command {
        StoreCommand::Get { key } => match store.get(key)? {
            Some(value) => Ok(vec![value]),
            None => Err(CliError::invalid_argument(format!("no value stored under '{key}'"))),
        },
        StoreCommand::Set { key, value } => {
            store.set(key, value)?;
            info!(key = %key, "stored value");
            Ok(Vec::new())
        }
        StoreCommand::Remove { key } => {
            store.remove(key)?;
            info!(key = %key, "removed value");
            Ok(Vec::new())
        }
        StoreCommand::Clear => {
            store.clear()?;
            info!(path = %store.path().display(), "cleared store");
            Ok(Vec::new())
        }
        StoreCommand::List => Ok(store.keys().map(str::to_string).collect()),
    }
}

/// Runs `store`
pub fn run_store(file: Option<&Path>, command: &StoreCommand, config: &CliConfig) -> CliResult<()> {
    let path = resolve_path(file, config)?;
    let mut store = JsonFileStore::open(&path)?;
    for line in apply(&mut store, command)? {
        println!("{line}");
    }
    Ok(())
}
