//! Typed values bound to explicit storage keys

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::{KeyValueStore, StorageError, StorageResult};
use crate::core::{CalculatorState, Input};
use crate::driver::CalculatorDriver;

/// Key the calculator snapshot is stored under
pub const CALCULATOR_KEY: &str = "pocketcalc.state";

/// A value of type `T` stored under one key of `S`
///
/// Values are stored as JSON text, except strings, which are stored raw.
/// Loading tries JSON first and falls back to the raw text, so both forms
/// read back.
#[derive(Debug)]
pub struct Persisted<T, S> {
    key: String,
    initial: T,
    store: S,
}

impl<T, S> Persisted<T, S>
where
    T: Serialize + DeserializeOwned + Clone,
    S: KeyValueStore,
{
    /// Binds `key` in `store`, using `initial` when nothing usable is stored
    pub fn new(store: S, key: impl Into<String>, initial: T) -> Self {
        Self {
            key: key.into(),
            initial,
            store,
        }
    }

    /// Storage key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying store
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the binding, returning the store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Stored value, or the initial value if absent or unreadable
    #[must_use]
    pub fn load(&self) -> T {
        match self.store.get(&self.key) {
            Ok(Some(raw)) => decode(&raw).unwrap_or_else(|e| {
                warn!(key = %self.key, error = %e, "stored value unreadable, using initial value");
                self.initial.clone()
            }),
            Ok(None) => self.initial.clone(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "storage read failed, using initial value");
                self.initial.clone()
            }
        }
    }

    /// Stores `value`, or removes the key for `None`
    ///
    /// # Errors
    ///
    /// Returns the backend error if the write fails.
    pub fn set(&mut self, value: Option<&T>) -> StorageResult<()> {
        match value {
            Some(v) => {
                let raw = encode(v)?;
                debug!(key = %self.key, bytes = raw.len(), "storing value");
                self.store.set(&self.key, &raw)
            }
            None => {
                debug!(key = %self.key, "removing value");
                self.store.remove(&self.key)
            }
        }
    }
}

pub(crate) fn encode<T: Serialize>(value: &T) -> StorageResult<String> {
    match serde_json::to_value(value)? {
        serde_json::Value::String(s) => Ok(s),
        other => Ok(other.to_string()),
    }
}

pub(crate) fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(raw)
        .or_else(|_| serde_json::from_value(serde_json::Value::String(raw.to_string())))
}

/// Calculator whose state is saved after every input
///
/// The in-memory state always advances first; a failed save is logged and
/// kept in [`last_error`](Self::last_error) but never rolls it back.
#[derive(Debug)]
pub struct PersistentCalculator<S> {
    state: CalculatorState,
    persisted: Persisted<CalculatorState, S>,
    last_error: Option<StorageError>,
}

impl<S: KeyValueStore> PersistentCalculator<S> {
    /// Resumes from [`CALCULATOR_KEY`] in `store`
    pub fn open(store: S) -> Self {
        Self::with_key(store, CALCULATOR_KEY)
    }

    /// Resumes from `key` in `store`
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        let persisted = Persisted::new(store, key, CalculatorState::new());
        let state = persisted.load();
        debug!(key = %persisted.key(), display = %state.display(), "resumed calculator");
        Self {
            state,
            persisted,
            last_error: None,
        }
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Current display text
    #[must_use]
    pub fn display(&self) -> &str {
        self.state.display()
    }

    /// The most recent save failure, cleared by the next successful save
    #[must_use]
    pub fn last_error(&self) -> Option<&StorageError> {
        self.last_error.as_ref()
    }

    /// Underlying store
    #[must_use]
    pub fn store(&self) -> &S {
        self.persisted.store()
    }

    /// Consumes the calculator, returning the store
    pub fn into_store(self) -> S {
        self.persisted.into_store()
    }

    /// Applies `input`, then saves
    pub fn press(&mut self, input: Input) -> &str {
        self.state.apply(input);
        self.save();
        self.state.display()
    }

    /// Removes the last display character, then saves
    pub fn backspace(&mut self) -> &str {
        self.state.backspace();
        self.save();
        self.state.display()
    }

    /// Resets to the session-start state and forgets the saved snapshot
    pub fn reset(&mut self) {
        self.state = CalculatorState::new();
        let result = self.persisted.set(None);
        self.record(result);
    }

    fn save(&mut self) {
        let result = self.persisted.set(Some(&self.state));
        self.record(result);
    }

    fn record(&mut self, result: StorageResult<()>) {
        match result {
            Ok(()) => self.last_error = None,
            Err(e) => {
                warn!(
                    key = %self.persisted.key(),
                    error = %e,
                    "failed to persist calculator state"
                );
                self.last_error = Some(e);
            }
        }
    }
}

impl<S: KeyValueStore> CalculatorDriver for PersistentCalculator<S> {
    fn press(&mut self, input: Input) -> String {
        PersistentCalculator::press(self, input).to_string()
    }

    fn display(&self) -> String {
        self.state.display().to_string()
    }

    fn state(&self) -> &CalculatorState {
        &self.state
    }

    fn clear(&mut self) {
        PersistentCalculator::press(self, Input::Clear);
    }
}
