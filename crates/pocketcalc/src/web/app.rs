//! Web calculator state holder

use super::keypad::{WebKey, WebKeypad};
use crate::core::{CalculatorState, Input};

/// Web skin: calculator state plus the web keypad
#[derive(Debug, Clone, Default)]
pub struct WebCalculator {
    state: CalculatorState,
    keypad: WebKeypad,
    last_key: Option<WebKey>,
}

impl WebCalculator {
    /// Creates a calculator at the session-start state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a calculator resuming from a saved state
    #[must_use]
    pub fn with_state(state: CalculatorState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    /// Returns the calculator state
    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Returns the display text
    #[must_use]
    pub fn display(&self) -> &str {
        self.state.display()
    }

    /// Returns the keypad
    #[must_use]
    pub fn keypad(&self) -> &WebKeypad {
        &self.keypad
    }

    /// The most recently handled key
    #[must_use]
    pub fn last_key(&self) -> Option<WebKey> {
        self.last_key
    }

    /// Applies a key and returns the display afterwards
    pub fn apply(&mut self, key: WebKey) -> &str {
        self.last_key = Some(key);
        match key {
            WebKey::Press(input) => self.state.apply(input),
            WebKey::Backspace => {
                self.state.backspace();
                self.state.display()
            }
        }
    }

    /// Delivers one state-machine input
    pub fn press(&mut self, input: Input) -> &str {
        self.apply(WebKey::Press(input))
    }

    /// Removes the last display character
    pub fn backspace(&mut self) -> &str {
        self.apply(WebKey::Backspace)
    }

    /// Handles a click on a keypad button; `None` if the id is not a button
    pub fn handle_button(&mut self, element_id: &str) -> Option<WebKey> {
        let key = self.keypad.handle_click(element_id)?;
        self.apply(key);
        Some(key)
    }

    /// Handles a keyboard key by browser key name; `None` if unmapped
    pub fn handle_key(&mut self, key_name: &str) -> Option<WebKey> {
        let key = WebKeypad::key_to_action(key_name)?;
        self.apply(key);
        Some(key)
    }
}
