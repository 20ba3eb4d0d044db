//! Mobile application state
//!
//! Owns the calculator state explicitly; rendering reads from it and input
//! handling writes to it through [`MobileApp::press`].

use ratatui::layout::Rect;

use super::input::KeyAction;
use super::keypad::Keypad;
use super::ui;
use crate::core::{CalculatorState, Input};

/// Mobile calculator application state
#[derive(Debug, Default)]
pub struct MobileApp {
    state: CalculatorState,
    keypad: Keypad,
    should_quit: bool,
}

impl MobileApp {
    /// Creates a new app at the session-start state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an app resuming from a saved state
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

    /// Returns the keypad (with its highlight)
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Presses a key: highlights it and applies the transition
    pub fn press(&mut self, input: Input) -> &str {
        self.keypad.highlight(input);
        self.state.apply(input)
    }

    /// Handles a keyboard action; returns the input applied, if any
    pub fn handle_key_action(&mut self, action: KeyAction) -> Option<Input> {
        match action {
            KeyAction::Press(input) => {
                self.press(input);
                Some(input)
            }
            KeyAction::Quit => {
                self.quit();
                None
            }
            KeyAction::None => None,
        }
    }

    /// Handles a mouse click at (`x`, `y`) in a frame of size `frame_area`
    pub fn click(&mut self, frame_area: Rect, x: u16, y: u16) -> Option<Input> {
        let keypad_area = ui::keypad_area(frame_area);
        let index = self.keypad.hit_test(keypad_area, x, y)?;
        let input = self.keypad.get_button(index)?.action;
        self.press(input);
        Some(input)
    }

    /// Short status line describing the pending operation
    #[must_use]
    pub fn status_line(&self) -> String {
        match (self.state.accumulator(), self.state.pending_operation()) {
            (Some(acc), Some(op)) => format!("{} {}", crate::core::format_number(acc), op),
            _ => String::new(),
        }
    }
}
