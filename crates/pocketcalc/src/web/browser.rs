//! Browser bindings for the web skin

use wasm_bindgen::prelude::*;
use web_sys::console;

use super::app::WebCalculator;
use crate::core::CalculatorState;

/// Web calculator exported to JavaScript
#[derive(Debug, Default)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    inner: WebCalculator,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Creates a calculator at the session-start state
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();
        Self::default()
    }

    /// Resumes from a JSON snapshot; falls back to a fresh calculator
    pub fn from_snapshot(json: &str) -> Self {
        console_error_panic_hook::set_once();
        match serde_json::from_str::<CalculatorState>(json) {
            Ok(state) => Self {
                inner: WebCalculator::with_state(state),
            },
            Err(e) => {
                console::warn_1(&format!("ignoring unreadable snapshot: {e}").into());
                Self::default()
            }
        }
    }

    /// Current display text
    #[wasm_bindgen(getter)]
    pub fn display(&self) -> String {
        self.inner.display().to_string()
    }

    /// Handles a button click by element id; returns the display
    pub fn handle_button(&mut self, button_id: &str) -> String {
        self.inner.handle_button(button_id);
        self.display()
    }

    /// Handles a keyboard key by browser key name; returns the display
    pub fn handle_key(&mut self, key: &str) -> String {
        self.inner.handle_key(key);
        self.display()
    }

    /// JSON snapshot of the calculator state
    pub fn snapshot(&self) -> String {
        serde_json::to_string(self.inner.state()).unwrap_or_default()
    }

    /// Button ids in layout order
    pub fn button_ids(&self) -> Vec<String> {
        self.inner
            .keypad()
            .buttons()
            .iter()
            .map(|b| b.id.clone())
            .collect()
    }
}

/// Initializes the module in the browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"pocketcalc initialized".into());
}
