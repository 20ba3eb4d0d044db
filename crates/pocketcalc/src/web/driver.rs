//! Web driver
//!
//! Runs the web calculator against the mock DOM: every event is recorded,
//! handled, and then the display element is brought back in sync.

use super::app::WebCalculator;
use super::dom::{DomEvent, MockDom, DISPLAY_ID};
use super::keypad::WebKey;
use crate::core::{CalculatorState, Input};
use crate::driver::CalculatorDriver;

/// CSS class marking the last key used
pub const ACTIVE_CLASS: &str = "active";

/// Web calculator wired to a mock DOM
#[derive(Debug)]
pub struct WebDriver {
    calculator: WebCalculator,
    dom: MockDom,
}

impl Default for WebDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl WebDriver {
    /// Creates a driver at the session-start state
    #[must_use]
    pub fn new() -> Self {
        Self::with_calculator(WebCalculator::new())
    }

    /// Creates a driver around an existing calculator
    #[must_use]
    pub fn with_calculator(calculator: WebCalculator) -> Self {
        let dom = MockDom::calculator(calculator.keypad().create_keypad_element());
        let mut driver = Self { calculator, dom };
        driver.sync_dom();
        driver
    }

    /// Returns the calculator
    #[must_use]
    pub fn calculator(&self) -> &WebCalculator {
        &self.calculator
    }

    /// Returns the DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// Simulates a click on `element_id`
    pub fn click(&mut self, element_id: &str) -> Option<WebKey> {
        self.dom.dispatch_event(DomEvent::click(element_id));
        let key = self.calculator.handle_button(element_id);
        self.sync_dom();
        key
    }

    /// Simulates a key press by browser key name
    pub fn key_down(&mut self, key_name: &str) -> Option<WebKey> {
        self.dom.dispatch_event(DomEvent::key_down(key_name));
        let key = self.calculator.handle_key(key_name);
        self.sync_dom();
        key
    }

    /// Simulates the ⌫ button
    pub fn click_backspace(&mut self) {
        self.click(&WebKey::Backspace.element_id());
    }

    /// Text of the display element
    #[must_use]
    pub fn display_element_text(&self) -> Option<&str> {
        self.dom.get_element_text(DISPLAY_ID)
    }

    fn sync_dom(&mut self) {
        self.dom
            .set_element_text(DISPLAY_ID, self.calculator.display());
        let active = self.calculator.last_key().map(|k| k.element_id());
        self.dom.set_exclusive_class(active.as_deref(), ACTIVE_CLASS);
    }
}

impl CalculatorDriver for WebDriver {
    fn press(&mut self, input: Input) -> String {
        let key = WebKey::Press(input);
        // Inputs without a button (± and %) still reach the state
        if self.calculator.keypad().find_button(key).is_some() {
            self.click(&key.element_id());
        } else {
            self.calculator.press(input);
            self.sync_dom();
        }
        self.display()
    }

    fn display(&self) -> String {
        self.display_element_text().unwrap_or_default().to_string()
    }

    fn state(&self) -> &CalculatorState {
        self.calculator.state()
    }

    fn clear(&mut self) {
        self.press(Input::Clear);
    }
}
