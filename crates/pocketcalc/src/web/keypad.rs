//! Web keypad
//!
//! Layout:
//! ```text
//! [   Clear   ] [ ⌫ ] [ ÷ ]
//! [ 7 ] [ 8 ] [ 9 ]   [ × ]
//! [ 4 ] [ 5 ] [ 6 ]   [ - ]
//! [ 1 ] [ 2 ] [ 3 ]   [ + ]
//! [     0     ] [ . ] [ = ]
//! ```

use super::dom::{DomElement, KEYPAD_ID};
use crate::core::{Input, Operation};

/// What a web key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebKey {
    /// Delivers a state-machine input
    Press(Input),
    /// Removes the last display character
    Backspace,
}

impl WebKey {
    /// Text printed on the button
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Press(Input::Clear) => "Clear".to_string(),
            Self::Press(input) => input.label(),
            Self::Backspace => "⌫".to_string(),
        }
    }

    /// DOM element id of the button
    #[must_use]
    pub fn element_id(&self) -> String {
        match self {
            Self::Press(Input::Digit(d)) => format!("btn-{d}"),
            Self::Press(Input::Decimal) => "btn-decimal".to_string(),
            Self::Press(Input::Operator(op)) => format!("btn-{}", op_name(*op)),
            Self::Press(Input::Equals) => "btn-equals".to_string(),
            Self::Press(Input::Clear) => "btn-clear".to_string(),
            Self::Press(Input::ToggleSign) => "btn-sign".to_string(),
            Self::Press(Input::Percent) => "btn-percent".to_string(),
            Self::Backspace => "btn-backspace".to_string(),
        }
    }

    /// CSS class for the button colour
    #[must_use]
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Press(Input::Operator(_)) => "key-operator",
            Self::Press(Input::Equals) => "key-equals",
            Self::Press(Input::Clear) | Self::Backspace => "key-function",
            Self::Press(_) => "key-number",
        }
    }
}

fn op_name(op: Operation) -> &'static str {
    match op {
        Operation::Add => "plus",
        Operation::Subtract => "minus",
        Operation::Multiply => "times",
        Operation::Divide => "divide",
    }
}

/// A single web keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebButton {
    /// What the button does
    pub key: WebKey,
    /// The DOM element ID for this button
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Leftmost grid column (0-indexed)
    pub col: usize,
    /// Number of columns covered
    pub span: usize,
}

impl WebButton {
    /// Creates a single-width button
    #[must_use]
    pub fn new(key: WebKey, row: usize, col: usize) -> Self {
        Self {
            id: key.element_id(),
            key,
            row,
            col,
            span: 1,
        }
    }

    /// Makes the button cover `span` columns
    #[must_use]
    pub fn wide(mut self, span: usize) -> Self {
        self.span = span;
        self
    }

    /// True if the button covers grid cell (`row`, `col`)
    #[must_use]
    pub fn covers(&self, row: usize, col: usize) -> bool {
        self.row == row && col >= self.col && col < self.col + self.span
    }
}

/// Web keypad layout: 5 rows by 4 columns
#[derive(Debug, Clone)]
pub struct WebKeypad {
    buttons: Vec<WebButton>,
    cols: usize,
    rows: usize,
}

impl Default for WebKeypad {
    fn default() -> Self {
        Self::new()
    }
}

impl WebKeypad {
    /// Creates the standard web keypad
    #[must_use]
    pub fn new() -> Self {
        use WebKey::{Backspace, Press};

        let mut buttons = vec![
            WebButton::new(Press(Input::Clear), 0, 0).wide(2),
            WebButton::new(Backspace, 0, 2),
            WebButton::new(Press(Input::Operator(Operation::Divide)), 0, 3),
        ];

        let digit_rows = [[7, 8, 9], [4, 5, 6], [1, 2, 3]];
        let side_ops = [Operation::Multiply, Operation::Subtract, Operation::Add];
        for (i, (digits, op)) in digit_rows.iter().zip(side_ops).enumerate() {
            let row = i + 1;
            for (col, d) in digits.iter().enumerate() {
                buttons.push(WebButton::new(Press(Input::Digit(*d)), row, col));
            }
            buttons.push(WebButton::new(Press(Input::Operator(op)), row, 3));
        }

        buttons.push(WebButton::new(Press(Input::Digit(0)), 4, 0).wide(2));
        buttons.push(WebButton::new(Press(Input::Decimal), 4, 2));
        buttons.push(WebButton::new(Press(Input::Equals), 4, 3));

        Self {
            buttons,
            cols: 4,
            rows: 5,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all buttons
    #[must_use]
    pub fn buttons(&self) -> &[WebButton] {
        &self.buttons
    }

    /// Gets the button covering grid cell (`row`, `col`)
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&WebButton> {
        self.buttons.iter().find(|b| b.covers(row, col))
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&WebButton> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds the button for `key`
    #[must_use]
    pub fn find_button(&self, key: WebKey) -> Option<&WebButton> {
        self.buttons.iter().find(|b| b.key == key)
    }

    /// Creates DOM elements for all buttons
    #[must_use]
    pub fn create_dom_elements(&self) -> Vec<DomElement> {
        self.buttons
            .iter()
            .map(|btn| {
                let mut elem = DomElement::new("button")
                    .with_id(&btn.id)
                    .with_text(&btn.key.label())
                    .with_class("keypad-btn")
                    .with_class(btn.key.css_class())
                    .with_attr("data-row", &btn.row.to_string())
                    .with_attr("data-col", &btn.col.to_string());
                if btn.span > 1 {
                    elem = elem.with_class(&format!("col-span-{}", btn.span));
                }
                elem
            })
            .collect()
    }

    /// Creates the keypad container element with all buttons
    #[must_use]
    pub fn create_keypad_element(&self) -> DomElement {
        self.create_dom_elements().into_iter().fold(
            DomElement::new("div").with_id(KEYPAD_ID).with_class("keypad"),
            DomElement::with_child,
        )
    }

    /// Maps a click on `element_id` to a key
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<WebKey> {
        self.find_button_by_id(element_id).map(|btn| btn.key)
    }

    /// Maps a browser key name to a key
    #[must_use]
    pub fn key_to_action(key: &str) -> Option<WebKey> {
        match key {
            "Enter" => Some(WebKey::Press(Input::Equals)),
            "Escape" | "Delete" => Some(WebKey::Press(Input::Clear)),
            "Backspace" => Some(WebKey::Backspace),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Input::from_key(c).map(WebKey::Press),
                    _ => None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypad_layout() {
        let keypad = WebKeypad::new();
        assert_eq!(keypad.button_count(), 18);
        assert_eq!(keypad.dimensions(), (5, 4));
        for row in 0..5 {
            for col in 0..4 {
                assert!(keypad.get_button_at(row, col).is_some(), "({row},{col})");
            }
        }
    }

    #[test]
    fn test_top_row() {
        let keypad = WebKeypad::new();
        let labels: Vec<String> = [0, 2, 3]
            .iter()
            .map(|&c| keypad.get_button_at(0, c).unwrap().key.label())
            .collect();
        assert_eq!(labels, ["Clear", "⌫", "÷"]);
        assert_eq!(
            keypad.get_button_at(0, 1).unwrap().key,
            WebKey::Press(Input::Clear)
        );
    }

    #[test]
    fn test_no_sign_or_percent_buttons() {
        let keypad = WebKeypad::new();
        assert!(keypad.find_button(WebKey::Press(Input::ToggleSign)).is_none());
        assert!(keypad.find_button(WebKey::Press(Input::Percent)).is_none());
    }

    #[test]
    fn test_button_ids_unique() {
        let keypad = WebKeypad::new();
        let mut ids: Vec<&str> = keypad.buttons().iter().map(|b| b.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), keypad.button_count());
    }

    #[test]
    fn test_handle_click() {
        let keypad = WebKeypad::new();
        assert_eq!(
            keypad.handle_click("btn-7"),
            Some(WebKey::Press(Input::Digit(7)))
        );
        assert_eq!(
            keypad.handle_click("btn-times"),
            Some(WebKey::Press(Input::Operator(Operation::Multiply)))
        );
        assert_eq!(keypad.handle_click("btn-backspace"), Some(WebKey::Backspace));
        assert_eq!(keypad.handle_click("btn-unknown"), None);
    }

    #[test]
    fn test_key_to_action() {
        assert_eq!(
            WebKeypad::key_to_action("Enter"),
            Some(WebKey::Press(Input::Equals))
        );
        assert_eq!(
            WebKeypad::key_to_action("Escape"),
            Some(WebKey::Press(Input::Clear))
        );
        assert_eq!(
            WebKeypad::key_to_action("Delete"),
            Some(WebKey::Press(Input::Clear))
        );
        assert_eq!(WebKeypad::key_to_action("Backspace"), Some(WebKey::Backspace));
        assert_eq!(
            WebKeypad::key_to_action("5"),
            Some(WebKey::Press(Input::Digit(5)))
        );
        assert_eq!(
            WebKeypad::key_to_action("/"),
            Some(WebKey::Press(Input::Operator(Operation::Divide)))
        );
        assert_eq!(WebKeypad::key_to_action("Shift"), None);
        assert_eq!(WebKeypad::key_to_action("z"), None);
    }

    #[test]
    fn test_create_keypad_element() {
        let keypad = WebKeypad::new();
        let elem = keypad.create_keypad_element();
        assert_eq!(elem.id, KEYPAD_ID);
        assert_eq!(elem.children.len(), 18);
        let zero = elem.children.iter().find(|c| c.id == "btn-0").unwrap();
        assert!(zero.has_class("col-span-2"));
        assert!(zero.has_class("key-number"));
        let plus = elem.children.iter().find(|c| c.id == "btn-plus").unwrap();
        assert!(plus.has_class("key-operator"));
    }
}
