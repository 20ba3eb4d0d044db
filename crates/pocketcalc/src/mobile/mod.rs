//! Mobile skin
//!
//! Phone-style keypad rendered in the terminal. No backspace key; the
//! display panel is right-aligned above the grid.

mod app;
mod input;
mod keypad;
mod ui;

pub use app::MobileApp;
pub use input::{InputHandler, KeyAction};
pub use keypad::{KeyKind, Keypad, KeypadButton, KeypadWidget};
pub use ui::{keypad_area, layout, render, CalculatorUI, HELP_LINE, TITLE};
