//! Web skin
//!
//! Grid of buttons with a double-width Clear and a backspace key. The mock
//! DOM lets it render and be tested without a browser; real browser
//! bindings sit behind the `wasm` feature.

#[cfg(feature = "wasm")]
mod browser;
mod app;
mod dom;
mod driver;
mod keypad;

pub use app::WebCalculator;
#[cfg(feature = "wasm")]
pub use browser::BrowserCalculator;
pub use dom::{DomElement, DomEvent, MockDom, DISPLAY_ID, KEYPAD_ID};
pub use driver::{WebDriver, ACTIVE_CLASS};
pub use keypad::{WebButton, WebKey, WebKeypad};
