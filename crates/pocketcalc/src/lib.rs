//! PocketCalc - a four-function calculator with two skins
//!
//! One arithmetic core drives a phone-style terminal skin and a web skin.
//! Both skins are thin adapters: they turn clicks and key presses into
//! [`core::Input`] events and show whatever display text the core returns.
//! A small persistence shim lets either skin resume where it left off.
//!
//! # Example
//!
//! ```rust
//! use pocketcalc::prelude::*;
//!
//! let mut calc = CalculatorState::new();
//! for key in "12+30=".chars() {
//!     calc.apply(Input::from_key(key).unwrap());
//! }
//! assert_eq!(calc.display(), "42");
//!
//! // Division by zero is not an error: it shows Infinity
//! calc.clear();
//! for key in "5/0=".chars() {
//!     calc.apply(Input::from_key(key).unwrap());
//! }
//! assert_eq!(calc.display(), "Infinity");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod driver;

#[cfg(feature = "tui")]
pub mod mobile;

/// Web skin - always available; the mock DOM needs no browser
pub mod web;

pub mod storage;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::{
        format_number, parse_display, transition, CalculatorState, Input, Operation,
    };
    pub use crate::driver::CalculatorDriver;
    pub use crate::storage::{
        JsonFileStore, KeyValueStore, MemoryStore, Persisted, PersistentCalculator,
        StorageError,
    };
    pub use crate::web::{WebCalculator, WebDriver, WebKey};

    #[cfg(feature = "tui")]
    pub use crate::driver::MobileDriver;
    #[cfg(feature = "tui")]
    pub use crate::mobile::MobileApp;

    #[cfg(feature = "bridge")]
    pub use crate::storage::bridge::{ChannelBridge, HostBridge, RemoteValue};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let (state, display) = transition(&CalculatorState::new(), Input::Digit(3));
        assert_eq!(display, "3");
        assert_eq!(state.value(), 3.0);
    }

    #[test]
    fn test_skins_agree() {
        let mut web = WebDriver::new();
        let keys = "12.5*4-1=";
        let expected = web.press_keys(keys);
        assert_eq!(expected, "49");

        #[cfg(feature = "tui")]
        {
            let mut mobile = MobileDriver::new();
            assert_eq!(mobile.press_keys(keys), expected);
            assert_eq!(mobile.state(), web.state());
        }
    }

    #[test]
    fn test_persistence_through_prelude() {
        let mut calc = PersistentCalculator::open(MemoryStore::new());
        calc.press(Input::Operator(Operation::Add));
        assert!(calc.last_error().is_none());
        assert_eq!(format_number(parse_display(calc.display())), "0");
    }
}
