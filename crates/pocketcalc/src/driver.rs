//! Unified calculator driver
//!
//! Both skins are thin adapters over [`CalculatorState`]. This module defines
//! the interface they share and a set of behaviour checks that run unchanged
//! against either one: write the check once, run it on every skin.

use crate::core::{CalculatorState, Input, Operation};

/// Abstract driver for calculator interactions
///
/// # Example
///
/// ```rust
/// use pocketcalc::driver::{verify_basic_arithmetic, CalculatorDriver};
/// use pocketcalc::web::WebDriver;
///
/// let mut driver = WebDriver::new();
/// verify_basic_arithmetic(&mut driver);
/// ```
pub trait CalculatorDriver {
    /// Delivers one input and returns the display afterwards
    fn press(&mut self, input: Input) -> String;

    /// Text the skin currently shows
    fn display(&self) -> String;

    /// Arithmetic state behind the skin
    fn state(&self) -> &CalculatorState;

    /// Resets the skin to its session-start state
    fn clear(&mut self);

    /// Presses every recognised key in `keys` (see [`Input::from_key`]).
    ///
    /// Unrecognised characters, including whitespace, are skipped.
    fn press_keys(&mut self, keys: &str) -> String {
        for input in keys.chars().filter_map(Input::from_key) {
            self.press(input);
        }
        self.display()
    }
}

/// Mobile skin driver implementation
#[cfg(feature = "tui")]
pub mod mobile_driver {
    use super::CalculatorDriver;
    use crate::core::{CalculatorState, Input};
    use crate::mobile::MobileApp;

    /// Driver wrapping the mobile app
    #[derive(Debug, Default)]
    pub struct MobileDriver {
        app: MobileApp,
    }

    impl MobileDriver {
        /// Creates a new mobile driver
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a mobile driver with an existing app
        #[must_use]
        pub fn with_app(app: MobileApp) -> Self {
            Self { app }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub fn app(&self) -> &MobileApp {
            &self.app
        }

        /// Returns a mutable reference to the underlying app
        pub fn app_mut(&mut self) -> &mut MobileApp {
            &mut self.app
        }
    }

    impl CalculatorDriver for MobileDriver {
        fn press(&mut self, input: Input) -> String {
            self.app.press(input).to_string()
        }

        fn display(&self) -> String {
            self.app.display().to_string()
        }

        fn state(&self) -> &CalculatorState {
            self.app.state()
        }

        fn clear(&mut self) {
            self.app.press(Input::Clear);
        }
    }
}

#[cfg(feature = "tui")]
pub use mobile_driver::MobileDriver;

// ===== Shared behaviour checks =====
// Every check starts by clearing, so they can run back to back on one driver.

/// Digits concatenate and a leading zero collapses
pub fn verify_digit_entry<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    for d in [1, 2, 3] {
        driver.press(Input::Digit(d));
    }
    assert_eq!(driver.display(), "123");

    driver.clear();
    driver.press(Input::Digit(0));
    driver.press(Input::Digit(5));
    assert_eq!(driver.display(), "5");
}

/// Each operator computes its result on equals
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    let cases = [
        ("5+3=", "8"),
        ("10-4=", "6"),
        ("6*7=", "42"),
        ("20/4=", "5"),
        ("7/2=", "3.5"),
    ];
    for (keys, expected) in cases {
        driver.clear();
        assert_eq!(driver.press_keys(keys), expected, "keys: {keys}");
    }
}

/// Operator presses fold the running total without precedence
pub fn verify_chained_operations<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    assert_eq!(driver.press_keys("2+3+"), "5");
    assert_eq!(driver.press_keys("4="), "9");

    driver.clear();
    assert_eq!(driver.press_keys("2+3*4="), "20");
}

/// Division by zero shows a non-finite value instead of failing
pub fn verify_divide_by_zero<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press(Input::Digit(5));
    driver.press(Input::Operator(Operation::Divide));
    driver.press(Input::Digit(0));
    driver.press(Input::Equals);
    assert_eq!(driver.display(), "Infinity");
    assert!(driver.state().value().is_infinite());
}

/// A second decimal point in the same number is ignored
pub fn verify_decimal_point<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press(Input::Digit(1));
    driver.press(Input::Decimal);
    driver.press(Input::Decimal);
    driver.press(Input::Digit(5));
    assert_eq!(driver.display(), "1.5");
}

/// ± does nothing on a bare zero and toggles otherwise
pub fn verify_toggle_sign<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press(Input::ToggleSign);
    assert_eq!(driver.display(), "0");

    driver.press(Input::Digit(9));
    driver.press(Input::ToggleSign);
    assert_eq!(driver.display(), "-9");
}

/// % divides the display by 100
pub fn verify_percent<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    assert_eq!(driver.press_keys("50%"), "0.5");
}

/// Equals without a pending operator changes nothing
pub fn verify_repeated_equals<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys("5+3=");
    let snapshot = driver.state().clone();
    driver.press(Input::Equals);
    assert_eq!(driver.display(), "8");
    assert_eq!(driver.state(), &snapshot);
}

/// Clear returns to the session-start state from anywhere
pub fn verify_clear<D: CalculatorDriver>(driver: &mut D) {
    driver.press_keys("12.5*3+");
    driver.clear();
    assert!(driver.state().is_initial());
    assert_eq!(driver.display(), "0");
}

/// Runs every shared behaviour check
pub fn verify_all<D: CalculatorDriver>(driver: &mut D) {
    verify_digit_entry(driver);
    verify_basic_arithmetic(driver);
    verify_chained_operations(driver);
    verify_divide_by_zero(driver);
    verify_decimal_point(driver);
    verify_toggle_sign(driver);
    verify_percent(driver);
    verify_repeated_equals(driver);
    verify_clear(driver);
}
