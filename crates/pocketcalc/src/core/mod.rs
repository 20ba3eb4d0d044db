//! Calculator state machine
//!
//! A small, deterministic reducer: `(state, input) -> (state, display)`.
//! There is no error type here because every transition is total; numeric
//! edge cases surface as `Infinity`/`NaN` text on the display.

mod number;
mod operations;

pub use number::{format_number, parse_display};
pub use operations::Operation;

use serde::{Deserialize, Serialize};

/// Display text of a freshly cleared calculator
pub const INITIAL_DISPLAY: &str = "0";

/// A discrete user intent emitted by a skin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Input {
    /// A digit key (0-9). Values above 9 are ignored.
    Digit(u8),
    /// The decimal point key
    Decimal,
    /// The ± key
    ToggleSign,
    /// The % key
    Percent,
    /// One of the four operator keys
    Operator(Operation),
    /// The = key
    Equals,
    /// The clear key
    Clear,
}

impl Input {
    /// Maps a typed character to an input.
    ///
    /// Digits, `.`, the operator characters accepted by
    /// [`Operation::from_char`], `=`, `%`, `~`/`±` (sign) and `c`/`C` (clear).
    #[must_use]
    pub fn from_key(c: char) -> Option<Self> {
        if let Some(d) = c.to_digit(10) {
            return Some(Self::Digit(d as u8));
        }
        match c {
            '.' | ',' => Some(Self::Decimal),
            '=' => Some(Self::Equals),
            '%' => Some(Self::Percent),
            '~' | '±' => Some(Self::ToggleSign),
            'c' | 'C' => Some(Self::Clear),
            other => Operation::from_char(other).map(Self::Operator),
        }
    }

    /// Returns the keypad label for this input
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::ToggleSign => "±".to_string(),
            Self::Percent => "%".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::Clear => "C".to_string(),
        }
    }
}

/// Complete arithmetic state of one calculator session.
///
/// Mutated only through [`CalculatorState::apply`] (or the per-key methods it
/// dispatches to). Serialises to a compact JSON snapshot for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    /// Text currently shown; may carry a trailing `.` while typing
    display: String,
    /// Left operand captured before the pending operator
    #[serde(with = "number::optional_number_text", default)]
    accumulator: Option<f64>,
    /// Operator selected but not yet applied
    #[serde(default)]
    pending: Option<Operation>,
    /// Next digit starts a fresh number
    #[serde(default)]
    awaiting_operand: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorState {
    /// Creates the session-start state: display `0`, nothing pending
    #[must_use]
    pub fn new() -> Self {
        Self {
            display: INITIAL_DISPLAY.to_string(),
            accumulator: None,
            pending: None,
            awaiting_operand: false,
        }
    }

    /// Text to show on the display
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Stored left-hand operand, if an operator is pending
    #[must_use]
    pub fn accumulator(&self) -> Option<f64> {
        self.accumulator
    }

    /// Operator waiting for its right-hand operand
    #[must_use]
    pub fn pending_operation(&self) -> Option<Operation> {
        self.pending
    }

    /// True right after an operator or equals press
    #[must_use]
    pub fn is_awaiting_operand(&self) -> bool {
        self.awaiting_operand
    }

    /// Numeric value of the display
    #[must_use]
    pub fn value(&self) -> f64 {
        parse_display(&self.display)
    }

    /// True when the state equals the session-start state
    #[must_use]
    pub fn is_initial(&self) -> bool {
        self.display == INITIAL_DISPLAY
            && self.accumulator.is_none()
            && self.pending.is_none()
            && !self.awaiting_operand
    }

    /// Applies one input and returns the new display text
    pub fn apply(&mut self, input: Input) -> &str {
        match input {
            Input::Digit(d) => self.digit(d),
            Input::Decimal => self.decimal_point(),
            Input::ToggleSign => self.toggle_sign(),
            Input::Percent => self.percent(),
            Input::Operator(op) => self.operator(op),
            Input::Equals => self.equals(),
            Input::Clear => self.clear(),
        }
        tracing::trace!(
            ?input,
            display = %self.display,
            accumulator = ?self.accumulator,
            pending = ?self.pending,
            awaiting = self.awaiting_operand,
            "calculator transition"
        );
        &self.display
    }

    /// Digit key: start a new number or extend the current one
    pub fn digit(&mut self, d: u8) {
        let Some(ch) = char::from_digit(u32::from(d), 10) else {
            return;
        };

        if self.awaiting_operand {
            self.display = ch.to_string();
            self.awaiting_operand = false;
        } else if self.display == INITIAL_DISPLAY {
            self.display = ch.to_string();
        } else {
            self.display.push(ch);
        }
    }

    /// Decimal key: at most one `.` per number
    pub fn decimal_point(&mut self) {
        if self.awaiting_operand {
            self.display = "0.".to_string();
            self.awaiting_operand = false;
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    /// ± key: toggles a leading `-`, except on a bare `0`
    pub fn toggle_sign(&mut self) {
        if self.display == INITIAL_DISPLAY {
            return;
        }
        if let Some(rest) = self.display.strip_prefix('-') {
            self.display = rest.to_string();
        } else {
            self.display.insert(0, '-');
        }
    }

    /// % key: divides the displayed value by 100
    pub fn percent(&mut self) {
        self.display = format_number(self.value() / 100.0);
    }

    /// Operator key: folds any pending operation into the running total
    pub fn operator(&mut self, op: Operation) {
        let input = self.value();

        match (self.accumulator, self.pending) {
            (None, _) => self.accumulator = Some(input),
            (Some(acc), Some(pending)) => {
                let result = pending.apply(acc, input);
                self.display = format_number(result);
                self.accumulator = Some(result);
            }
            (Some(_), None) => {}
        }

        self.awaiting_operand = true;
        self.pending = Some(op);
    }

    /// = key: completes the pending operation; no-op when nothing is pending
    pub fn equals(&mut self) {
        let (Some(acc), Some(pending)) = (self.accumulator, self.pending) else {
            return;
        };

        let result = pending.apply(acc, self.value());
        self.display = format_number(result);
        self.accumulator = None;
        self.pending = None;
        self.awaiting_operand = true;
    }

    /// Clear key: back to the session-start state
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Deletes the last typed character (web skin ⌫ key).
    ///
    /// A bare `0` is left alone. An emptied display, or one left holding only
    /// a sign, becomes `0`. Operator state is untouched.
    pub fn backspace(&mut self) {
        if self.display == INITIAL_DISPLAY {
            return;
        }
        self.display.pop();
        if self.display.is_empty() || self.display == "-" {
            self.display = INITIAL_DISPLAY.to_string();
        }
    }
}

/// Pure transition: returns the next state and the text to display.
///
/// The input state is left untouched, so callers can keep the previous
/// snapshot (for persistence or rendering diffs) without cloning first.
#[must_use]
pub fn transition(state: &CalculatorState, input: Input) -> (CalculatorState, String) {
    let mut next = state.clone();
    let display = next.apply(input).to_string();
    (next, display)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press_all(inputs: &[Input]) -> CalculatorState {
        let mut state = CalculatorState::new();
        for input in inputs {
            state.apply(*input);
        }
        state
    }

    fn keys(s: &str) -> CalculatorState {
        let inputs: Vec<Input> = s.chars().filter_map(Input::from_key).collect();
        press_all(&inputs)
    }

    // ===== Initial state =====

    #[test]
    fn test_new_state() {
        let state = CalculatorState::new();
        assert_eq!(state.display(), "0");
        assert_eq!(state.accumulator(), None);
        assert_eq!(state.pending_operation(), None);
        assert!(!state.is_awaiting_operand());
        assert!(state.is_initial());
    }

    #[test]
    fn test_default_is_new() {
        assert_eq!(CalculatorState::default(), CalculatorState::new());
    }

    // ===== Digits =====

    #[test]
    fn test_digits_concatenate() {
        let state = press_all(&[Input::Digit(1), Input::Digit(2), Input::Digit(3)]);
        assert_eq!(state.display(), "123");
    }

    #[test]
    fn test_leading_zero_collapses() {
        let state = press_all(&[Input::Digit(0), Input::Digit(0), Input::Digit(7)]);
        assert_eq!(state.display(), "7");
    }

    #[test]
    fn test_digit_out_of_range_is_ignored() {
        let state = press_all(&[Input::Digit(4), Input::Digit(12)]);
        assert_eq!(state.display(), "4");
    }

    #[test]
    fn test_digit_after_operator_starts_fresh() {
        let state = keys("12+3");
        assert_eq!(state.display(), "3");
        assert!(!state.is_awaiting_operand());
    }

    // ===== Decimal point =====

    #[test]
    fn test_decimal_pressed_twice_is_ignored() {
        let state = keys("1..5");
        assert_eq!(state.display(), "1.5");
    }

    #[test]
    fn test_decimal_on_initial_display() {
        let state = keys(".");
        assert_eq!(state.display(), "0.");
    }

    #[test]
    fn test_decimal_after_operator_starts_zero_point() {
        let state = keys("4+.");
        assert_eq!(state.display(), "0.");
        assert!(!state.is_awaiting_operand());
    }

    #[test]
    fn test_digit_after_zero_point_appends() {
        let state = keys(".5");
        assert_eq!(state.display(), "0.5");
    }

    // ===== Sign toggle =====

    #[test]
    fn test_toggle_sign_on_zero_is_noop() {
        let state = press_all(&[Input::ToggleSign]);
        assert_eq!(state.display(), "0");
    }

    #[test]
    fn test_toggle_sign_round_trip() {
        let mut state = keys("42");
        state.apply(Input::ToggleSign);
        assert_eq!(state.display(), "-42");
        state.apply(Input::ToggleSign);
        assert_eq!(state.display(), "42");
    }

    #[test]
    fn test_toggle_sign_keeps_trailing_point() {
        let state = keys("3.~");
        assert_eq!(state.display(), "-3.");
    }

    // ===== Percent =====

    #[test]
    fn test_percent_divides_by_hundred() {
        let state = keys("50%");
        assert_eq!(state.display(), "0.5");
    }

    #[test]
    fn test_percent_leaves_operator_state() {
        let state = keys("8+50%");
        assert_eq!(state.display(), "0.5");
        assert_eq!(state.accumulator(), Some(8.0));
        assert_eq!(state.pending_operation(), Some(Operation::Add));
    }

    // ===== Operators =====

    #[test]
    fn test_first_operator_captures_accumulator() {
        let state = keys("5+");
        assert_eq!(state.accumulator(), Some(5.0));
        assert_eq!(state.pending_operation(), Some(Operation::Add));
        assert!(state.is_awaiting_operand());
        assert_eq!(state.display(), "5");
    }

    #[test]
    fn test_addition() {
        assert_eq!(keys("5+3=").display(), "8");
    }

    #[test]
    fn test_subtraction_below_zero() {
        assert_eq!(keys("3-5=").display(), "-2");
    }

    #[test]
    fn test_multiplication() {
        assert_eq!(keys("6*7=").display(), "42");
    }

    #[test]
    fn test_division() {
        assert_eq!(keys("7/2=").display(), "3.5");
    }

    #[test]
    fn test_chained_operators_fold() {
        let mut state = keys("2+3+");
        assert_eq!(state.display(), "5");
        assert_eq!(state.accumulator(), Some(5.0));
        state.apply(Input::Digit(4));
        state.apply(Input::Equals);
        assert_eq!(state.display(), "9");
    }

    #[test]
    fn test_no_operator_precedence() {
        // 2 + 3 × 4 folds left to right: (2 + 3) × 4
        assert_eq!(keys("2+3*4=").display(), "20");
    }

    #[test]
    fn test_repeated_operator_folds_display_into_itself() {
        // The second + applies 5 + 5 because the display still reads 5
        let state = keys("5++");
        assert_eq!(state.display(), "10");
        assert_eq!(state.accumulator(), Some(10.0));
    }

    #[test]
    fn test_floating_point_noise_is_kept() {
        assert_eq!(keys(".1+.2=").display(), "0.30000000000000004");
    }

    // ===== Equals =====

    #[test]
    fn test_equals_resets_operator_state() {
        let state = keys("5+3=");
        assert_eq!(state.accumulator(), None);
        assert_eq!(state.pending_operation(), None);
        assert!(state.is_awaiting_operand());
    }

    #[test]
    fn test_repeated_equals_is_noop() {
        let once = keys("5+3=");
        let mut twice = once.clone();
        twice.apply(Input::Equals);
        assert_eq!(twice, once);
        assert_eq!(twice.display(), "8");
    }

    #[test]
    fn test_equals_without_operator_is_noop() {
        let state = keys("12=");
        assert_eq!(state.display(), "12");
        assert!(!state.is_awaiting_operand());
    }

    #[test]
    fn test_digit_after_equals_starts_fresh() {
        assert_eq!(keys("5+3=2").display(), "2");
    }

    #[test]
    fn test_operator_after_equals_uses_result() {
        assert_eq!(keys("5+3=*2=").display(), "16");
    }

    // ===== Non-finite results =====

    #[test]
    fn test_divide_by_zero_is_infinity() {
        assert_eq!(keys("5/0=").display(), "Infinity");
    }

    #[test]
    fn test_negative_divide_by_zero() {
        assert_eq!(keys("5~/0=").display(), "-Infinity");
    }

    #[test]
    fn test_zero_divided_by_zero_is_nan() {
        assert_eq!(keys("0/0=").display(), "NaN");
    }

    #[test]
    fn test_infinity_propagates_through_chain() {
        assert_eq!(keys("5/0+1=").display(), "Infinity");
    }

    // ===== Clear =====

    #[test]
    fn test_clear_restores_initial_state() {
        let mut state = keys("12.5*3+");
        state.apply(Input::Clear);
        assert_eq!(state, CalculatorState::new());
    }

    // ===== Backspace =====

    #[test]
    fn test_backspace_removes_last_character() {
        let mut state = keys("123");
        state.backspace();
        assert_eq!(state.display(), "12");
    }

    #[test]
    fn test_backspace_on_zero_is_noop() {
        let mut state = CalculatorState::new();
        state.backspace();
        assert_eq!(state.display(), "0");
    }

    #[test]
    fn test_backspace_last_digit_becomes_zero() {
        let mut state = keys("7");
        state.backspace();
        assert_eq!(state.display(), "0");
    }

    #[test]
    fn test_backspace_never_leaves_lone_sign() {
        let mut state = keys("5~");
        state.backspace();
        assert_eq!(state.display(), "0");
    }

    #[test]
    fn test_backspace_keeps_operator_state() {
        let mut state = keys("9+12");
        state.backspace();
        assert_eq!(state.display(), "1");
        assert_eq!(state.accumulator(), Some(9.0));
        assert_eq!(state.pending_operation(), Some(Operation::Add));
    }

    // ===== transition =====

    #[test]
    fn test_transition_leaves_input_state_untouched() {
        let before = keys("5+");
        let (after, display) = transition(&before, Input::Digit(3));
        assert_eq!(before.display(), "5");
        assert_eq!(after.display(), "3");
        assert_eq!(display, "3");
    }

    // ===== Input =====

    #[test]
    fn test_input_from_key() {
        assert_eq!(Input::from_key('7'), Some(Input::Digit(7)));
        assert_eq!(Input::from_key('.'), Some(Input::Decimal));
        assert_eq!(Input::from_key('~'), Some(Input::ToggleSign));
        assert_eq!(Input::from_key('±'), Some(Input::ToggleSign));
        assert_eq!(Input::from_key('%'), Some(Input::Percent));
        assert_eq!(
            Input::from_key('*'),
            Some(Input::Operator(Operation::Multiply))
        );
        assert_eq!(Input::from_key('='), Some(Input::Equals));
        assert_eq!(Input::from_key('C'), Some(Input::Clear));
        assert_eq!(Input::from_key('q'), None);
        assert_eq!(Input::from_key(' '), None);
    }

    #[test]
    fn test_input_labels() {
        assert_eq!(Input::Digit(0).label(), "0");
        assert_eq!(Input::Operator(Operation::Divide).label(), "÷");
        assert_eq!(Input::ToggleSign.label(), "±");
        assert_eq!(Input::Clear.label(), "C");
    }

    #[test]
    fn test_input_serde_shape() {
        let json = serde_json::to_string(&Input::Operator(Operation::Add)).unwrap();
        assert_eq!(json, r#"{"kind":"operator","value":"add"}"#);
        let back: Input = serde_json::from_str(r#"{"kind":"clear"}"#).unwrap();
        assert_eq!(back, Input::Clear);
    }

    // ===== Snapshot serialization =====

    #[test]
    fn test_snapshot_round_trip_with_infinite_accumulator() {
        let state = keys("5/0+");
        assert_eq!(state.accumulator(), Some(f64::INFINITY));
        let json = serde_json::to_string(&state).unwrap();
        let back: CalculatorState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_snapshot_missing_fields_default() {
        let state: CalculatorState = serde_json::from_str(r#"{"display":"12"}"#).unwrap();
        assert_eq!(state.display(), "12");
        assert_eq!(state.accumulator(), None);
        assert!(!state.is_awaiting_operand());
    }

    #[test]
    fn test_nan_total_keeps_folding() {
        let state = keys("0/0+1+");
        assert_eq!(state.display(), "NaN");
        assert!(state.accumulator().is_some_and(f64::is_nan));
        assert_eq!(keys("0/0+1+2=").display(), "NaN");
    }
}
