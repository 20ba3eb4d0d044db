//! Key-string evaluation for the `eval` command

use crate::config::Skin;
use crate::error::{CliError, CliResult};
use pocketcalc::core::Input;
use pocketcalc::driver::{CalculatorDriver, MobileDriver};
use pocketcalc::storage::{JsonFileStore, PersistentCalculator};
use pocketcalc::web::{WebDriver, WebKey};
use std::path::Path;
use tracing::debug;

/// Characters accepted as backspace on the web skin
const BACKSPACE_KEYS: [char; 2] = ['<', '⌫'];

/// Parses a key string into web keys.
///
/// Whitespace is skipped. Backspace exists only on the web keypad, so it is
/// rejected for the mobile skin.
pub fn parse_keys(keys: &str, skin: Skin) -> CliResult<Vec<WebKey>> {
    keys.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| {
            if BACKSPACE_KEYS.contains(&c) {
                return match skin {
                    Skin::Web => Ok(WebKey::Backspace),
                    Skin::Mobile => Err(CliError::invalid_argument(format!(
                        "key '{c}' (backspace) needs --skin web"
                    ))),
                };
            }
            Input::from_key(c)
                .map(WebKey::Press)
                .ok_or_else(|| CliError::invalid_argument(format!("unknown key '{c}'")))
        })
        .collect()
}

/// One evaluated key and the display it produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep {
    /// Key label as shown on the keypad
    pub key: String,
    /// Display after the key
    pub display: String,
}

/// Result of an evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalOutcome {
    /// Display after every key
    pub steps: Vec<TraceStep>,
    /// Final display
    pub display: String,
}

/// The calculator a key string is fed through
#[derive(Debug)]
pub enum Session {
    /// Phone-style keypad
    Mobile(MobileDriver),
    /// Browser keypad over a mock DOM
    Web(WebDriver),
    /// Either skin, resumed from and saved to a state file
    Persisted(PersistentCalculator<JsonFileStore>),
}

impl Session {
    /// Opens a session, resuming from `state_file` when given
    pub fn open(skin: Skin, state_file: Option<&Path>) -> CliResult<Self> {
        if let Some(path) = state_file {
            let store = JsonFileStore::open(path)?;
            debug!(path = %path.display(), "opened state file");
            return Ok(Self::Persisted(PersistentCalculator::open(store)));
        }
        Ok(match skin {
            Skin::Mobile => Self::Mobile(MobileDriver::new()),
            Skin::Web => Self::Web(WebDriver::new()),
        })
    }

    /// Sends one key, returning the new display
    pub fn send(&mut self, key: WebKey) -> String {
        match (self, key) {
            (Self::Mobile(driver), WebKey::Press(input)) => driver.press(input),
            // Rejected by parse_keys
            (Self::Mobile(driver), WebKey::Backspace) => driver.display(),
            (Self::Web(driver), WebKey::Press(input)) => driver.press(input),
            (Self::Web(driver), WebKey::Backspace) => {
                driver.click_backspace();
                driver.display()
            }
            (Self::Persisted(calc), WebKey::Press(input)) => calc.press(input).to_string(),
            (Self::Persisted(calc), WebKey::Backspace) => calc.backspace().to_string(),
        }
    }

    /// Current display
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Mobile(driver) => driver.display(),
            Self::Web(driver) => driver.display(),
            Self::Persisted(calc) => calc.display().to_string(),
        }
    }

    /// Fails if the last save to the state file did not succeed
    pub fn check_saved(&self) -> CliResult<()> {
        match self {
            Self::Persisted(calc) => match calc.last_error() {
                Some(e) => {
                    let path = calc.store().path().display();
                    Err(CliError::not_saved(format!("{path}: {e}")))
                }
                None => Ok(()),
            },
            _ => Ok(()),
        }
    }
}

/// Feeds `keys` through a session
pub fn evaluate(session: &mut Session, keys: &[WebKey]) -> EvalOutcome {
    let steps = keys
        .iter()
        .map(|&key| TraceStep {
            key: key.label(),
            display: session.send(key),
        })
        .collect();
    EvalOutcome {
        steps,
        display: session.display(),
    }
}

/// Runs `eval`: parse, evaluate, print
pub fn run_eval(
    keys: &str,
    skin: Skin,
    state_file: Option<&Path>,
    trace: bool,
) -> CliResult<EvalOutcome> {
    let keys = parse_keys(keys, skin)?;
    let mut session = Session::open(skin, state_file)?;
    let outcome = evaluate(&mut session, &keys);

    if trace {
        for step in &outcome.steps {
            println!("{:>5}  {}", step.key, step.display);
        }
    }
    println!("{}", outcome.display);

    session.check_saved()?;
    Ok(outcome)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pocketcalc::core::Operation;
    use tempfile::TempDir;

    fn eval(keys: &str, skin: Skin) -> EvalOutcome {
        let keys = parse_keys(keys, skin).unwrap();
        let mut session = Session::open(skin, None).unwrap();
        evaluate(&mut session, &keys)
    }

    #[test]
    fn test_parse_skips_whitespace() {
        let keys = parse_keys(" 1 + 2 ", Skin::Mobile).unwrap();
        assert_eq!(
            keys,
            vec![
                WebKey::Press(Input::Digit(1)),
                WebKey::Press(Input::Operator(Operation::Add)),
                WebKey::Press(Input::Digit(2)),
            ]
        );
    }

    #[test]
    fn test_parse_unknown_key_named() {
        let err = parse_keys("12?3", Skin::Mobile).unwrap_err();
        assert!(err.to_string().contains("unknown key '?'"));
    }

    #[test]
    fn test_backspace_needs_web_skin() {
        assert!(parse_keys("12<", Skin::Mobile).is_err());
        let keys = parse_keys("12<", Skin::Web).unwrap();
        assert_eq!(keys[2], WebKey::Backspace);
    }

    #[test]
    fn test_skins_agree() {
        for keys in ["5+3=", "5/0=", "0/0=", "12.5*4-1=", "7~%", "1+2+3*4="] {
            assert_eq!(
                eval(keys, Skin::Mobile).display,
                eval(keys, Skin::Web).display,
                "keys {keys}"
            );
        }
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval("5+3=", Skin::Mobile).display, "8");
        assert_eq!(eval("5/0=", Skin::Mobile).display, "Infinity");
        assert_eq!(eval("0.1+0.2=", Skin::Web).display, "0.30000000000000004");
    }

    #[test]
    fn test_trace_steps() {
        let outcome = eval("12+3=", Skin::Mobile);
        let displays: Vec<&str> = outcome.steps.iter().map(|s| s.display.as_str()).collect();
        assert_eq!(displays, ["1", "12", "12", "3", "15"]);
        assert_eq!(outcome.steps[2].key, "+");
    }

    #[test]
    fn test_web_backspace() {
        assert_eq!(eval("123<<", Skin::Web).display, "1");
        assert_eq!(eval("5<<", Skin::Web).display, "0");
    }

    #[test]
    fn test_empty_keys() {
        let outcome = eval("", Skin::Mobile);
        assert!(outcome.steps.is_empty());
        assert_eq!(outcome.display, "0");
    }

    #[test]
    fn test_state_file_resumes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("calc.json");

        let keys = parse_keys("12+", Skin::Mobile).unwrap();
        let mut session = Session::open(Skin::Mobile, Some(&path)).unwrap();
        evaluate(&mut session, &keys);
        session.check_saved().unwrap();

        let keys = parse_keys("30=", Skin::Mobile).unwrap();
        let mut session = Session::open(Skin::Mobile, Some(&path)).unwrap();
        assert_eq!(session.display(), "12");
        assert_eq!(evaluate(&mut session, &keys).display, "42");
    }

    #[test]
    fn test_state_file_backspace() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("calc.json");
        let keys = parse_keys("987<", Skin::Web).unwrap();
        let mut session = Session::open(Skin::Web, Some(&path)).unwrap();
        assert_eq!(evaluate(&mut session, &keys).display, "98");
    }

    #[test]
    fn test_failed_save_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("calc.json");
        std::fs::create_dir(dir.path().join("calc.json.tmp")).unwrap();

        let err = run_eval("12+", Skin::Mobile, Some(&path), false).unwrap_err();
        assert!(matches!(err, CliError::NotSaved { .. }));
        assert!(err.to_string().contains("calc.json"));
        assert!(!path.exists());
    }

    #[test]
    fn test_corrupt_state_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("calc.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            Session::open(Skin::Mobile, Some(&path)),
            Err(CliError::Storage(_))
        ));
    }
}
