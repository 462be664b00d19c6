//! Key-sequence input.
//!
//! Turns typed text such as `12.5*4=` or `C 7 CE 8` into the discrete input
//! events a keypad would send.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::calculator::Calculator;
use crate::commands::{self, CommandError, CommandTable};

lazy_static! {
    /// Matches one key at the start of the remaining input.
    /// `CE` must come before `C` so it wins.
    static ref KEY: Regex = Regex::new(
        r"^(?i:ce|c|[0-9]|\.|[-+*/=×x÷])"
    ).unwrap();
}

/// Failure to read or apply a key sequence.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("invalid key {key:?} at offset {offset}")]
    InvalidKey { key: String, offset: usize },
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// A single key press, named by the command it triggers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InputEvent {
    pub command: &'static str,
    pub param: Option<String>,
}

impl InputEvent {
    fn new(command: &'static str, param: Option<&str>) -> Self {
        Self {
            command,
            param: param.map(str::to_string),
        }
    }

    /// Map a matched key to its event.
    fn from_key(key: &str) -> Self {
        match key {
            "." => Self::new(commands::DECIMAL, None),
            "+" | "-" | "*" | "/" | "=" => Self::new(commands::OPERATION, Some(key)),
            "×" | "x" | "X" => Self::new(commands::OPERATION, Some("*")),
            "÷" => Self::new(commands::OPERATION, Some("/")),
            k if k.eq_ignore_ascii_case("ce") => Self::new(commands::CLEAR_ENTRY, None),
            k if k.eq_ignore_ascii_case("c") => Self::new(commands::CLEAR, None),
            digit => Self::new(commands::DIGIT, Some(digit)),
        }
    }
}

/// Split `input` into key events. Whitespace is skipped.
pub fn parse_keys(input: &str) -> Result<Vec<InputEvent>, InputError> {
    let mut events = Vec::new();
    let mut offset = 0;

    while let Some(c) = input[offset..].chars().next() {
        if c.is_whitespace() {
            offset += c.len_utf8();
            continue;
        }

        let Some(m) = KEY.find(&input[offset..]) else {
            return Err(InputError::InvalidKey {
                key: c.to_string(),
                offset,
            });
        };

        events.push(InputEvent::from_key(m.as_str()));
        offset += m.end();
    }

    Ok(events)
}

/// Parse `input` and dispatch every key to `calc`.
///
/// Nothing is applied if the sequence contains an invalid key.
/// Returns the number of keys dispatched.
pub fn apply_keys(
    calc: &mut Calculator,
    table: &CommandTable,
    input: &str,
) -> Result<usize, InputError> {
    let events = parse_keys(input)?;
    let mut dispatched = 0;

    for event in &events {
        if table.execute(calc, event.command, event.param.as_deref())? {
            dispatched += 1;
        }
    }

    debug!(keys = events.len(), dispatched, "Applied key sequence");
    Ok(dispatched)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commands_of(input: &str) -> Vec<(&'static str, Option<String>)> {
        parse_keys(input)
            .unwrap()
            .into_iter()
            .map(|e| (e.command, e.param))
            .collect()
    }

    #[test]
    fn test_parse_digits_and_operators() {
        assert_eq!(
            commands_of("5+3="),
            vec![
                (commands::DIGIT, Some("5".to_string())),
                (commands::OPERATION, Some("+".to_string())),
                (commands::DIGIT, Some("3".to_string())),
                (commands::OPERATION, Some("=".to_string())),
            ]
        );
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(commands_of("2 × 3 x 4 ÷ 5"), commands_of("2*3*4/5"));
    }

    #[test]
    fn test_parse_clear_keys() {
        assert_eq!(
            commands_of("CE c Ce C"),
            vec![
                (commands::CLEAR_ENTRY, None),
                (commands::CLEAR, None),
                (commands::CLEAR_ENTRY, None),
                (commands::CLEAR, None),
            ]
        );
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_keys("").unwrap().is_empty());
        assert!(parse_keys("   \t").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_key() {
        assert_eq!(
            parse_keys("12 % 3"),
            Err(InputError::InvalidKey {
                key: "%".to_string(),
                offset: 3,
            })
        );
        assert!(parse_keys("sqrt(4)").is_err());
    }

    #[test]
    fn test_apply_keys() {
        let table = CommandTable::standard();
        let mut calc = Calculator::new();

        assert_eq!(apply_keys(&mut calc, &table, "2.5*4="), Ok(6));
        assert_eq!(calc.display_content(), "10");
        assert_eq!(calc.operation_trail(), "10");
    }

    #[test]
    fn test_apply_keys_division_by_zero_then_entry() {
        let table = CommandTable::standard();
        let mut calc = Calculator::new();

        apply_keys(&mut calc, &table, "C6/0=").unwrap();
        assert_eq!(calc.display_content(), "UNDEFINED");
        assert_eq!(calc.operation_trail(), "Error: Division by zero");

        apply_keys(&mut calc, &table, "7").unwrap();
        assert_eq!(calc.display_content(), "7");
        assert_eq!(calc.state().pending_operation, None);
    }

    #[test]
    fn test_invalid_sequence_leaves_state() {
        let table = CommandTable::standard();
        let mut calc = Calculator::new();
        apply_keys(&mut calc, &table, "42+").unwrap();
        let before = calc.state().clone();

        assert!(apply_keys(&mut calc, &table, "1?").is_err());
        assert_eq!(calc.state(), &before);
    }
}
