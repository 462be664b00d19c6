//! Command dispatch between front-ends and the calculator.
//!
//! A front-end names an input event (`digit`, `operation`, ...) and passes an
//! optional parameter. The table looks up the binding, checks its enablement
//! predicate and runs the handler.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use crate::calculator::{Calculator, Operator};

pub const DIGIT: &str = "digit";
pub const DECIMAL: &str = "decimal";
pub const OPERATION: &str = "operation";
pub const CLEAR: &str = "clear";
pub const CLEAR_ENTRY: &str = "clear_entry";

/// Failure to dispatch a command.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0:?}")]
    UnknownCommand(String),
}

type Guard = fn(Option<&str>) -> bool;
type Handler = fn(&mut Calculator, Option<&str>);

/// A handler with an optional enablement predicate.
#[derive(Clone, Copy)]
pub struct CommandBinding {
    can_execute: Option<Guard>,
    execute: Handler,
}

impl CommandBinding {
    pub fn new(execute: Handler) -> Self {
        Self {
            can_execute: None,
            execute,
        }
    }

    pub fn with_guard(mut self, guard: Guard) -> Self {
        self.can_execute = Some(guard);
        self
    }

    pub fn can_execute(&self, param: Option<&str>) -> bool {
        self.can_execute.is_none_or(|guard| guard(param))
    }
}

/// Input-event name to handler.
#[derive(Clone, Default)]
pub struct CommandTable {
    bindings: BTreeMap<&'static str, CommandBinding>,
}

impl CommandTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The five keypad commands.
    pub fn standard() -> Self {
        let mut table = Self::new();
        table.bind(
            DIGIT,
            CommandBinding::new(|calc, param| {
                if let Some(d) = param.and_then(single_numeral) {
                    calc.digit(d);
                }
            })
            .with_guard(|param| param.and_then(single_numeral).is_some()),
        );
        table.bind(DECIMAL, CommandBinding::new(|calc, _| calc.decimal_point()));
        table.bind(
            OPERATION,
            CommandBinding::new(|calc, param| {
                if let Some(op) = param.and_then(|s| Operator::from_symbol(s).ok()) {
                    calc.operation(op);
                }
            })
            .with_guard(|param| param.is_some_and(|s| Operator::from_symbol(s).is_ok())),
        );
        table.bind(CLEAR, CommandBinding::new(|calc, _| calc.clear()));
        table.bind(CLEAR_ENTRY, CommandBinding::new(|calc, _| calc.clear_entry()));
        table
    }

    /// Add or replace a binding.
    pub fn bind(&mut self, name: &'static str, binding: CommandBinding) {
        self.bindings.insert(name, binding);
    }

    /// Names of the bound commands, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.bindings.keys().copied()
    }

    /// Check if `name` is bound and enabled for `param`.
    pub fn can_execute(&self, name: &str, param: Option<&str>) -> bool {
        self.bindings
            .get(name)
            .is_some_and(|binding| binding.can_execute(param))
    }

    /// Dispatch `name` with `param` to `calc`.
    ///
    /// Returns `Ok(false)` if the binding's predicate rejected the parameter.
    pub fn execute(
        &self,
        calc: &mut Calculator,
        name: &str,
        param: Option<&str>,
    ) -> Result<bool, CommandError> {
        let binding = self
            .bindings
            .get(name)
            .ok_or_else(|| CommandError::UnknownCommand(name.to_string()))?;

        if !binding.can_execute(param) {
            debug!(command = name, ?param, "Command disabled for parameter");
            return Ok(false);
        }

        (binding.execute)(calc, param);
        Ok(true)
    }
}

/// The numeral if `s` is exactly one ASCII digit.
fn single_numeral(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_digit() => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_names() {
        let table = CommandTable::standard();
        let names: Vec<&str> = table.names().collect();
        assert_eq!(names, vec![CLEAR, CLEAR_ENTRY, DECIMAL, DIGIT, OPERATION]);
    }

    #[test]
    fn test_guards() {
        let table = CommandTable::standard();
        assert!(table.can_execute(DIGIT, Some("7")));
        assert!(!table.can_execute(DIGIT, Some("77")));
        assert!(!table.can_execute(DIGIT, Some("a")));
        assert!(!table.can_execute(DIGIT, None));
        assert!(table.can_execute(OPERATION, Some("/")));
        assert!(!table.can_execute(OPERATION, Some("%")));
        assert!(table.can_execute(CLEAR, None));
        assert!(!table.can_execute("memory_recall", None));
    }

    #[test]
    fn test_dispatch_sequence() {
        let table = CommandTable::standard();
        let mut calc = Calculator::new();

        for (name, param) in [
            (CLEAR, None),
            (DIGIT, Some("5")),
            (OPERATION, Some("+")),
            (DIGIT, Some("3")),
            (OPERATION, Some("=")),
        ] {
            assert_eq!(table.execute(&mut calc, name, param), Ok(true));
        }

        assert_eq!(calc.display_content(), "8");
        assert_eq!(calc.operation_trail(), "8");
    }

    #[test]
    fn test_disabled_command_is_dropped() {
        let table = CommandTable::standard();
        let mut calc = Calculator::new();
        calc.digit('4');

        assert_eq!(table.execute(&mut calc, OPERATION, Some("^")), Ok(false));
        assert_eq!(calc.display_content(), "4");
        assert_eq!(calc.state().pending_operation, None);
    }

    #[test]
    fn test_unknown_command() {
        let table = CommandTable::standard();
        let mut calc = Calculator::new();
        assert_eq!(
            table.execute(&mut calc, "sqrt", None),
            Err(CommandError::UnknownCommand("sqrt".to_string()))
        );
    }

    #[test]
    fn test_custom_binding() {
        let mut table = CommandTable::new();
        table.bind("nine", CommandBinding::new(|calc, _| calc.digit('9')));
        let mut calc = Calculator::new();
        assert_eq!(table.execute(&mut calc, "nine", None), Ok(true));
        assert_eq!(calc.display_content(), "9");
    }
}
