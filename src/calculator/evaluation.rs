//! Arithmetic evaluation for the four basic operators.
//!
//! The evaluator is a pure function over two operands and an operator.
//! It never touches calculator state; the controller decides how to react
//! to a failure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure raised while evaluating an operation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CalcError {
    /// The right operand of a division was zero.
    #[error("division by zero")]
    DivisionByZero,
    /// The operator symbol is not one of `+ - * / =`.
    #[error("invalid operation: {0:?}")]
    InvalidOperation(String),
    /// An operand or result does not fit in an `f64`.
    #[error("result out of range")]
    Overflow,
}

/// An operator the user can commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// Finishes the current expression. Evaluates to the right operand.
    Equals,
}

impl Operator {
    /// All operators, in keypad order.
    pub const ALL: [Operator; 5] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Equals,
    ];

    /// Parse an input symbol (`+ - * / =`).
    pub fn from_symbol(symbol: &str) -> Result<Self, CalcError> {
        match symbol {
            "+" => Ok(Self::Add),
            "-" => Ok(Self::Subtract),
            "*" => Ok(Self::Multiply),
            "/" => Ok(Self::Divide),
            "=" => Ok(Self::Equals),
            other => Err(CalcError::InvalidOperation(other.to_string())),
        }
    }

    /// The symbol used on input.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Equals => "=",
        }
    }

    /// The symbol shown in the operation trail.
    pub fn display_symbol(&self) -> &'static str {
        match self {
            Self::Multiply => "×",
            Self::Divide => "÷",
            other => other.symbol(),
        }
    }

    /// Check if this operator finishes the expression.
    pub fn is_equals(&self) -> bool {
        matches!(self, Self::Equals)
    }

    /// Apply the operator to `lhs` and `rhs`.
    pub fn apply(&self, lhs: f64, rhs: f64) -> Result<f64, CalcError> {
        match self {
            Self::Add => Ok(lhs + rhs),
            Self::Subtract => Ok(lhs - rhs),
            Self::Multiply => Ok(lhs * rhs),
            Self::Divide if rhs == 0.0 => Err(CalcError::DivisionByZero),
            Self::Divide => Ok(lhs / rhs),
            Self::Equals => Ok(rhs),
        }
    }
}

impl FromStr for Operator {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_symbol())
    }
}

/// Evaluate `lhs <symbol> rhs`.
///
/// `=` passes `rhs` through unchanged. Unknown symbols fail with
/// [`CalcError::InvalidOperation`].
pub fn evaluate(lhs: f64, rhs: f64, symbol: &str) -> Result<f64, CalcError> {
    Operator::from_symbol(symbol)?.apply(lhs, rhs)
}

/// Map an input symbol to its display form.
///
/// Unknown symbols are passed through unchanged.
pub fn operator_symbol(symbol: &str) -> String {
    Operator::from_symbol(symbol)
        .map(|op| op.display_symbol().to_string())
        .unwrap_or_else(|_| symbol.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_basic_operators() {
        assert_eq!(evaluate(5.0, 3.0, "+"), Ok(8.0));
        assert_eq!(evaluate(5.0, 3.0, "-"), Ok(2.0));
        assert_eq!(evaluate(2.5, 4.0, "*"), Ok(10.0));
        assert_eq!(evaluate(9.0, 4.0, "/"), Ok(2.25));
    }

    #[test]
    fn test_equals_passes_rhs_through() {
        assert_eq!(evaluate(123.0, 7.0, "="), Ok(7.0));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(evaluate(6.0, 0.0, "/"), Err(CalcError::DivisionByZero));
        assert_eq!(evaluate(6.0, -0.0, "/"), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_invalid_operation() {
        assert_eq!(
            evaluate(1.0, 2.0, "%"),
            Err(CalcError::InvalidOperation("%".to_string()))
        );
        assert!("^".parse::<Operator>().is_err());
    }

    #[test]
    fn test_display_symbols() {
        assert_eq!(operator_symbol("+"), "+");
        assert_eq!(operator_symbol("-"), "-");
        assert_eq!(operator_symbol("*"), "×");
        assert_eq!(operator_symbol("/"), "÷");
        assert_eq!(operator_symbol("="), "=");
        assert_eq!(operator_symbol("mod"), "mod");
        assert_eq!(Operator::Divide.to_string(), "÷");
    }

    #[test]
    fn test_symbol_round_trip() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_symbol(op.symbol()), Ok(op));
        }
    }

    proptest! {
        #[test]
        fn division_fails_only_on_zero(a in -1e9f64..1e9, b in -1e9f64..1e9) {
            let result = evaluate(a, b, "/");
            if b == 0.0 {
                prop_assert_eq!(result, Err(CalcError::DivisionByZero));
            } else {
                prop_assert_eq!(result, Ok(a / b));
            }
        }

        #[test]
        fn division_by_literal_zero_always_fails(a in any::<f64>()) {
            prop_assert_eq!(evaluate(a, 0.0, "/"), Err(CalcError::DivisionByZero));
        }
    }
}
