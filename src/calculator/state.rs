//! Mutable calculator state.

use serde::Serialize;

use super::evaluation::Operator;

/// Everything the calculator remembers between key presses.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CalculatorState {
    /// The main display: a number under construction, or `UNDEFINED`.
    pub display_content: String,
    /// The secondary display, e.g. `5 + 3`.
    pub operation_trail: String,
    /// Left operand of the pending operation.
    pub stored_value: f64,
    /// Operator waiting for its right operand.
    pub pending_operation: Option<Operator>,
    /// The next digit starts a new operand instead of appending.
    pub is_new_value: bool,
    /// Set right after an operator was applied, cleared by entry.
    pub operation_just_pressed: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            display_content: "0".to_string(),
            operation_trail: String::new(),
            stored_value: 0.0,
            pending_operation: None,
            is_new_value: true,
            operation_just_pressed: false,
        }
    }
}

impl CalculatorState {
    /// Check if an operator is waiting for a second operand.
    pub fn has_pending_operation(&self) -> bool {
        self.pending_operation.is_some_and(|op| !op.is_equals())
    }
}
