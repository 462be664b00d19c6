//! The entry/operation state machine behind the calculator keypad.
//!
//! [`Calculator`] owns the [`CalculatorState`] and is the only thing that
//! mutates it. Each key press runs to completion and leaves both display
//! strings up to date, notifying observers of every assignment.

use tracing::{debug, warn};

use super::evaluation::{CalcError, Operator};
use super::format::{NumberFormat, UNDEFINED, parse_display};
use super::observer::{ObserverId, Observers, Property, PropertyChange};
use super::state::CalculatorState;

/// A four-function calculator with a running-operation display.
#[derive(Debug, Default)]
pub struct Calculator {
    state: CalculatorState,
    format: NumberFormat,
    observers: Observers,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calculator rendering numbers with `format`.
    pub fn with_format(format: NumberFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// The main display.
    pub fn display_content(&self) -> &str {
        &self.state.display_content
    }

    /// The secondary display summarizing the expression.
    pub fn operation_trail(&self) -> &str {
        &self.state.operation_trail
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn number_format(&self) -> NumberFormat {
        self.format
    }

    /// Register a callback for display changes.
    pub fn subscribe(
        &mut self,
        callback: impl Fn(&PropertyChange) + Send + Sync + 'static,
    ) -> ObserverId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Receive display changes over a channel.
    pub fn channel(&mut self) -> flume::Receiver<PropertyChange> {
        self.observers.channel()
    }

    /// Enter a single numeral. Anything other than `0`-`9` is ignored.
    pub fn digit(&mut self, digit: char) {
        if !digit.is_ascii_digit() {
            debug!(?digit, "Ignoring non-numeral digit input");
            return;
        }

        self.state.operation_just_pressed = false;

        if self.state.is_new_value || self.state.display_content == "0" {
            self.set_display(digit.to_string());
            self.state.is_new_value = false;
        } else {
            let mut display = self.state.display_content.clone();
            display.push(digit);
            self.set_display(display);
        }

        debug!(display = %self.state.display_content, "Digit entered");
        self.update_trail();
    }

    /// Enter the decimal point. A second point in one operand is a no-op.
    pub fn decimal_point(&mut self) {
        self.state.operation_just_pressed = false;

        if self.state.is_new_value {
            self.set_display("0.".to_string());
            self.state.is_new_value = false;
        } else if !self.state.display_content.contains('.') {
            let mut display = self.state.display_content.clone();
            display.push('.');
            self.set_display(display);
        }

        self.update_trail();
    }

    /// Commit an operator.
    ///
    /// If an operator is pending and a new operand was typed since, the
    /// pending computation runs first and its result becomes the left
    /// operand. Does nothing if the display does not hold a number.
    pub fn operation(&mut self, op: Operator) {
        if self.state.display_content.ends_with('.') {
            let trimmed = self.state.display_content.trim_end_matches('.').to_string();
            self.set_display(trimmed);
        }

        let Some(current) = parse_display(&self.state.display_content) else {
            debug!(
                display = %self.state.display_content,
                op = op.symbol(),
                "Display is not a number, dropping operation"
            );
            return;
        };

        match self.state.pending_operation {
            _ if !current.is_finite() => self.fail(CalcError::Overflow),
            Some(pending) if !self.state.is_new_value => {
                match pending.apply(self.state.stored_value, current) {
                    Ok(result) if !result.is_finite() => self.fail(CalcError::Overflow),
                    Ok(result) => {
                        debug!(
                            lhs = self.state.stored_value,
                            rhs = current,
                            op = pending.symbol(),
                            result,
                            "Evaluated pending operation"
                        );
                        let display = self.format.format(result);
                        self.set_display(display);
                        self.state.stored_value = result;
                        self.commit(op);
                    }
                    Err(err) => self.fail(err),
                }
            }
            _ => {
                self.state.stored_value = current;
                self.commit(op);
            }
        }

        self.state.is_new_value = true;
        self.state.operation_just_pressed = true;
    }

    /// Reset everything to the initial state.
    pub fn clear(&mut self) {
        self.set_display("0".to_string());
        self.set_trail(String::new());
        self.state.stored_value = 0.0;
        self.state.pending_operation = None;
        self.state.is_new_value = true;
        self.state.operation_just_pressed = false;
        debug!("Cleared");
    }

    /// Reset only the operand being entered, keeping the pending operator.
    pub fn clear_entry(&mut self) {
        self.set_display("0".to_string());
        self.state.is_new_value = true;
        self.update_trail();
    }

    /// Make `op` the pending operator (or finish on `=`) and show it.
    fn commit(&mut self, op: Operator) {
        let stored = self.format.format(self.state.stored_value);

        if op.is_equals() {
            self.set_trail(stored);
            self.state.pending_operation = None;
        } else {
            self.set_trail(format!("{} {}", stored, op.display_symbol()));
            self.state.pending_operation = Some(op);
        }
    }

    fn fail(&mut self, err: CalcError) {
        warn!(error = %err, "Computation failed, resetting pending operation");

        let message = match err {
            CalcError::DivisionByZero => "Error: Division by zero",
            CalcError::InvalidOperation(_) => "Error: Invalid operation",
            CalcError::Overflow => "Error: Overflow",
        };

        self.set_display(UNDEFINED.to_string());
        self.set_trail(message.to_string());
        self.state.pending_operation = None;
        self.state.stored_value = 0.0;
    }

    /// Rebuild the trail after the entry changed.
    fn update_trail(&mut self) {
        let trail = match self.state.pending_operation {
            Some(op) if !op.is_equals() => format!(
                "{} {} {}",
                self.format.format(self.state.stored_value),
                op.display_symbol(),
                self.state.display_content
            ),
            _ => self.state.display_content.clone(),
        };
        self.set_trail(trail);
    }

    fn set_display(&mut self, value: String) {
        self.state.display_content = value;
        self.observers
            .notify(Property::DisplayContent, &self.state.display_content);
    }

    fn set_trail(&mut self, value: String) {
        self.state.operation_trail = value;
        self.observers
            .notify(Property::OperationTrail, &self.state.operation_trail);
    }
}
