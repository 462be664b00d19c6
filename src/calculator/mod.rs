//! Calculator core: arithmetic, formatting and the keypad state machine.
//!
//! This module provides functionality to:
//! - Evaluate a single binary operation
//! - Format results for the displays
//! - Track operand entry and pending operations
//! - Notify observers when the displays change
//! - Copy results to the clipboard

mod clipboard;
mod controller;
mod evaluation;
mod format;
mod observer;
mod state;

pub use clipboard::{ClipboardError, copy_to_clipboard};
pub use controller::Calculator;
pub use evaluation::{CalcError, Operator, evaluate, operator_symbol};
pub use format::{
    DEFAULT_FRACTION_DIGITS, MAX_FRACTION_DIGITS, NumberFormat, UNDEFINED, format_number,
    parse_display,
};
pub use observer::{ObserverId, Observers, Property, PropertyChange};
pub use state::CalculatorState;
