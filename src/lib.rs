//! A four-function calculator with a running-operation display.
//!
//! The [`calculator`] module holds the core: the arithmetic, the number
//! formatting and the [`Calculator`] state machine. Front-ends drive it
//! through the [`commands`] table, or feed it typed keys via [`input`].

pub mod calculator;
pub mod commands;
pub mod config;
pub mod input;

pub use calculator::{Calculator, CalculatorState, Operator};
pub use commands::CommandTable;
pub use config::Config;
