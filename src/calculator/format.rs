//! Number formatting for the displays and parsing of the entry text.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Shown on the main display after a failed computation.
pub const UNDEFINED: &str = "UNDEFINED";

/// Default number of fractional digits kept when formatting.
pub const DEFAULT_FRACTION_DIGITS: usize = 10;

/// Upper bound for configured fractional digits; f64 carries no more.
pub const MAX_FRACTION_DIGITS: usize = 15;

lazy_static! {
    /// Matches a culture-invariant decimal literal as the keypad can build it.
    /// Allows: optional minus, digits, at most one dot.
    static ref DECIMAL_LITERAL: Regex = Regex::new(
        r"^-?(\d+\.?\d*|\.\d+)$"
    ).unwrap();
}

/// How numbers are rendered on the displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    /// Maximum fractional digits for non-integral values.
    pub fraction_digits: usize,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            fraction_digits: DEFAULT_FRACTION_DIGITS,
        }
    }
}

impl NumberFormat {
    pub fn new(fraction_digits: usize) -> Self {
        Self {
            fraction_digits: fraction_digits.min(MAX_FRACTION_DIGITS),
        }
    }

    /// Format a value for display.
    ///
    /// Integral values render without a decimal point. Other values keep up
    /// to `fraction_digits` digits with trailing zeros (and a dangling dot)
    /// removed.
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return UNDEFINED.to_string();
        }

        let formatted = if value.fract() == 0.0 {
            format!("{:.0}", value)
        } else {
            let fixed = format!("{:.*}", self.fraction_digits, value);
            if fixed.contains('.') {
                fixed.trim_end_matches('0').trim_end_matches('.').to_string()
            } else {
                fixed
            }
        };

        // -0 and values that round to zero
        if formatted == "-0" {
            "0".to_string()
        } else {
            formatted
        }
    }
}

/// Format a value with the default number format.
pub fn format_number(value: f64) -> String {
    NumberFormat::default().format(value)
}

/// Parse the entry text as a decimal number.
///
/// Returns `None` for anything that is not a plain decimal literal,
/// including the [`UNDEFINED`] sentinel.
pub fn parse_display(text: &str) -> Option<f64> {
    if !DECIMAL_LITERAL.is_match(text) {
        return None;
    }
    text.parse().ok()
}
