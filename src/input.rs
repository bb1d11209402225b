// ✅ Input validation - range rules for primitive values typed by a user

use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueRule {
    /// Any finite number
    Any,

    /// Strictly greater than zero
    Positive,

    /// Zero or greater
    NonNegative,

    /// Inclusive range
    Between(f64, f64),
}

impl ValueRule {
    pub fn accepts(&self, value: f64) -> bool {
        match *self {
            ValueRule::Any => true,
            ValueRule::Positive => value > 0.0,
            ValueRule::NonNegative => value >= 0.0,
            ValueRule::Between(min, max) => (min..=max).contains(&value),
        }
    }
}

impl fmt::Display for ValueRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueRule::Any => write!(f, "a number"),
            ValueRule::Positive => write!(f, "greater than 0"),
            ValueRule::NonNegative => write!(f, "0 or greater"),
            ValueRule::Between(min, max) => write!(f, "between {} and {}", min, max),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field}: '{text}' is not a number")]
    NotANumber { field: String, text: String },

    #[error("{field} cannot take the value {value} (must be {rule})")]
    OutOfRange {
        field: String,
        value: String,
        rule: ValueRule,
    },
}

/// Parse a whole number and check it against `rule`
pub fn parse_integer(field: &str, text: &str, rule: ValueRule) -> Result<u32, InputError> {
    let trimmed = text.trim();
    let value: i64 = trimmed.parse().map_err(|_| InputError::NotANumber {
        field: field.to_string(),
        text: trimmed.to_string(),
    })?;

    let out_of_range = || InputError::OutOfRange {
        field: field.to_string(),
        value: value.to_string(),
        rule,
    };

    if !rule.accepts(value as f64) {
        return Err(out_of_range());
    }
    u32::try_from(value).map_err(|_| out_of_range())
}

/// Parse a decimal number and check it against `rule`
pub fn parse_number(field: &str, text: &str, rule: ValueRule) -> Result<f64, InputError> {
    let trimmed = text.trim();
    let value: f64 = trimmed
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| InputError::NotANumber {
            field: field.to_string(),
            text: trimmed.to_string(),
        })?;

    if !rule.accepts(value) {
        return Err(InputError::OutOfRange {
            field: field.to_string(),
            value: value.to_string(),
            rule,
        });
    }
    Ok(value)
}
