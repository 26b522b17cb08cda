//! Parsers for raw console input.
//!
//! Each parser takes one raw line and either yields a validated value or a
//! [`ValidationError`] whose message is what the user sees before being asked again.
//! The retry policy lives in the console shell, not here.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Error! Please enter a positive number: ")]
    NotPositive { input: String },
    #[error("Error! Please enter 0 or 1: ")]
    NotBinary { input: String },
    #[error("Error! Percentage cannot be negative")]
    NegativePercentage { value: f64 },
}

pub fn parse_positive_int(raw: &str) -> Result<u32, ValidationError> {
    let input = raw.trim();
    match input.parse::<i64>() {
        Ok(value) if value > 0 => u32::try_from(value).map_err(|_| not_positive(input)),
        _ => Err(not_positive(input)),
    }
}

pub fn parse_positive_real(raw: &str) -> Result<f64, ValidationError> {
    let input = raw.trim();
    match input.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err(not_positive(input)),
    }
}

/// Parse a 0/1 flag. `0` is false (working), `1` is true (under repair).
pub fn parse_flag(raw: &str) -> Result<bool, ValidationError> {
    let input = raw.trim();
    match input.parse::<i64>() {
        Ok(0) => Ok(false),
        Ok(1) => Ok(true),
        _ => Err(ValidationError::NotBinary {
            input: input.to_string(),
        }),
    }
}

/// Parse a percentage threshold. Zero is accepted.
pub fn parse_percentage(raw: &str) -> Result<f64, ValidationError> {
    let input = raw.trim();
    match input.parse::<f64>() {
        Ok(value) if value.is_nan() => Err(not_positive(input)),
        Ok(value) if value < 0.0 => Err(ValidationError::NegativePercentage { value }),
        Ok(value) => Ok(value),
        Err(_) => Err(not_positive(input)),
    }
}

fn not_positive(input: &str) -> ValidationError {
    ValidationError::NotPositive {
        input: input.to_string(),
    }
}
