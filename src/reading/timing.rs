// Timing engine - WPM validation, interval calculation and tokenization

use std::fmt;
use std::ops::RangeInclusive;
use std::time::Duration;

use crate::engine::error::PacerError;
use crate::reading::Token;

/// A validated reading rate in words per minute. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Wpm(u32);

impl Wpm {
    /// Accepts `value` only if it lies in `range`.
    pub fn new(value: i64, range: &RangeInclusive<u32>) -> Result<Self, PacerError> {
        match u32::try_from(value) {
            Ok(wpm) if wpm > 0 && range.contains(&wpm) => Ok(Self(wpm)),
            _ => Err(invalid_rate(value.to_string(), range)),
        }
    }

    /// Parses user-typed input. Non-finite and fractional numbers are rejected.
    pub fn parse(input: &str, range: &RangeInclusive<u32>) -> Result<Self, PacerError> {
        let input = input.trim();
        let value: f64 = input
            .parse()
            .map_err(|_| invalid_rate(input.to_string(), range))?;
        if !value.is_finite() || value.fract() != 0.0 || value.abs() > i64::MAX as f64 {
            return Err(invalid_rate(input.to_string(), range));
        }
        Self::new(value as i64, range)
    }

    /// Moves by `delta`, clamping into `range` instead of failing.
    pub fn saturating_adjust(self, delta: i32, range: &RangeInclusive<u32>) -> Self {
        let min = (*range.start()).max(1) as i64;
        let max = (*range.end()).max(1) as i64;
        let adjusted = (self.0 as i64 + delta as i64).clamp(min, max);
        Self(adjusted as u32)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Delay between two advances: `60000 / wpm` milliseconds.
    pub fn interval(self) -> Duration {
        Duration::from_millis(wpm_to_milliseconds(self.0))
    }
}

impl fmt::Display for Wpm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} WPM", self.0)
    }
}

fn invalid_rate(value: String, range: &RangeInclusive<u32>) -> PacerError {
    PacerError::InvalidRate {
        value,
        min: *range.start(),
        max: *range.end(),
    }
}

/// Milliseconds per word, rounded, never zero.
pub fn wpm_to_milliseconds(wpm: u32) -> u64 {
    let ms = (60_000.0 / wpm.max(1) as f64).round() as u64;
    ms.max(1)
}

/// Splits text on runs of whitespace, keeping every other character as written.
///
/// Input is expected to be plain text already; markup is not stripped here.
pub fn tokenize_text(text: &str) -> Vec<Token> {
    text.split_whitespace().filter_map(Token::new).collect()
}
