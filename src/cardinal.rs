//! Integer and decimal numerals to English words, Indian scale.

use serde::{Deserialize, Serialize};

use crate::error::{NormalizeError, NormalizeResult};
use crate::scale::ScaleTable;

/// What to do when a scale multiplier does not fit the 0-99 lookup
/// (only possible for crore, i.e. numbers from one hundred crore up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiplierPolicy {
    /// Fail with `OutOfRangeScale`; callers leave the numeral untouched.
    #[default]
    Reject,
    /// Render the multiplier through the full cardinal path.
    Decompose,
}

#[derive(Debug, Clone, Default)]
pub struct CardinalConverter {
    table: ScaleTable,
    policy: MultiplierPolicy,
}

impl CardinalConverter {
    pub fn new(table: ScaleTable, policy: MultiplierPolicy) -> Self {
        Self { table, policy }
    }

    pub fn policy(&self) -> MultiplierPolicy {
        self.policy
    }

    pub fn table(&self) -> &ScaleTable {
        &self.table
    }

    /// Convert a non-negative integer, scale by scale, comma-joined.
    ///
    /// `125000` becomes `"one lakh, twenty-five thousand"`.
    pub fn to_words(&self, n: u64) -> NormalizeResult<String> {
        if n == 0 {
            return Ok(self.table.zero().to_string());
        }

        let mut parts = Vec::new();
        let mut remaining = n;

        for &(scale, value) in self.table.scales() {
            if remaining >= value {
                let count = remaining / value;
                remaining %= value;
                parts.push(format!("{} {}", self.multiplier(scale, count)?, scale));
            }
        }

        if remaining > 0 {
            parts.push(self.smaller(remaining)?.to_string());
        }

        Ok(parts.join(", "))
    }

    /// Convert a numeral string with at most one decimal point.
    ///
    /// The fraction is read digit by digit: `"3.51"` becomes
    /// `"three point five one"`. Strings without a point go through
    /// [`Self::to_words`].
    pub fn to_words_decimal(&self, numeral: &str) -> NormalizeResult<String> {
        let mut pieces = numeral.split('.');
        let integer = pieces.next().unwrap_or_default();
        let fraction = pieces.next();

        if pieces.next().is_some() {
            return Err(NormalizeError::Format(numeral.to_string()));
        }

        let integer_words = self.to_words(parse_digits(integer, numeral)?)?;

        let Some(fraction) = fraction else {
            return Ok(integer_words);
        };

        if fraction.is_empty() {
            return Err(NormalizeError::Format(numeral.to_string()));
        }

        let fraction_words = fraction
            .chars()
            .map(|c| {
                c.to_digit(10)
                    .and_then(|d| self.table.digit(d))
                    .ok_or_else(|| NormalizeError::Format(numeral.to_string()))
            })
            .collect::<NormalizeResult<Vec<_>>>()?;

        Ok(format!("{} point {}", integer_words, fraction_words.join(" ")))
    }

    fn multiplier(&self, scale: &'static str, count: u64) -> NormalizeResult<String> {
        match self.smaller(count) {
            Ok(word) => Ok(word.to_string()),
            Err(_) if self.policy == MultiplierPolicy::Decompose => self.to_words(count),
            Err(_) => Err(NormalizeError::OutOfRangeScale { scale, count }),
        }
    }

    fn smaller(&self, n: u64) -> NormalizeResult<&str> {
        self.table
            .below_hundred(n)
            .ok_or_else(|| NormalizeError::Format(n.to_string()))
    }
}

fn parse_digits(digits: &str, whole: &str) -> NormalizeResult<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NormalizeError::Format(whole.to_string()));
    }
    digits
        .parse::<u64>()
        .map_err(|_| NormalizeError::Format(whole.to_string()))
}
