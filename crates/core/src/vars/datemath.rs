//! Relative date offsets attached to placeholders.
//!
//! An offset is a sign, a count, and a unit:
//!
//! - `{{date:due+1d}}`: one day after the answered date
//! - `{{date:due-2w}}`: two weeks before
//! - `{{date:due+3m}}`: three months after
//!
//! Days and weeks are plain arithmetic. Months keep the day-of-month and
//! clamp to the end of shorter months, so `2021-01-31 +1m` is `2021-02-28`.
//! Magnitudes above [`MAX_AMOUNT`] fail to parse; a shift that would leave
//! the supported calendar range clamps to its nearest edge.

use chrono::{Duration, Months, NaiveDate};
use regex::Regex;
use thiserror::Error;

/// Largest magnitude an offset may carry, in any unit.
pub const MAX_AMOUNT: i64 = 1_000_000;

/// Error for offset suffixes that start like an offset but do not scan.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OffsetParseError {
    #[error("malformed offset '{0}': expected +N or -N followed by d, w, or m")]
    Malformed(String),

    #[error("offset '{0}' is out of range: magnitude must be at most {max}", max = MAX_AMOUNT)]
    OutOfRange(String),
}

/// Unit of a date offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetUnit {
    Days,
    Weeks,
    Months,
}

impl OffsetUnit {
    /// The unit letter as written in the placeholder.
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            OffsetUnit::Days => 'd',
            OffsetUnit::Weeks => 'w',
            OffsetUnit::Months => 'm',
        }
    }
}

/// A signed date adjustment, e.g. `+1w` or `-3d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    pub amount: i64,
    pub unit: OffsetUnit,
}

impl std::fmt::Display for Offset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+}{}", self.amount, self.unit.symbol())
    }
}

/// Identifier-safe spelling of a raw offset suffix, used inside
/// substitution keys: `+1w` becomes `_offset_forward_1w`, `-3d` becomes
/// `_offset_backwards_3d`. Digits carry over exactly as written, so
/// `+3d` and `+03d` keep distinct keys.
#[must_use]
pub fn offset_key_token(raw: &str) -> String {
    let direction = if raw.starts_with('-') {
        "_offset_backwards_"
    } else {
        "_offset_forward_"
    };
    let magnitude = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    format!("{direction}{magnitude}")
}

/// Parse an offset suffix like `+1d`, `-2w`, `+3m`.
pub fn parse_offset(input: &str) -> Result<Offset, OffsetParseError> {
    let re = Regex::new(r"^([+-])(\d+)([dwm])$").expect("valid regex");

    let caps = re
        .captures(input)
        .ok_or_else(|| OffsetParseError::Malformed(input.to_string()))?;

    let magnitude: i64 =
        caps[2].parse().map_err(|_| OffsetParseError::Malformed(input.to_string()))?;
    if magnitude > MAX_AMOUNT {
        return Err(OffsetParseError::OutOfRange(input.to_string()));
    }
    let amount = if &caps[1] == "-" { -magnitude } else { magnitude };

    let unit = match &caps[3] {
        "d" => OffsetUnit::Days,
        "w" => OffsetUnit::Weeks,
        _ => OffsetUnit::Months,
    };

    Ok(Offset { amount, unit })
}

/// Shift a date by an offset. Total for every `Offset`: the arithmetic is
/// checked, and a result past the calendar's range clamps to its edge.
#[must_use]
pub fn apply_offset(date: NaiveDate, offset: Offset) -> NaiveDate {
    let shifted = match offset.unit {
        OffsetUnit::Days => {
            Duration::try_days(offset.amount).and_then(|delta| date.checked_add_signed(delta))
        }
        OffsetUnit::Weeks => {
            Duration::try_weeks(offset.amount).and_then(|delta| date.checked_add_signed(delta))
        }
        OffsetUnit::Months => u32::try_from(offset.amount.unsigned_abs())
            .ok()
            .and_then(|months| {
                if offset.amount < 0 {
                    date.checked_sub_months(Months::new(months))
                } else {
                    date.checked_add_months(Months::new(months))
                }
            }),
    };

    shifted.unwrap_or(if offset.amount < 0 {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    })
}

/// The date format every substitution uses: `YYYY-MM-DD`.
#[must_use]
pub fn short_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
