use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use crate::{EngineError, EngineResult};

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;
const EVALUATION_INSTANT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Year-month an installment is billed under.
///
/// Stored as a structured pair and rendered as `YYYY-MM` at the boundary.
/// Ordering is calendar ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReferenceMonth {
    year: i32,
    month: u32,
}

impl ReferenceMonth {
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) || !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(EngineError::invalid_reference_month(&format!(
                "{year:04}-{month:02}"
            )));
        }
        Ok(Self { year, month })
    }

    /// Month containing `date`, under the same year bounds as `new`.
    pub fn of(date: NaiveDate) -> EngineResult<Self> {
        Self::new(date.year(), date.month())
    }

    /// Moves forward by whole calendar months.
    pub fn advance(self, months: u32) -> EngineResult<Self> {
        let index = i64::from(self.year) * 12 + i64::from(self.month - 1) + i64::from(months);
        let year = i32::try_from(index.div_euclid(12)).unwrap_or(i32::MAX);
        let month = u32::try_from(index.rem_euclid(12)).unwrap_or(0) + 1;
        Self::new(year, month)
    }

    /// Whole months from `earlier` to `self`; negative when `self` is earlier.
    pub fn months_since(self, earlier: Self) -> i64 {
        let index = |value: Self| i64::from(value.year) * 12 + i64::from(value.month);
        index(self) - index(earlier)
    }

    pub fn day_count(self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// Builds the date for `day` inside this month, clamping to the last
    /// day when the month is shorter (31 in April lands on the 30th).
    pub fn day_clamped(self, day: u32) -> EngineResult<NaiveDate> {
        let clamped = day.clamp(1, self.day_count());
        NaiveDate::from_ymd_opt(self.year, self.month, clamped).ok_or_else(|| {
            EngineError::invalid_date(
                "due_on",
                &format!("{self}-{clamped:02}"),
                "outside the supported calendar range.",
            )
        })
    }
}

impl fmt::Display for ReferenceMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for ReferenceMonth {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if !looks_like_year_month(value) {
            return Err(EngineError::invalid_reference_month(value));
        }
        let year = value[0..4]
            .parse::<i32>()
            .map_err(|_| EngineError::invalid_reference_month(value))?;
        let month = value[5..7]
            .parse::<u32>()
            .map_err(|_| EngineError::invalid_reference_month(value))?;
        Self::new(year, month).map_err(|_| EngineError::invalid_reference_month(value))
    }
}

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_iso_date_strict(value: &str, field_name: &str) -> EngineResult<NaiveDate> {
    if !looks_like_iso_date(value) {
        return Err(EngineError::invalid_date(
            field_name,
            value,
            "must use YYYY-MM-DD format.",
        ));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        EngineError::invalid_date(field_name, value, "must be a real calendar date.")
    })
}

pub fn format_evaluation_instant(instant: &NaiveDateTime) -> String {
    instant.format(EVALUATION_INSTANT_FORMAT).to_string()
}

/// Parses an evaluation instant: a bare date means its midnight.
pub fn parse_evaluation_instant(value: &str, field_name: &str) -> EngineResult<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.len() == 10 {
        let date = parse_iso_date_strict(trimmed, field_name)?;
        return Ok(date.and_time(NaiveTime::MIN));
    }
    NaiveDateTime::parse_from_str(trimmed, EVALUATION_INSTANT_FORMAT).map_err(|_| {
        EngineError::invalid_date(
            field_name,
            value,
            "must use YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS.",
        )
    })
}

pub(crate) fn looks_like_iso_date(value: &str) -> bool {
    if value.len() != 10 {
        return false;
    }
    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return false;
        }
    }
    true
}

fn looks_like_year_month(value: &str) -> bool {
    if value.len() != 7 {
        return false;
    }
    let bytes = value.as_bytes();
    if bytes[4] != b'-' {
        return false;
    }
    [0usize, 1, 2, 3, 5, 6]
        .iter()
        .all(|index| bytes[*index].is_ascii_digit())
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
