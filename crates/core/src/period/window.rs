//! Period window calculation.
//!
//! Clamping policy: when the closing day does not exist in a month (29-31 in
//! short months), the last day of that month is used as the effective
//! closing day. Every month therefore has exactly one closing date, which is
//! what keeps consecutive periods adjacent.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::PeriodError;

/// Day of the month on which a statement period begins.
///
/// Validated on construction so a bad account or instrument configuration
/// fails when it is loaded instead of producing wrong periods later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ClosingDay(u8);

impl ClosingDay {
    /// Smallest valid closing day.
    pub const MIN: u32 = 1;
    /// Largest valid closing day.
    pub const MAX: u32 = 31;

    /// Creates a closing day.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidClosingDay` outside 1..=31.
    pub fn new(day: u32) -> Result<Self, PeriodError> {
        if (Self::MIN..=Self::MAX).contains(&day) {
            u8::try_from(day)
                .map(Self)
                .map_err(|_| PeriodError::InvalidClosingDay(day))
        } else {
            Err(PeriodError::InvalidClosingDay(day))
        }
    }

    /// Returns the configured day.
    #[must_use]
    pub fn get(self) -> u32 {
        u32::from(self.0)
    }

    /// Effective closing day in the given month after clamping.
    #[must_use]
    pub fn effective_in(self, year: i32, month: u32) -> u32 {
        self.get().min(days_in_month(year, month))
    }
}

impl TryFrom<u32> for ClosingDay {
    type Error = PeriodError;

    fn try_from(day: u32) -> Result<Self, Self::Error> {
        Self::new(day)
    }
}

impl From<ClosingDay> for u32 {
    fn from(day: ClosingDay) -> Self {
        day.get()
    }
}

impl fmt::Display for ClosingDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Largest number of consecutive periods produced by one request.
pub const MAX_PERIOD_SPAN: u32 = 1200;

/// Number of days in a month.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => 29,
        2 => 28,
        _ => 31,
    }
}

/// Shifts a (year, month) pair by `delta` months.
fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = i64::from(year) * 12 + i64::from(month) - 1 + i64::from(delta);
    let shifted_year = index.div_euclid(12);
    let shifted_month = index.rem_euclid(12) + 1;
    // Years stay far inside i32 because chrono's calendar is narrower.
    (
        i32::try_from(shifted_year).unwrap_or(i32::MAX),
        u32::try_from(shifted_month).unwrap_or(1),
    )
}

/// Closing date of the given month, after clamping.
fn closing_date(year: i32, month: u32, closing_day: ClosingDay) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, closing_day.effective_in(year, month))
}

/// A statement period `[start, end]`, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    /// First day of the period.
    pub start: NaiveDate,
    /// Last day of the period.
    pub end: NaiveDate,
}

impl Period {
    /// Creates a period from explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidRange` if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodError> {
        if start > end {
            return Err(PeriodError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered, both ends included.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Key of this period: the year and month of its end date.
    #[must_use]
    pub fn key(&self) -> PeriodKey {
        PeriodKey {
            year: self.end.year(),
            month: self.end.month(),
        }
    }

    /// The period immediately after this one.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::DateOutOfRange` at the end of the calendar.
    pub fn next(&self, closing_day: ClosingDay) -> Result<Self, PeriodError> {
        let day_after = self
            .end
            .succ_opt()
            .ok_or(PeriodError::DateOutOfRange(self.end))?;
        compute_period(day_after, closing_day)
    }

    /// The period immediately before this one.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::DateOutOfRange` at the start of the calendar.
    pub fn previous(&self, closing_day: ClosingDay) -> Result<Self, PeriodError> {
        let day_before = self
            .start
            .pred_opt()
            .ok_or(PeriodError::DateOutOfRange(self.start))?;
        compute_period(day_before, closing_day)
    }

    /// The period `cycles` steps after this one (`0` returns `self`).
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::DateOutOfRange` at the end of the calendar.
    pub fn advance(&self, closing_day: ClosingDay, cycles: u32) -> Result<Self, PeriodError> {
        (0..cycles).try_fold(*self, |period, _| period.next(closing_day))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Year-month label of a period, taken from its end date.
///
/// Consecutive periods of one closing day always have distinct keys, so the
/// key identifies a period once the closing day is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PeriodKey {
    /// Calendar year of the period end.
    pub year: i32,
    /// Calendar month (1-12) of the period end.
    pub month: u32,
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for PeriodKey {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PeriodError::InvalidPeriodKey(s.to_string());
        let (year, month) = s.rsplit_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self { year, month })
    }
}

impl TryFrom<String> for PeriodKey {
    type Error = PeriodError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PeriodKey> for String {
    fn from(key: PeriodKey) -> Self {
        key.to_string()
    }
}

/// Maps a reference date to the statement period containing it.
///
/// If the reference day is on or after the (clamped) closing day, the period
/// starts on the closing day of the reference month and ends the day before
/// the closing day of the following month. Otherwise it starts on the
/// closing day of the previous month and ends the day before the closing day
/// of the reference month.
///
/// # Errors
///
/// Returns `PeriodError::DateOutOfRange` only for dates at the extreme ends of
/// the supported calendar.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use cyclebook_core::period::{ClosingDay, compute_period};
///
/// let day = ClosingDay::new(10).unwrap();
/// let period = compute_period(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(), day).unwrap();
/// assert_eq!(period.start, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
/// assert_eq!(period.end, NaiveDate::from_ymd_opt(2024, 4, 9).unwrap());
/// ```
pub fn compute_period(reference: NaiveDate, closing_day: ClosingDay) -> Result<Period, PeriodError> {
    let out_of_range = || PeriodError::DateOutOfRange(reference);

    let (year, month) = (reference.year(), reference.month());
    let (start_year, start_month) = if reference.day() >= closing_day.effective_in(year, month) {
        (year, month)
    } else {
        shift_month(year, month, -1)
    };

    let start = closing_date(start_year, start_month, closing_day).ok_or_else(out_of_range)?;
    let (next_year, next_month) = shift_month(start_year, start_month, 1);
    let end = closing_date(next_year, next_month, closing_day)
        .and_then(|next_start| next_start.pred_opt())
        .ok_or_else(out_of_range)?;

    Ok(Period { start, end })
}
