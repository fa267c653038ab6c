//! Core domain types: monetary amounts, appointment records and the loaded table.

use crate::error::{MoneyError, RecordError};
use chrono::{NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// Number of minor units (hundredths) in one major currency unit.
const MINOR_PER_MAJOR: i64 = 100;

/// A monetary amount held as an integer number of hundredths.
///
/// Parsing and display are exact, so an amount written out and read back
/// is unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from hundredths.
    #[must_use]
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Creates an amount from whole major units.
    #[must_use]
    pub const fn from_major(major: i64) -> Self {
        Self(major * MINOR_PER_MAJOR)
    }

    /// Amount in hundredths.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Approximate floating point value, for chart coordinates only.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    /// Divides by a count, rounding half away from zero.
    ///
    /// Returns `None` when `count` is zero.
    #[must_use]
    pub fn checked_div(self, count: u64) -> Option<Self> {
        if count == 0 {
            return None;
        }
        let count = i128::from(count);
        let value = i128::from(self.0);
        let quotient = value / count;
        let remainder = value % count;
        let rounded = if remainder.abs() * 2 >= count {
            quotient + value.signum()
        } else {
            quotient
        };
        i64::try_from(rounded).ok().map(Self)
    }

    /// Share of `self` in `total` as a percentage; zero when `total` is zero.
    #[must_use]
    pub fn percent_of(self, total: Self) -> f64 {
        if total.0 == 0 {
            0.0
        } else {
            self.as_f64() / total.as_f64() * 100.0
        }
    }
}

/// Addition saturates at the `i64` bounds instead of wrapping.
impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per = MINOR_PER_MAJOR.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / per, abs % per)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    /// Parses a plain decimal such as `12`, `12.5`, `-3.25` or `+7.125`.
    ///
    /// Digits beyond the second fractional place are rounded half away from zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyError::Empty);
        }

        let (negative, unsigned) = match trimmed.as_bytes()[0] {
            b'-' => (true, &trimmed[1..]),
            b'+' => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(MoneyError::Invalid(trimmed.to_string()));
        }

        let overflow = || MoneyError::Overflow(trimmed.to_string());
        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };

        let digits = fraction.as_bytes();
        let digit = |i: usize| digits.get(i).map_or(0, |b| i64::from(b - b'0'));
        let mut cents = digit(0) * 10 + digit(1);
        if digit(2) >= 5 {
            cents += 1;
        }

        let minor = whole_value
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|v| v.checked_add(cents))
            .ok_or_else(overflow)?;

        Ok(Self(if negative { -minor } else { minor }))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One appointment or transaction row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    branch: String,
    timestamp: NaiveDateTime,
    service: String,
    revenue: Money,
    appointments: u32,
}

impl Record {
    /// Largest revenue a single record may carry. At this bound a table needs
    /// tens of millions of records before any sum reaches the `i64` limit.
    pub const MAX_REVENUE: Money = Money::from_major(1_000_000_000);

    /// Creates a validated record.
    ///
    /// Branch and service are trimmed and must be non-empty; revenue must not
    /// be negative or above [`Record::MAX_REVENUE`].
    pub fn new(
        branch: impl Into<String>,
        timestamp: NaiveDateTime,
        service: impl Into<String>,
        revenue: Money,
        appointments: u32,
    ) -> Result<Self, RecordError> {
        let branch = branch.into().trim().to_string();
        let service = service.into().trim().to_string();

        if branch.is_empty() {
            return Err(RecordError::EmptyBranch);
        }
        if service.is_empty() {
            return Err(RecordError::EmptyService);
        }
        if revenue.is_negative() {
            return Err(RecordError::NegativeRevenue(revenue.to_string()));
        }
        if revenue > Self::MAX_REVENUE {
            return Err(RecordError::RevenueTooLarge(revenue.to_string()));
        }

        Ok(Self {
            branch,
            timestamp,
            service,
            revenue,
            appointments,
        })
    }

    /// Branch identifier.
    #[must_use]
    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Date and time of the appointment.
    #[must_use]
    pub const fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Service type.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Revenue taken.
    #[must_use]
    pub const fn revenue(&self) -> Money {
        self.revenue
    }

    /// Number of appointments this row represents.
    #[must_use]
    pub const fn appointments(&self) -> u32 {
        self.appointments
    }

    /// Calendar date of the timestamp.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Whole hour of the day (0-23), flooring minutes and seconds.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn hour(&self) -> u8 {
        self.timestamp.hour() as u8
    }

    /// Day of the week of the timestamp.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        chrono::Datelike::weekday(&self.timestamp)
    }
}

/// Immutable, ordered set of records sharing one schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    /// Wraps an ordered list of records.
    #[must_use]
    pub const fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// All records in input order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterates records in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<Record> for Table {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
