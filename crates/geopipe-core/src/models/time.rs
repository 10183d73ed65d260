//! The temporal validity attached to layers, queries, and operator results.
//!
//! A [`Time`] is a closed interval of UTC instants with millisecond wire
//! resolution. The degenerate interval (`start == end`) is a time point.
//! Canonical sentinel instants stand in for "unbounded" on either side;
//! they match the instants the processing backend treats as `-∞`/`∞`.

use std::fmt;

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GeopipeError, Result};

/// Smallest representable instant, used as the "unbounded start" sentinel.
pub const MIN_INSTANT_MS: i64 = -8_334_632_851_200_000;

/// Largest representable instant, used as the "unbounded end" sentinel.
pub const MAX_INSTANT_MS: i64 = 8_210_298_412_799_999;

/// Granularity of a [`TimeStep`]. Wire names are lowercase plurals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeStepGranularity {
    Millis,
    Seconds,
    Minutes,
    Hours,
    Days,
    Months,
    Years,
}

impl TimeStepGranularity {
    pub const ALL: [TimeStepGranularity; 7] = [
        TimeStepGranularity::Millis,
        TimeStepGranularity::Seconds,
        TimeStepGranularity::Minutes,
        TimeStepGranularity::Hours,
        TimeStepGranularity::Days,
        TimeStepGranularity::Months,
        TimeStepGranularity::Years,
    ];
}

/// A duration as an amount of a calendar granularity, e.g. "3 months".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeStep {
    pub step: u32,
    pub granularity: TimeStepGranularity,
}

impl TimeStep {
    pub fn new(step: u32, granularity: TimeStepGranularity) -> Self {
        Self { step, granularity }
    }
}

/// Whether a [`Time`] is degenerate or a proper interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeType {
    TimePoint,
    TimeInterval,
}

/// Wire shape: `{start, end}` as epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: i64,
    pub end: i64,
}

/// A closed interval `[start, end]` of UTC instants.
///
/// All mutators return a new value; intervals with `start > end` are
/// representable but reported as invalid by [`Time::is_valid`], matching the
/// wire format which carries both bounds without ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "TimeInterval", try_from = "TimeInterval")]
pub struct Time {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Time {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// A degenerate interval at a single instant.
    pub fn point(instant: DateTime<Utc>) -> Self {
        Self {
            start: instant,
            end: instant,
        }
    }

    pub fn from_millis(start: i64, end: i64) -> Result<Self> {
        Ok(Self {
            start: instant_from_millis(start)?,
            end: instant_from_millis(end)?,
        })
    }

    pub fn instant_from_millis(millis: i64) -> Result<Self> {
        let instant = instant_from_millis(millis)?;
        Ok(Self::point(instant))
    }

    /// Parses RFC 3339 date strings; `end` defaults to `start`.
    pub fn from_rfc3339(start: &str, end: Option<&str>) -> Result<Self> {
        let start = parse_instant(start)?;
        let end = match end {
            Some(end) => parse_instant(end)?,
            None => start,
        };
        Ok(Self { start, end })
    }

    /// The interval from the unbounded-start sentinel to the unbounded-end
    /// sentinel, i.e. "all of time".
    pub fn maximal() -> Self {
        Self {
            start: min_instant(),
            end: max_instant(),
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn start_millis(&self) -> i64 {
        self.start.timestamp_millis()
    }

    pub fn end_millis(&self) -> i64 {
        self.end.timestamp_millis()
    }

    pub fn time_type(&self) -> TimeType {
        if self.start == self.end {
            TimeType::TimePoint
        } else {
            TimeType::TimeInterval
        }
    }

    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    /// Strict componentwise comparison on both bounds.
    pub fn is_before(&self, other: &Time) -> bool {
        self.start < other.start && self.end < other.end
    }

    pub fn is_start_min(&self) -> bool {
        self.start_millis() == MIN_INSTANT_MS
    }

    pub fn is_end_max(&self) -> bool {
        self.end_millis() == MAX_INSTANT_MS
    }

    /// Shifts both bounds forward by `step`.
    ///
    /// Month and year steps use calendar arithmetic: a shift landing past
    /// the end of a month clamps to its last day. Shifts that leave the
    /// representable range fail.
    pub fn add(&self, step: TimeStep) -> Result<Self> {
        Ok(Self {
            start: shift_instant(self.start, step, Direction::Forward)?,
            end: shift_instant(self.end, step, Direction::Forward)?,
        })
    }

    /// Shifts both bounds backward by `step`.
    pub fn subtract(&self, step: TimeStep) -> Result<Self> {
        Ok(Self {
            start: shift_instant(self.start, step, Direction::Backward)?,
            end: shift_instant(self.end, step, Direction::Backward)?,
        })
    }

    /// The `start/end` form used in query parameters, a single instant for
    /// time points.
    pub fn as_request_string(&self) -> String {
        match self.time_type() {
            TimeType::TimePoint => instant_string(self.start),
            TimeType::TimeInterval => {
                format!("{}/{}", instant_string(self.start), instant_string(self.end))
            }
        }
    }

    fn start_string(&self) -> String {
        if self.is_start_min() {
            "-∞".to_string()
        } else {
            instant_string(self.start)
        }
    }

    fn end_string(&self) -> String {
        if self.is_end_max() {
            "∞".to_string()
        } else {
            instant_string(self.end)
        }
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.time_type() {
            TimeType::TimePoint => f.write_str(&self.start_string()),
            TimeType::TimeInterval => {
                write!(f, "{} - {}", self.start_string(), self.end_string())
            }
        }
    }
}

impl From<Time> for TimeInterval {
    fn from(time: Time) -> Self {
        Self {
            start: time.start_millis(),
            end: time.end_millis(),
        }
    }
}

impl TryFrom<TimeInterval> for Time {
    type Error = GeopipeError;

    fn try_from(interval: TimeInterval) -> Result<Self> {
        Self::from_millis(interval.start, interval.end)
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Forward,
    Backward,
}

fn instant_from_millis(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or(GeopipeError::TimeInstantOutOfRange { millis })
}

fn parse_instant(input: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(input)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|_| GeopipeError::InvalidTimeString {
            input: input.to_string(),
        })
}

fn min_instant() -> DateTime<Utc> {
    // the sentinel is within chrono's range; the fallback never triggers
    DateTime::from_timestamp_millis(MIN_INSTANT_MS).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn max_instant() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(MAX_INSTANT_MS).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

fn instant_string(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

fn shift_instant(
    instant: DateTime<Utc>,
    step: TimeStep,
    direction: Direction,
) -> Result<DateTime<Utc>> {
    use TimeStepGranularity::*;

    let shifted = match step.granularity {
        Millis => apply_duration(instant, Duration::milliseconds(i64::from(step.step)), direction),
        Seconds => apply_duration(instant, Duration::seconds(i64::from(step.step)), direction),
        Minutes => apply_duration(instant, Duration::minutes(i64::from(step.step)), direction),
        Hours => apply_duration(instant, Duration::hours(i64::from(step.step)), direction),
        Days => apply_duration(instant, Duration::days(i64::from(step.step)), direction),
        Months => apply_months(instant, chrono::Months::new(step.step), direction),
        Years => {
            let months = step
                .step
                .checked_mul(12)
                .ok_or(GeopipeError::TimeShiftOutOfRange)?;
            apply_months(instant, chrono::Months::new(months), direction)
        }
    };

    shifted.ok_or(GeopipeError::TimeShiftOutOfRange)
}

fn apply_duration(
    instant: DateTime<Utc>,
    duration: Duration,
    direction: Direction,
) -> Option<DateTime<Utc>> {
    match direction {
        Direction::Forward => instant.checked_add_signed(duration),
        Direction::Backward => instant.checked_sub_signed(duration),
    }
}

fn apply_months(
    instant: DateTime<Utc>,
    months: Months,
    direction: Direction,
) -> Option<DateTime<Utc>> {
    match direction {
        Direction::Forward => instant.checked_add_months(months),
        Direction::Backward => instant.checked_sub_months(months),
    }
}
