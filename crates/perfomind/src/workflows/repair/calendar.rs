//! Calendar bucket keys.
//!
//! Aggregate buckets are keyed by unpadded `YYYY-M-D` / `YYYY-M` strings so
//! that any two replicas recording an event on the same calendar day, month,
//! or week resolve to the identical document key. Weeks start on Sunday and
//! are keyed by their start date.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Error raised when a persisted bucket key does not parse back to a date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{raw}' is not a valid {expected} bucket key")]
pub struct KeyParseError {
    pub raw: String,
    pub expected: &'static str,
}

fn parse_component<T: FromStr>(raw: &str, part: &str, expected: &'static str) -> Result<T, KeyParseError> {
    part.parse::<T>().map_err(|_| KeyParseError {
        raw: raw.to_string(),
        expected,
    })
}

/// Key for a daily carry-in bucket, e.g. `2026-8-6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayKey {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DayKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn to_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.year, self.month, self.day)
    }
}

impl FromStr for DayKey {
    type Err = KeyParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut parts = raw.splitn(3, '-');
        let (year, month, day) = match (parts.next(), parts.next(), parts.next()) {
            (Some(y), Some(m), Some(d)) => (
                parse_component::<i32>(raw, y, "day")?,
                parse_component::<u32>(raw, m, "day")?,
                parse_component::<u32>(raw, d, "day")?,
            ),
            _ => {
                return Err(KeyParseError {
                    raw: raw.to_string(),
                    expected: "day",
                })
            }
        };

        let key = Self { year, month, day };
        if key.to_date().is_none() {
            return Err(KeyParseError {
                raw: raw.to_string(),
                expected: "day",
            });
        }
        Ok(key)
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Key for a monthly carry-in bucket, e.g. `2026-8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = KeyParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut parts = raw.splitn(2, '-');
        let (year, month) = match (parts.next(), parts.next()) {
            (Some(y), Some(m)) => (
                parse_component::<i32>(raw, y, "month")?,
                parse_component::<u32>(raw, m, "month")?,
            ),
            _ => {
                return Err(KeyParseError {
                    raw: raw.to_string(),
                    expected: "month",
                })
            }
        };

        if !(1..=12).contains(&month) {
            return Err(KeyParseError {
                raw: raw.to_string(),
                expected: "month",
            });
        }
        Ok(Self { year, month })
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Key for a weekly first-visit bucket: the Sunday that starts the week,
/// rendered like a [`DayKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekKey(NaiveDate);

impl WeekKey {
    /// Week containing `date`, normalized to its Sunday start.
    pub fn containing(date: NaiveDate) -> Self {
        let back = date.weekday().num_days_from_sunday() as i64;
        Self(date - Duration::days(back))
    }

    pub fn start(self) -> NaiveDate {
        self.0
    }

    pub fn previous(self) -> Self {
        Self(self.0 - Duration::days(7))
    }

    /// Trailing `count`-week window ending at the week containing `today`,
    /// oldest first.
    pub fn trailing(today: NaiveDate, count: usize) -> Vec<Self> {
        let newest = Self::containing(today);
        (0..count)
            .rev()
            .map(|back| Self(newest.0 - Duration::days(7 * back as i64)))
            .collect()
    }

    /// Short chart label, `W <month>/<day>`.
    pub fn label(self) -> String {
        format!("W {}/{}", self.0.month(), self.0.day())
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", DayKey::from_date(self.0))
    }
}

impl FromStr for WeekKey {
    type Err = KeyParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let day = DayKey::from_str(raw).map_err(|_| KeyParseError {
            raw: raw.to_string(),
            expected: "week",
        })?;
        let date = day.to_date().ok_or_else(|| KeyParseError {
            raw: raw.to_string(),
            expected: "week",
        })?;
        Ok(Self(date))
    }
}

impl Serialize for WeekKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn day_and_month_keys_render_unpadded() {
        let day = DayKey::from_date(date(2026, 8, 6));
        assert_eq!(day.to_string(), "2026-8-6");
        assert_eq!(MonthKey::from_date(date(2026, 8, 6)).to_string(), "2026-8");
    }

    #[test]
    fn keys_round_trip_through_display_and_parse() {
        let day: DayKey = "2025-12-31".parse().expect("day parses");
        assert_eq!(day.to_string(), "2025-12-31");

        let month: MonthKey = "2025-1".parse().expect("month parses");
        assert_eq!(month, MonthKey { year: 2025, month: 1 });

        let week: WeekKey = "2026-8-2".parse().expect("week parses");
        assert_eq!(week.start(), date(2026, 8, 2));
    }

    #[test]
    fn rejects_keys_that_are_not_calendar_dates() {
        assert!("2026-13-1".parse::<DayKey>().is_err());
        assert!("2026-2-30".parse::<DayKey>().is_err());
        assert!("2026-0".parse::<MonthKey>().is_err());
        assert!("garbage".parse::<DayKey>().is_err());
    }

    #[test]
    fn week_key_normalizes_to_sunday() {
        // 2026-08-06 is a Thursday; its week starts on Sunday 2026-08-02.
        let week = WeekKey::containing(date(2026, 8, 6));
        assert_eq!(week.start(), date(2026, 8, 2));
        assert_eq!(week.start().weekday(), Weekday::Sun);

        // A Sunday maps to itself.
        assert_eq!(WeekKey::containing(date(2026, 8, 2)).start(), date(2026, 8, 2));
    }

    #[test]
    fn same_week_dates_share_a_key() {
        let monday = WeekKey::containing(date(2026, 8, 3));
        let saturday = WeekKey::containing(date(2026, 8, 8));
        assert_eq!(monday, saturday);
        assert_eq!(monday.to_string(), "2026-8-2");
    }

    #[test]
    fn trailing_window_steps_back_seven_days_oldest_first() {
        let weeks = WeekKey::trailing(date(2026, 8, 6), 8);
        assert_eq!(weeks.len(), 8);
        assert_eq!(weeks[7].start(), date(2026, 8, 2));
        assert_eq!(weeks[0].start(), date(2026, 6, 14));
        for pair in weeks.windows(2) {
            assert_eq!(pair[1].start() - pair[0].start(), Duration::days(7));
        }
    }

    #[test]
    fn week_label_uses_month_and_day() {
        assert_eq!(WeekKey::containing(date(2026, 8, 6)).label(), "W 8/2");
    }
}
