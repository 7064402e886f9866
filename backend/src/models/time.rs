//! Day and hour value types used by the schedule core.
//!
//! Parsing from form strings happens here, at the input boundary, so the overlap
//! detector and the layout engine only ever see validated values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ChartError;

/// One of the seven days of the Persian week.
///
/// The discriminant is the canonical row index: Saturday is row 0 and is drawn
/// at the top of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Saturday = 0,
    Sunday = 1,
    Monday = 2,
    Tuesday = 3,
    Wednesday = 4,
    Thursday = 5,
    Friday = 6,
}

impl Weekday {
    /// All days in row order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Saturday,
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Canonical row index (0..=6).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Day for a row index, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Persian display name, as submitted by the form.
    pub fn persian_name(self) -> &'static str {
        match self {
            Weekday::Saturday => "شنبه",
            Weekday::Sunday => "یکشنبه",
            Weekday::Monday => "دوشنبه",
            Weekday::Tuesday => "سه‌شنبه",
            Weekday::Wednesday => "چهارشنبه",
            Weekday::Thursday => "پنج‌شنبه",
            Weekday::Friday => "جمعه",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.persian_name())
    }
}

impl FromStr for Weekday {
    type Err = ChartError;

    /// Accepts the Persian names (with or without the zero-width non-joiner in the
    /// compound names) and the English lowercase names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let compact: String = trimmed.chars().filter(|c| *c != '\u{200C}' && *c != ' ').collect();

        let day = match compact.as_str() {
            "شنبه" => Weekday::Saturday,
            "یکشنبه" => Weekday::Sunday,
            "دوشنبه" => Weekday::Monday,
            "سهشنبه" => Weekday::Tuesday,
            "چهارشنبه" => Weekday::Wednesday,
            "پنجشنبه" => Weekday::Thursday,
            "جمعه" => Weekday::Friday,
            other => match other.to_lowercase().as_str() {
                "saturday" => Weekday::Saturday,
                "sunday" => Weekday::Sunday,
                "monday" => Weekday::Monday,
                "tuesday" => Weekday::Tuesday,
                "wednesday" => Weekday::Wednesday,
                "thursday" => Weekday::Thursday,
                "friday" => Weekday::Friday,
                _ => return Err(ChartError::InvalidDay(trimmed.to_string())),
            },
        };
        Ok(day)
    }
}

/// An hour of the day in `[0, 24)`. Minutes are not modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TimeOfDay(u8);

impl TimeOfDay {
    pub const MAX_HOUR: u8 = 23;

    /// Create a time from an hour, rejecting values outside `[0, 24)`.
    pub fn from_hour(hour: u8) -> Result<Self, ChartError> {
        if hour > Self::MAX_HOUR {
            return Err(ChartError::InvalidTime(hour.to_string()));
        }
        Ok(Self(hour))
    }

    pub fn hour(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for TimeOfDay {
    type Error = ChartError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        TimeOfDay::from_hour(value)
    }
}

impl From<TimeOfDay> for u8 {
    fn from(value: TimeOfDay) -> Self {
        value.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

impl FromStr for TimeOfDay {
    type Err = ChartError;

    /// Parses `"HH"` or `"HH:MM"`, keeping only the hour. Persian digits are
    /// accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_digits(s.trim());
        let hour_part = normalized.split(':').next().unwrap_or_default();
        let hour: u8 = hour_part
            .parse()
            .map_err(|_| ChartError::InvalidTime(s.to_string()))?;
        TimeOfDay::from_hour(hour).map_err(|_| ChartError::InvalidTime(s.to_string()))
    }
}

/// Replace Persian (and Arabic-Indic) digits with ASCII digits.
pub fn normalize_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '۰'..='۹' => char::from(b'0' + (c as u32 - '۰' as u32) as u8),
            '٠'..='٩' => char::from(b'0' + (c as u32 - '٠' as u32) as u8),
            other => other,
        })
        .collect()
}
