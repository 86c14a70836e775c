use std::cmp::Ordering;
use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveTime};

#[cfg(feature = "serde")]
use chrono::Timelike;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// Builds a calendar date from its day, month and year components.
///
/// Years outside `1..=9999` and days that do not exist in the given month
/// are rejected with [`Error::InvalidValue`].
pub fn calendar_date(day: u32, month: u32, year: i32) -> Result<NaiveDate> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(Error::InvalidValue(format!(
            "year {year} is outside {MIN_YEAR}..={MAX_YEAR}"
        )));
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        Error::InvalidValue(format!("{year:04}-{month:02}-{day:02} is not a valid date"))
    })
}

/// Builds a minute precision time of day.
pub fn time_of_day(hour: u32, minute: u32) -> Result<NaiveTime> {
    if hour > 23 {
        return Err(Error::InvalidValue(format!("hour {hour} is not in 0-23 range")));
    }
    if minute > 59 {
        return Err(Error::InvalidValue(format!(
            "minute {minute} is not in 0-59 range"
        )));
    }

    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| Error::InvalidValue(format!("{hour:02}:{minute:02} is not a valid time")))
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date<S: AsRef<str>>(s: S) -> Result<NaiveDate> {
    let s = s.as_ref().trim();
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|err| Error::InvalidValue(format!("`{s}` is not a YYYY-MM-DD date: {err}")))?;

    calendar_date(date.day(), date.month(), date.year())
}

/// Parses an `HH:MM` time of day.
pub fn parse_time<S: AsRef<str>>(s: S) -> Result<NaiveTime> {
    let s = s.as_ref().trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .map_err(|err| Error::InvalidValue(format!("`{s}` is not an HH:MM time: {err}")))
}

/// Index of the date's weekday, Sunday being 0.
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

#[cfg(feature = "serde")]
fn serialize_naive_time<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    let formatted_time = format!("{:02}:{:02}", time.hour(), time.minute());
    serializer.serialize_str(&formatted_time)
}

#[cfg(feature = "serde")]
fn deserialize_naive_time<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<NaiveTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_time(&raw).map_err(serde::de::Error::custom)
}

#[cfg(feature = "serde")]
fn deserialize_naive_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Meeting {
    pub name: String,
    pub description: String,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "deserialize_naive_date"))]
    pub date: NaiveDate,
    #[cfg_attr(
        feature = "serde",
        serde(
            serialize_with = "serialize_naive_time",
            deserialize_with = "deserialize_naive_time"
        )
    )]
    pub start: NaiveTime,
    #[cfg_attr(
        feature = "serde",
        serde(
            serialize_with = "serialize_naive_time",
            deserialize_with = "deserialize_naive_time"
        )
    )]
    pub end: NaiveTime,
}

impl Meeting {
    pub fn new<N, D>(
        name: N,
        description: D,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        Self {
            name: name.into(),
            description: description.into(),
            date,
            start,
            end,
        }
    }

    /// Orders meetings by date, then start time, then end time.
    ///
    /// Name and description take no part in the comparison, so two meetings
    /// can compare `Equal` here without being equal.
    pub fn cmp_schedule(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then_with(|| self.start.cmp(&other.start))
            .then_with(|| self.end.cmp(&other.end))
    }

    /// Time between start and end. Negative when the meeting ends before it starts.
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }
}

impl Default for Meeting {
    fn default() -> Self {
        Self {
            name: "Empty".to_string(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2001, 1, 1).unwrap_or_default(),
            start: NaiveTime::default(),
            end: NaiveTime::default(),
        }
    }
}

impl fmt::Display for Meeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Meeting \"{}\":", self.name)?;
        writeln!(f, "Description: {}", self.description)?;
        writeln!(f, "Date: {}", self.date.format("%Y-%m-%d"))?;
        writeln!(f, "Starting hour: {}", self.start.format("%H:%M"))?;
        write!(f, "Ending hour: {}", self.end.format("%H:%M"))
    }
}
