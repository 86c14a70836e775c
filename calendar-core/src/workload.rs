use std::fmt;
use std::fs;
use std::ops::{Add, AddAssign};
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate, NaiveTime, Weekday};
use log::{debug, info};

use crate::utils::DayRange;
use crate::{weekday_index, Calendar, Error, Result};

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Busy time written as hours with the minutes as two decimal places.
///
/// Minutes are not carried into hours: 1h30m reads `1.30`, and adding two of
/// those gives `2.60`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Load(i64);

impl Load {
    pub fn from_hours_minutes(hours: i64, minutes: i64) -> Self {
        Load(hours * 100 + minutes)
    }

    /// Load of a meeting running from `start` to `end`.
    pub fn between(start: NaiveTime, end: NaiveTime) -> Self {
        Load::from(end - start)
    }
}

impl From<Duration> for Load {
    fn from(duration: Duration) -> Self {
        let minutes = duration.num_minutes();
        let magnitude = minutes.abs();
        Load(minutes.signum() * (magnitude / 60 * 100 + magnitude % 60))
    }
}

impl Add for Load {
    type Output = Load;

    fn add(self, rhs: Load) -> Load {
        Load(self.0 + rhs.0)
    }
}

impl AddAssign for Load {
    fn add_assign(&mut self, rhs: Load) {
        self.0 += rhs.0;
    }
}

impl fmt::Display for Load {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.abs();
        write!(f, "{sign}{}.{:02}", magnitude / 100, magnitude % 100)
    }
}

/// Busy time per weekday over a date range, heaviest day first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadReport {
    start_date: NaiveDate,
    ranking: Vec<(Weekday, Load)>,
}

impl WorkloadReport {
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// All seven weekdays by descending load. Equal loads keep Sunday-first order.
    pub fn ranking(&self) -> &[(Weekday, Load)] {
        &self.ranking
    }

    pub fn load_of(&self, weekday: Weekday) -> Load {
        self.ranking
            .iter()
            .find(|(day, _)| *day == weekday)
            .map(|(_, load)| *load)
            .unwrap_or_default()
    }

    pub fn file_name(&self) -> String {
        format!("stats-{}.txt", self.start_date.format("%Y-%m-%d"))
    }

    /// Writes the report into `dir` and returns the path of the written file.
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let path = dir.as_ref().join(self.file_name());
        fs::write(&path, self.to_string())?;
        info!("Wrote workload report to {}", path.display());
        Ok(path)
    }
}

impl fmt::Display for WorkloadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (weekday, load) in &self.ranking {
            writeln!(f, "{}: {load} hours", weekday_name(*weekday))?;
        }
        Ok(())
    }
}

impl Calendar {
    /// Sums the load of every meeting from `start_date` to `end_date` per weekday.
    pub fn workload_statistic(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<WorkloadReport> {
        if start_date > end_date {
            return Err(Error::InvalidRange(format!(
                "start date {start_date} is after end date {end_date}"
            )));
        }

        let mut totals = [Load::default(); 7];
        for date in DayRange::new(start_date, end_date) {
            let bucket = &mut totals[weekday_index(date)];
            for meeting in &self.daily_program(date) {
                *bucket += Load::from(meeting.duration());
            }
        }

        let mut ranking = WEEKDAYS.into_iter().zip(totals).collect::<Vec<_>>();
        ranking.sort_by(|a, b| b.1.cmp(&a.1));

        debug!("Workload from {start_date} to {end_date}: {ranking:?}");
        Ok(WorkloadReport {
            start_date,
            ranking,
        })
    }
}
