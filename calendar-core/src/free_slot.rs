use std::fmt;

use chrono::{Duration, NaiveDate, NaiveTime};
use log::debug;

use crate::utils::DayRange;
use crate::{Calendar, Error, Meeting, Result};

/// A span on some date that no meeting of the calendar occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeSlot {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl FreeSlot {
    /// Turns the slot into a meeting that can be booked into a calendar.
    pub fn into_meeting<N, D>(self, name: N, description: D) -> Meeting
    where
        N: Into<String>,
        D: Into<String>,
    {
        Meeting::new(name, description, self.date, self.start, self.end)
    }
}

impl fmt::Display for FreeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.date.format("%Y-%m-%d"),
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

impl Calendar {
    /// Finds the first gap of at least `duration` between `window_start` and
    /// `window_end` on any date from `start_date` to `end_date`.
    ///
    /// Dates are searched in order. Within a date the gap before the first
    /// meeting is tried first, then the gaps between consecutive meetings,
    /// then the gap after the last one. Meetings starting outside the window
    /// are ignored. `Ok(None)` means no date in the range has room.
    pub fn find_free_slot(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        window_start: NaiveTime,
        window_end: NaiveTime,
        duration: Duration,
    ) -> Result<Option<FreeSlot>> {
        if start_date > end_date {
            return Err(Error::InvalidRange(format!(
                "start date {start_date} is after end date {end_date}"
            )));
        }
        if window_start > window_end {
            return Err(Error::InvalidRange(format!(
                "window start {} is after window end {}",
                window_start.format("%H:%M"),
                window_end.format("%H:%M")
            )));
        }
        if duration < Duration::zero() {
            return Err(Error::InvalidValue(format!(
                "duration of {} minutes is negative",
                duration.num_minutes()
            )));
        }

        for date in DayRange::new(start_date, end_date) {
            let program = self.daily_program(date);
            let in_window = program
                .iter()
                .filter(|meeting| (window_start..=window_end).contains(&meeting.start))
                .collect::<Vec<_>>();

            if let Some(start) = first_gap(&in_window, window_start, window_end, duration) {
                let slot = FreeSlot {
                    date,
                    start,
                    end: start + duration,
                };
                debug!("Found free slot {slot}");
                return Ok(Some(slot));
            }
        }

        debug!(
            "No free slot of {} minutes between {start_date} and {end_date}",
            duration.num_minutes()
        );
        Ok(None)
    }
}

/// Start of the first gap of at least `duration` among `meetings`, which must
/// be sorted by schedule.
///
/// A day without meetings in the window is free from `window_start` however
/// long `duration` is, so the slot may end past `window_end` or wrap past
/// midnight.
fn first_gap(
    meetings: &[&Meeting],
    window_start: NaiveTime,
    window_end: NaiveTime,
    duration: Duration,
) -> Option<NaiveTime> {
    let (Some(first), Some(last)) = (meetings.first(), meetings.last()) else {
        return Some(window_start);
    };

    if first.start - window_start >= duration {
        return Some(window_start);
    }

    for pair in meetings.windows(2) {
        if pair[1].start - pair[0].end >= duration {
            return Some(pair[0].end);
        }
    }

    (window_end - last.end >= duration).then_some(last.end)
}
