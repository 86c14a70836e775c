use chrono::NaiveDate;
use log::trace;

use crate::Calendar;

impl Calendar {
    /// The meetings held on `date`, earliest first.
    ///
    /// The result is an independent copy; meetings sharing the same date,
    /// start and end keep the order they have in this calendar.
    pub fn daily_program(&self, date: NaiveDate) -> Calendar {
        let mut meetings = self
            .iter()
            .filter(|meeting| meeting.date == date)
            .cloned()
            .collect::<Vec<_>>();

        meetings.sort_by(|a, b| a.cmp_schedule(b));

        trace!("Daily program for {date} holds {} meetings", meetings.len());
        meetings.into_iter().collect()
    }
}
