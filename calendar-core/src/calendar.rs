use std::fmt;
use std::slice;

use chrono::{NaiveDate, NaiveTime};
use log::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Meeting, Result};

/// Number of slots a new calendar reserves up front.
pub const DEFAULT_CAPACITY: usize = 10;

/// An ordered collection of meetings.
///
/// Meetings keep their insertion order. Removing one closes the gap by
/// shifting every later meeting one position to the left.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Calendar {
    meetings: Vec<Meeting>,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new()
    }
}

impl Calendar {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            meetings: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.meetings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meetings.is_empty()
    }

    /// Number of meetings the calendar can hold before it has to grow.
    pub fn capacity(&self) -> usize {
        self.meetings.capacity()
    }

    pub fn meetings(&self) -> &[Meeting] {
        &self.meetings
    }

    pub fn iter(&self) -> slice::Iter<'_, Meeting> {
        self.meetings.iter()
    }

    /// Ensures room for `additional` more meetings without further growth.
    pub(crate) fn reserve_exact(&mut self, additional: usize) {
        self.meetings.reserve_exact(additional);
    }

    /// Appends a meeting, doubling the capacity first when the calendar is full.
    pub fn add(&mut self, meeting: Meeting) {
        if self.meetings.len() == self.meetings.capacity() {
            let grow_by = self.meetings.capacity().max(1);
            debug!(
                "Growing calendar from {} to {} slots",
                self.meetings.capacity(),
                self.meetings.capacity() + grow_by
            );
            self.meetings.reserve_exact(grow_by);
        }

        trace!("Adding meeting {:?} on {}", meeting.name, meeting.date);
        self.meetings.push(meeting);
    }

    /// Builds a meeting from its parts and adds it.
    pub fn book<N, D>(
        &mut self,
        name: N,
        description: D,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) where
        N: Into<String>,
        D: Into<String>,
    {
        self.add(Meeting::new(name, description, date, start, end));
    }

    pub fn find_by_name(&self, name: &str) -> Result<&Meeting> {
        self.meetings
            .iter()
            .find(|meeting| meeting.name == name)
            .ok_or_else(|| Error::NotFound(format!("no meeting is named `{name}`")))
    }

    pub fn find_by_date(&self, date: NaiveDate) -> Result<&Meeting> {
        self.meetings
            .iter()
            .find(|meeting| meeting.date == date)
            .ok_or_else(|| Error::NotFound(format!("no meeting takes place on {date}")))
    }

    pub fn find_first_by_description_contains(&self, word: &str) -> Result<&Meeting> {
        self.meetings
            .iter()
            .find(|meeting| meeting.description.contains(word))
            .ok_or_else(|| {
                Error::NotFound(format!("no meeting description contains `{word}`"))
            })
    }

    pub fn find_all_by_description_contains(&self, word: &str) -> Vec<&Meeting> {
        self.meetings
            .iter()
            .filter(|meeting| meeting.description.contains(word))
            .collect()
    }

    pub fn find_all_by_name_contains(&self, word: &str) -> Vec<&Meeting> {
        self.meetings
            .iter()
            .filter(|meeting| meeting.name.contains(word))
            .collect()
    }

    pub fn find_all_by_date(&self, date: NaiveDate) -> Vec<&Meeting> {
        self.meetings
            .iter()
            .filter(|meeting| meeting.date == date)
            .collect()
    }

    /// The meeting that comes first by date, start and end time.
    ///
    /// Among meetings scheduled identically the one stored first wins.
    pub fn earliest(&self) -> Result<&Meeting> {
        self.meetings
            .iter()
            .min_by(|a, b| a.cmp_schedule(b))
            .ok_or(Error::EmptyCollection)
    }

    /// Removes the first meeting equal to `meeting`.
    ///
    /// Returns `false` and leaves the calendar untouched when there is none.
    pub fn remove(&mut self, meeting: &Meeting) -> bool {
        match self.meetings.iter().position(|stored| stored == meeting) {
            Some(index) => {
                self.meetings.remove(index);
                debug!("Removed meeting {:?} at position {index}", meeting.name);
                true
            }
            None => false,
        }
    }

    pub fn remove_by_name(&mut self, name: &str) -> Result<Meeting> {
        let meeting = self.find_by_name(name)?.clone();
        self.remove(&meeting);
        Ok(meeting)
    }

    pub fn remove_by_date(&mut self, date: NaiveDate) -> Result<Meeting> {
        let meeting = self.find_by_date(date)?.clone();
        self.remove(&meeting);
        Ok(meeting)
    }

    pub fn remove_by_first_description_match(&mut self, word: &str) -> Result<Meeting> {
        let meeting = self.find_first_by_description_contains(word)?.clone();
        self.remove(&meeting);
        Ok(meeting)
    }

    /// Removes every meeting whose description contains `word` and returns
    /// how many were removed.
    pub fn remove_all_by_description_contains(&mut self, word: &str) -> usize {
        let matches = self
            .find_all_by_description_contains(word)
            .into_iter()
            .cloned()
            .collect::<Vec<_>>();

        let mut removed = 0;
        for meeting in &matches {
            if self.remove(meeting) {
                removed += 1;
            }
        }

        debug!("Removed {removed} meetings mentioning `{word}`");
        removed
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Personal calendar:")?;
        for meeting in &self.meetings {
            writeln!(f)?;
            writeln!(f, "{meeting}")?;
        }
        Ok(())
    }
}

impl FromIterator<Meeting> for Calendar {
    fn from_iter<I: IntoIterator<Item = Meeting>>(iter: I) -> Self {
        let mut calendar = Calendar::new();
        calendar.extend(iter);
        calendar
    }
}

impl Extend<Meeting> for Calendar {
    fn extend<I: IntoIterator<Item = Meeting>>(&mut self, iter: I) {
        for meeting in iter {
            self.add(meeting);
        }
    }
}

impl IntoIterator for Calendar {
    type Item = Meeting;
    type IntoIter = std::vec::IntoIter<Meeting>;

    fn into_iter(self) -> Self::IntoIter {
        self.meetings.into_iter()
    }
}

impl<'a> IntoIterator for &'a Calendar {
    type Item = &'a Meeting;
    type IntoIter = slice::Iter<'a, Meeting>;

    fn into_iter(self) -> Self::IntoIter {
        self.meetings.iter()
    }
}
