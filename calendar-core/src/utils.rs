use std::mem;

use chrono::NaiveDate;

/// Every date from `start` to `end`, both inclusive, one day at a time.
pub struct DayRange(Option<NaiveDate>, NaiveDate);

impl DayRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self(Some(start), end)
    }
}

impl Iterator for DayRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        match self.0 {
            Some(current) if current <= self.1 => {
                mem::replace(&mut self.0, current.succ_opt())
            }
            _ => None,
        }
    }
}
