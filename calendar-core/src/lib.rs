//! Personal meeting calendar: storage, lookups, daily programs, free slot
//! search and weekday workload statistics.

mod calendar;
mod codec;
mod error;
mod free_slot;
mod program;
mod structs;
mod utils;
mod workload;

#[cfg(feature = "ics")]
mod ics;

pub use calendar::{Calendar, DEFAULT_CAPACITY};
pub use error::{Error, Result};
pub use free_slot::FreeSlot;
pub use structs::{calendar_date, parse_date, parse_time, time_of_day, weekday_index, Meeting};
pub use utils::DayRange;
pub use workload::{weekday_name, Load, WorkloadReport};
