use calendar_core::{calendar_date, time_of_day, Calendar, Error, FreeSlot, Meeting};
use chrono::{Duration, NaiveDate, NaiveTime};

fn at(hour: u32, minute: u32) -> NaiveTime {
    time_of_day(hour, minute).unwrap()
}

fn day(day: u32) -> NaiveDate {
    calendar_date(day, 10, 2022).unwrap()
}

/// Meetings on 2022-10-23 at 09:00-12:00, 12:00-15:00 and 17:00-20:00.
fn busy_sunday() -> Calendar {
    let mut calendar = Calendar::new();
    calendar.book("Morning", "planning", day(23), at(9, 0), at(12, 0));
    calendar.book("Afternoon", "review", day(23), at(12, 0), at(15, 0));
    calendar.book("Evening", "dinner", day(23), at(17, 0), at(20, 0));
    calendar
}

#[test]
fn finds_only_gap_long_enough() {
    let slot = busy_sunday()
        .find_free_slot(day(23), day(23), at(9, 0), at(20, 0), Duration::hours(2))
        .unwrap();

    assert_eq!(
        slot,
        Some(FreeSlot {
            date: day(23),
            start: at(15, 0),
            end: at(17, 0),
        })
    );
}

#[test]
fn no_gap_before_window_end() {
    let slot = busy_sunday()
        .find_free_slot(day(23), day(23), at(8, 0), at(16, 0), Duration::hours(2))
        .unwrap();

    assert_eq!(slot, None);
}

#[test]
fn first_free_day_wins() {
    let slot = busy_sunday()
        .find_free_slot(day(22), day(23), at(8, 0), at(16, 0), Duration::hours(2))
        .unwrap()
        .unwrap();

    assert_eq!(slot.date, day(22));
    assert_eq!(slot.start, at(8, 0));
    assert_eq!(slot.end, at(10, 0));
}

#[test]
fn search_moves_on_to_later_dates() {
    let slot = busy_sunday()
        .find_free_slot(day(23), day(24), at(8, 0), at(16, 0), Duration::hours(2))
        .unwrap()
        .unwrap();

    assert_eq!(slot.date, day(24));
    assert_eq!(slot.start, at(8, 0));
}

#[test]
fn gap_before_first_meeting_is_used() {
    let slot = busy_sunday()
        .find_free_slot(day(23), day(23), at(6, 0), at(20, 0), Duration::hours(2))
        .unwrap()
        .unwrap();

    assert_eq!(slot.start, at(6, 0));
    assert_eq!(slot.end, at(8, 0));
}

#[test]
fn gap_after_last_meeting_is_used() {
    let slot = busy_sunday()
        .find_free_slot(day(23), day(23), at(9, 0), at(23, 0), Duration::hours(3))
        .unwrap()
        .unwrap();

    assert_eq!(slot.start, at(20, 0));
    assert_eq!(slot.end, at(23, 0));
}

#[test]
fn meetings_starting_outside_window_are_ignored() {
    let mut calendar = Calendar::new();
    calendar.book("Early", "", day(23), at(6, 0), at(7, 0));
    calendar.book("Late", "", day(23), at(18, 0), at(19, 0));

    let slot = calendar
        .find_free_slot(day(23), day(23), at(8, 0), at(12, 0), Duration::hours(4))
        .unwrap()
        .unwrap();

    assert_eq!(slot.start, at(8, 0));
    assert_eq!(slot.end, at(12, 0));
}

#[test]
fn free_day_is_taken_even_when_window_is_short() {
    let mut calendar = Calendar::new();
    calendar.book("Sunday", "", day(23), at(8, 0), at(9, 0));

    let slot = calendar
        .find_free_slot(day(22), day(23), at(8, 0), at(9, 0), Duration::hours(2))
        .unwrap()
        .unwrap();

    assert_eq!(slot.date, day(22));
    assert_eq!(slot.start, at(8, 0));
    assert_eq!(slot.end, at(10, 0));
}

#[test]
fn free_day_slot_wraps_past_midnight() {
    let slot = Calendar::new()
        .find_free_slot(day(22), day(22), at(23, 0), at(23, 30), Duration::hours(2))
        .unwrap()
        .unwrap();

    assert_eq!(slot.start, at(23, 0));
    assert_eq!(slot.end, at(1, 0));
}

#[test]
fn reversed_ranges_are_rejected() {
    let calendar = busy_sunday();

    let err = calendar
        .find_free_slot(day(23), day(22), at(8, 0), at(16, 0), Duration::hours(2))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidRange(_)));
    assert!(!err.is_recoverable());

    let err = calendar
        .find_free_slot(day(22), day(23), at(16, 0), at(8, 0), Duration::hours(2))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidRange(_)));
}

#[test]
fn negative_duration_is_rejected() {
    let err = busy_sunday()
        .find_free_slot(day(22), day(23), at(8, 0), at(16, 0), Duration::hours(-1))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidValue(_)));
}

#[test]
fn found_slot_can_be_booked() {
    let mut calendar = busy_sunday();
    let slot = calendar
        .find_free_slot(day(23), day(23), at(9, 0), at(20, 0), Duration::hours(2))
        .unwrap()
        .unwrap();

    calendar.add(slot.into_meeting("Focus", "deep work"));

    let program = calendar.daily_program(day(23));
    let names = program.iter().map(|m: &Meeting| m.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, ["Morning", "Afternoon", "Focus", "Evening"]);

    let again = calendar
        .find_free_slot(day(23), day(23), at(9, 0), at(20, 0), Duration::hours(2))
        .unwrap();
    assert_eq!(again, None);
}
