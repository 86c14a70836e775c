use std::fs::File;
use std::io::{BufReader, BufWriter};

use calendar_core::{calendar_date, time_of_day, Calendar, Meeting};

fn sample() -> Calendar {
    let mut calendar = Calendar::new();
    calendar.book(
        "Appointment",
        "Appointment with the doctor",
        calendar_date(24, 10, 2022).unwrap(),
        time_of_day(10, 15).unwrap(),
        time_of_day(12, 15).unwrap(),
    );
    calendar.add(Meeting::default());
    calendar.book(
        "Café ☕",
        "",
        calendar_date(29, 2, 2024).unwrap(),
        time_of_day(23, 59).unwrap(),
        time_of_day(0, 0).unwrap(),
    );
    calendar.add(Meeting::default());
    calendar
}

#[test]
fn round_trip_preserves_meetings_and_order() {
    let calendar = sample();

    let mut bytes = Vec::new();
    calendar.write_to(&mut bytes).unwrap();
    let loaded = Calendar::read_from(bytes.as_slice()).unwrap();

    assert_eq!(loaded.len(), calendar.len());
    assert_eq!(loaded.meetings(), calendar.meetings());
}

#[test]
fn loaded_calendar_has_room_to_grow() {
    let calendar = sample();

    let mut bytes = Vec::new();
    calendar.write_to(&mut bytes).unwrap();
    let loaded = Calendar::read_from(bytes.as_slice()).unwrap();

    assert!(loaded.capacity() >= 2 * calendar.len());
}

#[test]
fn round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calendar.dat");
    let calendar = sample();

    calendar
        .write_to(BufWriter::new(File::create(&path).unwrap()))
        .unwrap();
    let loaded = Calendar::read_from(BufReader::new(File::open(&path).unwrap())).unwrap();

    assert_eq!(loaded, calendar);
}

#[test]
fn json_uses_hour_minute_times() {
    let calendar = sample();

    let json = serde_json::to_value(&calendar).unwrap();
    assert_eq!(json[0]["name"], "Appointment");
    assert_eq!(json[0]["date"], "2022-10-24");
    assert_eq!(json[0]["start"], "10:15");
    assert_eq!(json[0]["end"], "12:15");

    let decoded: Calendar = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, calendar);
}
