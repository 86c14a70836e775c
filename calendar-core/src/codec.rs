//! Flat binary layout of a calendar.
//!
//! Every integer is a little-endian `i32`. The stream starts with the number
//! of meetings, followed by one record per meeting:
//!
//! | field       | encoding                       |
//! |-------------|--------------------------------|
//! | name        | byte length, then UTF-8 bytes  |
//! | description | byte length, then UTF-8 bytes  |
//! | date        | day, month, year               |
//! | start       | hour, minute                   |
//! | end         | hour, minute                   |

use std::io::{self, Read, Write};

use chrono::{Datelike, NaiveTime, Timelike};
use log::debug;

use crate::{calendar_date, time_of_day, Calendar, Error, Meeting, Result};

impl Calendar {
    /// Writes the calendar in its flat binary layout.
    ///
    /// Fails with [`Error::InvalidValue`] before writing anything when a
    /// meeting has a time with seconds or a year outside `1..=9999`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        for meeting in self {
            check_representable(meeting)?;
        }

        write_len(&mut writer, self.len(), "meeting count")?;

        for meeting in self {
            write_meeting(&mut writer, meeting)?;
        }

        writer.flush()?;
        debug!("Serialized {} meetings", self.len());
        Ok(())
    }

    /// Reads a calendar written by [`Calendar::write_to`].
    ///
    /// The loaded calendar has room for at least twice as many meetings as it
    /// holds.
    pub fn read_from<R: Read>(mut reader: R) -> Result<Calendar> {
        let count = read_len(&mut reader, "meeting count")?;

        let mut meetings = Vec::new();
        for index in 0..count {
            let meeting = read_meeting(&mut reader).map_err(|err| match err {
                Error::Corrupt(reason) => Error::Corrupt(format!("meeting #{index}: {reason}")),
                other => other,
            })?;
            meetings.push(meeting);
        }

        let mut calendar = Calendar::with_capacity(0);
        calendar.reserve_exact(count * 2);
        calendar.extend(meetings);

        debug!("Deserialized {count} meetings");
        Ok(calendar)
    }
}

fn check_representable(meeting: &Meeting) -> Result<()> {
    let date = meeting.date;
    calendar_date(date.day(), date.month(), date.year())?;

    for time in [meeting.start, meeting.end] {
        if time.second() != 0 || time.nanosecond() != 0 {
            return Err(Error::InvalidValue(format!(
                "meeting {:?}: {time} is not minute precision",
                meeting.name
            )));
        }
    }
    Ok(())
}

fn write_meeting<W: Write>(writer: &mut W, meeting: &Meeting) -> Result<()> {
    write_str(writer, &meeting.name)?;
    write_str(writer, &meeting.description)?;

    let date = meeting.date;
    write_i32(writer, date.day() as i32)?;
    write_i32(writer, date.month() as i32)?;
    write_i32(writer, date.year())?;

    write_time(writer, meeting.start)?;
    write_time(writer, meeting.end)
}

fn read_meeting<R: Read>(reader: &mut R) -> Result<Meeting> {
    let name = read_str(reader, "name")?;
    let description = read_str(reader, "description")?;

    let day = read_u32(reader, "day")?;
    let month = read_u32(reader, "month")?;
    let year = read_i32(reader)?;
    let date = calendar_date(day, month, year)?;

    let start = read_time(reader)?;
    let end = read_time(reader)?;

    Ok(Meeting {
        name,
        description,
        date,
        start,
        end,
    })
}

fn write_time<W: Write>(writer: &mut W, time: NaiveTime) -> Result<()> {
    write_i32(writer, time.hour() as i32)?;
    write_i32(writer, time.minute() as i32)
}

fn read_time<R: Read>(reader: &mut R) -> Result<NaiveTime> {
    let hour = read_u32(reader, "hour")?;
    let minute = read_u32(reader, "minute")?;
    time_of_day(hour, minute)
}

fn write_str<W: Write>(writer: &mut W, s: &str) -> Result<()> {
    write_len(writer, s.len(), "string length")?;
    writer.write_all(s.as_bytes())?;
    Ok(())
}

fn read_str<R: Read>(reader: &mut R, field: &str) -> Result<String> {
    let len = read_len(reader, field)?;

    let mut bytes = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut bytes)?;
    if bytes.len() != len {
        return Err(truncated());
    }

    String::from_utf8(bytes).map_err(|err| Error::Corrupt(format!("{field} is not UTF-8: {err}")))
}

fn write_len<W: Write>(writer: &mut W, len: usize, what: &str) -> Result<()> {
    let len = i32::try_from(len)
        .map_err(|_| Error::InvalidValue(format!("{what} {len} does not fit the layout")))?;
    write_i32(writer, len)
}

fn read_len<R: Read>(reader: &mut R, what: &str) -> Result<usize> {
    let value = read_i32(reader)?;
    usize::try_from(value).map_err(|_| Error::Corrupt(format!("{what} {value} is negative")))
}

fn read_u32<R: Read>(reader: &mut R, what: &str) -> Result<u32> {
    let value = read_i32(reader)?;
    u32::try_from(value)
        .map_err(|_| Error::InvalidValue(format!("{what} {value} is negative")))
}

fn write_i32<W: Write>(writer: &mut W, value: i32) -> Result<()> {
    writer.write_all(&value.to_le_bytes())?;
    Ok(())
}

fn read_i32<R: Read>(reader: &mut R) -> Result<i32> {
    let mut buf = [0; 4];
    reader.read_exact(&mut buf).map_err(|err| match err.kind() {
        io::ErrorKind::UnexpectedEof => truncated(),
        _ => Error::Io(err),
    })?;
    Ok(i32::from_le_bytes(buf))
}

fn truncated() -> Error {
    Error::Corrupt("unexpected end of data".to_string())
}
