use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

use calendar_core::{Calendar, Result};
use log::{debug, info};

/// Loads the calendar stored at `path`. A missing file is an empty calendar.
pub fn load(path: &Path) -> Result<Calendar> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            info!("No calendar at {}, starting empty", path.display());
            return Ok(Calendar::new());
        }
        Err(err) => return Err(err.into()),
    };

    let calendar = Calendar::read_from(BufReader::new(file))?;
    debug!("Loaded {} meetings from {}", calendar.len(), path.display());
    Ok(calendar)
}

pub fn save(path: &Path, calendar: &Calendar) -> Result<()> {
    let file = File::create(path)?;
    calendar.write_to(BufWriter::new(file))?;
    debug!("Saved {} meetings to {}", calendar.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calendar_core::{calendar_date, time_of_day, Error};

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let calendar = load(&dir.path().join("absent.dat")).unwrap();
        assert!(calendar.is_empty());
    }

    #[test]
    fn saved_calendar_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calendar.dat");

        let mut calendar = Calendar::new();
        calendar.book(
            "Appointment",
            "Appointment with the doctor",
            calendar_date(24, 10, 2022).unwrap(),
            time_of_day(10, 15).unwrap(),
            time_of_day(12, 15).unwrap(),
        );

        save(&path, &calendar).unwrap();
        assert_eq!(load(&path).unwrap(), calendar);
    }

    #[test]
    fn garbage_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calendar.dat");
        std::fs::write(&path, [1u8, 2]).unwrap();

        assert!(matches!(load(&path), Err(Error::Corrupt(_))));
    }
}
