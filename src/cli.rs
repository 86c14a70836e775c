use std::env;
use std::path::PathBuf;
use std::process;

use calendar_core::{parse_date, parse_time, Meeting};
use chrono::{Duration, NaiveDate, NaiveTime};
use getopts::Options;

pub const FILE_ENV: &str = "PERSONAL_CALENDAR_FILE";
const DEFAULT_FILE: &str = "calendar.dat";

pub struct Args {
    pub file: PathBuf,
    pub output_dir: PathBuf,
    pub json: bool,
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Book(Meeting),
    FindName(String),
    FindDate(NaiveDate),
    FindDescription(String),
    FindAllDescription(String),
    FindAllName(String),
    FindAllDate(NaiveDate),
    Earliest,
    RemoveName(String),
    RemoveDate(NaiveDate),
    RemoveDescription(String),
    RemoveAllDescription(String),
    Program(NaiveDate),
    FreeSlot {
        start_date: NaiveDate,
        end_date: NaiveDate,
        window_start: NaiveTime,
        window_end: NaiveTime,
        duration: Duration,
    },
    Workload {
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    ExportIcs,
}

const COMMANDS: &str = "Commands:
    list
    book NAME DESCRIPTION DATE START END
    find-name NAME
    find-date DATE
    find-description WORD
    find-all-description WORD
    find-all-name WORD
    find-all-date DATE
    earliest
    remove-name NAME
    remove-date DATE
    remove-description WORD
    remove-all-description WORD
    program DATE
    free-slot START_DATE END_DATE WINDOW_START WINDOW_END DURATION
    workload START_DATE END_DATE
    export-ics

Dates are written YYYY-MM-DD, times and durations HH:MM.";

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "f",
        "file",
        concat!(
            "Calendar file to load and save [Default: $PERSONAL_CALENDAR_FILE or ",
            "calendar.dat]"
        ),
        "PATH",
    );
    opts.optopt(
        "o",
        "output-dir",
        "Directory workload reports are written to [Default: .]",
        "DIR",
    );
    opts.optflag("j", "json", "Print meetings as JSON");
    opts
}

fn usage(opts: &Options) -> String {
    let brief = format!("Usage: {} [options] COMMAND [ARGS...]", env!("CARGO_PKG_NAME"));
    format!("{}\n{COMMANDS}", opts.usage(&brief))
}

pub fn parse(args: Vec<String>) -> Args {
    let opts = opts();

    let matches = match opts.parse(args) {
        Ok(matches) => matches,
        Err(fail) => {
            eprintln!("{fail}");
            process::exit(1);
        }
    };

    if matches.opt_present("help") {
        println!("{}", usage(&opts));
        process::exit(0);
    }

    let file = matches
        .opt_str("file")
        .or_else(|| env::var(FILE_ENV).ok())
        .unwrap_or_else(|| DEFAULT_FILE.to_string());

    let output_dir = matches.opt_str("output-dir").unwrap_or_else(|| ".".to_string());

    let command = match parse_command(&matches.free) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("{}", opts.short_usage(env!("CARGO_PKG_NAME")));
            process::exit(1);
        }
    };

    Args {
        file: PathBuf::from(file),
        output_dir: PathBuf::from(output_dir),
        json: matches.opt_present("json"),
        command,
    }
}

pub fn parse_command(free: &[String]) -> Result<Command, String> {
    let Some((name, operands)) = free.split_first() else {
        return Err("No command given".to_string());
    };

    let arity = |count: usize| {
        if operands.len() == count {
            Ok(operands)
        } else {
            Err(format!(
                "Command '{name}' takes {count} argument(s), got {}",
                operands.len()
            ))
        }
    };

    let command = match name.as_str() {
        "list" => arity(0).map(|_| Command::List)?,
        "book" => {
            let ops = arity(5)?;
            Command::Book(Meeting::new(
                ops[0].as_str(),
                ops[1].as_str(),
                date(&ops[2])?,
                time(&ops[3])?,
                time(&ops[4])?,
            ))
        }
        "find-name" => Command::FindName(arity(1)?[0].clone()),
        "find-date" => Command::FindDate(date(&arity(1)?[0])?),
        "find-description" => Command::FindDescription(arity(1)?[0].clone()),
        "find-all-description" => Command::FindAllDescription(arity(1)?[0].clone()),
        "find-all-name" => Command::FindAllName(arity(1)?[0].clone()),
        "find-all-date" => Command::FindAllDate(date(&arity(1)?[0])?),
        "earliest" => arity(0).map(|_| Command::Earliest)?,
        "remove-name" => Command::RemoveName(arity(1)?[0].clone()),
        "remove-date" => Command::RemoveDate(date(&arity(1)?[0])?),
        "remove-description" => Command::RemoveDescription(arity(1)?[0].clone()),
        "remove-all-description" => Command::RemoveAllDescription(arity(1)?[0].clone()),
        "program" => Command::Program(date(&arity(1)?[0])?),
        "free-slot" => {
            let ops = arity(5)?;
            Command::FreeSlot {
                start_date: date(&ops[0])?,
                end_date: date(&ops[1])?,
                window_start: time(&ops[2])?,
                window_end: time(&ops[3])?,
                duration: duration(&ops[4])?,
            }
        }
        "workload" => {
            let ops = arity(2)?;
            Command::Workload {
                start_date: date(&ops[0])?,
                end_date: date(&ops[1])?,
            }
        }
        "export-ics" => arity(0).map(|_| Command::ExportIcs)?,
        other => return Err(format!("Unknown command '{other}'")),
    };

    Ok(command)
}

fn date(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).map_err(|err| err.to_string())
}

fn time(raw: &str) -> Result<NaiveTime, String> {
    parse_time(raw).map_err(|err| err.to_string())
}

/// Parses an `HH:MM` duration. Hours may exceed 23.
fn duration(raw: &str) -> Result<Duration, String> {
    let invalid = || format!("Provided duration '{raw}' is not HH:MM");

    let (hours, minutes) = raw.trim().split_once(':').ok_or_else(invalid)?;
    let hours = hours.parse::<i64>().map_err(|_| invalid())?;
    let minutes = minutes.parse::<i64>().map_err(|_| invalid())?;

    if hours < 0 || !(0..60).contains(&minutes) {
        return Err(invalid());
    }

    Ok(Duration::minutes(hours * 60 + minutes))
}
