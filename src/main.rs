mod cli;
mod store;

use std::env;
use std::process;

use calendar_core::{Calendar, Meeting, Result};
use log::{debug, info};

use cli::{Args, Command};

const LOG_ENV: &str = "LOG";
const DEFAULT_LOG_FILTER: &str = "personal_calendar=info,calendar_core=info";

fn setup_logging() {
    let filter = env::var(LOG_ENV).unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());
    pretty_env_logger::formatted_builder()
        .parse_filters(&filter)
        .init();
}

fn main() {
    setup_logging();

    let args = cli::parse(env::args().skip(1).collect());

    let mut calendar = match store::load(&args.file) {
        Ok(calendar) => calendar,
        Err(err) => {
            eprintln!("Failed to load calendar from {}: {err}", args.file.display());
            process::exit(1);
        }
    };

    match run(&args, &mut calendar) {
        Ok(true) => {
            if let Err(err) = store::save(&args.file, &calendar) {
                eprintln!("Failed to save calendar to {}: {err}", args.file.display());
                process::exit(1);
            }
        }
        Ok(false) => debug!("Calendar unchanged, not saving"),
        Err(err) if err.is_recoverable() => eprintln!("{err}"),
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

/// Runs the requested command and returns whether the calendar changed.
fn run(args: &Args, calendar: &mut Calendar) -> Result<bool> {
    let json = args.json;

    match &args.command {
        Command::List => {
            if json {
                print_meetings(&calendar.iter().collect::<Vec<_>>(), true);
            } else {
                print!("{calendar}");
            }
            Ok(false)
        }
        Command::Book(meeting) => {
            calendar.add(meeting.clone());
            info!("Booked {:?} on {}", meeting.name, meeting.date);
            Ok(true)
        }
        Command::FindName(name) => {
            print_meetings(&[calendar.find_by_name(name)?], json);
            Ok(false)
        }
        Command::FindDate(date) => {
            print_meetings(&[calendar.find_by_date(*date)?], json);
            Ok(false)
        }
        Command::FindDescription(word) => {
            print_meetings(&[calendar.find_first_by_description_contains(word)?], json);
            Ok(false)
        }
        Command::FindAllDescription(word) => {
            print_meetings(&calendar.find_all_by_description_contains(word), json);
            Ok(false)
        }
        Command::FindAllName(word) => {
            print_meetings(&calendar.find_all_by_name_contains(word), json);
            Ok(false)
        }
        Command::FindAllDate(date) => {
            print_meetings(&calendar.find_all_by_date(*date), json);
            Ok(false)
        }
        Command::Earliest => {
            print_meetings(&[calendar.earliest()?], json);
            Ok(false)
        }
        Command::RemoveName(name) => {
            print_removed(&calendar.remove_by_name(name)?);
            Ok(true)
        }
        Command::RemoveDate(date) => {
            print_removed(&calendar.remove_by_date(*date)?);
            Ok(true)
        }
        Command::RemoveDescription(word) => {
            print_removed(&calendar.remove_by_first_description_match(word)?);
            Ok(true)
        }
        Command::RemoveAllDescription(word) => {
            let removed = calendar.remove_all_by_description_contains(word);
            println!("Removed {removed} meeting(s)");
            Ok(removed > 0)
        }
        Command::Program(date) => {
            let program = calendar.daily_program(*date);
            print_meetings(&program.iter().collect::<Vec<_>>(), json);
            Ok(false)
        }
        Command::FreeSlot {
            start_date,
            end_date,
            window_start,
            window_end,
            duration,
        } => {
            let slot = calendar.find_free_slot(
                *start_date,
                *end_date,
                *window_start,
                *window_end,
                *duration,
            )?;
            match slot {
                Some(slot) => println!("Free slot: {slot}"),
                None => println!("No free slot found"),
            }
            Ok(false)
        }
        Command::Workload {
            start_date,
            end_date,
        } => {
            let report = calendar.workload_statistic(*start_date, *end_date)?;
            print!("{report}");
            report.save(&args.output_dir)?;
            Ok(false)
        }
        Command::ExportIcs => {
            println!("{}", calendar.to_ics(env!("CARGO_PKG_NAME")));
            Ok(false)
        }
    }
}

fn print_meetings(meetings: &[&Meeting], json: bool) {
    if json {
        match serde_json::to_string_pretty(meetings) {
            Ok(rendered) => println!("{rendered}"),
            Err(err) => eprintln!("Failed to render meetings as JSON: {err}"),
        }
        return;
    }

    if meetings.is_empty() {
        println!("No meetings found");
    }

    for meeting in meetings {
        println!("{meeting}\n");
    }
}

fn print_removed(meeting: &Meeting) {
    println!("Removed:\n{meeting}");
}
