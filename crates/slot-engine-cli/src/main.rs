//! `slots` CLI — compute bookable time slots from availability and booking JSON.
//!
//! ## Usage
//!
//! ```sh
//! # Slots for a date (availability from stdin, times in the set's time zone)
//! cat availability.json | slots generate --date 2026-03-16 --duration 30
//!
//! # Subtract existing bookings, evaluate "now" explicitly, 24h labels
//! slots generate -a availability.json -b bookings.json --date 2026-03-16 \
//!     --now 2026-03-16T09:10:00Z --format 24h
//!
//! # Full result (slots plus skipped intervals/bookings) as JSON
//! slots generate -a availability.json --date 2026-03-16 --json
//!
//! # Weekdays with availability (Sun=0 .. Sat=6)
//! slots days -a availability.json
//!
//! # One-line-per-group schedule summary
//! slots summary -a availability.json
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use slot_engine::availability::{days_with_availability, AvailabilitySet};
use slot_engine::booking::Booking;
use slot_engine::conflict::{filter_booked_slots, parse_instant};
use slot_engine::format::{format_slot, ClockFormat};
use slot_engine::slots::{generate_slots, parse_date, parse_timezone};
use slot_engine::WeeklySchedule;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slots", version, about = "Bookable time-slot calculator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log skipped input and conflicts to stderr (-v: warnings, -vv: debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List the bookable slots of one date
    Generate {
        /// Availability set JSON (reads from stdin if omitted)
        #[arg(short, long)]
        availability: Option<String>,
        /// Existing bookings JSON array
        #[arg(short, long)]
        bookings: Option<String>,
        /// Calendar date, YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Event duration in minutes (15 when missing or not positive)
        #[arg(long, allow_hyphen_values = true)]
        duration: Option<i64>,
        /// Current instant, RFC 3339 (defaults to the system clock)
        #[arg(long)]
        now: Option<String>,
        /// IANA time zone of the calendar (defaults to the set's time zone)
        #[arg(long)]
        timezone: Option<String>,
        /// Clock format of the printed labels
        #[arg(long, value_enum, default_value_t = LabelFormat::H12)]
        format: LabelFormat,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the weekdays that have availability (Sun=0 .. Sat=6)
    Days {
        /// Availability set JSON (reads from stdin if omitted)
        #[arg(short, long)]
        availability: Option<String>,
    },
    /// Summarize the weekly schedule
    Summary {
        /// Availability set JSON (reads from stdin if omitted)
        #[arg(short, long)]
        availability: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LabelFormat {
    #[value(name = "12h")]
    H12,
    #[value(name = "24h")]
    H24,
}

impl From<LabelFormat> for ClockFormat {
    fn from(f: LabelFormat) -> Self {
        match f {
            LabelFormat::H12 => ClockFormat::TwelveHour,
            LabelFormat::H24 => ClockFormat::TwentyFourHour,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Generate {
            availability,
            bookings,
            date,
            duration,
            now,
            timezone,
            format,
            json,
        } => {
            let set = read_availability(availability.as_deref())?;
            let bookings: Vec<Booking> = match bookings.as_deref() {
                Some(path) => serde_json::from_str(&read_input(Some(path))?)
                    .context("Failed to parse bookings JSON")?,
                None => Vec::new(),
            };

            let date = parse_date(&date).context("Invalid --date")?;
            let tz_name = timezone.as_deref().unwrap_or(&set.timezone);
            let tz = parse_timezone(tz_name).context("Invalid time zone")?;
            let now: DateTime<Utc> = match now.as_deref() {
                Some(s) => parse_instant(s).context("Invalid --now")?,
                None => Utc::now(),
            };

            let generated = generate_slots(Some(&set), date, duration, now.with_timezone(&tz));
            let filtered = filter_booked_slots(&generated.slots, &bookings, duration);

            if json {
                let value = serde_json::json!({
                    "date": date,
                    "timezone": tz.name(),
                    "slots": filtered.slots,
                    "skipped_intervals": generated.skipped,
                    "skipped_bookings": filtered.skipped_bookings,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else if filtered.slots.is_empty() {
                println!("No available time slots for this date");
            } else {
                for slot in &filtered.slots {
                    println!("{}", format_slot(slot, tz, format.into()));
                }
            }
        }
        Commands::Days { availability } => {
            let set = read_availability(availability.as_deref())?;
            let days = days_with_availability(Some(&set));
            if days.is_empty() {
                println!("No days with availability");
            }
            for day in days {
                println!("{} {}", day.get(), day.short_name());
            }
        }
        Commands::Summary { availability } => {
            let set = read_availability(availability.as_deref())?;
            for line in WeeklySchedule::from_set(&set).summary() {
                println!("{}", line);
            }
        }
    }

    Ok(())
}

/// Send library diagnostics to stderr. `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => "error",
        1 => "warn",
        _ => "debug",
    };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).context("failed to parse log directive")?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn read_availability(path: Option<&str>) -> Result<AvailabilitySet> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("Failed to parse availability JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
