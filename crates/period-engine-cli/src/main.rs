//! `periods`: resolve reporting periods, comparison ranges and range splits
//! from the command line. Results go to stdout as JSON; logs go to stderr.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

use period_engine::calendar::midnight;
use period_engine::{
    create_custom_date_range_period, date_range_to_granularity,
    date_range_to_granularity_formatted, dates_from_date_range, dates_from_date_range_formatted,
    get_date_range, months_from_date_range, DateRange, Granularity, PeriodType, RangeOptions,
    PERIODS,
};

#[derive(Parser, Debug)]
#[command(name = "periods")]
#[command(version, about = "Resolve reporting periods and their comparison ranges")]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print single-line JSON instead of pretty-printed
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the period types the registry can resolve
    List,
    /// Resolve a period type to its most recent complete range
    Range(RangeArgs),
    /// Expand a range into individual days
    Dates(DatesArgs),
    /// Split a range into calendar months
    Months(MonthsArgs),
    /// Split a range into day/week/month/year buckets
    Split(SplitArgs),
    /// Build a custom period from two explicit ranges
    Custom(CustomArgs),
}

#[derive(Args, Debug)]
struct RangeArgs {
    /// Period type (week, month, quarter, year, fiscal_year, last_52_weeks, year_to_date)
    period: PeriodType,

    /// Reference date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Also resolve the comparison range
    #[arg(long)]
    compare: bool,

    /// Emit calendar dates instead of UTC timestamps
    #[arg(long)]
    calendar: bool,
}

#[derive(Args, Debug)]
struct DatesArgs {
    /// Range as YYYY-MM-DD/YYYY-MM-DD
    range: DateRange,

    /// Include the end date
    #[arg(long)]
    inclusive: bool,

    /// chrono format string for each date
    #[arg(long)]
    format: Option<String>,
}

#[derive(Args, Debug)]
struct MonthsArgs {
    /// Range as YYYY-MM-DD/YYYY-MM-DD
    range: DateRange,

    /// Include the month containing the end date
    #[arg(long)]
    inclusive: bool,

    /// Clamp the last month to the range end
    #[arg(long)]
    exact_end: bool,
}

#[derive(Args, Debug)]
struct SplitArgs {
    /// Range as YYYY-MM-DD/YYYY-MM-DD
    range: DateRange,

    /// Bucket size
    #[arg(short, long, default_value_t = Granularity::Day)]
    granularity: Granularity,

    /// Extend the range end to the end of its day
    #[arg(long)]
    inclusive: bool,

    /// chrono format string for bucket boundaries
    #[arg(long)]
    format: Option<String>,
}

#[derive(Args, Debug)]
struct CustomArgs {
    /// Current range as YYYY-MM-DD/YYYY-MM-DD
    range: String,

    /// Comparison range as YYYY-MM-DD/YYYY-MM-DD
    comparison: String,
}

#[derive(Serialize)]
struct PeriodEntry {
    #[serde(rename = "type")]
    period_type: PeriodType,
    label: &'static str,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    debug!(command = ?cli.command, "running");

    let compact = cli.compact;
    match cli.command {
        Command::List => {
            let entries: Vec<PeriodEntry> = PERIODS
                .iter()
                .map(|config| PeriodEntry {
                    period_type: config.period_type,
                    label: config.label,
                })
                .collect();
            print_json(&entries, compact)
        }
        Command::Range(args) => {
            let options = RangeOptions {
                as_date: !args.calendar,
                with_comparison: args.compare,
                from: args.from.map(midnight),
            };
            let resolved = get_date_range(args.period, &options)
                .with_context(|| format!("failed to resolve period '{}'", args.period))?;
            print_json(&resolved, compact)
        }
        Command::Dates(args) => match args.format {
            Some(format) => {
                let dates = dates_from_date_range_formatted(&args.range, &format, args.inclusive)
                    .with_context(|| format!("failed to expand {}", args.range))?;
                print_json(&dates, compact)
            }
            None => {
                let dates = dates_from_date_range(&args.range, args.inclusive)
                    .with_context(|| format!("failed to expand {}", args.range))?;
                print_json(&dates, compact)
            }
        },
        Command::Months(args) => {
            let months = months_from_date_range(&args.range, args.inclusive, args.exact_end)
                .with_context(|| format!("failed to split {} into months", args.range))?;
            print_json(&months, compact)
        }
        Command::Split(args) => match args.format {
            Some(format) => {
                let buckets = date_range_to_granularity_formatted(
                    &args.range,
                    args.granularity,
                    &format,
                    args.inclusive,
                )
                .with_context(|| format!("failed to split {}", args.range))?;
                print_json(&buckets, compact)
            }
            None => {
                let buckets =
                    date_range_to_granularity(&args.range, args.granularity, args.inclusive)
                        .with_context(|| format!("failed to split {}", args.range))?;
                print_json(&buckets, compact)
            }
        },
        Command::Custom(args) => {
            let period = create_custom_date_range_period(&args.range, &args.comparison)
                .context("failed to build custom period")?;
            print_json(&period, compact)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let json = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
    .context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}
