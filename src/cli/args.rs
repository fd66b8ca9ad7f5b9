use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aqi-processor")]
#[command(about = "Multi-station air quality processor with daily AQI scoring")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Granularity {
    Daily,
    Monthly,
    Yearly,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Monthly => "monthly",
            Granularity::Yearly => "yearly",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean hourly measurements and export AQI-scored aggregates
    Process {
        #[arg(short, long, help = "Directory of hourly station CSV files")]
        input_dir: PathBuf,

        #[arg(
            short,
            long,
            help = "Output CSV path [default: output/aqi-{granularity}-{YYMMDD}.csv]"
        )]
        output_file: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = Granularity::Daily)]
        granularity: Granularity,

        #[arg(short, long, help = "Restrict output to one station")]
        station: Option<String>,

        #[arg(long, default_value = "false")]
        validate_only: bool,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,

        #[arg(
            long,
            default_value = "false",
            help = "Reject physically implausible measurements instead of keeping them"
        )]
        strict: bool,
    },

    /// Print correlation matrix, station ranking, trends and category shares
    Stats {
        #[arg(short, long, help = "Directory of hourly station CSV files")]
        input_dir: PathBuf,

        #[arg(long, help = "Window start (YYYY-MM-DD) for ranking and categories")]
        start: Option<NaiveDate>,

        #[arg(long, help = "Window end (YYYY-MM-DD) for ranking and categories")]
        end: Option<NaiveDate>,

        #[arg(long, default_value = "12", help = "Stations to show in the ranking")]
        top: usize,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,
    },

    /// AQI time series for a date window of at most 140 days
    Query {
        #[arg(short, long, help = "Directory of hourly station CSV files")]
        input_dir: PathBuf,

        #[arg(long, help = "Window start (YYYY-MM-DD)")]
        start: NaiveDate,

        #[arg(long, help = "Window end (YYYY-MM-DD)")]
        end: NaiveDate,

        #[arg(short, long, help = "Restrict the series to one station")]
        station: Option<String>,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,
    },
}
