use crate::analyzers::{aqi_series, DateWindow, SortOrder, SummaryStats};
use crate::cli::args::{Cli, Commands, Granularity};
use crate::error::{ProcessingError, Result};
use crate::models::StationDaySummary;
use crate::processors::{Aggregator, AqiPipeline};
use crate::utils::generate_default_export_filename;
use crate::utils::progress::ProgressReporter;
use crate::writers::CsvWriter;
use chrono::NaiveDate;

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Process {
            input_dir,
            output_file,
            granularity,
            station,
            validate_only,
            max_workers,
            strict,
        } => {
            println!("Processing air quality data...");
            println!("Input directory: {}", input_dir.display());
            println!("Workers: {}", max_workers);

            let progress = ProgressReporter::new_spinner("Processing data...", false);

            let pipeline = AqiPipeline::new(max_workers).with_strict_validation(strict);
            let (summaries, report) = pipeline
                .process_directory(&input_dir, Some(&progress))
                .await?;

            println!("\n{}", report.summary());

            if validate_only {
                println!("\nValidation complete - no output file written");
                return Ok(());
            }

            // Filter by station if specified
            let summaries: Vec<StationDaySummary> = match &station {
                Some(name) => summaries
                    .into_iter()
                    .filter(|s| &s.station == name)
                    .collect(),
                None => summaries,
            };

            if summaries.is_empty() {
                println!("\nNo summaries to write");
                return Ok(());
            }

            let output_file = output_file
                .unwrap_or_else(|| generate_default_export_filename(granularity.as_str()));

            // Create output directory if it doesn't exist
            if let Some(parent) = output_file.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let writer = CsvWriter::new();
            let written = match granularity {
                Granularity::Daily => writer.write_daily(&summaries, &output_file)?,
                Granularity::Monthly => {
                    writer.write_monthly(&Aggregator::aggregate_monthly(&summaries), &output_file)?
                }
                Granularity::Yearly => {
                    writer.write_yearly(&Aggregator::aggregate_yearly(&summaries), &output_file)?
                }
            };

            println!("\nWrote {} rows to {}", written, output_file.display());
            println!("Processing complete!");
        }

        Commands::Stats {
            input_dir,
            start,
            end,
            top,
            max_workers,
        } => {
            let window = match build_window(start, end) {
                Ok(window) => window,
                // An oversized window is a usage error, not a crash; report
                // it and fall back to the full range.
                Err(ProcessingError::WindowTooWide { days, max }) => {
                    eprintln!(
                        "Requested window of {} days exceeds the {} day limit; using the full range",
                        days, max
                    );
                    None
                }
                Err(e) => return Err(e),
            };

            let progress = ProgressReporter::new_spinner("Processing data...", false);
            let (summaries, report) = AqiPipeline::new(max_workers)
                .process_directory(&input_dir, Some(&progress))
                .await?;

            println!("\n{}", report.summary());

            println!("\nCorrelation (daily means)");
            println!("=========================");
            println!("{}", SummaryStats::correlation_matrix(&summaries).render());

            let ranking = SummaryStats::mean_aqi_by_station(
                &summaries,
                window.as_ref(),
                SortOrder::Ascending,
            );
            println!("\nStations by mean AQI");
            println!("====================");
            for entry in ranking.entries.iter().take(top) {
                println!(
                    "{:<16} {:>8.2}  ({} days)",
                    entry.station, entry.mean_aqi, entry.days
                );
            }
            if let (Some(best), Some(worst)) = (ranking.best(), ranking.worst()) {
                println!(
                    "\nCleanest: {} ({:.2}), most polluted: {} ({:.2})",
                    best.station, best.mean_aqi, worst.station, worst.mean_aqi
                );
            }

            println!("\nMean AQI by year");
            println!("================");
            for entry in SummaryStats::mean_aqi_by_year(&summaries) {
                println!(
                    "{}  {:>8.2}  ({} station-days)",
                    entry.year, entry.mean_aqi, entry.days
                );
            }

            println!("\nMean AQI by month");
            println!("=================");
            for entry in SummaryStats::mean_aqi_by_month(&summaries) {
                println!("{}-{:02}  {:>8.2}", entry.year, entry.month, entry.mean_aqi);
            }

            println!("\nCategory shares");
            println!("===============");
            for share in SummaryStats::category_breakdown(&summaries, window.as_ref()) {
                println!(
                    "{:<32} {:>7}  {:>5} days  {:>5.1}%",
                    share.category.label(),
                    share.category.range_label(),
                    share.count,
                    share.percentage
                );
            }
        }

        Commands::Query {
            input_dir,
            start,
            end,
            station,
            max_workers,
        } => {
            let window = match DateWindow::new(start, end) {
                Ok(window) => window,
                // User-facing rejection: explain and exit without a trace.
                Err(e @ ProcessingError::WindowTooWide { .. })
                | Err(e @ ProcessingError::InvalidFormat(_)) => {
                    eprintln!("Error: {}", e);
                    return Ok(());
                }
                Err(e) => return Err(e),
            };

            let progress = ProgressReporter::new_spinner("Processing data...", false);
            let (summaries, _report) = AqiPipeline::new(max_workers)
                .process_directory(&input_dir, Some(&progress))
                .await?;

            let series = aqi_series(&summaries, &window, station.as_deref());

            println!(
                "\nAQI series {} to {} ({} rows)",
                window.start(),
                window.end(),
                series.len()
            );
            for daily in series {
                let aqi = daily.aqi.unwrap_or(0.0);
                println!(
                    "{}  {:<16} {:>8.2}  {}",
                    daily.date,
                    daily.station,
                    aqi,
                    daily.category().map(|c| c.label()).unwrap_or("-")
                );
            }
        }
    }

    Ok(())
}

/// A window needs both ends; one without the other is a usage error.
fn build_window(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Option<DateWindow>> {
    match (start, end) {
        (Some(start), Some(end)) => Ok(Some(DateWindow::new(start, end)?)),
        (None, None) => Ok(None),
        _ => Err(ProcessingError::Config(
            "both --start and --end are required for a window".to_string(),
        )),
    }
}
