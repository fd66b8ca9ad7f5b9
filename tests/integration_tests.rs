use aqi_processor::analyzers::{aqi_series, DateWindow, SortOrder, SummaryStats};
use aqi_processor::error::ProcessingError;
use aqi_processor::models::AqiCategory;
use aqi_processor::processors::AqiPipeline;
use aqi_processor::writers::CsvWriter;
use chrono::{Datelike, NaiveDate};
use pretty_assertions::assert_eq;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

const HEADER: &str =
    "No,year,month,day,hour,PM2.5,PM10,SO2,NO2,CO,O3,TEMP,PRES,DEWP,RAIN,wd,WSPM,station";

/// Two full days of hourly rows for one station, no gaps, no outliers.
fn write_station_file(dir: &Path, name: &str, station: &str) {
    let mut file = File::create(dir.join(name)).unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    let mut row_id = 1;
    for day in 1..=2 {
        for hour in 0..24 {
            // PM2.5 drifts gently through the day; everything else is flat
            // so the fence pass keeps all rows.
            let pm25 = 20.0 + hour as f64 * 0.5;
            writeln!(
                file,
                "{},2016,6,{},{},{},40.0,6.0,30.0,700.0,60.0,18.0,1012.0,8.0,0.0,NW,2.0,{}",
                row_id, day, hour, pm25, station
            )
            .unwrap();
            row_id += 1;
        }
    }
}

fn fixture_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp directory");
    write_station_file(dir.path(), "aotizhongxin.csv", "Aotizhongxin");
    write_station_file(dir.path(), "changping.csv", "Changping");
    dir
}

#[tokio::test]
async fn test_two_stations_two_days_end_to_end() {
    let dir = fixture_dir();

    let (summaries, report) = AqiPipeline::new(2)
        .process_directory(dir.path(), None)
        .await
        .unwrap();

    // 2 dates x 2 stations, each from 24 hourly rows.
    assert_eq!(summaries.len(), 4);
    assert_eq!(report.cleaning.raw_rows, 96);
    assert_eq!(report.cleaning.incomplete_dropped, 0);
    assert_eq!(report.cleaning.outliers_dropped, 0);
    assert_eq!(report.cleaning.clean_rows, 96);
    assert_eq!(report.stations, vec!["Aotizhongxin", "Changping"]);
    assert_eq!(
        report.date_range,
        Some((
            NaiveDate::from_ymd_opt(2016, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2016, 6, 2).unwrap()
        ))
    );

    for summary in &summaries {
        // Mean of 20 + 0.5h over h = 0..24 is 25.75; CO is 700 / 100 = 7.
        assert_eq!(summary.pm25, 25.75);
        assert_eq!(summary.co, 7.0);

        // PM10 at 40 governs: its sub-index interpolates onto the second
        // band (55, 154) of its table.
        let expected_aqi = (154.0 - 55.0) / 54.0 * 40.0 + 55.0;
        let aqi = summary.aqi.unwrap();
        assert!((aqi - expected_aqi).abs() < 1e-9, "aqi was {aqi}");
        assert_eq!(summary.category(), Some(AqiCategory::UnhealthySensitive));
    }
}

#[tokio::test]
async fn test_pipeline_is_idempotent_over_files() {
    let dir = fixture_dir();
    let pipeline = AqiPipeline::new(2);

    let (first, _) = pipeline.process_directory(dir.path(), None).await.unwrap();
    let (second, _) = pipeline.process_directory(dir.path(), None).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_missing_column_fails_before_processing() {
    let dir = TempDir::new().unwrap();
    let mut file = File::create(dir.path().join("bad.csv")).unwrap();
    // Header lacks the CO column.
    writeln!(
        file,
        "No,year,month,day,hour,PM2.5,PM10,SO2,NO2,O3,TEMP,PRES,DEWP,RAIN,wd,WSPM,station"
    )
    .unwrap();
    writeln!(
        file,
        "1,2016,6,1,0,20.0,40.0,6.0,30.0,60.0,18.0,1012.0,8.0,0.0,NW,2.0,Dongsi"
    )
    .unwrap();

    let err = AqiPipeline::new(1)
        .process_directory(dir.path(), None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ProcessingError::MissingColumn { ref column, .. } if column == "CO"
    ));
}

#[tokio::test]
async fn test_windowed_query_and_ranking() {
    let dir = fixture_dir();
    let (summaries, _) = AqiPipeline::new(2)
        .process_directory(dir.path(), None)
        .await
        .unwrap();

    let window = DateWindow::new(
        NaiveDate::from_ymd_opt(2016, 6, 2).unwrap(),
        NaiveDate::from_ymd_opt(2016, 6, 2).unwrap(),
    )
    .unwrap();

    let series = aqi_series(&summaries, &window, None);
    assert_eq!(series.len(), 2);
    assert!(series.iter().all(|s| s.date.day() == 2));

    let one_station = aqi_series(&summaries, &window, Some("Changping"));
    assert_eq!(one_station.len(), 1);

    let ranking = SummaryStats::mean_aqi_by_station(&summaries, None, SortOrder::Ascending);
    assert_eq!(ranking.entries.len(), 2);
    // Identical data at both stations: identical means.
    assert_eq!(ranking.entries[0].mean_aqi, ranking.entries[1].mean_aqi);
}

#[tokio::test]
async fn test_oversized_window_is_a_reported_error() {
    let start = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2016, 12, 31).unwrap();

    let err = DateWindow::new(start, end).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("140"));
}

#[tokio::test]
async fn test_daily_export_round_trip() {
    let dir = fixture_dir();
    let (summaries, _) = AqiPipeline::new(2)
        .process_directory(dir.path(), None)
        .await
        .unwrap();

    let out = dir.path().join("daily.csv");
    let written = CsvWriter::new().write_daily(&summaries, &out).unwrap();
    assert_eq!(written, 4);

    let contents = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 5); // header + 4 rows
    assert!(lines[0].contains("AQI"));
    assert!(lines[1].starts_with("2016-06-01,Aotizhongxin"));
}
