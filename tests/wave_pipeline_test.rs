// tests/wave_pipeline_test.rs

use chrono::{Datelike, NaiveDate};
use std::fs;
use std::path::Path;

use climate_event_stats::data_analysis::date_binning::{bin_dates, get_date_bounds, monthly_percentages};
use climate_event_stats::data_analysis::filters::{combine, datetime_selector, value_range_selector};
use climate_event_stats::data_analysis::seasonal::{calc_seasonal_values, check_sufficient_years};
use climate_event_stats::data_analysis::summary::{basic_stats, duration_stats, event_durations};
use climate_event_stats::data_input::event_parser::{parse_event_file, parse_psa_file};
use climate_event_stats::metadata::{input_history, write_metadata};
use climate_event_stats::season::Season;

/// Writes a daily wave file covering `start..=end` with extents cycling 0, 10, ..., 360.
fn write_wave_file(path: &Path, start: NaiveDate, end: NaiveDate) {
    let mut text = String::from("wave statistics,calc_wave_stat output\ndate,extent\n");
    for (i, day) in start.iter_days().take_while(|d| *d <= end).enumerate() {
        text.push_str(&format!("{},{}\n", day.format("%Y-%m-%d"), (i % 37) * 10));
    }
    fs::write(path, text).unwrap();
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn test_monthly_bins_sum_to_selected_days() {
    let dir = tempfile::tempdir().unwrap();
    let infile = dir.path().join("waves.csv");
    write_wave_file(&infile, d(1979, 1, 1), d(1982, 12, 31));

    let indata = parse_event_file(&infile).unwrap();
    let dt_selection = datetime_selector(&indata.dates(), None, None, None);
    let extent_selection = value_range_selector(&indata.extents(), 100.0, 250.0);
    let data = indata.select(&combine(&dt_selection, &extent_selection));
    assert!(!data.is_empty());

    let range = get_date_bounds(&indata.select(&dt_selection).dates()).unwrap();
    let bins = bin_dates(&data.dates(), range.start_month(), range.end_month());
    let total: u64 = bins.monthly_totals.values().sum();
    assert_eq!(total as usize, data.len());

    // Every day is selected without the extent filter, so every month is at 100%
    let all = indata.select(&dt_selection);
    let all_bins = bin_dates(&all.dates(), range.start_month(), range.end_month());
    for pct in monthly_percentages(&all_bins, &range) {
        assert!((pct - 100.0).abs() < 1e-9, "{pct}");
    }
}

#[test]
fn test_seasonal_totals_match_monthly_sums() {
    let dir = tempfile::tempdir().unwrap();
    let infile = dir.path().join("waves.csv");
    write_wave_file(&infile, d(1979, 1, 15), d(1983, 6, 20));

    let indata = parse_event_file(&infile).unwrap();
    let dates = indata.dates();
    let range = get_date_bounds(&dates).unwrap();
    assert_eq!(range.start, d(1979, 2, 1));
    assert_eq!(range.end, d(1983, 5, 31));
    check_sufficient_years(&range.month_years).unwrap();

    let bins = bin_dates(&dates, range.start_month(), range.end_month());
    let seasonal = calc_seasonal_values(&bins.monthly_values, &range.month_years);

    for season in Season::FOUR {
        for (year, total) in &seasonal.values[&season] {
            let expected: u64 = season
                .months()
                .iter()
                .map(|&m| {
                    dates
                        .iter()
                        .filter(|date| date.year() == *year && date.month() == m)
                        .count() as u64
                })
                .sum();
            assert_eq!(*total, expected, "{season} {year}");
        }
    }
    // January 1979 is incomplete, so DJF starts in 1980
    assert_eq!(seasonal.years(Season::Djf).first(), Some(&1980));
}

#[test]
fn test_season_filter_and_durations() {
    let dir = tempfile::tempdir().unwrap();
    let infile = dir.path().join("waves.csv");
    write_wave_file(&infile, d(2000, 1, 1), d(2000, 12, 31));

    let indata = parse_event_file(&infile).unwrap();
    let selection = datetime_selector(&indata.dates(), Some(Season::Jja), None, None);
    let data = indata.select(&selection);
    assert_eq!(data.len(), 30 + 31 + 31);

    // One continuous block of days makes a single event
    let durations = event_durations(&data.dates());
    assert_eq!(durations, vec![92]);
    let summary = duration_stats(&durations).unwrap();
    assert_eq!(summary.max, 92);

    let stats = basic_stats(&data);
    assert_eq!(stats[0], "total number of days: 92");
}

#[test]
fn test_psa_history_flows_into_sidecar() {
    let dir = tempfile::tempdir().unwrap();
    let infile = dir.path().join("psa.csv");
    fs::write(
        &infile,
        "time,event_number,event_duration,event_gradient,env_max,wave6_phase\n\
         1990-01-01 12:00:00,1,2,0.5,1.5,20.0\n\
         1990-01-02 12:00:00,1,2,0.5,2.5,22.0\n\
         1990-03-01 12:00:00,2,1,-0.1,1.0,40.0\n",
    )
    .unwrap();
    fs::write(dir.path().join("psa.met"), "psa_date_list run\n").unwrap();

    let table = parse_psa_file(&infile, 6).unwrap();
    let long_events = table.filter(|r| r.event_duration >= 2.0);
    assert_eq!(long_events.event_numbers(), vec![1]);

    let outfile = dir.path().join("phase.png");
    let file_info = vec![("psa.csv".to_string(), input_history(&infile))];
    let met = write_metadata(&outfile, &file_info, &[]).unwrap();
    let text = fs::read_to_string(met).unwrap();
    assert!(text.contains("History of psa.csv:\npsa_date_list run\n"));
}
