// src/data_analysis/summary.rs

use chrono::NaiveDate;
use ndarray::Array1;
use ndarray_stats::QuantileExt;

use crate::constants::EXTENT_MAX_DEG;
use crate::data_input::event_data::EventTable;

/// Formats a float the way the statistics lines expect: whole numbers keep one decimal.
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Summary lines describing the filtered event table.
///
/// The same lines are printed to the screen and written into the metadata
/// sidecar of every plot.
pub fn basic_stats(data: &EventTable) -> Vec<String> {
    let extents = Array1::from(data.extents());
    let zero_days = extents.iter().filter(|&&e| e == 0.0).count();
    let full_days = extents.iter().filter(|&&e| e == EXTENT_MAX_DEG).count();

    let mut stats = vec![
        format!("total number of days: {}", data.len()),
        format!("zero extent days: {zero_days}"),
        format!("360 extent days: {full_days}"),
    ];

    match (extents.max(), extents.mean()) {
        (Ok(max_extent), Some(mean_extent)) => {
            stats.push(format!("maximum extent: {} degrees", format_value(*max_extent)));
            stats.push(format!("mean extent: {mean_extent:.2} degrees"));
        }
        _ => {
            stats.push("maximum extent: n/a".to_string());
            stats.push("mean extent: n/a".to_string());
        }
    }
    stats
}

/// Groups runs of consecutive calendar days into events and returns each event's length.
///
/// Dates must be in ascending order; a repeated date extends nothing and is ignored.
pub fn event_durations(dates: &[NaiveDate]) -> Vec<u32> {
    let mut durations: Vec<u32> = Vec::new();
    let mut previous: Option<NaiveDate> = None;

    for &date in dates {
        match previous {
            Some(prev) if date == prev => continue,
            Some(prev) if (date - prev).num_days() == 1 => {
                if let Some(last) = durations.last_mut() {
                    *last += 1;
                }
            }
            _ => durations.push(1),
        }
        previous = Some(date);
    }
    durations
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationStats {
    pub events: usize,
    pub mean: f64,
    pub max: u32,
}

impl DurationStats {
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Number of events: {}", self.events),
            format!("Average duration: {:.2}", self.mean),
            format!("Maximum duration: {}", self.max),
        ]
    }
}

pub fn duration_stats(durations: &[u32]) -> Option<DurationStats> {
    let arr: Array1<f64> = durations.iter().map(|&d| d as f64).collect();
    let mean = arr.mean()?;
    let max = durations.iter().copied().max()?;
    Some(DurationStats {
        events: durations.len(),
        mean,
        max,
    })
}
