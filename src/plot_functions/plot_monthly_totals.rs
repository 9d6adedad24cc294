// src/plot_functions/plot_monthly_totals.rs

use chrono::NaiveDate;

use crate::constants::{COLOR_BAR, NARROW_BAR_WIDTH_FRACTION, PLOT_HEIGHT, PLOT_WIDTH};
use crate::data_analysis::date_binning::{bin_dates, monthly_percentages, CroppedRange};
use crate::plot_framework::{calculate_count_range, draw_single_plot, BarSeries, PlotConfig};
use crate::types::PlotResult;

pub const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn monthly_totals_config(monthly_pct: &[f64; 12]) -> PlotConfig {
    let max_pct = monthly_pct.iter().copied().fold(0.0, f64::max);
    let (y_min, y_max) = calculate_count_range(max_pct);
    let half_width = NARROW_BAR_WIDTH_FRACTION / 2.0;

    let mut config = PlotConfig::new("Monthly totals", -0.6..11.6, y_min..y_max)
        .labels("", "Percentage of days");
    config.x_tick_labels = Some(MONTH_ABBR.iter().map(|m| m.to_string()).collect());
    config.bars.push(BarSeries {
        bars: monthly_pct
            .iter()
            .enumerate()
            .map(|(i, &pct)| (i as f64 - half_width, i as f64 + half_width, pct))
            .collect(),
        label: String::new(),
        color: *COLOR_BAR,
    });
    config
}

/// Bar chart of the percentage of days in each calendar month that hold an event.
///
/// `dates` are the fully filtered event dates; `range` is the complete-month span
/// from the date-filtered input.
pub fn plot_monthly_totals(dates: &[NaiveDate], range: &CroppedRange, output_file: &str) -> PlotResult {
    let bins = bin_dates(dates, range.start_month(), range.end_month());
    let monthly_pct = monthly_percentages(&bins, range);
    for (month, pct) in MONTH_ABBR.iter().zip(monthly_pct.iter()) {
        log::debug!("  {month}: {pct:.2}% of days");
    }
    let config = monthly_totals_config(&monthly_pct);
    draw_single_plot(output_file, (PLOT_WIDTH, PLOT_HEIGHT), "Monthly totals", &config)
}
