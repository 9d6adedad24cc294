// src/plot_functions/plot_seasonal_values.rs

use chrono::{Datelike, NaiveDate};
use plotters::style::RGBColor;

use crate::constants::{
    COLOR_ANNUAL, COLOR_DJF, COLOR_JJA, COLOR_MAM, COLOR_SON, LINE_WIDTH_PLOT, PLOT_HEIGHT,
    PLOT_WIDTH,
};
use crate::data_analysis::date_binning::{bin_dates, CroppedRange};
use crate::data_analysis::seasonal::{calc_seasonal_values, check_sufficient_years, SeasonalValues};
use crate::error::AnalysisError;
use crate::plot_framework::{
    calculate_count_range, draw_single_plot, legend_position, PlotConfig, PlotSeries,
};
use crate::season::Season;
use crate::types::PlotResult;

pub fn season_color(season: Season) -> RGBColor {
    match season {
        Season::Djf => *COLOR_DJF,
        Season::Mam => *COLOR_MAM,
        Season::Jja => *COLOR_JJA,
        Season::Son => *COLOR_SON,
        Season::Annual => *COLOR_ANNUAL,
    }
}

pub fn seasonal_values_config(
    seasonal: &SeasonalValues,
    start_year: i32,
    end_year: i32,
    leg_loc: u8,
    annual: bool,
) -> PlotConfig {
    let mut seasons: Vec<Season> = Season::FOUR.to_vec();
    if annual {
        seasons.push(Season::Annual);
    }

    let max_total = seasons
        .iter()
        .flat_map(|s| seasonal.totals(*s))
        .max()
        .unwrap_or(0) as f64;
    let (y_min, y_max) = calculate_count_range(max_total);
    let x_range = if end_year > start_year {
        start_year as f64..end_year as f64
    } else {
        start_year as f64 - 0.5..start_year as f64 + 0.5
    };

    let mut config = PlotConfig::new("Seasonal totals", x_range, y_min..y_max)
        .labels("year", "total days");
    config.legend_position = legend_position(leg_loc);
    config.integer_x_ticks = true;

    for season in seasons {
        config.series.push(PlotSeries {
            data: seasonal
                .values
                .get(&season)
                .map(|v| v.iter().map(|&(y, t)| (y as f64, t as f64)).collect())
                .unwrap_or_default(),
            label: season.label().to_string(),
            color: season_color(season),
            stroke_width: LINE_WIDTH_PLOT,
        });
    }
    config
}

/// Line graph of the per-year total event days for each season.
///
/// Fails when any calendar month in `range` covers only one year, since a
/// single point per season cannot make a line.
pub fn plot_seasonal_values(
    dates: &[NaiveDate],
    range: &CroppedRange,
    output_file: &str,
    leg_loc: u8,
    annual: bool,
) -> PlotResult {
    check_sufficient_years(&range.month_years)?;

    let bins = bin_dates(dates, range.start_month(), range.end_month());
    let seasonal = calc_seasonal_values(&bins.monthly_values, &range.month_years);

    if Season::FOUR.iter().all(|s| seasonal.years(*s).is_empty()) {
        return Err(AnalysisError::EmptySelection.into());
    }

    let config = seasonal_values_config(
        &seasonal,
        range.start.year(),
        range.end.year(),
        leg_loc,
        annual,
    );
    draw_single_plot(output_file, (PLOT_WIDTH, PLOT_HEIGHT), "Seasonal values", &config)
}
