// src/plot_functions/plot_extent_histogram.rs

use crate::constants::{
    BAR_WIDTH_FRACTION, COLOR_BAR, COLOR_CDF, PLOT_HEIGHT, PLOT_WIDTH,
};
use crate::data_analysis::histogram::extent_histogram;
use crate::plot_framework::{calculate_count_range, draw_single_plot, BarSeries, PlotConfig, PlotSeries};
use crate::types::PlotResult;

/// Builds the extent histogram (bars) or cumulative distribution (line) chart.
pub fn extent_histogram_config(extents: &[f64], bin_width: f64, cumulative: bool) -> PlotConfig {
    let hist = extent_histogram(extents, bin_width, cumulative);
    let x_start = hist.edges.first().copied().unwrap_or(0.0);
    let x_end = hist.edges.last().copied().unwrap_or(360.0);
    let y_max = hist.percent.iter().copied().fold(0.0, f64::max);
    let (y_min, y_max) = calculate_count_range(y_max);

    let title = if cumulative {
        "Cumulative distribution of zonal extent"
    } else {
        "Zonal extent"
    };
    let mut config = PlotConfig::new(title, x_start..x_end, y_min..y_max)
        .labels("Extent (degrees longitude)", "Frequency (% total days)");

    if cumulative {
        config.series.push(PlotSeries {
            data: hist
                .centres
                .iter()
                .copied()
                .zip(hist.percent.iter().copied())
                .collect(),
            label: String::new(),
            color: *COLOR_CDF,
            stroke_width: 3,
        });
    } else {
        let width = bin_width * BAR_WIDTH_FRACTION;
        config.bars.push(BarSeries {
            bars: hist
                .edges
                .iter()
                .zip(hist.percent.iter())
                .map(|(&left, &pct)| (left, left + width, pct))
                .collect(),
            label: String::new(),
            color: *COLOR_BAR,
        });
    }
    config
}

/// Generates the extent histogram, or its cumulative version, as a single chart.
pub fn plot_extent_histogram(
    extents: &[f64],
    output_file: &str,
    bin_width: f64,
    cumulative: bool,
) -> PlotResult {
    let config = extent_histogram_config(extents, bin_width, cumulative);
    draw_single_plot(output_file, (PLOT_WIDTH, PLOT_HEIGHT), "Extent", &config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_config_layout() {
        let config = extent_histogram_config(&[0.0, 90.0, 90.0, 360.0], 10.0, false);
        assert_eq!(config.bars.len(), 1);
        assert!(config.series.is_empty());
        let bars = &config.bars[0].bars;
        assert_eq!(bars.len(), 37);
        assert_eq!(bars[0].0, -5.0);
        assert!((bars[0].1 - 4.0).abs() < 1e-9);
        assert_eq!(bars[9].2, 50.0);
        assert_eq!(config.x_range, -5.0..365.0);
    }

    #[test]
    fn test_cdf_config_is_a_line() {
        let config = extent_histogram_config(&[10.0, 20.0], 1.0, true);
        assert!(config.bars.is_empty());
        assert_eq!(config.series.len(), 1);
        let last = config.series[0].data.last().unwrap();
        assert_eq!(last.0, 360.0);
        assert!((last.1 - 100.0).abs() < 1e-9);
    }
}
