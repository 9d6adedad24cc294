// src/plot_functions/plot_duration_histogram.rs

use crate::constants::{COLOR_BAR, NARROW_BAR_WIDTH_FRACTION, PLOT_HEIGHT, PLOT_WIDTH};
use crate::data_analysis::histogram::duration_histogram;
use crate::plot_framework::{calculate_count_range, draw_single_plot, BarSeries, PlotConfig};
use crate::types::PlotResult;

pub fn duration_histogram_config(durations: &[u32]) -> PlotConfig {
    let counts = duration_histogram(durations);
    let max_duration = counts.len() as f64;
    let max_count = counts.iter().map(|&(_, c)| c as f64).fold(0.0, f64::max);
    let (y_min, y_max) = calculate_count_range(max_count);
    let half_width = NARROW_BAR_WIDTH_FRACTION / 2.0;

    let mut config = PlotConfig::new("Event duration", 0.5..(max_duration + 0.5), y_min..y_max)
        .labels("Duration (days)", "Frequency");
    config.bars.push(BarSeries {
        bars: counts
            .iter()
            .map(|&(d, c)| (d as f64 - half_width, d as f64 + half_width, c as f64))
            .collect(),
        label: String::new(),
        color: *COLOR_BAR,
    });
    config
}

/// Generates the histogram of event durations (unit bins centred on whole days).
pub fn plot_duration_histogram(durations: &[u32], output_file: &str) -> PlotResult {
    let config = duration_histogram_config(durations);
    draw_single_plot(output_file, (PLOT_WIDTH, PLOT_HEIGHT), "Duration", &config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_bars_centred_on_days() {
        let config = duration_histogram_config(&[1, 1, 4]);
        let bars = &config.bars[0].bars;
        assert_eq!(bars.len(), 4);
        assert!((bars[0].0 - 0.6).abs() < 1e-9);
        assert!((bars[0].1 - 1.4).abs() < 1e-9);
        assert_eq!(bars[0].2, 2.0);
        assert_eq!(bars[3].2, 1.0);
        assert_eq!(config.x_range, 0.5..4.5);
    }

    #[test]
    fn test_no_events_has_no_data() {
        let config = duration_histogram_config(&[]);
        assert!(!config.has_data());
    }
}
