// src/plot_functions/plot_phase_distribution.rs

use chrono::Datelike;

use crate::constants::{
    COLOR_PHASE_BAR, EPOCH_BOUND_EARLY, EPOCH_BOUND_LATE, EPOCH_LABELS, GRADIENT_LABELS,
    GRADIENT_THRESHOLD, LINE_WIDTH_PLOT, NARROW_BAR_WIDTH_FRACTION, PANEL_PLOT_HEIGHT,
    PANEL_PLOT_WIDTH, PLOT_HEIGHT, PLOT_WIDTH, TOTAL_HISTOGRAM_LABEL,
};
use crate::data_analysis::histogram::{phase_histogram, PhaseHistogram};
use crate::data_input::event_data::{PsaRecord, PsaTable};
use crate::plot_framework::{
    calculate_count_range, cycle_color, draw_panel_plot, draw_single_plot, BarSeries,
    PlotConfig, PlotSeries,
};
use crate::season::Season;
use crate::types::PlotResult;

/// Options controlling the phase distribution plot.
#[derive(Debug, Clone, Copy)]
pub struct PhaseOptions {
    pub phase_res: f64,
    pub window: usize,
    pub seasonal: bool,
    pub epochs: bool,
    pub gradient: bool,
}

/// Splits phases into `key < low`, `low <= key <= high` and `key > high`.
fn split_three<F>(records: &[PsaRecord], key: F, bound_low: f64, bound_high: f64) -> [Vec<f64>; 3]
where
    F: Fn(&PsaRecord) -> f64,
{
    let mut parts: [Vec<f64>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    for r in records {
        let k = key(r);
        let idx = if k < bound_low {
            0
        } else if k > bound_high {
            2
        } else {
            1
        };
        parts[idx].push(r.phase);
    }
    parts
}

fn smooth_series(hist: &PhaseHistogram, label: &str, color_index: usize) -> PlotSeries {
    PlotSeries {
        data: hist
            .bin_centers
            .iter()
            .copied()
            .zip(hist.smoothed.iter().copied())
            .collect(),
        label: label.to_string(),
        color: cycle_color(color_index),
        stroke_width: LINE_WIDTH_PLOT,
    }
}

/// Builds one phase distribution panel from the records of a season (or all records).
pub fn phase_panel_config(title: &str, records: &[PsaRecord], opts: &PhaseOptions) -> PlotConfig {
    let phases: Vec<f64> = records.iter().map(|r| r.phase).collect();
    let total = phase_histogram(&phases, opts.window, opts.phase_res);

    let x_range = match (total.bin_centers.first(), total.bin_centers.last()) {
        (Some(&lo), Some(&hi)) => (lo - opts.phase_res)..(hi + opts.phase_res),
        _ => 0.0..1.0,
    };
    let max_count = total.counts.iter().copied().max().unwrap_or(0) as f64;
    let (y_min, y_max) = calculate_count_range(max_count);

    let mut config = PlotConfig::new(title, x_range, y_min..y_max).labels("Longitude", "Frequency");

    let half_width = opts.phase_res * NARROW_BAR_WIDTH_FRACTION / 2.0;
    config.bars.push(BarSeries {
        bars: total
            .bin_centers
            .iter()
            .zip(total.counts.iter())
            .map(|(&c, &n)| (c - half_width, c + half_width, n as f64))
            .collect(),
        label: String::new(),
        color: COLOR_PHASE_BAR,
    });
    config
        .series
        .push(smooth_series(&total, TOTAL_HISTOGRAM_LABEL, 0));

    let mut extra: Vec<([Vec<f64>; 3], [&str; 3])> = Vec::new();
    if opts.epochs {
        let parts = split_three(
            records,
            |r| r.time.year() as f64,
            EPOCH_BOUND_EARLY as f64,
            EPOCH_BOUND_LATE as f64,
        );
        extra.push((parts, EPOCH_LABELS));
    }
    if opts.gradient {
        let parts = split_three(
            records,
            |r| r.event_gradient,
            -GRADIENT_THRESHOLD,
            GRADIENT_THRESHOLD,
        );
        extra.push((parts, GRADIENT_LABELS));
    }

    let mut color_index = 1;
    for (parts, labels) in extra {
        for (part, label) in parts.iter().zip(labels.iter()) {
            let hist = phase_histogram(part, opts.window, opts.phase_res);
            if hist.is_empty() {
                log::warn!("{title}: no records for the '{label}' line");
            }
            config.series.push(smooth_series(&hist, label, color_index));
            color_index += 1;
        }
    }
    config
}

/// Histogram of PSA phase with smoothed lines, annually or as four seasonal panels.
pub fn plot_phase_distribution(table: &PsaTable, output_file: &str, opts: &PhaseOptions) -> PlotResult {
    if !opts.seasonal {
        let config = phase_panel_config(Season::Annual.label(), &table.records, opts);
        return draw_single_plot(output_file, (PLOT_WIDTH, PLOT_HEIGHT), "Phase distribution", &config);
    }

    let panels: Vec<Option<PlotConfig>> = Season::FOUR
        .iter()
        .map(|season| {
            let subset: Vec<PsaRecord> = table
                .records
                .iter()
                .filter(|r| season.contains(r.time.month()))
                .copied()
                .collect();
            Some(phase_panel_config(season.label(), &subset, opts))
        })
        .collect();

    draw_panel_plot(
        output_file,
        (PANEL_PLOT_WIDTH, PANEL_PLOT_HEIGHT),
        &format!("Phase distribution ({})", table.phase_column),
        "Phase distribution",
        (2, 2),
        &panels,
    )
}
