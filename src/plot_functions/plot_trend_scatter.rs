// src/plot_functions/plot_trend_scatter.rs

use std::collections::BTreeMap;

use plotters::style::RGBColor;

use crate::constants::{
    COLOR_EXPERIMENT_AA, COLOR_EXPERIMENT_ARGO, COLOR_EXPERIMENT_HISTORICAL,
    COLOR_EXPERIMENT_NO_AA, COLOR_EXPERIMENT_PI_CONTROL, LINE_WIDTH_PLOT, PLOT_HEIGHT, PLOT_WIDTH,
};
use crate::data_analysis::trend::{
    linear_fit, thin, trend_line, y_label_for_variable, LinearFit, EXPERIMENTS, TREND_EXPERIMENTS,
};
use crate::plot_framework::{
    calculate_range, draw_single_plot, legend_position, PlotConfig, PlotSeries, ScatterSeries,
};
use crate::types::{ExperimentData, PlotResult};

pub fn experiment_color(experiment: &str) -> Option<RGBColor> {
    match experiment {
        "noAA" => Some(*COLOR_EXPERIMENT_NO_AA),
        "AA" => Some(*COLOR_EXPERIMENT_AA),
        "historical" => Some(*COLOR_EXPERIMENT_HISTORICAL),
        "piControl" => Some(*COLOR_EXPERIMENT_PI_CONTROL),
        "Argo" => Some(*COLOR_EXPERIMENT_ARGO),
        _ => None,
    }
}

fn data_extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Builds the scatter chart and returns the fitted trends of the trend experiments.
pub fn trend_scatter_config(
    data: &BTreeMap<String, ExperimentData>,
    model: &str,
    y_variable: &str,
    thin_stride: usize,
) -> (PlotConfig, Vec<(String, LinearFit)>) {
    for experiment in data.keys() {
        if experiment_color(experiment).is_none() {
            log::warn!("Experiment '{experiment}' has no assigned colour and is not plotted");
        }
    }

    let plotted: Vec<(&str, &ExperimentData)> = EXPERIMENTS
        .iter()
        .filter_map(|e| data.get(*e).map(|d| (*e, d)))
        .filter(|(_, (x, _))| x.iter().any(|v| *v != 0.0))
        .collect();

    let x_range = data_extent(plotted.iter().flat_map(|(_, (x, _))| x.iter().copied()))
        .map_or(0.0..1.0, |(lo, hi)| {
            let (lo, hi) = calculate_range(lo, hi);
            lo..hi
        });
    let y_range = data_extent(plotted.iter().flat_map(|(_, (_, y))| y.iter().copied()))
        .map_or(0.0..1.0, |(lo, hi)| {
            let (lo, hi) = calculate_range(lo, hi);
            lo..hi
        });

    let mut config = PlotConfig::new(model, x_range, y_range)
        .labels("Global mean temperature (K)", y_label_for_variable(y_variable));
    config.legend_position = legend_position(4);

    let mut fits = Vec::new();
    for (experiment, (x, y)) in plotted {
        let Some(color) = experiment_color(experiment) else {
            continue;
        };
        config.scatter.push(ScatterSeries {
            points: thin(x, thin_stride)
                .into_iter()
                .zip(thin(y, thin_stride))
                .collect(),
            label: experiment.to_string(),
            color,
        });

        if TREND_EXPERIMENTS.contains(&experiment) {
            match linear_fit(x, y) {
                Some(fit) => {
                    config.series.push(PlotSeries {
                        data: trend_line(x, &fit),
                        label: String::new(),
                        color,
                        stroke_width: LINE_WIDTH_PLOT,
                    });
                    fits.push((experiment.to_string(), fit));
                }
                None => log::warn!("{experiment}: not enough distinct points for a trend"),
            }
        }
    }
    (config, fits)
}

/// Scatter of y against x per experiment, with linear trends for the aerosol experiments.
pub fn plot_trend_scatter(
    data: &BTreeMap<String, ExperimentData>,
    model: &str,
    y_variable: &str,
    thin_stride: usize,
    output_file: &str,
) -> PlotResult {
    let (config, fits) = trend_scatter_config(data, model, y_variable, thin_stride);
    for (experiment, fit) in &fits {
        log::info!("{experiment} trend: {}", fit.slope);
    }
    draw_single_plot(output_file, (PLOT_WIDTH, PLOT_HEIGHT), "Trend scatter", &config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BTreeMap<String, ExperimentData> {
        let mut data = BTreeMap::new();
        data.insert(
            "AA".to_string(),
            (vec![287.0, 288.0, 289.0, 290.0], vec![1.0, 2.0, 3.0, 4.0]),
        );
        data.insert("historical".to_string(), (vec![287.5, 288.5], vec![2.0, 2.5]));
        data.insert("unknown".to_string(), (vec![280.0], vec![0.0]));
        data
    }

    #[test]
    fn test_scatter_and_trends() {
        let (config, fits) = trend_scatter_config(&sample(), "CSIRO-Mk3-6-0", "precipitation_flux", 1);
        let labels: Vec<&str> = config.scatter.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["AA", "historical"]);
        assert_eq!(config.series.len(), 1);
        assert_eq!(config.series[0].data, vec![(287.0, 1.0), (290.0, 4.0)]);
        assert_eq!(fits.len(), 1);
        assert!((fits[0].1.slope - 1.0).abs() < 1e-9);
        assert_eq!(config.title, "CSIRO-Mk3-6-0");
        assert_eq!(config.y_label, "Global mean precipitation (mm/day)");
        // The unknown experiment does not widen the axes
        assert!(config.x_range.start > 280.0);
    }

    #[test]
    fn test_thinning_applies_to_markers_only() {
        let (config, fits) = trend_scatter_config(&sample(), "m", "sea_surface_salinity", 2);
        assert_eq!(config.scatter[0].points, vec![(287.0, 1.0), (289.0, 3.0)]);
        assert!((fits[0].1.intercept + 286.0).abs() < 1e-9);
    }
}
