// src/data_analysis/trend.rs

use ndarray::Array1;
use ndarray_stats::QuantileExt;

use crate::constants::SECONDS_PER_DAY;
use crate::data_input::event_data::VariableSeries;
use crate::error::{AnalysisError, Result};

/// Least-squares straight line `y = a + b x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub intercept: f64,
    pub slope: f64,
}

impl LinearFit {
    pub fn eval(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Fits `y = a + b x` by ordinary least squares. Needs two or more distinct x values.
pub fn linear_fit(x: &[f64], y: &[f64]) -> Option<LinearFit> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let x = Array1::from(x.to_vec());
    let y = Array1::from(y.to_vec());
    let x_mean = x.mean()?;
    let y_mean = y.mean()?;
    let dx = &x - x_mean;
    let dy = &y - y_mean;
    let sxx = dx.dot(&dx);
    if sxx <= f64::EPSILON {
        return None;
    }
    let slope = dx.dot(&dy) / sxx;
    Some(LinearFit {
        intercept: y_mean - slope * x_mean,
        slope,
    })
}

/// Trend line endpoints spanning the x data.
pub fn trend_line(x: &[f64], fit: &LinearFit) -> Vec<(f64, f64)> {
    let x = Array1::from(x.to_vec());
    match (x.min_skipnan(), x.max_skipnan()) {
        (lo, hi) if lo.is_finite() && hi.is_finite() => {
            vec![(*lo, fit.eval(*lo)), (*hi, fit.eval(*hi))]
        }
        _ => Vec::new(),
    }
}

/// Keeps every `stride`-th value, starting with the first.
pub fn thin<T: Clone>(values: &[T], stride: usize) -> Vec<T> {
    values.iter().step_by(stride.max(1)).cloned().collect()
}

/// Experiments that get their own colour on the scatter plot, in legend order.
pub const EXPERIMENTS: [&str; 5] = ["noAA", "AA", "historical", "piControl", "Argo"];

/// Experiments that also get a fitted trend line.
pub const TREND_EXPERIMENTS: [&str; 2] = ["AA", "noAA"];

/// Maps model/experiment/physics-version triples onto the aerosol experiment names.
///
/// The historicalMisc runs mean different things per model; anything not in
/// the table keeps its own experiment id.
pub fn classify_experiment(model: &str, experiment: &str, physics_version: f64) -> String {
    if !physics_version.is_finite() || physics_version.fract() != 0.0 {
        return experiment.to_string();
    }
    let physics = physics_version as i64;
    let name = match (model, experiment, physics) {
        ("CSIRO-Mk3-6-0", "historicalMisc", 3) => Some("noAA"),
        ("CSIRO-Mk3-6-0", "historicalMisc", 4) => Some("AA"),
        ("IPSL-CM5A-LR", "historicalMisc", 3) => Some("AA"),
        ("IPSL-CM5A-LR", "historicalMisc", 4) => Some("noAA"),
        _ => None,
    };
    name.map(str::to_string)
        .unwrap_or_else(|| experiment.to_string())
}

/// Checks that an x/y file pair come from the same run and returns `(experiment, model)`.
pub fn check_attributes(x: &VariableSeries, y: &VariableSeries) -> Result<(String, String)> {
    let mut resolved: Vec<String> = Vec::with_capacity(3);
    for key in ["model_id", "experiment_id", "physics_version"] {
        let xv = x.attribute(key).unwrap_or("");
        let yv = y.attribute(key).unwrap_or("");
        if xv != yv {
            return Err(AnalysisError::AttributeMismatch {
                attribute: key.to_string(),
                x: xv.to_string(),
                y: yv.to_string(),
            });
        }
        resolved.push(xv.to_string());
    }

    let physics: f64 = resolved[2].trim().parse().map_err(|_| {
        AnalysisError::InvalidArgument(format!(
            "physics_version '{}' is not numeric",
            resolved[2]
        ))
    })?;
    let experiment = classify_experiment(&resolved[0], &resolved[1], physics);
    Ok((experiment, resolved[0].clone()))
}

/// Scale factor applied to y data: fluxes go from kg m-2 s-1 to mm/day.
pub fn scale_for_variable(variable: &str) -> f64 {
    match variable {
        "precipitation_flux" | "water_evaporation_flux" => SECONDS_PER_DAY,
        _ => 1.0,
    }
}

pub fn y_label_for_variable(variable: &str) -> &'static str {
    match variable {
        "sea_surface_salinity" => "Salinity amplification (g/kg)",
        "precipitation_flux" => "Global mean precipitation (mm/day)",
        "water_evaporation_flux" => "Global mean evaporation (mm/day)",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(attrs: &[(&str, &str)]) -> VariableSeries {
        VariableSeries {
            variable: "tas".to_string(),
            values: vec![],
            attributes: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_linear_fit_exact_line() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y: Vec<f64> = x.iter().map(|v| 0.5 + 2.0 * v).collect();
        let fit = linear_fit(&x, &y).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_linear_fit_degenerate() {
        assert!(linear_fit(&[1.0], &[2.0]).is_none());
        assert!(linear_fit(&[2.0, 2.0], &[1.0, 3.0]).is_none());
        assert!(linear_fit(&[1.0, 2.0], &[1.0]).is_none());
    }

    #[test]
    fn test_trend_line_spans_data() {
        let fit = LinearFit { intercept: 1.0, slope: -1.0 };
        assert_eq!(
            trend_line(&[3.0, 1.0, 2.0], &fit),
            vec![(1.0, 0.0), (3.0, -2.0)]
        );
        assert!(trend_line(&[], &fit).is_empty());
    }

    #[test]
    fn test_thin() {
        assert_eq!(thin(&[1, 2, 3, 4, 5, 6, 7], 3), vec![1, 4, 7]);
        assert_eq!(thin(&[1, 2], 0), vec![1, 2]);
    }

    #[test]
    fn test_classify_experiment() {
        assert_eq!(classify_experiment("CSIRO-Mk3-6-0", "historicalMisc", 3.0), "noAA");
        assert_eq!(classify_experiment("IPSL-CM5A-LR", "historicalMisc", 3.0), "AA");
        assert_eq!(classify_experiment("CSIRO-Mk3-6-0", "historical", 1.0), "historical");
        // Only exact physics versions map
        assert_eq!(classify_experiment("CSIRO-Mk3-6-0", "historicalMisc", 3.4), "historicalMisc");
        assert_eq!(classify_experiment("IPSL-CM5A-LR", "historicalMisc", 3.6), "historicalMisc");
        assert_eq!(classify_experiment("IPSL-CM5A-LR", "historicalMisc", f64::NAN), "historicalMisc");
    }

    #[test]
    fn test_check_attributes() {
        let attrs = [
            ("model_id", "IPSL-CM5A-LR"),
            ("experiment_id", "historicalMisc"),
            ("physics_version", "4"),
        ];
        let (experiment, model) = check_attributes(&series(&attrs), &series(&attrs)).unwrap();
        assert_eq!(experiment, "noAA");
        assert_eq!(model, "IPSL-CM5A-LR");

        let other = series(&[
            ("model_id", "IPSL-CM5A-LR"),
            ("experiment_id", "historical"),
            ("physics_version", "4"),
        ]);
        assert!(matches!(
            check_attributes(&series(&attrs), &other),
            Err(AnalysisError::AttributeMismatch { .. })
        ));
    }

    #[test]
    fn test_flux_scaling() {
        assert_eq!(scale_for_variable("precipitation_flux"), 86400.0);
        assert_eq!(scale_for_variable("sea_surface_salinity"), 1.0);
        assert_eq!(
            y_label_for_variable("water_evaporation_flux"),
            "Global mean evaporation (mm/day)"
        );
    }
}
