// src/types.rs
// Type aliases shared by the analysis and plotting modules

use std::error::Error;

/// Result of a plotting routine; plotters errors are boxed.
pub type PlotResult = Result<(), Box<dyn Error>>;

/// (x values, y values) gathered for one experiment on the trend scatter plot.
pub type ExperimentData = (Vec<f64>, Vec<f64>);
