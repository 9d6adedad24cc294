// src/bin/trend_scatter.rs
//
// Scatter plot of a global-mean y variable against global-mean temperature,
// one colour per experiment, with linear trends for the aerosol runs.

use clap::{ArgAction, Parser};
use std::collections::BTreeMap;
use std::error::Error;
use std::path::{Path, PathBuf};

use climate_event_stats::data_analysis::trend::{check_attributes, scale_for_variable};
use climate_event_stats::data_input::event_parser::parse_variable_file;
use climate_event_stats::error::AnalysisError;
use climate_event_stats::metadata::write_metadata;
use climate_event_stats::plot_functions::plot_trend_scatter::plot_trend_scatter;
use climate_event_stats::types::ExperimentData;

#[derive(Parser, Debug)]
#[command(name = "trend_scatter")]
#[command(about = "Scatter global mean variables per experiment, with linear trends")]
struct Args {
    /// Output file name
    outfile: PathBuf,

    /// x data file, x variable, y data file, y variable (repeatable)
    #[arg(
        long = "file-pair",
        num_args = 4,
        value_names = ["X_DATA", "X_VAR", "Y_DATA", "Y_VAR"],
        action = ArgAction::Append,
        required = true
    )]
    file_pair: Vec<String>,

    /// Only plot every Nth marker
    #[arg(long, default_value_t = 1)]
    thin: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
    climate_event_stats::init_logging();
    let args = Args::parse();

    if args.file_pair.len() % 4 != 0 {
        return Err(AnalysisError::InvalidArgument(
            "--file-pair takes exactly four values".to_string(),
        )
        .into());
    }
    let output_file = args.outfile.to_str().ok_or_else(|| {
        AnalysisError::InvalidArgument(format!("output path '{}' is not valid UTF-8", args.outfile.display()))
    })?;

    let mut data: BTreeMap<String, ExperimentData> = BTreeMap::new();
    let mut file_info: Vec<(String, String)> = Vec::new();
    let mut model = String::new();
    let mut y_variable = String::new();

    for pair in args.file_pair.chunks(4) {
        let (xfile, xvar, yfile, yvar) = (&pair[0], &pair[1], &pair[2], &pair[3]);
        let x_series = parse_variable_file(Path::new(xfile), xvar)?;
        let y_series = parse_variable_file(Path::new(yfile), yvar)?;

        let (experiment, pair_model) = check_attributes(&x_series, &y_series)?;
        if x_series.values.len() != y_series.values.len() {
            return Err(AnalysisError::InvalidArgument(format!(
                "'{xfile}' has {} values but '{yfile}' has {}",
                x_series.values.len(),
                y_series.values.len()
            ))
            .into());
        }
        log::info!("{xfile} / {yfile}: {pair_model} {experiment}");

        for (file, series) in [(xfile, &x_series), (yfile, &y_series)] {
            let history = series.attribute("history").unwrap_or("").to_string();
            file_info.push((file.clone(), history));
        }

        let scale = scale_for_variable(yvar);
        let entry = data.entry(experiment).or_default();
        entry.0.extend_from_slice(&x_series.values);
        entry.1.extend(y_series.values.iter().map(|v| v * scale));

        // Title and y label follow the last pair, as all pairs share one model and variable.
        model = pair_model;
        y_variable = yvar.clone();
    }

    plot_trend_scatter(&data, &model, &y_variable, args.thin, output_file)?;
    write_metadata(&args.outfile, &file_info, &[])?;
    Ok(())
}
