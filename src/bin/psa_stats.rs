// src/bin/psa_stats.rs

use clap::{Parser, ValueEnum};
use std::error::Error;
use std::path::PathBuf;

use climate_event_stats::constants::{DEFAULT_PHASE_RES, DEFAULT_SMOOTHING_WINDOW, DEFAULT_WAVE_FREQ};
use climate_event_stats::data_input::event_parser::parse_psa_file;
use climate_event_stats::error::AnalysisError;
use climate_event_stats::metadata::{input_history, write_metadata};
use climate_event_stats::plot_functions::plot_event_summary::plot_event_summary;
use climate_event_stats::plot_functions::plot_phase_distribution::{
    plot_phase_distribution, PhaseOptions,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
enum PlotType {
    PhaseDistribution,
    EventSummary,
}

#[derive(Parser, Debug)]
#[command(name = "psa_stats")]
#[command(about = "Plot PSA pattern statistics")]
struct Args {
    /// PSA statistics file
    infile: PathBuf,

    /// Desired plot
    #[arg(value_enum)]
    plot_type: PlotType,

    /// Output file name
    ofile: PathBuf,

    /// Frequency used to indicate the wave phase
    #[arg(long, default_value_t = DEFAULT_WAVE_FREQ)]
    freq: u32,

    /// Phase resolution (spacing between longitudes when phase is in degrees)
    #[arg(long = "phase-res", default_value_t = DEFAULT_PHASE_RES)]
    phase_res: f64,

    /// Running mean window
    #[arg(long, default_value_t = DEFAULT_SMOOTHING_WINDOW)]
    window: usize,

    /// Minimum event duration
    #[arg(long = "min-duration", default_value_t = 0)]
    min_duration: u32,

    /// Plot the four seasons for the phase distribution
    #[arg(long)]
    seasonal: bool,

    /// Add epoch lines to the phase distribution
    #[arg(long)]
    epochs: bool,

    /// Add gradient lines to the phase distribution
    #[arg(long)]
    gradient: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    climate_event_stats::init_logging();
    let args = Args::parse();

    if !(args.phase_res > 0.0) {
        return Err(AnalysisError::InvalidArgument(format!(
            "phase resolution must be positive, got {}",
            args.phase_res
        ))
        .into());
    }
    let output_file = args.ofile.to_str().ok_or_else(|| {
        AnalysisError::InvalidArgument(format!("output path '{}' is not valid UTF-8", args.ofile.display()))
    })?;

    // --- Read the data and apply filters ---
    let table = parse_psa_file(&args.infile, args.freq)?;
    let min_duration = f64::from(args.min_duration);
    let filtered = table.filter(|r| r.event_duration >= min_duration);
    log::info!(
        "{} of {} rows have event_duration >= {}",
        filtered.records.len(),
        table.records.len(),
        args.min_duration
    );

    // --- Create the desired plot ---
    match args.plot_type {
        PlotType::PhaseDistribution => {
            let opts = PhaseOptions {
                phase_res: args.phase_res,
                window: args.window,
                seasonal: args.seasonal,
                epochs: args.epochs,
                gradient: args.gradient,
            };
            plot_phase_distribution(&filtered, output_file, &opts)?;
        }
        PlotType::EventSummary => {
            plot_event_summary(&filtered, output_file)?;
        }
    }

    let file_info = vec![(args.infile.display().to_string(), input_history(&args.infile))];
    write_metadata(&args.ofile, &file_info, &[])?;
    Ok(())
}
