// src/main.rs

use clap::Parser;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use climate_event_stats::constants::{DEFAULT_EXTENT_BIN_WIDTH, DEFAULT_LEGEND_LOCATION};
use climate_event_stats::data_analysis::date_binning::get_date_bounds;
use climate_event_stats::data_analysis::filters::{combine, datetime_selector, value_range_selector};
use climate_event_stats::data_analysis::summary::{basic_stats, duration_stats, event_durations};
use climate_event_stats::data_input::event_data::parse_date;
use climate_event_stats::data_input::event_parser::parse_event_file;
use climate_event_stats::error::AnalysisError;
use climate_event_stats::metadata::{input_history, write_dates, write_metadata};
use climate_event_stats::plot_functions::plot_duration_histogram::plot_duration_histogram;
use climate_event_stats::plot_functions::plot_extent_histogram::plot_extent_histogram;
use climate_event_stats::plot_functions::plot_monthly_totals::plot_monthly_totals;
use climate_event_stats::plot_functions::plot_seasonal_values::plot_seasonal_values;
use climate_event_stats::season::Season;

#[derive(Parser, Debug)]
#[command(name = "wave_stats")]
#[command(about = "Calculate various statistics from a daily wave extent file")]
#[command(after_help = "This tool assumes daily input data. Season selection cuts events \
short, so duration statistics are only meaningful without it.")]
struct Args {
    /// Input file name
    infile: PathBuf,

    /// Time start filter (e.g. 1979-02-28)
    #[arg(long)]
    start: Option<String>,

    /// Time end filter (e.g. 1979-02-28)
    #[arg(long)]
    end: Option<String>,

    /// Only include this season
    #[arg(long, value_parser = ["DJF", "MAM", "JJA", "SON"])]
    season: Option<String>,

    /// Only include days with an extent inside [MIN, MAX]
    #[arg(long = "extent-filter", num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
    extent_filter: Option<Vec<f64>>,

    /// Output file for a histogram of the extent
    #[arg(long = "extent-histogram")]
    extent_histogram: Option<PathBuf>,

    /// Output file for a cumulative distribution of the extent
    #[arg(long = "extent-cdf")]
    extent_cdf: Option<PathBuf>,

    /// Output file for a histogram of event duration
    #[arg(long = "duration-histogram")]
    duration_histogram: Option<PathBuf>,

    /// Output file for a bar chart of monthly totals
    #[arg(long = "monthly-totals-histogram")]
    monthly_totals_histogram: Option<PathBuf>,

    /// Output file for a line graph of seasonal totals per year
    #[arg(long = "seasonal-values-line")]
    seasonal_values_line: Option<PathBuf>,

    /// Output file for the list of selected dates
    #[arg(long = "date-list")]
    date_list: Option<PathBuf>,

    /// Legend location code for the seasonal values plot
    #[arg(long = "leg-loc", default_value_t = DEFAULT_LEGEND_LOCATION)]
    leg_loc: u8,

    /// Add an annual line to the seasonal values plot
    #[arg(long)]
    annual: bool,

    /// Bin width for the extent histogram (degrees longitude)
    #[arg(long = "extent-bin-width", default_value_t = DEFAULT_EXTENT_BIN_WIDTH)]
    extent_bin_width: f64,
}

fn output_str(path: &Path) -> Result<&str, AnalysisError> {
    path.to_str().ok_or_else(|| {
        AnalysisError::InvalidArgument(format!("output path '{}' is not valid UTF-8", path.display()))
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    climate_event_stats::init_logging();
    let args = Args::parse();

    // --- Argument Parsing ---
    let start = args.start.as_deref().map(parse_date).transpose()?;
    let end = args.end.as_deref().map(parse_date).transpose()?;
    let season = args.season.as_deref().map(Season::from_str).transpose()?;
    if !(args.extent_bin_width > 0.0) {
        return Err(AnalysisError::InvalidArgument(format!(
            "extent bin width must be positive, got {}",
            args.extent_bin_width
        ))
        .into());
    }

    // --- Read data and apply filters ---
    let indata = parse_event_file(&args.infile)?;
    let dt_selection = datetime_selector(&indata.dates(), season, start, end);
    let selector = match &args.extent_filter {
        Some(bounds) if bounds.len() == 2 => {
            let extent_selection = value_range_selector(&indata.extents(), bounds[0], bounds[1]);
            combine(&dt_selection, &extent_selection)
        }
        _ => dt_selection.clone(),
    };
    let data = indata.select(&selector);
    log::info!("{} of {} days selected", data.len(), indata.len());

    // --- Basic statistics ---
    let stats = basic_stats(&data);
    for line in &stats {
        println!("{line}");
    }
    let file_info = vec![(
        args.infile.display().to_string(),
        input_history(&args.infile),
    )];
    let dates = data.dates();

    // --- Optional outputs ---
    if let Some(date_list) = &args.date_list {
        write_dates(date_list, &dates)?;
    }

    if let Some(outfile) = &args.extent_histogram {
        plot_extent_histogram(&data.extents(), output_str(outfile)?, args.extent_bin_width, false)?;
        write_metadata(outfile, &file_info, &stats)?;
    }

    if let Some(outfile) = &args.extent_cdf {
        plot_extent_histogram(&data.extents(), output_str(outfile)?, 1.0, true)?;
        write_metadata(outfile, &file_info, &stats)?;
    }

    if let Some(outfile) = &args.duration_histogram {
        let durations = event_durations(&dates);
        let mut notes = stats.clone();
        if let Some(duration_summary) = duration_stats(&durations) {
            for line in duration_summary.lines() {
                println!("{line}");
                notes.push(line);
            }
        } else {
            log::warn!("No events in the selection");
        }
        plot_duration_histogram(&durations, output_str(outfile)?)?;
        write_metadata(outfile, &file_info, &notes)?;
    }

    if args.monthly_totals_histogram.is_some() || args.seasonal_values_line.is_some() {
        // Month coverage comes from the date-filtered input, before the extent filter.
        let range = get_date_bounds(&indata.select(&dt_selection).dates())?;
        log::info!(
            "Complete months run from {} to {}",
            range.start_month(),
            range.end_month()
        );

        if let Some(outfile) = &args.monthly_totals_histogram {
            plot_monthly_totals(&dates, &range, output_str(outfile)?)?;
            write_metadata(outfile, &file_info, &stats)?;
        }

        if let Some(outfile) = &args.seasonal_values_line {
            plot_seasonal_values(&dates, &range, output_str(outfile)?, args.leg_loc, args.annual)?;
            write_metadata(outfile, &file_info, &stats)?;
        }
    }

    Ok(())
}

// src/main.rs
