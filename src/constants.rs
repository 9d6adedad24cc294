// src/constants.rs

// Import specific colors needed
use plotters::style::colors::full_palette::{BLUE, GREEN, GREY_400, ORANGE, RED, YELLOW_700};
use plotters::style::colors::BLACK;
use plotters::style::RGBColor;

// Date format used by every input and output file.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// Plot dimensions.
pub const PLOT_WIDTH: u32 = 1280;
pub const PLOT_HEIGHT: u32 = 960;
// Seasonal panel layouts and the DelSole-style scatter use a larger canvas.
pub const PANEL_PLOT_WIDTH: u32 = 1600;
pub const PANEL_PLOT_HEIGHT: u32 = 1330;
pub const EVENT_SUMMARY_WIDTH: u32 = 1000;
pub const EVENT_SUMMARY_HEIGHT: u32 = 1375;

// Font sizes
pub const FONT_SIZE_MAIN_TITLE: i32 = 24;
pub const FONT_SIZE_CHART_TITLE: i32 = 20;
pub const FONT_SIZE_AXIS_LABEL: i32 = 16;
pub const FONT_SIZE_LEGEND: i32 = 14;
pub const FONT_SIZE_MESSAGE: i32 = 18;

// --- Wave statistics ---
pub const EXTENT_MAX_DEG: f64 = 360.0;
pub const DEFAULT_EXTENT_BIN_WIDTH: f64 = 10.0;
pub const BAR_WIDTH_FRACTION: f64 = 0.9; // Fraction of a bin covered by its bar.
pub const NARROW_BAR_WIDTH_FRACTION: f64 = 0.8;
pub const DEFAULT_LEGEND_LOCATION: u8 = 0;

// --- PSA statistics ---
pub const DEFAULT_WAVE_FREQ: u32 = 6;
pub const DEFAULT_PHASE_RES: f64 = 1.0;
pub const DEFAULT_SMOOTHING_WINDOW: usize = 10;
pub const GRADIENT_THRESHOLD: f64 = 0.2; // |gradient| above this is a moving event.
pub const EPOCH_BOUND_EARLY: i32 = 1991;
pub const EPOCH_BOUND_LATE: i32 = 2002;
pub const EPOCH_LABELS: [&str; 3] = ["1979-1990", "1991-2002", "2003-2014"];
pub const GRADIENT_LABELS: [&str; 3] = ["backwards", "stationary", "forward"];
pub const TOTAL_HISTOGRAM_LABEL: &str = "1979-2014";
pub const EVENT_SUMMARY_PHASE_MAX: f64 = 83.0;
pub const EVENT_SUMMARY_LINE_WIDTH: u32 = 3;

// --- Trend scatter ---
pub const SECONDS_PER_DAY: f64 = 86400.0; // kg m-2 s-1 -> mm/day
pub const SCATTER_MARKER_SIZE: i32 = 4;

// --- Plot Color Assignments ---
pub const COLOR_BAR: &RGBColor = &BLUE;
pub const COLOR_PHASE_BAR: RGBColor = RGBColor(179, 179, 179); // matplotlib '0.7'
pub const COLOR_CDF: &RGBColor = &BLUE;
pub const COLOR_DJF: &RGBColor = &RED;
pub const COLOR_MAM: &RGBColor = &ORANGE;
pub const COLOR_JJA: &RGBColor = &BLUE;
pub const COLOR_SON: &RGBColor = &GREEN;
pub const COLOR_ANNUAL: &RGBColor = &BLACK;
pub const COLOR_EXPERIMENT_NO_AA: &RGBColor = &RED;
pub const COLOR_EXPERIMENT_AA: &RGBColor = &BLUE;
pub const COLOR_EXPERIMENT_HISTORICAL: &RGBColor = &YELLOW_700;
pub const COLOR_EXPERIMENT_PI_CONTROL: &RGBColor = &GREY_400;
pub const COLOR_EXPERIMENT_ARGO: &RGBColor = &GREEN;

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 2;
pub const LINE_WIDTH_LEGEND: u32 = 2;

// src/constants.rs
