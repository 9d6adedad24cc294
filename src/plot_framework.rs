// src/plot_framework.rs

use plotters::backend::{BitMapBackend, DrawingBackend};
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{Circle, PathElement, Rectangle, Text};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::{Color, IntoFont, RGBColor};

use std::error::Error;
use std::ops::Range;

use crate::constants::{LINE_WIDTH_LEGEND, SCATTER_MARKER_SIZE};
use crate::font_config::{
    FONT_TUPLE_AXIS_LABEL, FONT_TUPLE_CHART_TITLE, FONT_TUPLE_LEGEND, FONT_TUPLE_MAIN_TITLE,
    FONT_TUPLE_MESSAGE,
};

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Range for count/percentage axes: starts at zero, padded above the maximum.
pub fn calculate_count_range(max_val: f64) -> (f64, f64) {
    if !max_val.is_finite() || max_val <= 0.0 {
        (0.0, 1.0)
    } else {
        (0.0, max_val * 1.1)
    }
}

/// Axis tick label formatting: k/M notation for large values, one decimal for
/// small fractional values, integers otherwise.
pub fn format_axis_value(y: f64) -> String {
    if y.abs() >= 1_000_000.0 {
        format!("{:.1}M", y / 1_000_000.0)
    } else if y.abs() >= 10_000.0 {
        format!("{:.0}k", y / 1000.0)
    } else if y.abs() < 10.0 && y.fract() != 0.0 {
        format!("{:.1}", y)
    } else {
        format!("{:.0}", y)
    }
}

/// Decimal places needed so ticks about `span / ticks` apart get distinct labels.
pub fn tick_decimals(span: f64, ticks: usize) -> usize {
    if !span.is_finite() || span <= 0.0 || ticks == 0 {
        return 0;
    }
    let step = span / ticks as f64;
    if step >= 1.0 {
        0
    } else {
        (-step.log10() - 1e-9).ceil().clamp(0.0, 6.0) as usize
    }
}

/// Tick label with `decimals` places; whole-number steps use `format_axis_value`.
pub fn format_tick(value: f64, decimals: usize) -> String {
    if decimals == 0 {
        format_axis_value(value)
    } else {
        format!("{value:.decimals$}")
    }
}

/// Year axis label: whole years only, blank between them.
pub fn year_tick_label(x: f64) -> String {
    let year = x.round();
    if (x - year).abs() > 1e-6 {
        String::new()
    } else {
        format!("{year:.0}")
    }
}

/// Tick count for a year axis: one per year, thinned to at most 12.
pub fn year_tick_count(range: &Range<f64>) -> usize {
    let years = (range.end - range.start).abs().round() as usize + 1;
    years.clamp(2, 12)
}

/// Label for a tick at `x` when the axis carries categorical labels at 0, 1, 2, ...
pub fn categorical_tick_label(x: f64, labels: &[String]) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// Maps a matplotlib-style legend location code onto a plotters legend position.
///
/// 0 (best) has no equivalent and falls back to upper right.
pub fn legend_position(code: u8) -> SeriesLabelPosition {
    match code {
        2 => SeriesLabelPosition::UpperLeft,
        3 => SeriesLabelPosition::LowerLeft,
        4 => SeriesLabelPosition::LowerRight,
        5 | 7 => SeriesLabelPosition::MiddleRight,
        6 => SeriesLabelPosition::MiddleLeft,
        8 => SeriesLabelPosition::LowerMiddle,
        9 => SeriesLabelPosition::UpperMiddle,
        10 => SeriesLabelPosition::MiddleMiddle,
        _ => SeriesLabelPosition::UpperRight,
    }
}

/// Maps a value to a colour on a continuous colorous gradient, normalised by `[min_val, max_val]`.
pub fn map_value_to_color(
    value: f64,
    min_val: f64,
    max_val: f64,
    gradient: colorous::Gradient,
) -> RGBColor {
    if !value.is_finite() || !min_val.is_finite() || !max_val.is_finite() {
        return RGBColor(0, 0, 0);
    }
    let span = (max_val - min_val).abs().max(1e-9);
    let t = ((value.clamp(min_val.min(max_val), max_val.max(min_val)) - min_val) / span).clamp(0.0, 1.0);
    let color = gradient.eval_continuous(t);
    RGBColor(color.r, color.g, color.b)
}

/// Colour `index` of the categorical line cycle (wraps around).
pub fn cycle_color(index: usize) -> RGBColor {
    let palette = colorous::CATEGORY10;
    let color = palette[index % palette.len()];
    RGBColor(color.r, color.g, color.b)
}

/// Draw a "Data Unavailable" message on a plot area.
pub fn draw_unavailable_message(
    area: &DrawingArea<BitMapBackend, Shift>,
    plot_type: &str,
    reason: &str,
) -> Result<(), Box<dyn Error>> {
    const CHAR_WIDTH_RATIO: f32 = 0.6; // Approximate character width relative to font size
    const LINE_HEIGHT_SPACING: i32 = 4;

    let (x_range, y_range) = area.get_pixel_range();
    let (width, height) = (
        (x_range.end - x_range.start) as u32,
        (y_range.end - y_range.start) as u32,
    );
    let message = format!("{plot_type} Data Unavailable:\n{reason}");

    let estimated_char_width = (FONT_TUPLE_MESSAGE.1 as f32 * CHAR_WIDTH_RATIO) as i32;
    let estimated_line_height = FONT_TUPLE_MESSAGE.1 + LINE_HEIGHT_SPACING;

    let lines: Vec<&str> = message.split('\n').collect();
    let max_line_length = lines.iter().map(|line| line.len()).max().unwrap_or(0);
    let estimated_text_width = max_line_length.saturating_mul(estimated_char_width as usize) as i32;
    let estimated_text_height = lines.len().saturating_mul(estimated_line_height as usize) as i32;

    let center_x = width as i32 / 2 - estimated_text_width / 2;
    let center_y = height as i32 / 2 - estimated_text_height / 2;

    let text_style = FONT_TUPLE_MESSAGE.into_font().color(&RED);
    area.draw(&Text::new(message, (center_x, center_y), text_style))?;
    Ok(())
}

#[derive(Clone)]
pub struct PlotSeries {
    pub data: Vec<(f64, f64)>,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
}

/// Vertical bars given as (left, right, height).
#[derive(Clone)]
pub struct BarSeries {
    pub bars: Vec<(f64, f64, f64)>,
    pub label: String,
    pub color: RGBColor,
}

/// Hollow circle markers.
#[derive(Clone)]
pub struct ScatterSeries {
    pub points: Vec<(f64, f64)>,
    pub label: String,
    pub color: RGBColor,
}

/// Line segments each carrying their own colour (colour-mapped lines).
#[derive(Clone)]
pub struct SegmentSeries {
    pub segments: Vec<((f64, f64), (f64, f64), RGBColor)>,
    pub stroke_width: u32,
}

#[derive(Clone)]
pub struct PlotConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub bars: Vec<BarSeries>,
    pub segments: Vec<SegmentSeries>,
    pub scatter: Vec<ScatterSeries>,
    pub series: Vec<PlotSeries>,
    pub x_label: String,
    pub y_label: String,
    pub x_tick_labels: Option<Vec<String>>,
    /// Label only whole-number x ticks (year axes).
    pub integer_x_ticks: bool,
    pub legend_position: SeriesLabelPosition,
}

impl PlotConfig {
    pub fn new(title: impl Into<String>, x_range: Range<f64>, y_range: Range<f64>) -> Self {
        PlotConfig {
            title: title.into(),
            x_range,
            y_range,
            bars: Vec::new(),
            segments: Vec::new(),
            scatter: Vec::new(),
            series: Vec::new(),
            x_label: String::new(),
            y_label: String::new(),
            x_tick_labels: None,
            integer_x_ticks: false,
            legend_position: SeriesLabelPosition::UpperRight,
        }
    }

    pub fn labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    pub fn has_data(&self) -> bool {
        self.bars.iter().any(|b| !b.bars.is_empty())
            || self.segments.iter().any(|s| !s.segments.is_empty())
            || self.scatter.iter().any(|s| !s.points.is_empty())
            || self.series.iter().any(|s| !s.data.is_empty())
    }

    pub fn valid_ranges(&self) -> bool {
        self.x_range.end > self.x_range.start && self.y_range.end > self.y_range.start
    }
}

/// Draws a single chart from a PlotConfig: bars first, then coloured segments,
/// scatter markers and finally line series so lines sit on top.
fn draw_chart(
    area: &DrawingArea<BitMapBackend, Shift>,
    plot_config: &PlotConfig,
) -> Result<(), Box<dyn Error>> {
    let mut chart = ChartBuilder::on(area)
        .caption(&plot_config.title, FONT_TUPLE_CHART_TITLE)
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(plot_config.x_range.clone(), plot_config.y_range.clone())?;

    const DEFAULT_TICKS: usize = 10;
    let x_labels = match &plot_config.x_tick_labels {
        Some(labels) => labels.len().max(2),
        None if plot_config.integer_x_ticks => year_tick_count(&plot_config.x_range),
        None => DEFAULT_TICKS,
    };
    let x_decimals = tick_decimals(
        plot_config.x_range.end - plot_config.x_range.start,
        DEFAULT_TICKS,
    );
    let y_decimals = tick_decimals(
        plot_config.y_range.end - plot_config.y_range.start,
        DEFAULT_TICKS,
    );
    let x_formatter = |x: &f64| match &plot_config.x_tick_labels {
        Some(labels) => categorical_tick_label(*x, labels),
        None if plot_config.integer_x_ticks => year_tick_label(*x),
        None => format_tick(*x, x_decimals),
    };

    chart
        .configure_mesh()
        .x_desc(&plot_config.x_label)
        .y_desc(&plot_config.y_label)
        .x_labels(x_labels)
        .y_labels(DEFAULT_TICKS)
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&|y| format_tick(*y, y_decimals))
        .light_line_style(WHITE.mix(0.7))
        .label_style(FONT_TUPLE_AXIS_LABEL)
        .draw()?;

    let mut legend_series_count = 0;

    for bar_series in &plot_config.bars {
        let color = bar_series.color;
        let drawn = chart.draw_series(bar_series.bars.iter().map(|&(left, right, height)| {
            Rectangle::new([(left, 0.0), (right, height)], color.filled())
        }))?;
        if !bar_series.label.is_empty() {
            drawn.label(&bar_series.label).legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled())
            });
            legend_series_count += 1;
        }
    }

    for segment_series in &plot_config.segments {
        for &(p0, p1, color) in &segment_series.segments {
            chart.draw_series(LineSeries::new(
                vec![p0, p1],
                color.stroke_width(segment_series.stroke_width),
            ))?;
        }
    }

    for scatter_series in &plot_config.scatter {
        let color = scatter_series.color;
        let drawn = chart.draw_series(
            scatter_series
                .points
                .iter()
                .map(|&p| Circle::new(p, SCATTER_MARKER_SIZE, color.stroke_width(1))),
        )?;
        if !scatter_series.label.is_empty() {
            drawn
                .label(&scatter_series.label)
                .legend(move |(x, y)| Circle::new((x + 10, y), SCATTER_MARKER_SIZE, color.stroke_width(1)));
            legend_series_count += 1;
        }
    }

    for s in &plot_config.series {
        if s.data.is_empty() {
            continue;
        }
        let drawn = chart.draw_series(LineSeries::new(
            s.data.iter().cloned(),
            s.color.stroke_width(s.stroke_width),
        ))?;
        if !s.label.is_empty() {
            let color = s.color;
            drawn.label(&s.label).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH_LEGEND))
            });
            legend_series_count += 1;
        }
    }

    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(plot_config.legend_position.clone())
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(FONT_TUPLE_LEGEND)
            .draw()?;
    }

    Ok(())
}

/// Draws one chart filling the whole image.
pub fn draw_single_plot<'a>(
    output_filename: &'a str,
    size: (u32, u32),
    plot_type_name: &str,
    plot_config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    <BitMapBackend<'a> as DrawingBackend>::ErrorType: 'static,
{
    let root_area = BitMapBackend::new(output_filename, size).into_drawing_area();
    root_area.fill(&WHITE)?;

    if plot_config.has_data() && plot_config.valid_ranges() {
        draw_chart(&root_area, plot_config)?;
    } else {
        let reason = if !plot_config.has_data() {
            "No data points"
        } else {
            "Invalid ranges"
        };
        draw_unavailable_message(&root_area, plot_type_name, reason)?;
        log::warn!("'{output_filename}' has no plottable data: {reason}");
    }

    root_area.present()?;
    log::info!("Plot saved as '{output_filename}'.");
    Ok(())
}

/// Creates an image split into a `rows x cols` grid of charts with a main title.
/// Panels without data show a placeholder message instead.
pub fn draw_panel_plot<'a>(
    output_filename: &'a str,
    size: (u32, u32),
    main_title: &str,
    plot_type_name: &str,
    grid: (usize, usize),
    panels: &[Option<PlotConfig>],
) -> Result<(), Box<dyn Error>>
where
    <BitMapBackend<'a> as DrawingBackend>::ErrorType: 'static,
{
    let root_area = BitMapBackend::new(output_filename, size).into_drawing_area();
    root_area.fill(&WHITE)?;
    root_area.draw(&Text::new(
        main_title,
        (10, 10),
        FONT_TUPLE_MAIN_TITLE.into_font().color(&BLACK),
    ))?;
    let margined_root_area = root_area.margin(40, 5, 5, 5);
    let sub_plot_areas = margined_root_area.split_evenly(grid);
    let mut any_panel_plotted = false;

    for (area, panel) in sub_plot_areas.iter().zip(panels.iter()) {
        match panel {
            Some(plot_config) if plot_config.has_data() && plot_config.valid_ranges() => {
                draw_chart(area, plot_config)?;
                any_panel_plotted = true;
            }
            Some(plot_config) => {
                let reason = if !plot_config.has_data() {
                    "No data points"
                } else {
                    "Invalid ranges"
                };
                draw_unavailable_message(area, &plot_config.title, reason)?;
            }
            None => {
                draw_unavailable_message(area, plot_type_name, "Calculation/Data Extraction Failed")?;
            }
        }
    }

    root_area.present()?;
    if any_panel_plotted {
        log::info!("Panel plot saved as '{output_filename}'.");
    } else {
        log::warn!("'{output_filename}' saved with placeholder messages only: no panel had data.");
    }
    Ok(())
}


// src/plot_framework.rs
