// src/plot_functions/plot_event_summary.rs

use crate::constants::{
    EVENT_SUMMARY_HEIGHT, EVENT_SUMMARY_LINE_WIDTH, EVENT_SUMMARY_PHASE_MAX, EVENT_SUMMARY_WIDTH,
    GRADIENT_THRESHOLD,
};
use crate::data_input::event_data::PsaTable;
use crate::plot_framework::{draw_single_plot, map_value_to_color, PlotConfig, SegmentSeries};
use crate::types::PlotResult;

/// Colour map for an event: red for forward-moving, blue for backward, grey otherwise.
pub fn gradient_colormap(gradient: f64) -> colorous::Gradient {
    if gradient > GRADIENT_THRESHOLD {
        colorous::REDS
    } else if gradient < -GRADIENT_THRESHOLD {
        colorous::BLUES
    } else {
        colorous::GREYS
    }
}

pub fn event_summary_config(table: &PsaTable) -> PlotConfig {
    let (amp_min, amp_max) = table
        .records
        .iter()
        .map(|r| r.env_max)
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let duration_max = table
        .records
        .iter()
        .map(|r| r.event_duration)
        .fold(0.0, f64::max);

    let mut config = PlotConfig::new(
        "Event summary",
        0.0..duration_max,
        0.0..EVENT_SUMMARY_PHASE_MAX,
    )
    .labels("day", table.phase_column.as_str());

    for event in table.event_numbers() {
        let rows: Vec<_> = table
            .records
            .iter()
            .filter(|r| r.event_number == event)
            .collect();
        let Some(first) = rows.first() else {
            continue;
        };
        let cmap = gradient_colormap(first.event_gradient);

        // Each segment takes the colour of its starting day.
        let segments = rows
            .windows(2)
            .enumerate()
            .map(|(day, pair)| {
                let color = map_value_to_color(pair[0].env_max, amp_min, amp_max, cmap);
                ((day as f64, pair[0].phase), ((day + 1) as f64, pair[1].phase), color)
            })
            .collect();
        config.segments.push(SegmentSeries {
            segments,
            stroke_width: EVENT_SUMMARY_LINE_WIDTH,
        });
    }
    config
}

/// Line graph of phase over the lifecycle of each PSA event.
pub fn plot_event_summary(table: &PsaTable, output_file: &str) -> PlotResult {
    let config = event_summary_config(table);
    log::info!("Drawing {} events", config.segments.len());
    draw_single_plot(
        output_file,
        (EVENT_SUMMARY_WIDTH, EVENT_SUMMARY_HEIGHT),
        "Event summary",
        &config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::event_data::{parse_date, PsaRecord};

    fn rec(event_number: i64, gradient: f64, env_max: f64, phase: f64) -> PsaRecord {
        PsaRecord {
            time: parse_date("1990-01-01").unwrap(),
            event_number,
            event_duration: 3.0,
            event_gradient: gradient,
            env_max,
            phase,
        }
    }

    #[test]
    fn test_gradient_colormap_thresholds() {
        let red = map_value_to_color(1.0, 0.0, 1.0, gradient_colormap(0.5));
        let blue = map_value_to_color(1.0, 0.0, 1.0, gradient_colormap(-0.5));
        let grey = map_value_to_color(1.0, 0.0, 1.0, gradient_colormap(0.2));
        assert!(red.0 > red.2);
        assert!(blue.2 > blue.0);
        assert_eq!(grey.0, grey.1);
    }

    #[test]
    fn test_segments_per_event() {
        let table = PsaTable {
            records: vec![
                rec(1, 0.5, 1.0, 10.0),
                rec(1, 0.5, 2.0, 12.0),
                rec(1, 0.5, 3.0, 14.0),
                rec(2, -0.5, 1.0, 40.0),
                rec(2, -0.5, 3.0, 41.0),
            ],
            phase_column: "wave6_phase".to_string(),
        };
        let config = event_summary_config(&table);
        assert_eq!(config.segments.len(), 2);
        assert_eq!(config.segments[0].segments.len(), 2);
        let ((x0, y0), (x1, y1), _) = config.segments[0].segments[1];
        assert_eq!((x0, y0, x1, y1), (1.0, 12.0, 2.0, 14.0));
        assert_eq!(config.x_range, 0.0..3.0);
        assert_eq!(config.y_range, 0.0..83.0);
        assert_eq!(config.y_label, "wave6_phase");
    }
}
