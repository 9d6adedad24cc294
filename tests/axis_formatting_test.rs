// tests/axis_formatting_test.rs

use climate_event_stats::plot_framework::{
    format_axis_value, format_tick, tick_decimals, year_tick_label,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_axis_formatting() {
        // Small fractional percentages keep one decimal
        assert_eq!(format_axis_value(0.5), "0.5");
        assert_eq!(format_axis_value(2.5), "2.5");
        // Whole values print as integers
        assert_eq!(format_axis_value(0.0), "0");
        assert_eq!(format_axis_value(10.0), "10");
        assert_eq!(format_axis_value(100.0), "100");
        // Half-step ticks on a narrow axis keep their fraction
        let decimals = tick_decimals(5.0, 10);
        assert_eq!(format_tick(12.5, decimals), "12.5");
        assert_eq!(format_tick(13.0, decimals), "13.0");
    }

    #[test]
    fn test_half_year_ticks_do_not_repeat_years() {
        let labels: Vec<String> = (0..9).map(|i| year_tick_label(1979.0 + 0.5 * i as f64)).collect();
        let shown: Vec<&String> = labels.iter().filter(|l| !l.is_empty()).collect();
        assert_eq!(shown, vec!["1979", "1980", "1981", "1982", "1983"]);
    }

    #[test]
    fn test_temperature_ticks_are_distinct() {
        // A padded 287..289 K scatter axis with quarter-degree ticks
        let decimals = tick_decimals(2.0, 10);
        let labels: Vec<String> = (0..9).map(|i| format_tick(287.0 + 0.25 * i as f64, decimals)).collect();
        for pair in labels.windows(2) {
            assert_ne!(pair[0], pair[1], "{labels:?}");
        }
    }

    #[test]
    fn test_year_axis_not_abbreviated() {
        for year in [1979.0, 1991.0, 2002.0, 2014.0] {
            assert_eq!(format_axis_value(year), format!("{year:.0}"));
        }
    }

    #[test]
    fn test_large_count_axis_formatting() {
        assert_eq!(format_axis_value(10_000.0), "10k");
        assert_eq!(format_axis_value(12_500.0), "12k"); // {:.0} rounds half to even
        assert_eq!(format_axis_value(1_000_000.0), "1.0M");
        assert_eq!(format_axis_value(2_500_000.0), "2.5M");
        assert_eq!(format_axis_value(-20_000.0), "-20k");
    }
}
