// src/plot_functions/mod.rs

pub mod plot_duration_histogram;
pub mod plot_event_summary;
pub mod plot_extent_histogram;
pub mod plot_monthly_totals;
pub mod plot_phase_distribution;
pub mod plot_seasonal_values;
pub mod plot_trend_scatter;

// src/plot_functions/mod.rs
