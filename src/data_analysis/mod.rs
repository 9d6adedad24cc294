// src/data_analysis/mod.rs

pub mod date_binning;
pub mod filters;
pub mod histogram;
pub mod seasonal;
pub mod summary;
pub mod trend;

// src/data_analysis/mod.rs
