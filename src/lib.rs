// src/lib.rs - Library interface shared by the wave_stats, psa_stats and trend_scatter binaries

pub mod constants;
pub mod data_analysis;
pub mod data_input;
pub mod error;
pub mod font_config;
pub mod metadata;
pub mod plot_framework;
pub mod plot_functions;
pub mod season;
pub mod types;

/// Crate version recorded in the metadata sidecar files.
pub fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Starts the env_logger backend at `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .try_init();
}
