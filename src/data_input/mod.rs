// src/data_input/mod.rs

pub mod event_data;
pub mod event_parser;

// src/data_input/mod.rs
