// src/data_input/event_data.rs

use chrono::NaiveDate;

use crate::constants::DATE_FORMAT;
use crate::error::{AnalysisError, Result};

/// Parses a `YYYY-MM-DD` date string.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| AnalysisError::InvalidDate {
        value: value.to_string(),
    })
}

/// One row of the wave statistics file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventRecord {
    pub date: NaiveDate,
    pub extent: f64, // Zonal extent (degrees longitude).
}

/// Date-ordered wave events plus the `key,value` lines found above the header.
#[derive(Debug, Clone, Default)]
pub struct EventTable {
    pub records: Vec<EventRecord>,
    pub metadata: Vec<(String, String)>,
}

impl EventTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.records.iter().map(|r| r.date).collect()
    }

    pub fn extents(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.extent).collect()
    }

    /// Returns a new table holding the rows where `mask` is true.
    pub fn select(&self, mask: &[bool]) -> EventTable {
        EventTable {
            records: crate::data_analysis::filters::apply_mask(&self.records, mask),
            metadata: self.metadata.clone(),
        }
    }
}

/// One row of the PSA statistics file, with the phase column of the requested frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PsaRecord {
    pub time: NaiveDate,
    pub event_number: i64,
    pub event_duration: f64,
    pub event_gradient: f64,
    pub env_max: f64, // Amplitude envelope maximum.
    pub phase: f64,
}

#[derive(Debug, Clone, Default)]
pub struct PsaTable {
    pub records: Vec<PsaRecord>,
    pub phase_column: String,
}

impl PsaTable {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn phases(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.phase).collect()
    }

    /// Event numbers in ascending order, without repeats.
    pub fn event_numbers(&self) -> Vec<i64> {
        let mut numbers: Vec<i64> = self.records.iter().map(|r| r.event_number).collect();
        numbers.sort_unstable();
        numbers.dedup();
        numbers
    }

    pub fn filter<F>(&self, mut keep: F) -> PsaTable
    where
        F: FnMut(&PsaRecord) -> bool,
    {
        PsaTable {
            records: self.records.iter().filter(|r| keep(r)).copied().collect(),
            phase_column: self.phase_column.clone(),
        }
    }
}

/// A single numeric variable and the attributes written above its header.
#[derive(Debug, Clone, Default)]
pub struct VariableSeries {
    pub variable: String,
    pub values: Vec<f64>,
    pub attributes: Vec<(String, String)>,
}

impl VariableSeries {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, extent: f64) -> EventRecord {
        EventRecord {
            date: parse_date(date).unwrap(),
            extent,
        }
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(" 1979-02-28 ").unwrap(),
            NaiveDate::from_ymd_opt(1979, 2, 28).unwrap()
        );
        assert!(parse_date("1979-02-31").is_err());
        assert!(parse_date("28/02/1979").is_err());
    }

    #[test]
    fn test_select_keeps_metadata() {
        let table = EventTable {
            records: vec![record("2000-01-01", 10.0), record("2000-01-02", 20.0)],
            metadata: vec![("title".to_string(), "wave stats".to_string())],
        };
        let subset = table.select(&[false, true]);
        assert_eq!(subset.len(), 1);
        assert_eq!(subset.records[0].extent, 20.0);
        assert_eq!(subset.metadata, table.metadata);
    }

    #[test]
    fn test_event_numbers_unique_sorted() {
        let day = parse_date("2000-01-01").unwrap();
        let make = |n| PsaRecord {
            time: day,
            event_number: n,
            event_duration: 1.0,
            event_gradient: 0.0,
            env_max: 1.0,
            phase: 0.0,
        };
        let table = PsaTable {
            records: vec![make(3), make(1), make(3), make(2)],
            phase_column: "wave6_phase".to_string(),
        };
        assert_eq!(table.event_numbers(), vec![1, 2, 3]);
    }

    #[test]
    fn test_variable_attribute_lookup() {
        let series = VariableSeries {
            variable: "tas".to_string(),
            values: vec![1.0],
            attributes: vec![("model_id".to_string(), "CSIRO-Mk3-6-0".to_string())],
        };
        assert_eq!(series.attribute("model_id"), Some("CSIRO-Mk3-6-0"));
        assert_eq!(series.attribute("history"), None);
    }
}
