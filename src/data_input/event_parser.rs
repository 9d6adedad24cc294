// src/data_input/event_parser.rs

use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::data_input::event_data::{
    parse_date, EventRecord, EventTable, PsaRecord, PsaTable, VariableSeries,
};
use crate::error::{AnalysisError, Result};

/// Metadata lines found above the header, and the table text from the header down.
struct DelimitedSections {
    metadata: Vec<(String, String)>,
    csv_content: String,
}

fn split_fields(line: &str) -> Vec<String> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    match rdr.records().next() {
        Some(Ok(record)) => record
            .iter()
            .map(|f| f.trim().trim_matches('"').to_string())
            .collect(),
        _ => Vec::new(),
    }
}

/// Reads the file line by line, collecting `key,value` metadata until `is_header`
/// accepts a line, then keeps that line and everything after it as CSV content.
fn split_metadata_and_table<F>(
    input_file_path: &Path,
    expected: &[&str],
    is_header: F,
) -> Result<DelimitedSections>
where
    F: Fn(&[String]) -> bool,
{
    let file = File::open(input_file_path).map_err(|e| AnalysisError::io(input_file_path, e))?;
    let reader = BufReader::new(file);

    let mut metadata: Vec<(String, String)> = Vec::new();
    let mut csv_lines: Vec<String> = Vec::new();
    let mut found_csv_headers = false;

    for line_result in reader.lines() {
        let line = line_result.map_err(|e| AnalysisError::io(input_file_path, e))?;
        let trimmed_line = line.trim();
        if trimmed_line.is_empty() {
            continue;
        }

        if found_csv_headers {
            csv_lines.push(line);
            continue;
        }

        let fields = split_fields(trimmed_line);
        if is_header(&fields) {
            found_csv_headers = true;
            csv_lines.push(line);
            continue;
        }

        // Anything above the header is treated as key,value metadata
        if let Some(key) = fields.first().filter(|k| !k.is_empty()) {
            let value = fields.get(1).cloned().unwrap_or_default();
            metadata.push((key.clone(), value));
        }
    }

    if !found_csv_headers {
        return Err(AnalysisError::HeaderNotFound {
            path: input_file_path.to_path_buf(),
            expected: expected.iter().map(|s| s.to_string()).collect(),
        });
    }

    log::debug!(
        "Extracted {} metadata entries from '{}'",
        metadata.len(),
        input_file_path.display()
    );

    Ok(DelimitedSections {
        metadata,
        csv_content: csv_lines.join("\n"),
    })
}

/// Maps each target header to its column index and fails on the first missing one.
fn map_required_headers(
    input_file_path: &Path,
    header_record: &StringRecord,
    target_headers: &[&str],
) -> Result<Vec<usize>> {
    target_headers
        .iter()
        .map(|&target| {
            header_record
                .iter()
                .position(|h| h.trim() == target)
                .ok_or_else(|| AnalysisError::MissingColumn {
                    path: input_file_path.to_path_buf(),
                    column: target.to_string(),
                })
        })
        .collect()
}

fn table_reader(csv_content: &str) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(csv_content.as_bytes())
}

/// Parses the wave statistics file produced by the wave detection step.
///
/// The header row must contain `date` and `extent`; lines above it (the title
/// line in the standard output) are kept as metadata. Rows with an unreadable
/// date or extent are skipped with a warning.
pub fn parse_event_file(input_file_path: &Path) -> Result<EventTable> {
    let target_headers = ["date", "extent"];
    let sections = split_metadata_and_table(input_file_path, &target_headers, |fields| {
        fields.iter().any(|f| f == "date")
    })?;

    let mut reader = table_reader(&sections.csv_content);
    let header_record = reader
        .headers()
        .map_err(|e| AnalysisError::csv(input_file_path, e))?
        .clone();
    let indices = map_required_headers(input_file_path, &header_record, &target_headers)?;
    let (date_idx, extent_idx) = (indices[0], indices[1]);

    let mut records: Vec<EventRecord> = Vec::new();
    for (row_index, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Skipping row {} due to CSV read error: {}", row_index + 1, e);
                continue;
            }
        };

        let date = record.get(date_idx).map(parse_date);
        let extent = record.get(extent_idx).and_then(|v| v.parse::<f64>().ok());
        match (date, extent) {
            (Some(Ok(date)), Some(extent)) => records.push(EventRecord { date, extent }),
            _ => log::warn!(
                "Skipping row {} due to missing or invalid date/extent",
                row_index + 1
            ),
        }
    }

    log::info!(
        "Read {} event rows from '{}'",
        records.len(),
        input_file_path.display()
    );

    Ok(EventTable {
        records,
        metadata: sections.metadata,
    })
}

/// Name of the phase column for a given wave frequency, e.g. `wave6_phase`.
pub fn phase_column_name(freq: u32) -> String {
    format!("wave{freq}_phase")
}

/// Parses a PSA statistics file, keeping the phase column for `freq`.
pub fn parse_psa_file(input_file_path: &Path, freq: u32) -> Result<PsaTable> {
    let phase_column = phase_column_name(freq);
    let target_headers = [
        "time",
        "event_number",
        "event_duration",
        "event_gradient",
        "env_max",
        phase_column.as_str(),
    ];
    let sections = split_metadata_and_table(input_file_path, &target_headers, |fields| {
        fields.iter().any(|f| f == "time") && fields.iter().any(|f| f == "event_number")
    })?;

    let mut reader = table_reader(&sections.csv_content);
    let header_record = reader
        .headers()
        .map_err(|e| AnalysisError::csv(input_file_path, e))?
        .clone();
    let idx = map_required_headers(input_file_path, &header_record, &target_headers)?;

    let mut records: Vec<PsaRecord> = Vec::new();
    for (row_index, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Skipping row {} due to CSV read error: {}", row_index + 1, e);
                continue;
            }
        };

        let parse_f64 = |i: usize| -> Option<f64> {
            record.get(idx[i]).and_then(|v| v.parse::<f64>().ok())
        };
        // Timestamps may carry a time of day; only the date part is used
        let time = record
            .get(idx[0])
            .and_then(|v| v.get(..10))
            .and_then(|v| parse_date(v).ok());
        let event_number = record.get(idx[1]).and_then(|v| {
            v.parse::<i64>()
                .ok()
                .or_else(|| v.parse::<f64>().ok().map(|f| f as i64))
        });

        match (
            time,
            event_number,
            parse_f64(2),
            parse_f64(3),
            parse_f64(4),
            parse_f64(5),
        ) {
            (
                Some(time),
                Some(event_number),
                Some(event_duration),
                Some(event_gradient),
                Some(env_max),
                Some(phase),
            ) => records.push(PsaRecord {
                time,
                event_number,
                event_duration,
                event_gradient,
                env_max,
                phase,
            }),
            _ => log::warn!("Skipping PSA row {} due to missing or invalid fields", row_index + 1),
        }
    }

    log::info!(
        "Read {} PSA rows from '{}' (phase column '{}')",
        records.len(),
        input_file_path.display(),
        phase_column
    );

    Ok(PsaTable {
        records,
        phase_column,
    })
}

/// Parses a single-variable file: `key,value` attribute lines followed by a
/// header row naming `variable`.
pub fn parse_variable_file(input_file_path: &Path, variable: &str) -> Result<VariableSeries> {
    let sections = split_metadata_and_table(input_file_path, &[variable], |fields| {
        fields.iter().any(|f| f == variable)
    })?;

    let mut reader = table_reader(&sections.csv_content);
    let header_record = reader
        .headers()
        .map_err(|e| AnalysisError::csv(input_file_path, e))?
        .clone();
    let value_idx = map_required_headers(input_file_path, &header_record, &[variable])?[0];

    let mut values = Vec::new();
    for (row_index, result) in reader.records().enumerate() {
        match result {
            Ok(record) => match record.get(value_idx).and_then(|v| v.parse::<f64>().ok()) {
                Some(v) => values.push(v),
                None => log::warn!("Skipping row {} with no numeric '{}'", row_index + 1, variable),
            },
            Err(e) => log::warn!("Skipping row {} due to CSV read error: {}", row_index + 1, e),
        }
    }

    Ok(VariableSeries {
        variable: variable.to_string(),
        values,
        attributes: sections.metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_event_file_with_title_line() {
        let file = write_temp(
            "wave statistics,calc_wave_stat output\n\
             date,extent,start_lon\n\
             1979-01-01,120.0,10\n\
             1979-01-02,bad,10\n\
             1979-01-03,360,10\n",
        );
        let table = parse_event_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[1].extent, 360.0);
        assert_eq!(
            table.metadata,
            vec![(
                "wave statistics".to_string(),
                "calc_wave_stat output".to_string()
            )]
        );
    }

    #[test]
    fn test_parse_event_file_missing_extent() {
        let file = write_temp("date,amplitude\n1979-01-01,3.0\n");
        match parse_event_file(file.path()) {
            Err(AnalysisError::MissingColumn { column, .. }) => assert_eq!(column, "extent"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_event_file_without_header() {
        let file = write_temp("just,some\nwords,here\n");
        assert!(matches!(
            parse_event_file(file.path()),
            Err(AnalysisError::HeaderNotFound { .. })
        ));
    }

    #[test]
    fn test_parse_psa_file_selects_phase_column() {
        let file = write_temp(
            "time,event_number,event_duration,event_gradient,env_max,wave5_phase,wave6_phase\n\
             1980-03-01 12:00:00,1,3,0.5,9.1,12.0,40.5\n\
             1980-03-02,1,3,0.5,9.3,13.0,41.5\n",
        );
        let table = parse_psa_file(file.path(), 6).unwrap();
        assert_eq!(table.phase_column, "wave6_phase");
        assert_eq!(table.phases(), vec![40.5, 41.5]);
        assert_eq!(table.records[0].event_number, 1);

        assert!(matches!(
            parse_psa_file(file.path(), 7),
            Err(AnalysisError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_parse_variable_file_attributes() {
        let file = write_temp(
            "model_id,CSIRO-Mk3-6-0\n\
             experiment_id,historicalMisc\n\
             physics_version,3\n\
             history,\"Tue Jan 05 2016: calc_global_metric.py\"\n\
             year,tas\n\
             1950,287.1\n\
             1951,287.3\n",
        );
        let series = parse_variable_file(file.path(), "tas").unwrap();
        assert_eq!(series.values, vec![287.1, 287.3]);
        assert_eq!(series.attribute("physics_version"), Some("3"));
        assert_eq!(
            series.attribute("history"),
            Some("Tue Jan 05 2016: calc_global_metric.py")
        );
    }
}
