// src/metadata.rs

// Provenance sidecars. Every image written by the tools gets a `<stem>.met`
// text file next to it recording how it was produced and from which inputs.

use chrono::{Local, NaiveDate};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::constants::DATE_FORMAT;
use crate::error::{AnalysisError, Result};

/// Sidecar path for a data or image file: same location and stem, `.met` extension.
pub fn metadata_path_for(path: &Path) -> PathBuf {
    path.with_extension("met")
}

/// Reads the text of a metadata sidecar.
pub fn read_metadata(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| AnalysisError::io(path, e))
}

/// History text for an input file, taken from its sidecar when one exists.
pub fn input_history(input: &Path) -> String {
    let met = metadata_path_for(input);
    match read_metadata(&met) {
        Ok(text) => text.trim_end().to_string(),
        Err(_) => {
            log::warn!(
                "No metadata file '{}' found for input '{}'",
                met.display(),
                input.display()
            );
            "(no history available)".to_string()
        }
    }
}

/// Renders the sidecar text.
///
/// `file_info` pairs an input file name with its history; `extra_notes` are
/// free-form lines such as summary statistics.
pub fn format_metadata(
    command_line: &str,
    file_info: &[(String, String)],
    extra_notes: &[String],
) -> String {
    let mut text = format!(
        "Created {} using climate_event_stats {}\nCommand: {}\n",
        Local::now().format("%a %b %d %H:%M:%S %Y"),
        crate::crate_version(),
        command_line
    );

    for (file, history) in file_info {
        text.push_str(&format!("\nHistory of {file}:\n{history}\n"));
    }

    if !extra_notes.is_empty() {
        text.push_str("\nExtra notes:\n");
        for note in extra_notes {
            text.push_str(note);
            text.push('\n');
        }
    }
    text
}

/// The current process's command line, space separated.
pub fn current_command_line() -> String {
    std::env::args().collect::<Vec<_>>().join(" ")
}

/// Writes the sidecar for `outfile` and returns its path.
pub fn write_metadata(
    outfile: &Path,
    file_info: &[(String, String)],
    extra_notes: &[String],
) -> Result<PathBuf> {
    let met_path = metadata_path_for(outfile);
    let text = format_metadata(&current_command_line(), file_info, extra_notes);
    fs::write(&met_path, text).map_err(|e| AnalysisError::io(&met_path, e))?;
    log::info!("Metadata written to '{}'", met_path.display());
    Ok(met_path)
}

/// Writes one date per line.
pub fn write_dates(outfile: &Path, dates: &[NaiveDate]) -> Result<()> {
    let mut file = fs::File::create(outfile).map_err(|e| AnalysisError::io(outfile, e))?;
    for date in dates {
        writeln!(file, "{}", date.format(DATE_FORMAT)).map_err(|e| AnalysisError::io(outfile, e))?;
    }
    log::info!("{} dates written to '{}'", dates.len(), outfile.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_path_replaces_extension() {
        assert_eq!(
            metadata_path_for(Path::new("out/plot.png")),
            PathBuf::from("out/plot.met")
        );
        assert_eq!(
            metadata_path_for(Path::new("psa_stats.csv")),
            PathBuf::from("psa_stats.met")
        );
    }

    #[test]
    fn test_format_metadata_sections() {
        let text = format_metadata(
            "wave_stats waves.csv --annual",
            &[("waves.csv".to_string(), "calc_wave_stat.py run".to_string())],
            &["total number of days: 10".to_string()],
        );
        assert!(text.contains("Command: wave_stats waves.csv --annual\n"));
        assert!(text.contains("History of waves.csv:\ncalc_wave_stat.py run\n"));
        assert!(text.ends_with("Extra notes:\ntotal number of days: 10\n"));
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let outfile = dir.path().join("hist.png");
        let met = write_metadata(&outfile, &[], &["note".to_string()]).unwrap();
        assert_eq!(met, dir.path().join("hist.met"));
        let text = read_metadata(&met).unwrap();
        assert!(text.contains("Extra notes:\nnote\n"));
        assert!(!text.contains("History of"));
    }

    #[test]
    fn test_input_history_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("psa.csv");
        assert_eq!(input_history(&input), "(no history available)");
        fs::write(dir.path().join("psa.met"), "psa_date_list.py run\n").unwrap();
        assert_eq!(input_history(&input), "psa_date_list.py run");
    }

    #[test]
    fn test_write_dates() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("dates.txt");
        let dates = [
            NaiveDate::from_ymd_opt(1979, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(1979, 1, 2).unwrap(),
        ];
        write_dates(&out, &dates).unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "1979-01-01\n1979-01-02\n");
    }
}
