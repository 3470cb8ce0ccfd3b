//! CSV export and import of recorded force traces
//!
//! The on-disk format is two columns per row, `index,value`, with no
//! header. On import only the second column is used and timestamps are
//! reconstructed from the device sampling period, so exported files
//! round-trip their values exactly.

use crate::config::SAMPLE_PERIOD;
use crate::error::{Result, ResultExt, TorqueError};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// A trace loaded from disk, ready for plotting
#[derive(Debug, Clone, Default)]
pub struct ImportedTrace {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

impl ImportedTrace {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Write recorded values as `index,value` rows without a header
pub fn export_csv(path: &Path, values: &[i64]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    for (index, value) in values.iter().enumerate() {
        writeln!(writer, "{},{}", index, value)?;
    }
    writer.flush()?;

    tracing::info!(path = %path.display(), rows = values.len(), "exported session");
    Ok(())
}

/// Read the second column of a CSV file back into a plottable trace
///
/// Timestamps are synthesized as `row_index * SAMPLE_PERIOD`. Any row
/// that lacks a second column or holds a non-integer value fails the
/// whole import.
pub fn import_csv(path: &Path) -> Result<ImportedTrace> {
    let file = File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut points = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let value = parse_row(&line).ok_or_else(|| {
            TorqueError::Csv(format!("malformed row {} in {}", index + 1, path.display()))
        })?;
        points.push([points.len() as f64 * SAMPLE_PERIOD, value as f64]);
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    tracing::info!(path = %path.display(), rows = points.len(), "imported session");
    Ok(ImportedTrace { name, points })
}

fn parse_row(line: &str) -> Option<i64> {
    let mut columns = line.split(',');
    let _index = columns.next()?;
    columns.next()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_export_then_import_round_trips_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.csv");

        let values = vec![0, -37, 123, 9999, -1];
        export_csv(&path, &values).unwrap();

        let trace = import_csv(&path).unwrap();
        let read_back: Vec<i64> = trace.points.iter().map(|p| p[1] as i64).collect();
        assert_eq!(read_back, values);
    }

    #[test]
    fn test_import_synthesizes_timestamps_from_period() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.csv");
        export_csv(&path, &[5, 6, 7]).unwrap();

        let trace = import_csv(&path).unwrap();
        assert!((trace.points[0][0] - 0.0).abs() < 1e-9);
        assert!((trace.points[1][0] - SAMPLE_PERIOD).abs() < 1e-9);
        assert!((trace.points[2][0] - 2.0 * SAMPLE_PERIOD).abs() < 1e-9);
    }

    #[test]
    fn test_export_writes_no_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.csv");
        export_csv(&path, &[42]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "0,42\n");
    }

    #[test]
    fn test_import_rejects_malformed_row() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "0,1\n1,not_a_number\n").unwrap();

        let err = import_csv(&path).unwrap_err();
        assert!(matches!(err, TorqueError::Csv(_)));
    }

    #[test]
    fn test_import_rejects_missing_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "justonecolumn\n").unwrap();

        assert!(import_csv(&path).is_err());
    }

    #[test]
    fn test_import_skips_blank_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gaps.csv");
        std::fs::write(&path, "0,1\n\n1,2\n").unwrap();

        let trace = import_csv(&path).unwrap();
        assert_eq!(trace.len(), 2);
    }

    #[test]
    fn test_import_empty_file_yields_empty_trace() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, "").unwrap();

        let trace = import_csv(&path).unwrap();
        assert!(trace.is_empty());
    }
}
