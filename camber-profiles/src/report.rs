use std::{io::Write, path::Path};

use camber_core::RideMetrics;
use serde::Serialize;
use thiserror::Error;

/// Error type returned when writing a ride report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The CSV output could not be written.
    #[error("failed to write ride report")]
    Write(#[from] csv::Error),

    /// The output sink failed while flushing.
    #[error("failed to flush ride report")]
    Flush(#[from] std::io::Error),

    /// There were no rows to report.
    #[error("ride report has no rows")]
    Empty,
}

/// One row of the ride-comfort report.
///
/// The serialized column order — `profile`, `rms_zs`, `max_zs`, `rms_jerk`,
/// `comfort_score` — is the report's schema and matches the field order
/// here. Scores are held at a fixed precision of six decimal places.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// Identifier of the simulated road profile.
    pub profile: String,

    /// RMS body displacement, in meters.
    pub rms_zs: f64,

    /// Largest absolute body displacement, in meters.
    pub max_zs: f64,

    /// RMS body jerk, in m/s³.
    pub rms_jerk: f64,

    /// Weighted comfort score; lower is better.
    pub comfort_score: f64,
}

impl ReportRow {
    /// Builds a report row from a profile name and its computed metrics,
    /// rounding each score to the report precision.
    #[must_use]
    pub fn new(profile: impl Into<String>, metrics: &RideMetrics) -> Self {
        Self {
            profile: profile.into(),
            rms_zs: round(metrics.rms_displacement),
            max_zs: round(metrics.max_displacement),
            rms_jerk: round(metrics.rms_jerk),
            comfort_score: round(metrics.comfort_score),
        }
    }
}

/// Decimal places kept in report values.
const PRECISION: f64 = 1e6;

fn round(value: f64) -> f64 {
    (value * PRECISION).round() / PRECISION
}

/// Writes report rows as CSV, header included, to any writer.
///
/// # Errors
///
/// Returns [`ReportError::Empty`] if `rows` is empty, or a write error from
/// the underlying sink.
pub fn write_report<W: Write>(writer: W, rows: &[ReportRow]) -> Result<(), ReportError> {
    if rows.is_empty() {
        return Err(ReportError::Empty);
    }
    write_rows(csv::Writer::from_writer(writer), rows)
}

/// Writes the report as a CSV file at `path`.
///
/// # Errors
///
/// Returns [`ReportError::Empty`] if `rows` is empty, or a write error if
/// the file cannot be created or written.
pub fn write_report_to_path<P: AsRef<Path>>(path: P, rows: &[ReportRow]) -> Result<(), ReportError> {
    if rows.is_empty() {
        return Err(ReportError::Empty);
    }
    write_rows(csv::Writer::from_path(path)?, rows)
}

fn write_rows<W: Write>(
    mut writer: csv::Writer<W>,
    rows: &[ReportRow],
) -> Result<(), ReportError> {
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> RideMetrics {
        RideMetrics {
            rms_displacement: 0.012345678,
            max_displacement: 0.05,
            rms_jerk: 123.456789012,
            max_jerk: 250.0,
            comfort_score: 373.512345999,
        }
    }

    #[test]
    fn rows_round_to_the_report_precision() {
        let row = ReportRow::new("profile_1", &metrics());
        assert_eq!(row.rms_zs, 0.012346);
        assert_eq!(row.max_zs, 0.05);
        assert_eq!(row.rms_jerk, 123.456789);
        assert_eq!(row.comfort_score, 373.512346);
    }

    #[test]
    fn writes_the_schema_header_and_one_line_per_row() {
        let rows = vec![
            ReportRow::new("profile_1", &metrics()),
            ReportRow::new("profile_2", &metrics()),
        ];

        let mut buffer = Vec::new();
        write_report(&mut buffer, &rows).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "profile,rms_zs,max_zs,rms_jerk,comfort_score");
        assert!(lines[1].starts_with("profile_1,"));
        assert!(lines[2].starts_with("profile_2,"));
    }

    #[test]
    fn report_values_serialize_at_fixed_precision() {
        let rows = vec![ReportRow::new("profile_1", &metrics())];

        let mut buffer = Vec::new();
        write_report(&mut buffer, &rows).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.lines().nth(1).unwrap().contains("123.456789"));
    }

    #[test]
    fn an_empty_report_is_rejected() {
        let mut buffer = Vec::new();
        assert!(matches!(
            write_report(&mut buffer, &[]),
            Err(ReportError::Empty)
        ));
    }
}
