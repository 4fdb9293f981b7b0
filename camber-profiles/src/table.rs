use std::{io::Read, path::Path};

use thiserror::Error;

/// Error type returned when loading a [`RoadProfileTable`].
#[derive(Debug, Error)]
pub enum ProfileTableError {
    /// The underlying CSV source could not be read or parsed, including
    /// unreadable files and rows whose length differs from the header.
    #[error("failed to read profile table")]
    Read(#[from] csv::Error),

    /// The table header named no profiles.
    #[error("profile table has no columns")]
    NoProfiles,

    /// The table held a header but no sample rows.
    #[error("profile table has no rows")]
    NoSamples,

    /// A cell could not be parsed as a number.
    #[error("profile {profile:?} row {row}: {value:?} is not a number")]
    InvalidSample {
        profile: String,
        row: usize,
        value: String,
    },

    /// A cell parsed as NaN or infinity.
    #[error("profile {profile:?} row {row}: sample is not finite")]
    NonFiniteSample { profile: String, row: usize },
}

/// An in-memory table of named road elevation profiles.
///
/// The source is a delimited file with one column per profile: the header
/// row names the profiles and every column holds an equal-length sequence
/// of elevation samples in meters. Loading rejects ragged rows, unparsable
/// cells, and non-finite values, so every slice handed out downstream
/// satisfies the simulator's finite-input contract.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadProfileTable {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl RoadProfileTable {
    /// Loads a profile table from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns a [`ProfileTableError`] if the file cannot be read or its
    /// contents fail [`from_reader`](Self::from_reader).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ProfileTableError> {
        Self::from_csv_reader(csv::Reader::from_path(path)?)
    }

    /// Parses a profile table from any CSV source.
    ///
    /// # Errors
    ///
    /// Returns a [`ProfileTableError`] if the source is malformed, names no
    /// profiles, holds no sample rows, or contains an unparsable or
    /// non-finite cell.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ProfileTableError> {
        Self::from_csv_reader(csv::Reader::from_reader(reader))
    }

    fn from_csv_reader<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, ProfileTableError> {
        let names: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();
        if names.is_empty() {
            return Err(ProfileTableError::NoProfiles);
        }

        let mut columns = vec![Vec::new(); names.len()];
        for (row, record) in reader.records().enumerate() {
            // Rows with the wrong number of fields error out here; the
            // reader's strict length checking keeps the columns rectangular.
            let record = record?;
            for (column, value) in record.iter().enumerate() {
                let sample: f64 =
                    value
                        .trim()
                        .parse()
                        .map_err(|_| ProfileTableError::InvalidSample {
                            profile: names[column].clone(),
                            row,
                            value: value.to_owned(),
                        })?;
                if !sample.is_finite() {
                    return Err(ProfileTableError::NonFiniteSample {
                        profile: names[column].clone(),
                        row,
                    });
                }
                columns[column].push(sample);
            }
        }

        if columns[0].is_empty() {
            return Err(ProfileTableError::NoSamples);
        }

        Ok(Self { names, columns })
    }

    /// Profile names in header order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Elevation samples for a named profile, or `None` if the table has no
    /// column with that name.
    #[must_use]
    pub fn profile(&self, name: &str) -> Option<&[f64]> {
        let index = self.names.iter().position(|n| n == name)?;
        Some(&self.columns[index])
    }

    /// Number of samples in every profile.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.columns[0].len()
    }

    /// Iterates over `(name, samples)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter().map(Vec::as_slice))
    }
}
