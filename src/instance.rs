//! This module defines an abstract representation of a single-runway ALP instance.
//!
//! An instance is validated once when it is built and is immutable afterwards,
//! so the solvers never have to re-check window or length consistency.

use std::{fs::File, io::{BufReader, Read, Write}, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{AlpError, AlpResult};

/// Minimum gap between two consecutive landings used when the input does not carry one.
pub const DEFAULT_SEPARATION: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawInstance", into = "RawInstance")]
pub struct AlpInstance {
    nb_aircrafts: usize,
    earliest: Vec<f64>,
    target: Vec<f64>,
    latest: Vec<f64>,
    alpha: Vec<f64>,
    beta: Vec<f64>,
    separation: f64,
}

/// Unvalidated form used for (de)serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawInstance {
    earliest: Vec<f64>,
    target: Vec<f64>,
    latest: Vec<f64>,
    alpha: Vec<f64>,
    beta: Vec<f64>,
    #[serde(default = "default_separation")]
    separation: f64,
}

fn default_separation() -> f64 {
    DEFAULT_SEPARATION
}

impl TryFrom<RawInstance> for AlpInstance {
    type Error = AlpError;

    fn try_from(raw: RawInstance) -> AlpResult<Self> {
        AlpInstance::new(raw.earliest, raw.target, raw.latest, raw.alpha, raw.beta, raw.separation)
    }
}

impl From<AlpInstance> for RawInstance {
    fn from(instance: AlpInstance) -> Self {
        RawInstance {
            earliest: instance.earliest,
            target: instance.target,
            latest: instance.latest,
            alpha: instance.alpha,
            beta: instance.beta,
            separation: instance.separation,
        }
    }
}

/// One row of the tabular input; the row index is the aircraft id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AircraftRow {
    pub earliest: f64,
    pub target: f64,
    pub latest: f64,
    pub earliness_penalty: f64,
    pub lateness_penalty: f64,
}

impl AlpInstance {
    /// Builds an instance, failing fast on any inconsistency of the input arrays.
    pub fn new(
        earliest: Vec<f64>,
        target: Vec<f64>,
        latest: Vec<f64>,
        alpha: Vec<f64>,
        beta: Vec<f64>,
        separation: f64,
    ) -> AlpResult<Self> {
        let n = earliest.len();
        for (column, values) in [("target", &target), ("latest", &latest), ("alpha", &alpha), ("beta", &beta)] {
            if values.len() != n {
                return Err(AlpError::LengthMismatch { column, expected: n, found: values.len() });
            }
        }

        if !separation.is_finite() || separation < 0.0 {
            return Err(AlpError::InvalidSeparation(separation));
        }

        for i in 0..n {
            for (column, value) in [("earliest", earliest[i]), ("target", target[i]), ("latest", latest[i])] {
                if !value.is_finite() {
                    return Err(AlpError::NonFinite { aircraft: i, column });
                }
            }
            if earliest[i] > target[i] || target[i] > latest[i] {
                return Err(AlpError::InvalidWindow {
                    aircraft: i,
                    earliest: earliest[i],
                    target: target[i],
                    latest: latest[i],
                });
            }
            for (column, value) in [("alpha", alpha[i]), ("beta", beta[i])] {
                if !value.is_finite() || value < 0.0 {
                    return Err(AlpError::InvalidRate { aircraft: i, column, value });
                }
            }
        }

        Ok(AlpInstance { nb_aircrafts: n, earliest, target, latest, alpha, beta, separation })
    }

    pub fn from_rows(rows: &[AircraftRow], separation: f64) -> AlpResult<Self> {
        Self::new(
            rows.iter().map(|r| r.earliest).collect(),
            rows.iter().map(|r| r.target).collect(),
            rows.iter().map(|r| r.latest).collect(),
            rows.iter().map(|r| r.earliness_penalty).collect(),
            rows.iter().map(|r| r.lateness_penalty).collect(),
            separation,
        )
    }

    /// Reads the tabular format: one row per aircraft with columns
    /// `earliest, target, latest, earliness_penalty, lateness_penalty`.
    pub fn from_csv_reader<R: Read>(reader: R, separation: f64) -> AlpResult<Self> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let rows = reader.deserialize::<AircraftRow>().collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(&rows, separation)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> AlpResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Loads an instance from disk. Files ending in `.json` are read as JSON,
    /// anything else as CSV. A given `separation` overrides the file's value.
    pub fn load(path: &Path, separation: Option<f64>) -> AlpResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            let instance = Self::from_json_reader(reader)?;
            match separation {
                Some(separation) => instance.with_separation(separation),
                None => Ok(instance),
            }
        } else {
            Self::from_csv_reader(reader, separation.unwrap_or(DEFAULT_SEPARATION))
        }
    }

    pub fn with_separation(mut self, separation: f64) -> AlpResult<Self> {
        if !separation.is_finite() || separation < 0.0 {
            return Err(AlpError::InvalidSeparation(separation));
        }
        self.separation = separation;
        Ok(self)
    }

    pub fn rows(&self) -> Vec<AircraftRow> {
        (0..self.nb_aircrafts)
            .map(|i| AircraftRow {
                earliest: self.earliest[i],
                target: self.target[i],
                latest: self.latest[i],
                earliness_penalty: self.alpha[i],
                lateness_penalty: self.beta[i],
            })
            .collect()
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> AlpResult<()> {
        let mut writer = csv::Writer::from_writer(writer);
        for row in self.rows() {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn nb_aircrafts(&self) -> usize {
        self.nb_aircrafts
    }

    pub fn earliest(&self) -> &[f64] {
        &self.earliest
    }

    pub fn target(&self) -> &[f64] {
        &self.target
    }

    pub fn latest(&self) -> &[f64] {
        &self.latest
    }

    pub fn alpha(&self) -> &[f64] {
        &self.alpha
    }

    pub fn beta(&self) -> &[f64] {
        &self.beta
    }

    pub fn separation(&self) -> f64 {
        self.separation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "earliest,target,latest,earliness_penalty,lateness_penalty\n\
                       0,0,20,1,1\n\
                       0, 5, 20, 1, 2\n\
                       0,10,20,1.5,1\n";

    #[test]
    fn test_csv_columns_map_to_rates() {
        let instance = AlpInstance::from_csv_reader(CSV.as_bytes(), 4.0).unwrap();
        assert_eq!(instance.nb_aircrafts(), 3);
        assert_eq!(instance.target(), &[0.0, 5.0, 10.0]);
        assert_eq!(instance.alpha(), &[1.0, 1.0, 1.5]);
        assert_eq!(instance.beta(), &[1.0, 2.0, 1.0]);
        assert_eq!(instance.separation(), 4.0);
    }

    #[test]
    fn test_csv_write_then_read_keeps_rows() {
        let instance = AlpInstance::from_csv_reader(CSV.as_bytes(), 4.0).unwrap();
        let mut buffer = Vec::new();
        instance.write_csv(&mut buffer).unwrap();
        let reread = AlpInstance::from_csv_reader(buffer.as_slice(), 4.0).unwrap();
        assert_eq!(instance, reread);
    }

    #[test]
    fn test_json_defaults_separation() {
        let json = r#"{"earliest":[0,0],"target":[0,0],"latest":[9,9],"alpha":[1,1],"beta":[1,1]}"#;
        let instance = AlpInstance::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(instance.separation(), DEFAULT_SEPARATION);
    }

    #[test]
    fn test_json_is_validated() {
        let json = r#"{"earliest":[5],"target":[0],"latest":[9],"alpha":[1],"beta":[1]}"#;
        assert!(AlpInstance::from_json_reader(json.as_bytes()).is_err());
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let err = AlpInstance::new(vec![0.0, 0.0], vec![0.0], vec![1.0, 1.0], vec![1.0, 1.0], vec![1.0, 1.0], 4.0)
            .unwrap_err();
        assert!(matches!(err, AlpError::LengthMismatch { column: "target", expected: 2, found: 1 }));
    }

    #[test]
    fn test_rejects_earliest_after_latest() {
        let err = AlpInstance::new(vec![10.0], vec![5.0], vec![3.0], vec![1.0], vec![1.0], 4.0).unwrap_err();
        assert!(matches!(err, AlpError::InvalidWindow { aircraft: 0, .. }));
    }

    #[test]
    fn test_rejects_negative_separation() {
        let err = AlpInstance::new(vec![0.0], vec![0.0], vec![0.0], vec![1.0], vec![1.0], -1.0).unwrap_err();
        assert!(matches!(err, AlpError::InvalidSeparation(_)));
    }

    #[test]
    fn test_rejects_negative_rate() {
        let err = AlpInstance::new(vec![0.0], vec![0.0], vec![0.0], vec![1.0], vec![-2.0], 4.0).unwrap_err();
        assert!(matches!(err, AlpError::InvalidRate { column: "beta", .. }));
    }

    #[test]
    fn test_empty_instance_is_valid() {
        let instance = AlpInstance::new(vec![], vec![], vec![], vec![], vec![], 4.0).unwrap();
        assert_eq!(instance.nb_aircrafts(), 0);
    }
}
