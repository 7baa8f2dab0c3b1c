// ONELOG: Metric Extraction from ONE Simulator Report and Settings Files
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//! Computation of omega values over a run: the weighted sum of a node's per-hop replica
//! vector, `omega(m) = <gamma, m>`, where gamma controls how much each relay hop counts.
use std::{fs, path::Path};

use crate::records::OmegaRecord;

/// Number of leading metadata columns (time, node, ...) in a matrix data file before the
/// hop vector starts.
const HOP_VECTOR_OFFSET: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum OmegaError {
    #[error("Mismatch in dimensions: gamma has {gamma} entries, but m has {m}")]
    DimensionMismatch { gamma: usize, m: usize },
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid number: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),
    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Matrix line {0} has no hop vector")]
    MissingHopVector(usize),
}

/// Dot product `<gamma, m>` between the control vector and a hop vector of equal length.
pub fn omega(gamma: &[f64], m: &[f64]) -> Result<f64, OmegaError> {
    if gamma.len() != m.len() {
        return Err(OmegaError::DimensionMismatch {
            gamma: gamma.len(),
            m: m.len(),
        });
    }
    Ok(gamma.iter().zip(m).map(|(g, x)| g * x).sum())
}

/// Read a gamma control vector from a whitespace-separated file.
pub fn read_gamma(path: impl AsRef<Path>) -> Result<Vec<f64>, OmegaError> {
    fs::read_to_string(path)?
        .split_whitespace()
        .map(|x| x.parse::<f64>().map_err(OmegaError::from))
        .collect()
}

/// Compute one omega value per line of a matrix data file.
///
/// Every line is comma-separated with the simulation time in column 0 and the hop vector
/// in columns 3 and up; the hop vector must match the gamma dimension on every line.
pub fn compute_omegas(
    matrix_path: impl AsRef<Path>,
    gamma: &[f64],
) -> Result<Vec<OmegaRecord>, OmegaError> {
    let mut records = Vec::new();

    for (nr, line) in fs::read_to_string(matrix_path)?.lines().enumerate() {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() <= HOP_VECTOR_OFFSET {
            return Err(OmegaError::MissingHopVector(nr + 1));
        }

        let time: f64 = fields[0].trim().parse()?;
        let m = fields[HOP_VECTOR_OFFSET..]
            .iter()
            .map(|x| x.trim().parse::<f64>().map_err(OmegaError::from))
            .collect::<Result<Vec<_>, _>>()?;

        records.push(OmegaRecord {
            time,
            omega: omega(gamma, &m)?,
        });
    }

    Ok(records)
}

/// Compute omega values from `matrix_path` and write them as `(time, omega)` CSV rows.
pub fn write_omegas(
    matrix_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    gamma: &[f64],
) -> Result<(), OmegaError> {
    let records = compute_omegas(matrix_path, gamma)?;

    let mut csv = csv::WriterBuilder::new().has_headers(true).from_writer(
        fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(output_path.as_ref())?,
    );
    for record in records {
        csv.serialize(record)?;
    }
    csv.flush()?;

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn dot_product() {
        assert_eq!(omega(&[1.0, 0.5, 0.25], &[2.0, 4.0, 8.0]).unwrap(), 6.0);
        assert_eq!(omega(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn dimension_mismatch() {
        assert!(matches!(
            omega(&[1.0, 2.0], &[1.0]),
            Err(OmegaError::DimensionMismatch { gamma: 2, m: 1 })
        ));
    }

    #[test]
    fn compute_from_matrix_file() {
        let mut path = std::env::temp_dir();
        path.push(format!("onelog_omega_{}", std::process::id()));
        let mut f = fs::File::create(&path).unwrap();
        // time, node, event, m0, m1, m2
        f.write_all(b"100.5,r122,U,1,0,0\n200.0,r122,U,1,2,0\n").unwrap();

        let records = compute_omegas(&path, &[1.0, 0.5, 0.25]).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(
            records,
            vec![
                OmegaRecord { time: 100.5, omega: 1.0 },
                OmegaRecord { time: 200.0, omega: 2.0 },
            ]
        );
    }

    #[test]
    fn short_line_is_an_error() {
        let mut path = std::env::temp_dir();
        path.push(format!("onelog_omega_short_{}", std::process::id()));
        fs::write(&path, "100.5,r122\n").unwrap();

        let res = compute_omegas(&path, &[1.0]);
        fs::remove_file(&path).unwrap();
        assert!(matches!(res, Err(OmegaError::MissingHopVector(1))));
    }
}
