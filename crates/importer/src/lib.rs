//! CSV ingestion for STK-style attitude, state-vector, and reference series.
//!
//! Timestamps follow the STK export convention (`01 Jul 2024 00:00:00.000`,
//! UTC) and are converted to Julian dates on the way in. Quaternions are
//! scalar-last on disk (`q1..q4`) and scalar-first in memory.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use csv::StringRecord;
use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use thiserror::Error;

use power_core::time::datetime_to_julian_date;

/// Timestamp format used by STK CSV exports.
pub const STK_TIME_FORMAT: &str = "%d %b %Y %H:%M:%S%.f";

/// Column carrying timestamps in STK exports.
pub const TIME_COLUMN: &str = "Time (UTCG)";

/// Errors surfaced while ingesting CSV data.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("csv parse error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing column `{0}`")]
    MissingColumn(String),
    #[error("invalid number `{value}` in column `{column}`")]
    InvalidNumber { column: String, value: String },
    #[error("invalid timestamp `{value}`")]
    InvalidTimestamp { value: String },
}

/// One known spacecraft orientation at an epoch.
#[derive(Debug, Clone, Copy)]
pub struct AttitudeRecord {
    pub epoch_jd: f64,
    /// Inertial-to-body quaternion.
    pub q_eci2body: UnitQuaternion<f64>,
}

/// One propagated state plus the Sun position at the same epoch.
#[derive(Debug, Clone, Copy)]
pub struct StateRecord {
    pub epoch_jd: f64,
    pub position_km: Vector3<f64>,
    pub velocity_km_s: Vector3<f64>,
    pub sun_position_km: Vector3<f64>,
}

/// Read a quaternion series (`Time (UTCG)`, `q1`..`q4`, scalar last).
pub fn read_attitude_series<P: AsRef<Path>>(path: P) -> Result<Vec<AttitudeRecord>, ImportError> {
    let mut reader = open(path.as_ref())?;
    let headers = reader.headers()?.clone();
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let epoch_jd = parse_epoch(&headers, &row)?;
        let q1 = parse_number(&headers, &row, "q1")?;
        let q2 = parse_number(&headers, &row, "q2")?;
        let q3 = parse_number(&headers, &row, "q3")?;
        let q4 = parse_number(&headers, &row, "q4")?;
        let q = UnitQuaternion::from_quaternion(Quaternion::new(q4, q1, q2, q3));
        records.push(AttitudeRecord {
            epoch_jd,
            q_eci2body: q,
        });
    }
    Ok(records)
}

/// Read a single numeric column (e.g. `Effective Area (m^2)` or `Power (W)`).
pub fn read_scalar_series<P: AsRef<Path>>(
    path: P,
    column: &str,
) -> Result<Vec<f64>, ImportError> {
    let mut reader = open(path.as_ref())?;
    let headers = reader.headers()?.clone();
    let mut values = Vec::new();
    for row in reader.records() {
        let row = row?;
        values.push(parse_number(&headers, &row, column)?);
    }
    Ok(values)
}

/// Read satellite states with co-tabulated Sun positions.
///
/// Expected columns: `Time (UTCG)`, `rx_km`..`rz_km`, `vx_km_s`..`vz_km_s`,
/// `sun_x_km`..`sun_z_km`.
pub fn read_state_series<P: AsRef<Path>>(path: P) -> Result<Vec<StateRecord>, ImportError> {
    let mut reader = open(path.as_ref())?;
    let headers = reader.headers()?.clone();
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let epoch_jd = parse_epoch(&headers, &row)?;
        let position_km = parse_vector(&headers, &row, ["rx_km", "ry_km", "rz_km"])?;
        let velocity_km_s = parse_vector(&headers, &row, ["vx_km_s", "vy_km_s", "vz_km_s"])?;
        let sun_position_km = parse_vector(&headers, &row, ["sun_x_km", "sun_y_km", "sun_z_km"])?;
        records.push(StateRecord {
            epoch_jd,
            position_km,
            velocity_km_s,
            sun_position_km,
        });
    }
    Ok(records)
}

fn open(path: &Path) -> Result<csv::Reader<std::fs::File>, ImportError> {
    let file = std::fs::File::open(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file))
}

fn column_index(headers: &StringRecord, column: &str) -> Result<usize, ImportError> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| ImportError::MissingColumn(column.to_string()))
}

fn field<'a>(
    headers: &StringRecord,
    row: &'a StringRecord,
    column: &str,
) -> Result<&'a str, ImportError> {
    let index = column_index(headers, column)?;
    row.get(index)
        .ok_or_else(|| ImportError::MissingColumn(column.to_string()))
}

fn parse_number(
    headers: &StringRecord,
    row: &StringRecord,
    column: &str,
) -> Result<f64, ImportError> {
    let raw = field(headers, row, column)?;
    raw.parse().map_err(|_| ImportError::InvalidNumber {
        column: column.to_string(),
        value: raw.to_string(),
    })
}

fn parse_vector(
    headers: &StringRecord,
    row: &StringRecord,
    columns: [&str; 3],
) -> Result<Vector3<f64>, ImportError> {
    Ok(Vector3::new(
        parse_number(headers, row, columns[0])?,
        parse_number(headers, row, columns[1])?,
        parse_number(headers, row, columns[2])?,
    ))
}

fn parse_epoch(headers: &StringRecord, row: &StringRecord) -> Result<f64, ImportError> {
    let raw = field(headers, row, TIME_COLUMN)?;
    let naive = NaiveDateTime::parse_from_str(raw, STK_TIME_FORMAT).map_err(|_| {
        ImportError::InvalidTimestamp {
            value: raw.to_string(),
        }
    })?;
    Ok(datetime_to_julian_date(&naive.and_utc()))
}
