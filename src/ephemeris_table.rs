//! # Ephemeris lookup table
//!
//! [`EphemerisTable`] wraps discrete Cartesian state vectors
//! (`[jd, x, y, z, vx, vy, vz]` rows) for bodies without analytic orbital
//! elements, and answers position queries by bounded-order Lagrange
//! interpolation over a window of rows bracketing the requested date.
//!
//! Rows must be sorted ascending by date (caller's contract; no sort is
//! performed) and are normalized to AU and days at construction, whatever
//! units the input came in.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{JulianDate, AU, SECONDS_PER_DAY};
use crate::helion_errors::HelionError;
use crate::interpolation::{binary_search, interpolate};

/// Widest allowed Lagrange interpolation window.
pub const MAX_INTERPOLATION_ORDER: usize = 20;

/// Default Lagrange interpolation window width.
pub const DEFAULT_INTERPOLATION_ORDER: usize = 5;

/// Columns per `cartesianposvel` row.
const ROW_WIDTH: usize = 7;

/// Representation of the tabulated state vectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EphemerisType {
    #[default]
    #[serde(rename = "cartesianposvel")]
    CartesianPosVel,
}

/// Distance unit of the input rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceUnit {
    #[default]
    #[serde(rename = "au")]
    Au,
    #[serde(rename = "km")]
    Km,
}

impl DistanceUnit {
    fn multiplier(self) -> f64 {
        match self {
            DistanceUnit::Au => 1.0,
            DistanceUnit::Km => 1.0 / AU,
        }
    }
}

/// Time unit of the input velocities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeUnit {
    #[default]
    #[serde(rename = "day")]
    Day,
    #[serde(rename = "sec")]
    Sec,
}

impl TimeUnit {
    fn multiplier(self) -> f64 {
        match self {
            TimeUnit::Day => 1.0,
            TimeUnit::Sec => 1.0 / SECONDS_PER_DAY,
        }
    }
}

/// Interpolation scheme applied between table rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterpolationMethod {
    #[default]
    #[serde(rename = "lagrange")]
    Lagrange,
}

/// Construction-time description of an ephemeris table.
///
/// Mirrors the JSON layout produced by JPL Horizons-style exports, so it can
/// be deserialized straight from caller-supplied configuration; unknown
/// unit or type strings are rejected by the closed enums at that stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EphemerisTableConfig {
    /// One `[jd, x, y, z, vx, vy, vz]` row per epoch, ascending by date.
    pub data: Vec<Vec<f64>>,
    #[serde(default)]
    pub ephemeris_type: EphemerisType,
    #[serde(default)]
    pub distance_units: DistanceUnit,
    #[serde(default)]
    pub time_units: TimeUnit,
    #[serde(default)]
    pub interpolation_type: InterpolationMethod,
    #[serde(default = "default_interpolation_order")]
    pub interpolation_order: usize,
}

fn default_interpolation_order() -> usize {
    DEFAULT_INTERPOLATION_ORDER
}

impl EphemerisTableConfig {
    /// Config with the given rows and all other settings at their defaults
    /// (AU, days, Lagrange order 5).
    pub fn from_rows(data: Vec<Vec<f64>>) -> Self {
        EphemerisTableConfig {
            data,
            ephemeris_type: EphemerisType::default(),
            distance_units: DistanceUnit::default(),
            time_units: TimeUnit::default(),
            interpolation_type: InterpolationMethod::default(),
            interpolation_order: DEFAULT_INTERPOLATION_ORDER,
        }
    }
}

/// An immutable, unit-normalized table of Cartesian state vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisTable {
    data: Vec<[f64; ROW_WIDTH]>,
    interpolation_order: usize,
}

impl EphemerisTable {
    /// Validate a configuration and build the normalized table.
    ///
    /// Fails when the data is empty, a row is not exactly 7 columns wide,
    /// or the interpolation order falls outside `1..=20`.
    pub fn new(config: EphemerisTableConfig) -> Result<Self, HelionError> {
        if config.data.is_empty() {
            return Err(HelionError::EmptyEphemerisData);
        }
        if config.interpolation_order < 1 || config.interpolation_order > MAX_INTERPOLATION_ORDER {
            return Err(HelionError::InterpolationOrderOutOfRange {
                order: config.interpolation_order,
                max: MAX_INTERPOLATION_ORDER,
            });
        }

        let distance_multiplier = config.distance_units.multiplier();
        let velocity_multiplier = distance_multiplier * config.time_units.multiplier();

        let mut data = Vec::with_capacity(config.data.len());
        for (row_index, row) in config.data.iter().enumerate() {
            if row.len() != ROW_WIDTH {
                return Err(HelionError::MalformedEphemerisRow {
                    row: row_index,
                    found: row.len(),
                    expected: ROW_WIDTH,
                });
            }
            data.push([
                row[0],
                row[1] * distance_multiplier,
                row[2] * distance_multiplier,
                row[3] * distance_multiplier,
                row[4] * velocity_multiplier,
                row[5] * velocity_multiplier,
                row[6] * velocity_multiplier,
            ]);
        }

        Ok(EphemerisTable {
            data,
            interpolation_order: config.interpolation_order,
        })
    }

    /// Interpolated position for the requested date, in AU.
    ///
    /// Dates at or before the first row clamp to the first row's position;
    /// dates at or after the last row clamp to the last row's. No
    /// extrapolation is ever performed.
    pub fn get_position_at_time(&self, jd: JulianDate) -> Vector3<f64> {
        let first = &self.data[0];
        if jd <= first[0] {
            return Vector3::new(first[1], first[2], first[3]);
        }

        let last = &self.data[self.data.len() - 1];
        if jd >= last[0] {
            return Vector3::new(last[1], last[2], last[3]);
        }

        let (start, stop) = self.bounding_indices(jd);
        let x = interpolate(&self.data, jd, start, stop, 0, 1);
        let y = interpolate(&self.data, jd, start, stop, 0, 2);
        let z = interpolate(&self.data, jd, start, stop, 0, 3);

        Vector3::new(x, y, z)
    }

    /// Uniformly sampled positions over `[start_jd, stop_jd]`, inclusive on
    /// both ends, at `step_days` spacing.
    ///
    /// Yields exactly `floor((stop − start)/step) + 1` points. Every call
    /// recomputes from scratch; there is no shared iterator state.
    pub fn get_positions(
        &self,
        start_jd: JulianDate,
        stop_jd: JulianDate,
        step_days: f64,
    ) -> Result<Vec<Vector3<f64>>, HelionError> {
        if start_jd > stop_jd {
            return Err(HelionError::InvertedTimeRange {
                start: start_jd,
                stop: stop_jd,
            });
        }
        if step_days <= 0.0 {
            return Err(HelionError::NonPositiveStep(step_days));
        }

        let count = ((stop_jd - start_jd) / step_days).floor() as usize + 1;
        let positions = (0..count)
            .map(|i| self.get_position_at_time(start_jd + i as f64 * step_days))
            .collect();

        Ok(positions)
    }

    /// Date range covered by the table.
    pub fn date_span(&self) -> (JulianDate, JulianDate) {
        (self.data[0][0], self.data[self.data.len() - 1][0])
    }

    /// Interpolation window of width `interpolation_order` centered on the
    /// row just below `jd`, clamped to the table bounds. `jd` is strictly
    /// inside the table's date span here.
    fn bounding_indices(&self, jd: JulianDate) -> (usize, usize) {
        let half_sample_size = (self.interpolation_order / 2) as isize;
        let mut closest = binary_search(&self.data, jd, |row, date| row[0] - date);
        if closest < 0 {
            closest = !closest - 1;
        }

        let mut start = (closest - half_sample_size).max(0);
        let mut stop = start + self.interpolation_order as isize;
        let len = self.data.len() as isize;
        if stop >= len {
            stop = len - 1;
            if len > half_sample_size {
                start = stop - half_sample_size;
            }
        }

        (start as usize, stop as usize)
    }
}
