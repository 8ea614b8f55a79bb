//! # Orbit propagation engine
//!
//! [`Orbit`] classifies a body's orbit regime once at construction and
//! answers heliocentric position queries at arbitrary Julian Dates, either
//! analytically from a set of [`OrbitalElements`] or by interpolated lookup
//! in an [`EphemerisTable`]. It also produces and caches a sampled polyline
//! of the orbit for line-drawing consumers.
//!
//! The analytic regimes differ only in how the true anomaly and radius are
//! derived; all of them funnel through the same perifocal-to-heliocentric
//! rotation in [`Orbit::vector_to_heliocentric`].

use log::debug;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{JulianDate, DAYS_PER_YEAR, DPI};
use crate::elements::{AngleUnit, Element, OrbitalElements};
use crate::ephemeris_table::EphemerisTable;
use crate::helion_errors::HelionError;
use crate::kepler::{near_parabolic_anomaly, solve_eccentric_anomaly, solve_hyperbolic_anomaly};

const DEFAULT_LEAD_TRAIL_YEARS: f64 = 10.0;
const DEFAULT_SAMPLE_POINTS: usize = 360;

/// Regime of an orbit, fixed for the lifetime of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrbitType {
    Elliptical,
    Parabolic,
    Hyperbolic,
    Table,
}

/// The definition an orbit is propagated from: analytic elements or a
/// discrete ephemeris table, never both.
#[derive(Debug, Clone)]
pub enum OrbitSource {
    Elements(OrbitalElements),
    Table(EphemerisTable),
}

impl From<OrbitalElements> for OrbitSource {
    fn from(elements: OrbitalElements) -> Self {
        OrbitSource::Elements(elements)
    }
}

impl From<EphemerisTable> for OrbitSource {
    fn from(table: EphemerisTable) -> Self {
        OrbitSource::Table(table)
    }
}

/// Shape of the sampled orbit line handed to display consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbitPathSettings {
    /// How far past the center time the sampled path runs, in years.
    pub lead_duration_years: f64,
    /// How far before the center time the sampled path runs, in years.
    pub trail_duration_years: f64,
    /// Number of sample points along the path.
    pub number_sample_points: usize,
}

impl Default for OrbitPathSettings {
    fn default() -> Self {
        OrbitPathSettings {
            lead_duration_years: DEFAULT_LEAD_TRAIL_YEARS,
            trail_duration_years: DEFAULT_LEAD_TRAIL_YEARS,
            number_sample_points: DEFAULT_SAMPLE_POINTS,
        }
    }
}

/// Propagation engine for a single body.
#[derive(Debug, Clone)]
pub struct Orbit {
    source: OrbitSource,
    orbit_type: OrbitType,
    path_settings: OrbitPathSettings,
    orbit_points: Option<Vec<Vector3<f64>>>,
    orbit_start: JulianDate,
    orbit_stop: JulianDate,
}

impl Orbit {
    /// Build an engine over the given source with default path settings.
    pub fn new(source: impl Into<OrbitSource>) -> Result<Self, HelionError> {
        Orbit::with_path_settings(source, OrbitPathSettings::default())
    }

    /// Build an engine over the given source with explicit path settings.
    pub fn with_path_settings(
        source: impl Into<OrbitSource>,
        path_settings: OrbitPathSettings,
    ) -> Result<Self, HelionError> {
        let source = source.into();
        let orbit_type = Orbit::classify(&source)?;
        Ok(Orbit {
            source,
            orbit_type,
            path_settings,
            orbit_points: None,
            orbit_start: 0.0,
            orbit_stop: 0.0,
        })
    }

    /// Classify the regime of an orbit definition.
    ///
    /// Table sources are [`OrbitType::Table`]; analytic elements are split
    /// on eccentricity: the near-parabolic band `0.9 < e < 1.2`, hyperbolic
    /// from `e = 1.2` up, elliptical below.
    pub fn classify(source: &OrbitSource) -> Result<OrbitType, HelionError> {
        let elements = match source {
            OrbitSource::Table(_) => return Ok(OrbitType::Table),
            OrbitSource::Elements(elements) => elements,
        };

        let e = elements.get(Element::Eccentricity, AngleUnit::Rad)?;
        if e > 0.9 && e < 1.2 {
            Ok(OrbitType::Parabolic)
        } else if e >= 1.2 {
            Ok(OrbitType::Hyperbolic)
        } else {
            Ok(OrbitType::Elliptical)
        }
    }

    pub fn orbit_type(&self) -> OrbitType {
        self.orbit_type
    }

    pub fn source(&self) -> &OrbitSource {
        &self.source
    }

    /// Heliocentric position of the body at a given Julian Date, in AU.
    pub fn get_position_at_time(&self, jd: JulianDate) -> Result<Vector3<f64>, HelionError> {
        match self.orbit_type {
            OrbitType::Parabolic => self.position_near_parabolic(jd),
            OrbitType::Hyperbolic => self.position_hyperbolic(jd),
            OrbitType::Elliptical => self.position_elliptical(jd),
            OrbitType::Table => Ok(self.table().get_position_at_time(jd)),
        }
    }

    /// Whether the cached sampled path no longer covers `jd`.
    ///
    /// Only table orbits ever need recomputation; analytic shapes are
    /// time-invariant once the elements are fixed.
    pub fn needs_update_for_time(&self, jd: JulianDate) -> bool {
        match self.orbit_type {
            OrbitType::Table => jd < self.orbit_start || jd > self.orbit_stop,
            _ => false,
        }
    }

    /// Sampled polyline of the orbit, computed on first call and cached.
    ///
    /// Elliptical orbits sample one full revolution in evenly spaced
    /// eccentric-anomaly steps, closed by repeating the first point. Open
    /// orbits sample a lead/trail time window around the perihelion passage
    /// (falling back to `jd` when `tp` is unavailable); table orbits sample
    /// the window around `jd` itself.
    ///
    /// `force_compute` discards the previous sample entirely; the cache is
    /// never updated incrementally.
    pub fn get_orbit_shape(
        &mut self,
        jd: JulianDate,
        force_compute: bool,
    ) -> Result<&[Vector3<f64>], HelionError> {
        let points = match self.orbit_points.take() {
            Some(points) if !force_compute => points,
            _ => self.compute_orbit_shape(jd)?,
        };
        Ok(self.orbit_points.insert(points))
    }

    fn compute_orbit_shape(&mut self, jd: JulianDate) -> Result<Vec<Vector3<f64>>, HelionError> {
        if self.orbit_type == OrbitType::Elliptical {
            return self.ellipse_points();
        }

        let center = match &self.source {
            OrbitSource::Table(_) => jd,
            OrbitSource::Elements(elements) => {
                elements.try_get(Element::PerihelionTime).unwrap_or(jd)
            }
        };
        let start_jd = center - self.path_settings.trail_duration_years * DAYS_PER_YEAR;
        let stop_jd = center + self.path_settings.lead_duration_years * DAYS_PER_YEAR;
        let step = (stop_jd - start_jd) / self.path_settings.number_sample_points as f64;

        self.orbit_start = start_jd;
        self.orbit_stop = stop_jd;

        match self.orbit_type {
            OrbitType::Hyperbolic => {
                self.sample_line(Orbit::position_hyperbolic, start_jd, stop_jd, step)
            }
            OrbitType::Parabolic => {
                self.sample_line(Orbit::position_near_parabolic, start_jd, stop_jd, step)
            }
            OrbitType::Table => self.table().get_positions(start_jd, stop_jd, step),
            OrbitType::Elliptical => unreachable!("handled above"),
        }
    }

    /// One full revolution of an elliptical orbit, sampled in eccentric
    /// anomaly rather than time so the sampling density is uniform along
    /// the auxiliary circle.
    fn ellipse_points(&self) -> Result<Vec<Vector3<f64>>, HelionError> {
        let eph = self.elements();
        let a = eph.get(Element::SemiMajorAxis, AngleUnit::Rad)?;
        let ecc = eph.get(Element::Eccentricity, AngleUnit::Rad)?;

        let sample_points = self.path_settings.number_sample_points;
        let step = DPI / sample_points as f64;

        let mut points = Vec::with_capacity(sample_points + 1);
        for k in 0..sample_points {
            let big_e = k as f64 * step;
            let v = 2.0 * (((1.0 + ecc) / (1.0 - ecc)).sqrt() * (big_e / 2.0).tan()).atan();
            let r = a * (1.0 - ecc * ecc) / (1.0 + ecc * v.cos());
            points.push(self.vector_to_heliocentric(v, r)?);
        }
        // Close the loop.
        points.push(points[0]);
        Ok(points)
    }

    fn sample_line(
        &self,
        position_fn: fn(&Orbit, JulianDate) -> Result<Vector3<f64>, HelionError>,
        start_jd: JulianDate,
        stop_jd: JulianDate,
        step: f64,
    ) -> Result<Vec<Vector3<f64>>, HelionError> {
        let mut points = Vec::new();
        let mut jd = start_jd;
        while jd <= stop_jd {
            points.push(position_fn(self, jd)?);
            jd += step;
        }
        Ok(points)
    }

    fn position_elliptical(&self, jd: JulianDate) -> Result<Vector3<f64>, HelionError> {
        let eph = self.elements();

        let e = eph.get(Element::Eccentricity, AngleUnit::Rad)?;
        let ma = eph.get(Element::MeanAnomaly, AngleUnit::Rad)?;
        let n = eph.get(Element::MeanMotion, AngleUnit::Rad)?;
        let epoch = eph.get(Element::Epoch, AngleUnit::Rad)?;
        let d = jd - epoch;

        let m = ma + n * d;
        debug!("elliptical propagation: ma={ma} n={n} d={d} M={m}");

        let big_e = solve_eccentric_anomaly(m, e);
        let v = 2.0 * (((1.0 + e) / (1.0 - e)).sqrt() * (big_e / 2.0).tan()).atan();

        let a = eph.get(Element::SemiMajorAxis, AngleUnit::Rad)?;
        let r = a * (1.0 - e * e) / (1.0 + e * v.cos());

        self.vector_to_heliocentric(v, r)
    }

    fn position_hyperbolic(&self, jd: JulianDate) -> Result<Vector3<f64>, HelionError> {
        let eph = self.elements();

        let e = eph.get(Element::Eccentricity, AngleUnit::Rad)?;
        let a = eph.get(Element::SemiMajorAxis, AngleUnit::Rad)?;
        let ma = eph.get(Element::MeanAnomaly, AngleUnit::Rad)?;
        let n = eph.get(Element::MeanMotion, AngleUnit::Rad)?;
        let epoch = eph.get(Element::Epoch, AngleUnit::Rad)?;

        let m = ma + n * (jd - epoch);

        let f = solve_hyperbolic_anomaly(m, e);
        // The asymptote true anomaly 2·atan √((e+1)/(e−1)) scaled by
        // tanh(F/2), so v stays strictly inside the asymptotes and the
        // conic denominator below stays positive.
        let v = 2.0 * ((e + 1.0) / (e - 1.0)).sqrt().atan() * (f / 2.0).tanh();
        let r = a * (1.0 - e * e) / (1.0 + e * v.cos());

        self.vector_to_heliocentric(v, r)
    }

    fn position_near_parabolic(&self, jd: JulianDate) -> Result<Vector3<f64>, HelionError> {
        let eph = self.elements();

        let e = eph.get(Element::Eccentricity, AngleUnit::Rad)?;
        let q = eph.get(Element::PerihelionDistance, AngleUnit::Rad)?;
        let tp = eph.get(Element::PerihelionTime, AngleUnit::Rad)?;

        let (v, r) = near_parabolic_anomaly(q, e, jd - tp);
        self.vector_to_heliocentric(v, r)
    }

    /// Rotate a position given in the orbital plane — true anomaly `v` and
    /// heliocentric distance `r` — into heliocentric ecliptic coordinates,
    /// using the Euler rotation by the ascending-node longitude, the
    /// inclination and the perihelion longitude.
    fn vector_to_heliocentric(&self, v: f64, r: f64) -> Result<Vector3<f64>, HelionError> {
        let eph = self.elements();

        let i = eph.get(Element::Inclination, AngleUnit::Rad)?;
        let o = eph.get(Element::AscendingNodeLongitude, AngleUnit::Rad)?;
        let p = eph.get(Element::PerihelionLongitude, AngleUnit::Rad)?;

        let u = v + p - o;
        let x = r * (o.cos() * u.cos() - o.sin() * u.sin() * i.cos());
        let y = r * (o.sin() * u.cos() + o.cos() * u.sin() * i.cos());
        let z = r * (u.sin() * i.sin());

        Ok(Vector3::new(x, y, z))
    }

    /// Analytic elements of this orbit.
    ///
    /// Panics when the source is an ephemeris table: reaching an analytic
    /// propagation path with a table source is an internal wiring bug, not
    /// bad input data.
    fn elements(&self) -> &OrbitalElements {
        match &self.source {
            OrbitSource::Elements(elements) => elements,
            OrbitSource::Table(_) => {
                panic!("attempted to compute analytic coordinates from an ephemeris table")
            }
        }
    }

    /// Ephemeris table of this orbit. Panics on an analytic source.
    fn table(&self) -> &EphemerisTable {
        match &self.source {
            OrbitSource::Table(table) => table,
            OrbitSource::Elements(_) => {
                panic!("attempted to read the ephemeris table of an analytic orbit")
            }
        }
    }
}
