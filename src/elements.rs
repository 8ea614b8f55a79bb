//! # Keplerian orbital element container
//!
//! [`OrbitalElements`] holds a partially specified set of classical orbital
//! elements and completes it with an explicit, ordered inference chain at
//! construction time. Angular quantities are stored **in radians**
//! regardless of the unit the caller supplied; conversion happens at the
//! get/set boundary only.
//!
//! ## Units
//!
//! - Lengths: **AU**
//! - Angles: **radians** internally, degrees accepted/returned on request
//! - Time: **days**, epochs as Julian Dates
//! - GM: **m³/s²** (defaults to the Sun)
//!
//! ## Inference chain
//!
//! Each rule fires only when its inputs are present and its output absent,
//! and every derived value is stored on the instance so later reads are
//! plain lookups:
//!
//! 1. `q = a(1−e)`, or `a = q/(1−e)`
//! 2. `ϖ = ω + Ω` (and the other two orientations of that triangle)
//! 3. `period` from `a` and `GM` (Kepler's third law); hyperbolic orbits
//!    (`a < 0`) get a mean motion instead, a hyperbolic orbit has no period
//! 4. `n = 2π/period` ⇄ `period = 2π/n`
//! 5. `L = Ω + ω + M`
//! 6. `M = L − ϖ`
//!
//! Once [`lock`](OrbitalElements::lock)ed, the container is permanently
//! immutable; a locked set is plain data and can be `clone`d freely to
//! share one preset across several consumers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{gm, DPI, METERS_IN_AU, SECONDS_PER_DAY};
use crate::helion_errors::HelionError;

/// Names of the supported Keplerian orbital elements.
///
/// `Display` yields the conventional short tag (`a`, `e`, `wBar`, ...), which
/// is also the serde representation, so JPL-style JSON element maps map onto
/// this enum directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    /// Semimajor axis `a` (AU)
    #[serde(rename = "a")]
    SemiMajorAxis,
    /// Eccentricity `e`
    #[serde(rename = "e")]
    Eccentricity,
    /// Inclination `i`
    #[serde(rename = "i")]
    Inclination,
    /// Perihelion distance `q` (AU)
    #[serde(rename = "q")]
    PerihelionDistance,
    /// Epoch of the elements (JD)
    #[serde(rename = "epoch")]
    Epoch,
    /// Orbital period (days)
    #[serde(rename = "period")]
    Period,
    /// Time of perihelion passage `tp` (JD)
    #[serde(rename = "tp")]
    PerihelionTime,
    /// Mean anomaly `M`
    #[serde(rename = "ma")]
    MeanAnomaly,
    /// Mean motion `n` (radians/day)
    #[serde(rename = "n")]
    MeanMotion,
    /// Mean longitude `L`
    #[serde(rename = "L")]
    MeanLongitude,
    /// Longitude of the ascending node `Ω`
    #[serde(rename = "om")]
    AscendingNodeLongitude,
    /// Argument of perihelion `ω`
    #[serde(rename = "w")]
    PerihelionArgument,
    /// Longitude of perihelion `ϖ = Ω + ω`
    #[serde(rename = "wBar")]
    PerihelionLongitude,
    /// Standard gravitational parameter of the central body (m³/s²)
    #[serde(rename = "GM")]
    Gm,
}

impl Element {
    pub(crate) const COUNT: usize = 14;

    /// All element names, in storage order.
    pub const ALL: [Element; Element::COUNT] = [
        Element::SemiMajorAxis,
        Element::Eccentricity,
        Element::Inclination,
        Element::PerihelionDistance,
        Element::Epoch,
        Element::Period,
        Element::PerihelionTime,
        Element::MeanAnomaly,
        Element::MeanMotion,
        Element::MeanLongitude,
        Element::AscendingNodeLongitude,
        Element::PerihelionArgument,
        Element::PerihelionLongitude,
        Element::Gm,
    ];

    /// Whether this element is an angular measurement, stored in radians.
    pub fn is_angle(self) -> bool {
        matches!(
            self,
            Element::Inclination
                | Element::MeanAnomaly
                | Element::MeanMotion
                | Element::MeanLongitude
                | Element::AscendingNodeLongitude
                | Element::PerihelionArgument
                | Element::PerihelionLongitude
        )
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Element::SemiMajorAxis => "a",
            Element::Eccentricity => "e",
            Element::Inclination => "i",
            Element::PerihelionDistance => "q",
            Element::Epoch => "epoch",
            Element::Period => "period",
            Element::PerihelionTime => "tp",
            Element::MeanAnomaly => "ma",
            Element::MeanMotion => "n",
            Element::MeanLongitude => "L",
            Element::AscendingNodeLongitude => "om",
            Element::PerihelionArgument => "w",
            Element::PerihelionLongitude => "wBar",
            Element::Gm => "GM",
        };
        write!(f, "{tag}")
    }
}

/// Unit of angular values crossing the [`OrbitalElements`] boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AngleUnit {
    #[serde(rename = "deg")]
    Deg,
    #[default]
    #[serde(rename = "rad")]
    Rad,
}

/// A set of Keplerian orbital elements, mutable until locked.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalElements {
    values: [Option<f64>; Element::COUNT],
    locked: bool,
}

impl OrbitalElements {
    /// Build an element set from a partial list of named values and complete
    /// it through the inference chain.
    ///
    /// Arguments
    /// ---------
    /// * `initial`: the supplied elements; not all are required, missing
    ///   derivable ones are inferred
    /// * `units`: unit of the angular values in `initial` (non-angular
    ///   values are unaffected)
    /// * `locked`: whether the resulting set is immediately immutable
    ///
    /// Return
    /// ------
    /// * The completed element set, or a construction error when the inputs
    ///   underdetermine the orbit (`e` missing, neither `a` nor `q`, or a
    ///   missing `q` on an open orbit).
    pub fn new(
        initial: &[(Element, f64)],
        units: AngleUnit,
        locked: bool,
    ) -> Result<Self, HelionError> {
        let mut elements = OrbitalElements {
            values: [None; Element::COUNT],
            locked: false,
        };

        for &(attr, value) in initial {
            elements.set(attr, value, units)?;
        }

        if elements.raw(Element::Gm).is_none() {
            elements.store(Element::Gm, gm::SUN);
        }
        elements.fill()?;

        elements.locked = locked;
        Ok(elements)
    }

    /// Set one element.
    ///
    /// Fails with [`HelionError::LockedElements`] on a locked set, leaving
    /// the stored values untouched. Angular values are converted to radians
    /// before storage.
    pub fn set(&mut self, attr: Element, value: f64, units: AngleUnit) -> Result<(), HelionError> {
        if self.locked {
            return Err(HelionError::LockedElements);
        }
        let stored = if attr.is_angle() && units == AngleUnit::Deg {
            value.to_radians()
        } else {
            value
        };
        self.store(attr, stored);
        Ok(())
    }

    /// Read one element.
    ///
    /// Fails with [`HelionError::MissingElement`] when the element was
    /// neither supplied nor inferable. The unit request only affects angular
    /// elements.
    pub fn get(&self, attr: Element, units: AngleUnit) -> Result<f64, HelionError> {
        let value = self
            .raw(attr)
            .ok_or(HelionError::MissingElement(attr))?;
        if attr.is_angle() && units == AngleUnit::Deg {
            Ok(value.to_degrees())
        } else {
            Ok(value)
        }
    }

    /// Non-failing probe for an optional element, in internal units
    /// (radians for angles).
    pub fn try_get(&self, attr: Element) -> Option<f64> {
        self.raw(attr)
    }

    /// Make this element set permanently immutable. Idempotent; there is no
    /// unlock operation.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    fn raw(&self, attr: Element) -> Option<f64> {
        self.values[attr.index()]
    }

    // Direct slot write, used by the inference chain before the lock flag
    // is honored.
    fn store(&mut self, attr: Element, value: f64) {
        self.values[attr.index()] = Some(value);
    }

    /// The ordered inference chain. Each rule fires only when its inputs
    /// are present and its output absent; derived values are stored so
    /// every later read is a plain lookup.
    fn fill(&mut self) -> Result<(), HelionError> {
        use Element::*;

        let e = self.raw(Eccentricity).ok_or(HelionError::MissingEccentricity)?;

        // Semimajor axis and perihelion distance
        let a = match (self.raw(SemiMajorAxis), self.raw(PerihelionDistance)) {
            (Some(a), None) => {
                if e >= 1.0 {
                    return Err(HelionError::PerihelionDistanceRequired);
                }
                self.store(PerihelionDistance, a * (1.0 - e));
                a
            }
            (None, Some(q)) => {
                let a = q / (1.0 - e);
                self.store(SemiMajorAxis, a);
                a
            }
            (None, None) => return Err(HelionError::MissingShapeElement),
            (Some(a), Some(_)) => a,
        };

        // Longitude/argument of perihelion and longitude of ascending node
        let w = self.raw(PerihelionArgument);
        let w_bar = self.raw(PerihelionLongitude);
        let om = self.raw(AscendingNodeLongitude);
        match (w, w_bar, om) {
            (Some(w), None, Some(om)) => self.store(PerihelionLongitude, w + om),
            (None, Some(w_bar), Some(om)) => self.store(PerihelionArgument, w_bar - om),
            (Some(w), Some(w_bar), None) => self.store(AscendingNodeLongitude, w_bar - w),
            _ => {}
        }

        // Mean motion and period via Kepler's third law
        let gm = self.raw(Gm).unwrap_or(gm::SUN);
        if self.raw(Period).is_none() && a != 0.0 {
            let a_meters = a.abs() * METERS_IN_AU;
            let period_days =
                DPI * (a_meters * a_meters * a_meters / gm).sqrt() / SECONDS_PER_DAY;
            if a > 0.0 {
                self.store(Period, period_days);
            } else if self.raw(MeanMotion).is_none() {
                // Open orbit: no period, but the mean motion is well defined.
                self.store(MeanMotion, DPI / period_days);
            }
        }
        match (self.raw(Period), self.raw(MeanMotion)) {
            (Some(period), None) => self.store(MeanMotion, DPI / period),
            (None, Some(n)) => self.store(Period, DPI / n),
            _ => {}
        }

        // Mean longitude
        if self.raw(MeanLongitude).is_none() {
            if let (Some(om), Some(w), Some(ma)) = (
                self.raw(AscendingNodeLongitude),
                self.raw(PerihelionArgument),
                self.raw(MeanAnomaly),
            ) {
                self.store(MeanLongitude, om + w + ma);
            }
        }

        // Mean anomaly from the mean longitude
        if self.raw(MeanAnomaly).is_none() {
            if let (Some(l), Some(w_bar)) =
                (self.raw(MeanLongitude), self.raw(PerihelionLongitude))
            {
                self.store(MeanAnomaly, l - w_bar);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod elements_test {
    use super::*;
    use crate::constants::DAYS_PER_YEAR;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn dummy() -> OrbitalElements {
        OrbitalElements::new(
            &[
                (Element::SemiMajorAxis, 1.0),
                (Element::Eccentricity, 0.0),
                (Element::Inclination, 0.0),
            ],
            AngleUnit::Rad,
            false,
        )
        .unwrap()
    }

    #[test]
    fn test_set_and_get_units() {
        let mut eph = dummy();

        eph.set(Element::SemiMajorAxis, 1.2, AngleUnit::Rad).unwrap();
        assert_relative_eq!(
            eph.get(Element::SemiMajorAxis, AngleUnit::Rad).unwrap(),
            1.2
        );

        eph.set(Element::Inclination, 1.2, AngleUnit::Deg).unwrap();
        assert_relative_eq!(
            eph.get(Element::Inclination, AngleUnit::Deg).unwrap(),
            1.2,
            epsilon = 1e-10
        );
        assert_relative_eq!(
            eph.get(Element::Inclination, AngleUnit::Rad).unwrap(),
            1.2_f64.to_radians(),
            epsilon = 1e-10
        );

        eph.set(Element::AscendingNodeLongitude, DPI, AngleUnit::Rad)
            .unwrap();
        assert_relative_eq!(
            eph.get(Element::AscendingNodeLongitude, AngleUnit::Deg)
                .unwrap(),
            360.0,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_fill_q_and_w_bar() {
        let eph = OrbitalElements::new(
            &[
                (Element::SemiMajorAxis, 2.0),
                (Element::Eccentricity, 0.5),
                (Element::Inclination, 30.0),
                (Element::PerihelionArgument, 123.0),
                (Element::AscendingNodeLongitude, 0.456),
            ],
            AngleUnit::Deg,
            false,
        )
        .unwrap();

        // q = a(1 - e)
        assert_relative_eq!(
            eph.get(Element::PerihelionDistance, AngleUnit::Rad).unwrap(),
            1.0,
            epsilon = 1e-10
        );
        // wBar = w + om
        assert_relative_eq!(
            eph.get(Element::PerihelionLongitude, AngleUnit::Deg).unwrap(),
            123.456,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_semimajor_axis_from_perihelion_distance() {
        let eph = OrbitalElements::new(
            &[
                (Element::PerihelionDistance, 0.5),
                (Element::Eccentricity, 0.5),
            ],
            AngleUnit::Rad,
            false,
        )
        .unwrap();
        assert_relative_eq!(
            eph.get(Element::SemiMajorAxis, AngleUnit::Rad).unwrap(),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_earth_period_inference() {
        let eph = OrbitalElements::new(
            &[
                (Element::SemiMajorAxis, 1.0),
                (Element::Eccentricity, 0.0167),
            ],
            AngleUnit::Rad,
            false,
        )
        .unwrap();

        let period = eph.get(Element::Period, AngleUnit::Rad).unwrap();
        assert_relative_eq!(period, DAYS_PER_YEAR, epsilon = 0.05);

        let n = eph.get(Element::MeanMotion, AngleUnit::Rad).unwrap();
        assert_relative_eq!(n, DPI / period, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_anomaly_from_mean_longitude() {
        let eph = OrbitalElements::new(
            &[
                (Element::SemiMajorAxis, 1.00000011),
                (Element::Eccentricity, 0.01671022),
                (Element::Inclination, 0.00005),
                (Element::AscendingNodeLongitude, -11.26064),
                (Element::PerihelionLongitude, 102.94719),
                (Element::MeanLongitude, 100.46435),
            ],
            AngleUnit::Deg,
            false,
        )
        .unwrap();

        assert_relative_eq!(
            eph.get(Element::MeanAnomaly, AngleUnit::Deg).unwrap(),
            100.46435 - 102.94719,
            epsilon = 1e-9
        );
        // w = wBar - om
        assert_relative_eq!(
            eph.get(Element::PerihelionArgument, AngleUnit::Deg).unwrap(),
            102.94719 + 11.26064,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_hyperbolic_mean_motion() {
        let eph = OrbitalElements::new(
            &[
                (Element::PerihelionDistance, 1.07),
                (Element::Eccentricity, 2.3),
            ],
            AngleUnit::Rad,
            false,
        )
        .unwrap();

        let n = eph.get(Element::MeanMotion, AngleUnit::Rad).unwrap();
        assert!(n.is_finite() && n > 0.0);
        // Mean motion implies a period slot through the n ⇄ period rule,
        // but the semimajor axis itself is negative.
        assert!(eph.get(Element::SemiMajorAxis, AngleUnit::Rad).unwrap() < 0.0);
    }

    #[test]
    fn test_locked_elements_cannot_change() {
        let mut eph = dummy();
        eph.lock();
        eph.lock(); // idempotent

        let before = eph.get(Element::SemiMajorAxis, AngleUnit::Rad).unwrap();
        let err = eph.set(Element::SemiMajorAxis, 2.5, AngleUnit::Rad);
        assert_eq!(err, Err(HelionError::LockedElements));
        assert_eq!(
            eph.get(Element::SemiMajorAxis, AngleUnit::Rad).unwrap(),
            before
        );
    }

    #[test]
    fn test_new_locked() {
        let eph = OrbitalElements::new(
            &[(Element::SemiMajorAxis, 1.0), (Element::Eccentricity, 0.1)],
            AngleUnit::Rad,
            true,
        )
        .unwrap();
        assert!(eph.is_locked());
    }

    #[test]
    fn test_cloned_elements_are_independent() {
        let eph1 = OrbitalElements::new(
            &[
                (Element::SemiMajorAxis, 2.0),
                (Element::Eccentricity, 0.5),
                (Element::Inclination, 30.0),
                (Element::PerihelionArgument, 123.0),
                (Element::AscendingNodeLongitude, 0.456),
            ],
            AngleUnit::Deg,
            false,
        )
        .unwrap();

        let mut eph2 = eph1.clone();
        eph2.set(Element::SemiMajorAxis, 10.0, AngleUnit::Rad).unwrap();

        assert_relative_eq!(
            eph2.get(Element::SemiMajorAxis, AngleUnit::Rad).unwrap(),
            10.0
        );
        assert_relative_eq!(
            eph1.get(Element::SemiMajorAxis, AngleUnit::Rad).unwrap(),
            2.0
        );
        assert_relative_eq!(
            eph1.get(Element::Inclination, AngleUnit::Deg).unwrap(),
            30.0,
            epsilon = 1e-10
        );
        assert_relative_eq!(
            eph2.get(Element::Inclination, AngleUnit::Deg).unwrap(),
            30.0,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_clone_preserves_lock_state() {
        let locked = OrbitalElements::new(
            &[(Element::SemiMajorAxis, 1.0), (Element::Eccentricity, 0.1)],
            AngleUnit::Rad,
            true,
        )
        .unwrap();
        let mut copy = locked.clone();
        assert!(copy.is_locked());
        assert_eq!(
            copy.set(Element::SemiMajorAxis, 3.0, AngleUnit::Rad),
            Err(HelionError::LockedElements)
        );
    }

    #[rstest]
    #[case(&[(Element::SemiMajorAxis, 1.0)], HelionError::MissingEccentricity)]
    #[case(&[(Element::Eccentricity, 0.5)], HelionError::MissingShapeElement)]
    #[case(
        &[(Element::SemiMajorAxis, -1.5), (Element::Eccentricity, 1.5)],
        HelionError::PerihelionDistanceRequired
    )]
    fn test_underdetermined_orbits(
        #[case] initial: &[(Element, f64)],
        #[case] expected: HelionError,
    ) {
        let err = OrbitalElements::new(initial, AngleUnit::Rad, false).unwrap_err();
        assert_eq!(err, expected);
    }

    #[test]
    fn test_missing_element_is_a_typed_failure() {
        let eph = dummy();
        assert_eq!(
            eph.get(Element::PerihelionTime, AngleUnit::Rad),
            Err(HelionError::MissingElement(Element::PerihelionTime))
        );
        assert_eq!(eph.try_get(Element::PerihelionTime), None);
    }

    #[test]
    fn test_element_tags() {
        assert_eq!(Element::PerihelionLongitude.to_string(), "wBar");
        assert_eq!(Element::Gm.to_string(), "GM");
        assert_eq!(Element::MeanLongitude.to_string(), "L");
        assert!(Element::MeanMotion.is_angle());
        assert!(!Element::PerihelionDistance.is_angle());
    }
}
