//! # Helion
//!
//! **Helion** is a Keplerian orbital position engine: it turns a set of
//! classical orbital elements, or a tabulated ephemeris, into heliocentric
//! ecliptic positions at arbitrary Julian Dates, plus sampled orbit lines
//! ready for display.
//!
//! ## Main components
//!
//! - [`elements::OrbitalElements`] — a partially specified set of classical
//!   orbital elements, completed by an inference chain at construction
//!   (perihelion distance from the semimajor axis, period via Kepler's
//!   third law, mean anomaly from the mean longitude, ...).
//! - [`ephemeris_table::EphemerisTable`] — discrete Cartesian state vectors
//!   with bounded-order Lagrange interpolation for bodies where analytic
//!   elements are unavailable.
//! - [`orbit::Orbit`] — the propagation engine itself: classifies the orbit
//!   regime from the eccentricity (elliptical, near-parabolic, hyperbolic)
//!   or the source kind (table), solves the matching form of Kepler's
//!   equation and rotates the in-plane position into heliocentric
//!   coordinates.
//! - [`coordinates`] — spherical/Cartesian and ecliptic/equatorial frame
//!   conversions, with nutation and mean-obliquity series.
//!
//! ## Conventions
//!
//! Distances are in **AU**, times in **days** (epochs as Julian Dates) and
//! angles in **radians** internally; degree input/output is handled at the
//! [`elements::OrbitalElements`] boundary. `GM` values are in **m³/s²**.
//!
//! ## Example
//!
//! ```rust
//! use helion::elements::{AngleUnit, Element, OrbitalElements};
//! use helion::orbit::{Orbit, OrbitType};
//!
//! let mars = OrbitalElements::new(
//!     &[
//!         (Element::SemiMajorAxis, 1.52366231),
//!         (Element::Eccentricity, 0.09341233),
//!         (Element::Inclination, 1.85061),
//!         (Element::AscendingNodeLongitude, 49.57854),
//!         (Element::PerihelionLongitude, 336.04084),
//!         (Element::MeanLongitude, 355.45332),
//!         (Element::Epoch, 2451545.0),
//!     ],
//!     AngleUnit::Deg,
//!     false,
//! )?;
//!
//! let orbit = Orbit::new(mars)?;
//! assert_eq!(orbit.orbit_type(), OrbitType::Elliptical);
//!
//! let position = orbit.get_position_at_time(2458849.5)?;
//! assert!(position.norm() > 1.3 && position.norm() < 1.7);
//! # Ok::<(), helion::helion_errors::HelionError>(())
//! ```

pub mod constants;
pub mod conversion;
pub mod coordinates;
pub mod elements;
pub mod ephemeris_table;
pub mod helion_errors;
pub mod interpolation;
pub mod kepler;
pub mod orbit;
