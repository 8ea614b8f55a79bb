//! # Constants and type definitions for helion
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `helion` library.
//!
//! ## Overview
//!
//! - Astronomical constants (AU, Gaussian gravitational constant, J2000 epoch)
//! - Unit conversions (degrees ↔ radians, AU ↔ km)
//! - Standard gravitational parameters for the major solar-system bodies
//! - Core type aliases used across the crate
//!
//! These definitions are used by all main modules, including the element
//! container, the ephemeris table and the orbit propagation engine.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of days in a Julian year
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Astronomical Unit in meters
pub const METERS_IN_AU: f64 = AU * 1000.0;

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00:00 TT)
pub const J2000: f64 = 2_451_545.0;

/// Days per Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648_000.0;

/// Gaussian gravitational constant k (used in classical orbit dynamics)
pub const GAUSS_GRAV: f64 = 0.01720209895;

/// k², often used in Kepler's third law
pub const GAUSS_GRAV_SQUARED: f64 = GAUSS_GRAV * GAUSS_GRAV;

// -------------------------------------------------------------------------------------------------
// Standard gravitational parameters, in m³/s²
// -------------------------------------------------------------------------------------------------

/// Standard gravitational parameters (GM) for objects orbiting these bodies.
///
/// Values follow the DE431 planetary constants
/// (<https://naif.jpl.nasa.gov/pub/naif/generic_kernels/pck/gm_de431.tpc>),
/// expressed in m³/s².
pub mod gm {
    pub const SUN: f64 = 1.3271244004193938e20;
    pub const MERCURY: f64 = 2.2031780000000021e13;
    pub const VENUS: f64 = 3.2485859200000006e14;
    pub const EARTH_MOON: f64 = 4.0350323550225981e14;
    pub const MARS: f64 = 4.2828375214000022e13;
    pub const JUPITER: f64 = 1.2671276480000021e17;
    pub const SATURN: f64 = 3.7940585200000003e16;
    pub const URANUS: f64 = 5.794548600000008e15;
    pub const NEPTUNE: f64 = 6.8365271005800236e15;
    pub const PLUTO_CHARON: f64 = 9.7700000000000068e11;
}

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Julian Date (days)
pub type JulianDate = f64;
