//! Reference-frame conversions: spherical ↔ Cartesian coordinates,
//! equatorial ↔ ecliptic rotation, and the Earth obliquity/nutation series
//! needed to relate the two frames at a given epoch.
//!
//! The obliquity polynomial follows the IAU 1976 expression and the
//! nutation terms the four leading sinusoids of the IAU 1980 series, which
//! is plenty for placing bodies and star fields at display precision.

use nalgebra::Vector3;

use crate::constants::{JulianDate, Radian, DAYS_PER_CENTURY, J2000, RADEG};

/// Convert spherical equatorial coordinates to Cartesian.
///
/// Arguments
/// ---------
/// * `ra`: right ascension in radians
/// * `dec`: declination in radians
/// * `dist`: distance, in whatever unit the caller works in
///
/// Return
/// ------
/// * Cartesian position in the same distance unit.
pub fn spherical_to_cartesian(ra: Radian, dec: Radian, dist: f64) -> Vector3<f64> {
    Vector3::new(
        dist * ra.cos() * dec.cos(),
        dist * ra.sin() * dec.cos(),
        dist * dec.sin(),
    )
}

/// Rotate an equatorial Cartesian vector into the ecliptic frame,
/// given the obliquity `tilt` of the ecliptic.
pub fn equatorial_to_ecliptic_cartesian(pos: &Vector3<f64>, tilt: Radian) -> Vector3<f64> {
    Vector3::new(
        pos.x,
        tilt.cos() * pos.y + tilt.sin() * pos.z,
        -tilt.sin() * pos.y + tilt.cos() * pos.z,
    )
}

/// Rotate an ecliptic Cartesian vector into the equatorial frame,
/// given the obliquity `tilt` of the ecliptic. Exact inverse of
/// [`equatorial_to_ecliptic_cartesian`].
pub fn ecliptic_to_equatorial_cartesian(pos: &Vector3<f64>, tilt: Radian) -> Vector3<f64> {
    Vector3::new(
        pos.x,
        tilt.cos() * pos.y - tilt.sin() * pos.z,
        tilt.sin() * pos.y + tilt.cos() * pos.z,
    )
}

/// Compute Earth's nutation in longitude and true obliquity at a given
/// epoch.
///
/// Arguments
/// ---------
/// * `jd`: epoch as a Julian Date (TT scale)
///
/// Return
/// ------
/// * `(nutation, obliquity)`, both in radians. The obliquity includes the
///   periodic nutation-in-obliquity correction.
pub fn nutation_and_obliquity(jd: JulianDate) -> (Radian, Radian) {
    let t = (jd - J2000) / DAYS_PER_CENTURY;

    // Longitude of the Moon's ascending node, and mean longitudes of the
    // Sun and Moon (degrees).
    let omega =
        (125.04452 - 1934.136261 * t + 0.0020708 * t * t + t * t * t / 450000.0) * RADEG;
    let l_sun = (280.4665 + 36000.7698 * t) * RADEG;
    let l_moon = (218.3165 + 481267.8813 * t) * RADEG;

    // Leading terms of the IAU 1980 series, coefficients in arcseconds.
    let nutation = (-17.2 * omega.sin() - 1.32 * (2.0 * l_sun).sin()
        - 0.23 * (2.0 * l_moon).sin()
        + 0.21 * (2.0 * omega).sin())
        / 3600.0;

    let obliquity_zero = 23.0 + 26.0 / 60.0 + 21.448 / 3600.0
        - 46.815 / 3600.0 * t
        - 0.00059 / 3600.0 * t * t
        + 0.001813 / 3600.0 * t * t * t;
    let obliquity_delta = (9.2 * omega.cos() + 0.57 * (2.0 * l_sun).cos()
        + 0.1 * (2.0 * l_moon).cos()
        - 0.09 * (2.0 * omega).cos())
        / 3600.0;
    let obliquity = obliquity_zero + obliquity_delta;

    (nutation * RADEG, obliquity * RADEG)
}

/// Earth's true obliquity at a given Julian Date, in radians.
pub fn obliquity(jd: JulianDate) -> Radian {
    nutation_and_obliquity(jd).1
}
