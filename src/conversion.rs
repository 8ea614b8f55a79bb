//! Pure, stateless unit conversions: angles, distances, and
//! sexagesimal ↔ decimal right ascension / declination.
//!
//! All inputs are finite numbers by contract of the caller; none of these
//! functions has an error condition.

use crate::constants::{AstronomicalUnit, Degree, Kilometer, Radian, AU, RADEG};

/// Convert degrees to radians.
pub fn deg_to_rad(val: Degree) -> Radian {
    val * RADEG
}

/// Convert radians to degrees.
pub fn rad_to_deg(val: Radian) -> Degree {
    val / RADEG
}

/// Convert hours of right ascension to degrees (15° per hour).
pub fn hours_to_deg(val: f64) -> Degree {
    val * 15.0
}

/// Convert kilometers to astronomical units.
pub fn km_to_au(km: Kilometer) -> AstronomicalUnit {
    km / AU
}

/// Convert astronomical units to kilometers.
pub fn au_to_km(au: AstronomicalUnit) -> Kilometer {
    au * AU
}

/// Convert a sexagesimal right ascension `(hours, minutes, seconds)` to
/// decimal degrees.
pub fn sexagesimal_to_decimal_ra(hour: f64, min: f64, sec: f64) -> Degree {
    hour * 15.0 + min / 4.0 + sec / 240.0
}

/// Convert a sexagesimal declination `(degrees, arcminutes, arcseconds)` to
/// decimal degrees.
///
/// `below_equator` flips the seconds contribution for southern-hemisphere
/// declinations whose degree part is written unsigned.
pub fn sexagesimal_to_decimal_dec(deg: f64, min: f64, sec: f64, below_equator: bool) -> Degree {
    let posneg = if below_equator { -1.0 } else { 1.0 };
    deg + min / 60.0 + posneg * sec / 3600.0
}

/// Split a decimal right ascension in degrees into sexagesimal
/// `(hours, minutes, seconds)`.
pub fn decimal_to_sexagesimal_ra(val: Degree) -> (f64, f64, f64) {
    let hour = (val / 15.0).trunc();
    let min = ((val - hour * 15.0) * 4.0).trunc();
    let sec = (val - hour * 15.0 - min / 4.0) * 240.0;
    (hour, min, sec)
}

/// Split a decimal declination in degrees into sexagesimal
/// `(degrees, arcminutes, arcseconds)`.
pub fn decimal_to_sexagesimal_dec(val: Degree, below_equator: bool) -> (f64, f64, f64) {
    let posneg = if below_equator { -1.0 } else { 1.0 };
    let deg = val.trunc();
    let min = ((val - posneg * deg) * 60.0 * posneg).trunc();
    let sec = (val - posneg * deg - posneg * min / 60.0) * 3600.0 * posneg;
    (deg, min, sec)
}
