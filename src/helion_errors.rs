use thiserror::Error;

use crate::elements::Element;

/// All recoverable failures surfaced by this crate.
///
/// Precondition violations (calling a regime-specific propagation path
/// against the wrong source type) are programmer errors and panic instead
/// of appearing here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HelionError {
    #[error("ephemeris table must contain at least one data row")]
    EmptyEphemerisData,

    #[error("ephemeris row {row} has {found} columns, expected {expected}")]
    MalformedEphemerisRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("interpolation order must be between 1 and {max}: {order}")]
    InterpolationOrderOutOfRange { order: usize, max: usize },

    #[error("eccentricity 'e' must be defined in an orbit")]
    MissingEccentricity,

    #[error("either semimajor axis 'a' or perihelion distance 'q' must be defined in an orbit")]
    MissingShapeElement,

    #[error("perihelion distance 'q' is required when eccentricity is 1 or larger")]
    PerihelionDistanceRequired,

    #[error("attempted to modify a locked (immutable) element set")]
    LockedElements,

    #[error("orbital element '{0}' is not available and cannot be inferred")]
    MissingElement(Element),

    #[error("requested start date {start} is after requested stop date {stop}")]
    InvertedTimeRange { start: f64, stop: f64 },

    #[error("step size must be greater than zero: {0}")]
    NonPositiveStep(f64),
}
