//! Kepler-equation solvers for the three analytic orbit regimes.
//!
//! The elliptical and hyperbolic solvers are fixed-point iterations with a
//! hard iteration cap and a fixed convergence tolerance; both numbers are a
//! reproducibility contract shared with downstream consumers (sampled orbit
//! lines must come out bit-identical across runs), so they are deliberately
//! constants of this module rather than tunables.
//!
//! The near-parabolic case uses a closed-form Stumpff-style series
//! (see <https://stjarnhimlen.se/comp/ppcomp.html#17>) and has no
//! convergence loop, hence no failure mode.

use crate::constants::{Radian, GAUSS_GRAV};

/// Iteration cap shared by both fixed-point solvers.
pub const MAX_ITERATIONS: usize = 100;

/// Convergence tolerance on successive iterates, in radians.
pub const TOLERANCE: f64 = 1e-7;

/// Cube root that assumes a non-negative input.
fn cbrt_positive(x: f64) -> f64 {
    (x.ln() / 3.0).exp()
}

/// Solve Kepler's equation `E = M + e·sin E` for the eccentric anomaly.
///
/// Fixed-point iteration from `E₀ = M`, stopping after [`MAX_ITERATIONS`]
/// or once successive iterates differ by less than [`TOLERANCE`].
///
/// Arguments
/// ---------
/// * `m`: mean anomaly in radians
/// * `e`: eccentricity, `0 ≤ e < 1`
///
/// Return
/// ------
/// * Eccentric anomaly `E` in radians.
pub fn solve_eccentric_anomaly(m: Radian, e: f64) -> Radian {
    let mut e0 = m;
    for _ in 0..MAX_ITERATIONS {
        let e1 = m + e * e0.sin();
        let last_diff = (e1 - e0).abs();
        e0 = e1;
        if last_diff < TOLERANCE {
            break;
        }
    }
    e0
}

/// Solve the hyperbolic Kepler equation `M = e·sinh F − F` for the
/// hyperbolic anomaly.
///
/// Fixed-point iteration `F₁ = (M + e·(F₀·cosh F₀ − sinh F₀)) /
/// (e·cosh F₀ − 1)` from `F₀ = M`, with the same cap and tolerance as the
/// elliptical solver.
///
/// Arguments
/// ---------
/// * `m`: mean anomaly in radians
/// * `e`: eccentricity, `e > 1`
///
/// Return
/// ------
/// * Hyperbolic anomaly `F`.
pub fn solve_hyperbolic_anomaly(m: Radian, e: f64) -> f64 {
    let mut f0 = m;
    for _ in 0..MAX_ITERATIONS {
        let f1 = (m + e * (f0 * f0.cosh() - f0.sinh())) / (e * f0.cosh() - 1.0);
        let last_diff = (f1 - f0).abs();
        f0 = f1;
        if last_diff < TOLERANCE {
            break;
        }
    }
    f0
}

/// True anomaly and heliocentric radius for a near-parabolic orbit.
///
/// Closed-form series in the perihelion distance, eccentricity and time
/// since perihelion, parameterized by the Gaussian gravitational constant.
/// Valid in the near-parabolic band (roughly `0.9 < e < 1.2`) where the
/// iterative solvers degrade.
///
/// Arguments
/// ---------
/// * `q`: perihelion distance in AU
/// * `e`: eccentricity near 1
/// * `dt`: time since perihelion passage, in days
///
/// Return
/// ------
/// * `(v, r)`: true anomaly in radians and heliocentric radius in AU.
pub fn near_parabolic_anomaly(q: f64, e: f64, dt: f64) -> (Radian, f64) {
    let a = 0.75 * dt * GAUSS_GRAV * ((1.0 + e) / (q * q * q)).sqrt();
    let b = (1.0 + a * a).sqrt();
    let big_w = cbrt_positive(b + a) - cbrt_positive(b - a);
    let f = (1.0 - e) / (1.0 + e);

    let w2 = big_w * big_w;
    let a1 = 2.0 / 3.0 + 2.0 / 5.0 * w2;
    let a2 = 7.0 / 5.0 + 33.0 / 35.0 * w2 + 37.0 / 175.0 * w2 * w2;
    let a3 = w2 * (432.0 / 175.0 + 956.0 / 1125.0 * w2 + 84.0 / 1575.0 * w2 * w2);

    let c = w2 / (1.0 + w2);
    let g = f * c * c;
    let w = big_w * (1.0 + f * c * (a1 + a2 * g + a3 * g * g));

    let v = 2.0 * w.atan();
    let r = q * (1.0 + w * w) / (1.0 + w * w * f);

    (v, r)
}

#[cfg(test)]
mod kepler_test {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0.1)]
    #[case(0.3)]
    #[case(0.5)]
    #[case(0.7)]
    #[case(0.85)]
    fn test_elliptic_solver_converges(#[case] e: f64) {
        for k in 0..12 {
            let m = -3.0 + 0.5 * k as f64;
            let big_e = solve_eccentric_anomaly(m, e);
            // Fixed point of E = M + e sin E means the residual of Kepler's
            // equation is below the iterate tolerance.
            assert!((big_e - e * big_e.sin() - m).abs() < TOLERANCE);
        }
    }

    #[rstest]
    #[case(1.25)]
    #[case(1.5)]
    #[case(2.0)]
    #[case(3.5)]
    #[case(5.0)]
    fn test_hyperbolic_solver_converges(#[case] e: f64) {
        for k in 0..9 {
            let m = -2.0 + 0.5 * k as f64;
            let f = solve_hyperbolic_anomaly(m, e);
            assert!((e * f.sinh() - f - m).abs() < 1e-6);
        }
    }

    #[test]
    fn test_solvers_are_deterministic() {
        let a = solve_eccentric_anomaly(1.234, 0.56);
        let b = solve_eccentric_anomaly(1.234, 0.56);
        assert_eq!(a.to_bits(), b.to_bits());

        let a = solve_hyperbolic_anomaly(0.9, 1.7);
        let b = solve_hyperbolic_anomaly(0.9, 1.7);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_circular_orbit_anomaly_is_mean_anomaly() {
        assert_relative_eq!(solve_eccentric_anomaly(0.8, 0.0), 0.8, epsilon = 1e-15);
    }

    #[test]
    fn test_near_parabolic_at_perihelion() {
        // At tp the body sits exactly at perihelion: v = 0, r = q.
        let (v, r) = near_parabolic_anomaly(0.5, 1.0, 0.0);
        assert_relative_eq!(v, 0.0, epsilon = 1e-12);
        assert_relative_eq!(r, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_near_parabolic_symmetry() {
        // Equal times before and after perihelion mirror the true anomaly
        // and give the same radius.
        let (v_pre, r_pre) = near_parabolic_anomaly(1.2, 1.05, -30.0);
        let (v_post, r_post) = near_parabolic_anomaly(1.2, 1.05, 30.0);
        assert_relative_eq!(v_pre, -v_post, epsilon = 1e-12);
        assert_relative_eq!(r_pre, r_post, epsilon = 1e-12);
        assert!(v_post > 0.0);
        assert!(r_post > 1.2);
    }
}
