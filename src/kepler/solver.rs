//! Root-finding for Kepler's equation in its elliptic, hyperbolic, and
//! parabolic (Barker) forms, plus the anomaly conversions built on top.
//!
//! The solvers are deliberately infallible: on a degenerate derivative or
//! an exhausted iteration budget they log and return the current estimate,
//! so a pathological element record can never take down an update loop.

use std::f64::consts;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Eccentricities within this band of 1 are treated as parabolic.
pub const PARABOLIC_BAND: f64 = 1e-6;

/// Newton derivative magnitudes below this abort the iteration.
const DERIVATIVE_FLOOR: f64 = 1e-12;

/// Conic-section regime of an orbit, classified by eccentricity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConicRegime {
    Elliptic,
    Parabolic,
    Hyperbolic,
}

impl ConicRegime {
    pub fn classify(e: f64) -> Self {
        if (e - 1.0).abs() < PARABOLIC_BAND {
            ConicRegime::Parabolic
        } else if e > 1.0 {
            ConicRegime::Hyperbolic
        } else {
            ConicRegime::Elliptic
        }
    }
}

/// Solve `E - e*sin(E) = M` for the eccentric anomaly `E` (radians).
///
/// `ma` is reduced into `[0, 2pi)` first; the equation is periodic. The
/// initial guess is `M` itself below `e = 0.8` and `pi` above, where
/// high-eccentricity orbits converge poorly from `M`.
///
/// Recommended tolerance: `tol = 1e-10`, `maxiter = 50`.
pub fn ma_to_ea(ma: f64, e: f64, tol: f64, maxiter: u64) -> f64 {
    assert!((0.0..1.0).contains(&e));
    let ma = ma.rem_euclid(2.0 * consts::PI);

    let mut ea = if e < 0.8 { ma } else { consts::PI };
    let mut iter = 0;
    while iter < maxiter {
        let fprime = 1.0 - e * libm::cos(ea);
        if fprime.abs() < DERIVATIVE_FLOOR {
            trace!("ma_to_ea({ma}, {e}): derivative degenerate after {iter} iterations");
            return ea;
        }
        let delta = (ea - e * libm::sin(ea) - ma) / fprime;
        ea -= delta;
        if delta.abs() < tol {
            return ea;
        }
        iter += 1;
    }
    trace!("ma_to_ea({ma}, {e}, {tol}, {maxiter}): did not converge, returning estimate");
    ea
}

/// Solve `e*sinh(F) - F = M` for the hyperbolic anomaly `F` (radians).
///
/// `ma` is used unreduced; the hyperbolic equation is not periodic. The
/// initial guess `sign(M) * ln(2|M|/e + 1.8)` tracks the asymptotic
/// behavior of `F`, keeping Newton convergent for large `|M|`.
///
/// Recommended tolerance: `tol = 1e-12`, `maxiter = 100`.
pub fn ma_to_ha(ma: f64, e: f64, tol: f64, maxiter: u64) -> f64 {
    assert!(e > 1.0);

    let mut ha = if ma.abs() > 1e-6 {
        ma.signum() * libm::log(2.0 * ma.abs() / e + 1.8)
    } else {
        ma
    };
    let mut iter = 0;
    while iter < maxiter {
        let fprime = e * libm::cosh(ha) - 1.0;
        if fprime.abs() < DERIVATIVE_FLOOR {
            trace!("ma_to_ha({ma}, {e}): derivative degenerate after {iter} iterations");
            return ha;
        }
        let delta = (e * libm::sinh(ha) - ha - ma) / fprime;
        ha -= delta;
        if delta.abs() < tol {
            return ha;
        }
        iter += 1;
    }
    trace!("ma_to_ha({ma}, {e}, {tol}, {maxiter}): did not converge, returning estimate");
    ha
}

/// Solve Barker's equation `D^3/3 + D = M` for `D = tan(nu/2)`.
///
/// The derivative `D^2 + 1` never vanishes, so no degeneracy guard is
/// needed. `ma` is used unreduced.
pub fn ma_to_d(ma: f64, tol: f64, maxiter: u64) -> f64 {
    let mut d = ma;
    let mut iter = 0;
    while iter < maxiter {
        let delta = (d * d * d / 3.0 + d - ma) / (d * d + 1.0);
        d -= delta;
        if delta.abs() < tol {
            return d;
        }
        iter += 1;
    }
    trace!("ma_to_d({ma}, {tol}, {maxiter}): did not converge, returning estimate");
    d
}

/// True anomaly from eccentric anomaly, `e < 1`.
pub fn ea_to_ta(ea: f64, e: f64) -> f64 {
    assert!((0.0..1.0).contains(&e));
    2.0 * libm::atan2(
        libm::sqrt(1.0 + e) * libm::sin(ea / 2.0),
        libm::sqrt(1.0 - e) * libm::cos(ea / 2.0),
    )
}

/// True anomaly from hyperbolic anomaly, `e > 1`.
pub fn ha_to_ta(ha: f64, e: f64) -> f64 {
    assert!(e > 1.0);
    2.0 * libm::atan(libm::sqrt((e + 1.0) / (e - 1.0)) * libm::tanh(ha / 2.0))
}

/// True anomaly from the Barker variable `D = tan(nu/2)`.
pub fn d_to_ta(d: f64) -> f64 {
    2.0 * libm::atan(d)
}

/// Mean anomaly straight to true anomaly (radians), dispatching on the
/// eccentricity regime.
pub fn ma_to_ta(ma: f64, e: f64, tol: f64, maxiter: u64) -> f64 {
    assert!(e >= 0.0);
    match ConicRegime::classify(e) {
        ConicRegime::Elliptic => ea_to_ta(ma_to_ea(ma, e, tol, maxiter), e),
        ConicRegime::Parabolic => d_to_ta(ma_to_d(ma, tol, maxiter)),
        ConicRegime::Hyperbolic => ha_to_ta(ma_to_ha(ma, e, tol, maxiter), e),
    }
}
