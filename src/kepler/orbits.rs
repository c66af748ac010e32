//! Keplerian orbital elements and their evaluation to state vectors.

use std::f64::consts;

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::kepler::solver::{self, ConicRegime};

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Orbital radii are floored here to keep later divisions well-defined.
pub const RADIUS_FLOOR: f64 = 1e-6;

/// Tolerance handed to the anomaly solvers by [`OrbitalElements::state_at`].
pub const SOLVER_TOL: f64 = 1e-12;
/// Iteration budget handed to the anomaly solvers by
/// [`OrbitalElements::state_at`].
pub const SOLVER_MAXITER: u64 = 100;

/// A Keplerian element set pinned to an epoch.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Semi-major axis (km); negative for hyperbolic orbits.
    pub a: f64,
    /// Eccentricity (dimensionless).
    pub e: f64,
    /// Inclination (radians).
    pub i: f64,
    /// Longitude of ascending node (radians).
    pub lan: f64,
    /// Argument of periapsis (radians).
    pub argpe: f64,
    /// Mean anomaly at epoch (radians).
    pub ma: f64,
    /// Epoch (Julian Day).
    pub epoch: f64,
}

/// Reasons an element set cannot be evaluated at all.
///
/// Numerical trouble that appears *during* evaluation is handled more
/// gently: [`OrbitalElements::state_at`] substitutes zero vectors and
/// logs instead of failing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("semi-major axis is zero")]
    DegenerateSemiMajorAxis,
    #[error("eccentricity is negative")]
    NegativeEccentricity,
    #[error("element set or gravitational parameter is not finite")]
    NonFiniteElements,
}

/// The evaluated state of a body at one instant.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    /// Position relative to the attracting body (km).
    pub position: Vector3<f64>,
    /// Velocity relative to the attracting body (km/s).
    pub velocity: Vector3<f64>,
    /// True anomaly at the evaluated instant (degrees).
    pub true_anomaly: f64,
}

impl OrbitalElements {
    pub fn regime(&self) -> ConicRegime {
        ConicRegime::classify(self.e)
    }

    /// Mean motion (radians/s) about a body with gravitational
    /// parameter `mu` (km^3/s^2).
    pub fn mean_motion(&self, mu: f64) -> f64 {
        libm::sqrt(mu / self.a.abs().powi(3))
    }

    /// Orbital period (seconds), if the orbit is closed.
    pub fn period(&self, mu: f64) -> Option<f64> {
        if self.e < 1.0 && self.a > 0.0 {
            Some(2.0 * consts::PI / self.mean_motion(mu))
        } else {
            None
        }
    }

    /// Semi-latus rectum (km); positive in every regime thanks to the
    /// signed semi-major axis convention.
    pub fn semi_latus_rectum(&self) -> f64 {
        self.a * (1.0 - self.e.powi(2))
    }

    pub fn periapsis_radius(&self) -> f64 {
        self.semi_latus_rectum() / (1.0 + self.e)
    }

    /// Apoapsis radius (km); only meaningful for `e < 1`.
    pub fn apoapsis_radius(&self) -> f64 {
        self.semi_latus_rectum() / (1.0 - self.e)
    }

    /// Orbital radius (km) at true anomaly `ta` (radians).
    pub fn radius_at(&self, ta: f64) -> f64 {
        let a_abs = self.a.abs();
        let r = if self.e < 1.0 {
            a_abs * (1.0 - self.e.powi(2)) / (1.0 + self.e * libm::cos(ta))
        } else {
            a_abs * (self.e.powi(2) - 1.0) / (1.0 + self.e * libm::cos(ta))
        };
        r.max(RADIUS_FLOOR)
    }

    fn pqw_ijk_matrix(&self) -> Matrix3<f64> {
        let m11 = libm::cos(self.lan) * libm::cos(self.argpe)
            - libm::sin(self.lan) * libm::sin(self.argpe) * libm::cos(self.i);
        let m12 = -libm::cos(self.lan) * libm::sin(self.argpe)
            - libm::sin(self.lan) * libm::cos(self.argpe) * libm::cos(self.i);
        let m13 = libm::sin(self.lan) * libm::sin(self.i);
        let m21 = libm::sin(self.lan) * libm::cos(self.argpe)
            + libm::cos(self.lan) * libm::sin(self.argpe) * libm::cos(self.i);
        let m22 = -libm::sin(self.lan) * libm::sin(self.argpe)
            + libm::cos(self.lan) * libm::cos(self.argpe) * libm::cos(self.i);
        let m23 = -libm::cos(self.lan) * libm::sin(self.i);
        let m31 = libm::sin(self.argpe) * libm::sin(self.i);
        let m32 = libm::cos(self.argpe) * libm::sin(self.i);
        let m33 = libm::cos(self.i);

        Matrix3::new(m11, m12, m13, m21, m22, m23, m31, m32, m33)
    }

    fn is_finite(&self) -> bool {
        self.a.is_finite()
            && self.e.is_finite()
            && self.i.is_finite()
            && self.lan.is_finite()
            && self.argpe.is_finite()
            && self.ma.is_finite()
            && self.epoch.is_finite()
    }

    /// Evaluate this element set at the Julian Day `jd` around a body
    /// with gravitational parameter `mu` (km^3/s^2).
    ///
    /// The mean anomaly is advanced by the elapsed time since the
    /// epoch, solved to a true anomaly, and expanded to a perifocal
    /// state vector that is then rotated into the parent equatorial
    /// frame. A state that comes out non-finite is replaced by zero
    /// vectors rather than surfaced as an error.
    pub fn state_at(&self, mu: f64, jd: f64) -> Result<BodyState, StateError> {
        if !self.is_finite() || !mu.is_finite() {
            return Err(StateError::NonFiniteElements);
        }
        if self.a == 0.0 {
            return Err(StateError::DegenerateSemiMajorAxis);
        }
        if self.e < 0.0 {
            return Err(StateError::NegativeEccentricity);
        }

        let delta_t = (jd - self.epoch) * SECONDS_PER_DAY;
        let ma = self.ma + self.mean_motion(mu) * delta_t;
        let ta = solver::ma_to_ta(ma, self.e, SOLVER_TOL, SOLVER_MAXITER);

        let r = self.radius_at(ta);
        let rv = r * libm::cos(ta) * Vector3::new(1.0, 0.0, 0.0)
            + r * libm::sin(ta) * Vector3::new(0.0, 1.0, 0.0);

        // Vis-viva fixes the speed; the perifocal tangent fixes the
        // direction. The signed semi-major axis keeps this valid for
        // hyperbolic orbits as well.
        let speed = libm::sqrt(mu * (2.0 / r - 1.0 / self.a));
        let tangent = -libm::sin(ta) * Vector3::new(1.0, 0.0, 0.0)
            + (self.e + libm::cos(ta)) * Vector3::new(0.0, 1.0, 0.0);
        let vv = speed * tangent / tangent.norm();

        let mat = self.pqw_ijk_matrix();
        let mut rv = mat * rv;
        let mut vv = mat * vv;

        if !(rv.iter().all(|x| x.is_finite()) && vv.iter().all(|x| x.is_finite())) {
            warn!("state_at({mu}, {jd}): non-finite state from {self:?}, substituting zeros");
            rv = Vector3::zeros();
            vv = Vector3::zeros();
        }

        Ok(BodyState {
            position: rv,
            velocity: vv,
            true_anomaly: ta.to_degrees(),
        })
    }

    /// Sample `samples + 1` positions around one closed revolution,
    /// suitable for drawing the orbit. Open orbits yield nothing.
    pub fn orbit_path(&self, mu: f64, samples: usize) -> Vec<Vector3<f64>> {
        if self.e >= 1.0 || samples == 0 {
            return Vec::new();
        }
        (0..=samples)
            .filter_map(|k| {
                let ma = 2.0 * consts::PI * k as f64 / samples as f64;
                OrbitalElements { ma, ..*self }
                    .state_at(mu, self.epoch)
                    .ok()
            })
            .map(|state| state.position)
            .collect()
    }
}
