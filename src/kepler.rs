//! Two-body orbital mechanics: Kepler solvers and element evaluation.

pub mod orbits;
pub mod solver;
