//! The per-tick update loop that drives every body in the catalog.
//!
//! A [`Simulation`] owns the clock and one node per body; nothing lives
//! in global state, so independent simulations can run side by side.
//! Each [`tick`](Simulation::tick) advances the clock, re-evaluates all
//! element sets at the new instant, offsets the Sun by its two-term
//! barycentric wobble, anchors every moon to its freshly moved parent,
//! and accumulates spin phases. A body whose evaluation fails keeps its
//! last good state for that frame; the loop itself never stops.

use std::collections::HashMap;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::bodies::{
    self, Comet, Moon, Primary, GM_SUN, SUN_AXIAL_TILT_DEG, SUN_ROTATION_PERIOD,
};
use crate::kepler::orbits::OrbitalElements;
use crate::time::{gmst_from_julian_day, SimulationClock};

/// Pacing and smoothing knobs for the update loop.
///
/// The defaults are tuned for visual stability of a real-time scene;
/// none of them change the underlying two-body propagation.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Weight of the freshly evaluated position when a moon or comet
    /// node is moved, in `[0, 1]`. `1` places nodes exactly; lower
    /// values smooth out popping between frames.
    pub position_blend: f64,
    /// Moons with semi-major axes below this (`km`) orbit on a damped
    /// timescale so they stay visually trackable.
    pub tiny_orbit_threshold_km: f64,
    /// Timescale factor applied to close-in moons; `1` disables the
    /// damping.
    pub tiny_orbit_scale: f64,
    /// Slow a damped moon's spin by the same factor as its orbit, so
    /// tidally locked moons keep facing their parent.
    pub match_spin_to_orbit_scale: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            position_blend: 0.7,
            tiny_orbit_threshold_km: 150_000.0,
            tiny_orbit_scale: 0.1,
            match_spin_to_orbit_scale: true,
        }
    }
}

/// Axial orientation of a body: a fixed tilt and an accumulating spin
/// phase.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RotationState {
    /// Tilt away from the orbital plane (degrees), fixed at startup.
    pub tilt: f64,
    /// Spin phase about the tilted axis (degrees in `[0, 360)`).
    pub spin: f64,
}

/// The Sun's scene state. Its position is the barycentric wobble, not
/// a propagated orbit.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SunNode {
    /// Offset from the system origin (`km`).
    pub position: Vector3<f64>,
    pub rotation: RotationState,
}

/// Scene state of one planet or dwarf planet, refreshed each tick.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrimaryNode {
    pub body: Primary,
    /// The element set driving this node; seeded from the catalog and
    /// free for the host to adjust.
    pub elements: OrbitalElements,
    /// Heliocentric position (`km`).
    pub position: Vector3<f64>,
    /// Heliocentric velocity (`km/s`).
    pub velocity: Vector3<f64>,
    /// True anomaly (degrees) at the last successful evaluation.
    pub true_anomaly: f64,
    pub rotation: RotationState,
}

/// Scene state of one moon, refreshed each tick.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct MoonNode {
    /// The catalog record (name, parent, physical radius).
    pub moon: &'static Moon,
    /// The element set driving this node, relative to the parent.
    pub elements: OrbitalElements,
    /// Heliocentric position (`km`): the parent's current position
    /// plus this moon's Keplerian offset.
    pub position: Vector3<f64>,
    /// Heliocentric velocity (`km/s`): parent velocity plus the
    /// moon-relative velocity.
    pub velocity: Vector3<f64>,
    /// True anomaly (degrees) at the last successful evaluation.
    pub true_anomaly: f64,
    pub rotation: RotationState,
    /// Resolved spin period (`sec`): the tabulated value, or one
    /// orbital period for synchronous rotators.
    pub rotation_period: f64,
}

/// Scene state of one comet, refreshed each tick.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct CometNode {
    /// The catalog record (name, nucleus radius).
    pub comet: &'static Comet,
    /// The heliocentric element set driving this node.
    pub elements: OrbitalElements,
    /// Heliocentric position (`km`).
    pub position: Vector3<f64>,
    /// Heliocentric velocity (`km/s`); downstream tail rendering
    /// points away from it.
    pub velocity: Vector3<f64>,
    /// True anomaly (degrees) at the last successful evaluation.
    pub true_anomaly: f64,
}

/// Summary of one completed tick.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Simulated seconds consumed by this tick.
    pub sim_delta: f64,
    /// The clock's Julian Day after the tick.
    pub julian_day: f64,
    /// Bodies whose evaluation failed and kept their last good state.
    pub failed_bodies: usize,
}

/// One self-contained solar-system simulation.
#[derive(Clone, Debug, Serialize)]
pub struct Simulation {
    clock: SimulationClock,
    config: SchedulerConfig,
    sun: SunNode,
    /// Indexed by `Primary as usize`, i.e. [`Primary::ALL`] order.
    primaries: Vec<PrimaryNode>,
    moons: Vec<MoonNode>,
    comets: Vec<CometNode>,
}

impl Simulation {
    /// Build a simulation and run the one-time initialization pass:
    /// every body is placed at the clock's starting instant, axial
    /// tilts are applied, Earth's spin is phase-locked to sidereal
    /// time (with scaled variants for Mercury, Venus, and Mars), and
    /// each moon starts tidally locked toward its parent.
    pub fn new(clock: SimulationClock, config: SchedulerConfig) -> Self {
        let jd = clock.julian_day();
        let gmst = gmst_from_julian_day(jd);

        let mut sim = Self {
            clock,
            config,
            sun: SunNode {
                position: Vector3::zeros(),
                rotation: RotationState {
                    tilt: SUN_AXIAL_TILT_DEG,
                    spin: 0.0,
                },
            },
            primaries: Vec::with_capacity(Primary::ALL.len()),
            moons: Vec::with_capacity(bodies::moons().len()),
            comets: Vec::with_capacity(bodies::comets().len()),
        };

        for body in Primary::ALL {
            let mut node = PrimaryNode {
                body,
                elements: body.elements(),
                position: Vector3::zeros(),
                velocity: Vector3::zeros(),
                true_anomaly: 0.0,
                rotation: RotationState {
                    tilt: body.axial_tilt_deg(),
                    spin: initial_spin(body, gmst),
                },
            };
            match node.elements.state_at(GM_SUN, jd) {
                Ok(state) => {
                    node.position = state.position;
                    node.velocity = state.velocity;
                    node.true_anomaly = state.true_anomaly;
                }
                Err(err) => warn!("{}: {err}, starting at the origin", body.name()),
            }
            sim.primaries.push(node);
        }
        sim.sun.position = sim.barycentric_offset();

        for moon in bodies::moons() {
            let parent = sim.primary(moon.parent);
            let (parent_pos, parent_vel) = (parent.position, parent.velocity);
            let mut node = MoonNode {
                moon,
                elements: moon.elements(),
                position: parent_pos,
                velocity: parent_vel,
                true_anomaly: 0.0,
                rotation: RotationState {
                    tilt: moon.axial_tilt_deg,
                    spin: 0.0,
                },
                rotation_period: moon.spin_period(),
            };
            match node.elements.state_at(moon.parent.mu(), jd) {
                Ok(state) => {
                    node.position = parent_pos + state.position;
                    node.velocity = parent_vel + state.velocity;
                    node.true_anomaly = state.true_anomaly;
                    // Tidal lock: the near side faces the parent.
                    node.rotation.spin = state.true_anomaly.rem_euclid(360.0);
                }
                Err(err) => warn!("{}: {err}, starting at its parent", moon.name),
            }
            sim.moons.push(node);
        }

        for comet in bodies::comets() {
            let mut node = CometNode {
                comet,
                elements: comet.elements(),
                position: Vector3::zeros(),
                velocity: Vector3::zeros(),
                true_anomaly: 0.0,
            };
            match node.elements.state_at(GM_SUN, jd) {
                Ok(state) => {
                    node.position = state.position;
                    node.velocity = state.velocity;
                    node.true_anomaly = state.true_anomaly;
                }
                Err(err) => warn!("{}: {err}, starting at the origin", comet.name),
            }
            sim.comets.push(node);
        }

        sim
    }

    /// Advance the simulation by `real_elapsed` seconds of real time.
    ///
    /// The clock clamps and scales the delta first; a tick that
    /// consumes no simulated time leaves every node untouched. A node
    /// whose element set fails to evaluate keeps its last good state
    /// and is counted in the report.
    pub fn tick(&mut self, real_elapsed: f64) -> TickReport {
        let advance = self.clock.advance(real_elapsed);
        let jd = advance.julian_day;
        let dt_sim = advance.sim_delta;
        if dt_sim == 0.0 {
            return TickReport {
                sim_delta: 0.0,
                julian_day: jd,
                failed_bodies: 0,
            };
        }

        let mut failed = 0_usize;

        for node in &mut self.primaries {
            match node.elements.state_at(GM_SUN, jd) {
                Ok(state) => {
                    node.position = state.position;
                    node.velocity = state.velocity;
                    node.true_anomaly = state.true_anomaly;
                }
                Err(err) => {
                    failed += 1;
                    warn!("{}: {err}, keeping last good state", node.body.name());
                }
            }
            advance_spin(&mut node.rotation, node.body.rotation_period(), dt_sim);
        }

        self.sun.position = self.barycentric_offset();
        advance_spin(&mut self.sun.rotation, SUN_ROTATION_PERIOD, dt_sim);

        let blend = self.config.position_blend;
        for node in &mut self.comets {
            match node.elements.state_at(GM_SUN, jd) {
                Ok(state) => {
                    node.position = node.position.lerp(&state.position, blend);
                    node.velocity = state.velocity;
                    node.true_anomaly = state.true_anomaly;
                }
                Err(err) => {
                    failed += 1;
                    warn!("{}: {err}, keeping last good state", node.comet.name);
                }
            }
        }

        // Snapshot of the already-updated parents, so every moon rides
        // its parent's position from this tick, not the previous one.
        let parents: HashMap<Primary, (Vector3<f64>, Vector3<f64>)> = self
            .primaries
            .iter()
            .map(|node| (node.body, (node.position, node.velocity)))
            .collect();

        for node in &mut self.moons {
            let (parent_pos, parent_vel) = parents[&node.moon.parent];
            let orbit_scale = if node.elements.a < self.config.tiny_orbit_threshold_km {
                self.config.tiny_orbit_scale
            } else {
                1.0
            };
            let eval_jd = node.elements.epoch + (jd - node.elements.epoch) * orbit_scale;
            match node.elements.state_at(node.moon.parent.mu(), eval_jd) {
                Ok(state) => {
                    node.position = node.position.lerp(&(parent_pos + state.position), blend);
                    node.velocity = parent_vel + state.velocity;
                    node.true_anomaly = state.true_anomaly;
                }
                Err(err) => {
                    failed += 1;
                    warn!("{}: {err}, keeping last good state", node.moon.name);
                }
            }
            let spin_scale = if self.config.match_spin_to_orbit_scale {
                orbit_scale
            } else {
                1.0
            };
            advance_spin(&mut node.rotation, node.rotation_period / spin_scale, dt_sim);
        }

        trace!("tick: jd {jd}, dt {dt_sim} s, {failed} failed");
        TickReport {
            sim_delta: dt_sim,
            julian_day: jd,
            failed_bodies: failed,
        }
    }

    /// Displacement of the Sun from the system origin under the pull
    /// of its two heaviest satellites.
    fn barycentric_offset(&self) -> Vector3<f64> {
        let mass_j = Primary::Jupiter.mu() / GM_SUN;
        let mass_s = Primary::Saturn.mu() / GM_SUN;
        let pos_j = self.primary(Primary::Jupiter).position;
        let pos_s = self.primary(Primary::Saturn).position;
        (mass_j * pos_j + mass_s * pos_s) / (1.0 + mass_j + mass_s)
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut SimulationClock {
        &mut self.clock
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SchedulerConfig {
        &mut self.config
    }

    pub fn sun(&self) -> &SunNode {
        &self.sun
    }

    pub fn primary(&self, body: Primary) -> &PrimaryNode {
        &self.primaries[body as usize]
    }

    pub fn primary_mut(&mut self, body: Primary) -> &mut PrimaryNode {
        &mut self.primaries[body as usize]
    }

    pub fn primaries(&self) -> &[PrimaryNode] {
        &self.primaries
    }

    pub fn moons(&self) -> &[MoonNode] {
        &self.moons
    }

    pub fn moon(&self, name: &str) -> Option<&MoonNode> {
        self.moons
            .iter()
            .find(|node| node.moon.name.eq_ignore_ascii_case(name))
    }

    pub fn moon_mut(&mut self, name: &str) -> Option<&mut MoonNode> {
        self.moons
            .iter_mut()
            .find(|node| node.moon.name.eq_ignore_ascii_case(name))
    }

    pub fn comets(&self) -> &[CometNode] {
        &self.comets
    }

    pub fn comet(&self, name: &str) -> Option<&CometNode> {
        self.comets
            .iter()
            .find(|node| node.comet.name.eq_ignore_ascii_case(name))
    }

    pub fn comet_mut(&mut self, name: &str) -> Option<&mut CometNode> {
        self.comets
            .iter_mut()
            .find(|node| node.comet.name.eq_ignore_ascii_case(name))
    }
}

/// Spin phase at startup: Earth is locked to sidereal time, and the
/// other inner planets carry the same phase scaled by the ratio of
/// Earth's day to theirs (negated for Mercury and retrograde Venus).
fn initial_spin(body: Primary, gmst: f64) -> f64 {
    let earth_period = Primary::Earth.rotation_period();
    match body {
        Primary::Earth => (gmst + 180.0).rem_euclid(360.0),
        Primary::Mars => {
            (gmst * (earth_period / Primary::Mars.rotation_period())).rem_euclid(360.0)
        }
        Primary::Mercury | Primary::Venus => {
            (-(gmst * (earth_period / body.rotation_period().abs()))).rem_euclid(360.0)
        }
        _ => 0.0,
    }
}

/// Advance a spin phase by `360 / period * dt_sim` degrees, wrapped
/// into `[0, 360)`. Negative periods spin retrograde; a zero period
/// does not spin.
fn advance_spin(rotation: &mut RotationState, period: f64, dt_sim: f64) {
    if period != 0.0 {
        rotation.spin = (rotation.spin + 360.0 / period * dt_sim).rem_euclid(360.0);
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use time::{Date, Month, PrimitiveDateTime, Time};

    use super::*;

    /// Midnight UTC on 2020-01-01, JD 2458849.5: the moon catalog's
    /// element epoch, so moons start exactly at their tabulated state.
    fn fixed_clock() -> SimulationClock {
        SimulationClock::starting_at(
            PrimitiveDateTime::new(
                Date::from_calendar_date(2020, Month::January, 1).unwrap(),
                Time::MIDNIGHT,
            )
            .assume_utc(),
        )
    }

    #[test]
    fn initialization_places_every_body() {
        let sim = Simulation::new(fixed_clock(), SchedulerConfig::default());
        assert_eq!(sim.primaries().len(), Primary::ALL.len());
        assert_eq!(sim.moons().len(), bodies::moons().len());
        assert_eq!(sim.comets().len(), bodies::comets().len());
        for node in sim.primaries() {
            assert!(node.position.norm() > 1.0e6, "{}", node.body.name());
            assert!(
                node.position.iter().all(|x| x.is_finite()),
                "{}",
                node.body.name()
            );
        }
        for node in sim.comets() {
            assert!(node.position.norm() > 0.0, "{}", node.comet.name);
        }
    }

    #[test]
    fn primary_nodes_follow_catalog_order() {
        let sim = Simulation::new(fixed_clock(), SchedulerConfig::default());
        for (index, body) in Primary::ALL.iter().enumerate() {
            assert_eq!(sim.primaries()[index].body, *body);
            assert_eq!(sim.primary(*body).body, *body);
        }
    }

    #[test]
    fn initial_spins_are_phase_locked_to_sidereal_time() {
        let sim = Simulation::new(fixed_clock(), SchedulerConfig::default());
        let gmst = gmst_from_julian_day(sim.clock().julian_day());
        let earth_period = Primary::Earth.rotation_period();

        assert_relative_eq!(
            sim.primary(Primary::Earth).rotation.spin,
            (gmst + 180.0).rem_euclid(360.0),
            epsilon = 1e-9
        );
        assert_relative_eq!(
            sim.primary(Primary::Mars).rotation.spin,
            (gmst * (earth_period / Primary::Mars.rotation_period())).rem_euclid(360.0),
            epsilon = 1e-9
        );
        assert_relative_eq!(
            sim.primary(Primary::Venus).rotation.spin,
            (-(gmst * (earth_period / Primary::Venus.rotation_period().abs())))
                .rem_euclid(360.0),
            epsilon = 1e-9
        );
        assert_eq!(sim.primary(Primary::Neptune).rotation.spin, 0.0);
        assert_relative_eq!(sim.primary(Primary::Earth).rotation.tilt, 23.44);
        assert_relative_eq!(sim.sun().rotation.tilt, SUN_AXIAL_TILT_DEG);
    }

    #[test]
    fn moons_start_tidally_locked() {
        let sim = Simulation::new(fixed_clock(), SchedulerConfig::default());
        for name in ["Io", "Titan", "Moon", "Triton"] {
            let node = sim.moon(name).unwrap();
            assert_relative_eq!(
                node.rotation.spin,
                node.true_anomaly.rem_euclid(360.0),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn zero_delta_tick_freezes_the_scene() {
        let mut sim = Simulation::new(fixed_clock(), SchedulerConfig::default());
        sim.clock_mut().set_time_scale(86_400.0);
        sim.tick(0.05);

        let before = sim.clone();
        let report = sim.tick(0.0);
        assert_eq!(report.sim_delta, 0.0);
        assert_eq!(report.failed_bodies, 0);
        assert_eq!(sim.sun().position, before.sun().position);
        for (now, then) in sim.primaries().iter().zip(before.primaries()) {
            assert_eq!(now.position, then.position);
            assert_eq!(now.rotation.spin, then.rotation.spin);
        }
        for (now, then) in sim.moons().iter().zip(before.moons()) {
            assert_eq!(now.position, then.position);
        }
        for (now, then) in sim.comets().iter().zip(before.comets()) {
            assert_eq!(now.position, then.position);
        }
    }

    #[test]
    fn tick_moves_bodies_and_reports_the_clock() {
        let mut sim = Simulation::new(fixed_clock(), SchedulerConfig::default());
        sim.clock_mut().set_time_scale(30.0 * 86_400.0 / 0.1);

        let earth_before = sim.primary(Primary::Earth).position;
        let report = sim.tick(0.1);
        assert_relative_eq!(report.sim_delta, 30.0 * 86_400.0);
        assert_relative_eq!(report.julian_day, sim.clock().julian_day());
        assert_relative_eq!(report.julian_day, 2_458_849.5 + 30.0, epsilon = 1e-9);
        // A month moves Earth by a distinct fraction of its orbit.
        let moved = (sim.primary(Primary::Earth).position - earth_before).norm();
        assert!(moved > 1.0e7, "earth moved only {moved} km");
    }

    #[test]
    fn moon_rides_its_moving_parent() {
        let config = SchedulerConfig {
            position_blend: 1.0,
            tiny_orbit_scale: 1.0,
            ..SchedulerConfig::default()
        };
        let mut sim = Simulation::new(fixed_clock(), config);
        sim.clock_mut().set_time_scale(86_400.0);
        for _ in 0..5 {
            sim.tick(0.05);
        }

        let jd = sim.clock().julian_day();
        for (name, parent) in [("Io", Primary::Jupiter), ("Moon", Primary::Earth)] {
            let node = sim.moon(name).unwrap();
            let offset = node.elements.state_at(parent.mu(), jd).unwrap();
            let parent_node = sim.primary(parent);
            assert_relative_eq!(
                node.position,
                parent_node.position + offset.position,
                max_relative = 1e-12
            );
            assert_relative_eq!(
                node.velocity,
                parent_node.velocity + offset.velocity,
                max_relative = 1e-9
            );
            // Anchored to the parent, nowhere near a heliocentric orbit
            // of its own.
            assert!((node.position - parent_node.position).norm() < 3.0e6);
        }
    }

    #[test]
    fn close_in_moons_orbit_on_a_damped_timescale() {
        let config = SchedulerConfig {
            position_blend: 1.0,
            ..SchedulerConfig::default()
        };
        let mut sim = Simulation::new(fixed_clock(), config);
        sim.clock_mut().set_time_scale(86_400.0);
        sim.tick(0.1);

        let jd = sim.clock().julian_day();
        let node = sim.moon("Metis").unwrap();
        assert!(node.elements.a < config.tiny_orbit_threshold_km);
        let eval_jd =
            node.elements.epoch + (jd - node.elements.epoch) * config.tiny_orbit_scale;
        let expected = node
            .elements
            .state_at(Primary::Jupiter.mu(), eval_jd)
            .unwrap();
        assert_relative_eq!(
            node.position,
            sim.primary(Primary::Jupiter).position + expected.position,
            max_relative = 1e-12
        );
    }

    #[test]
    fn sun_sits_at_the_two_term_barycentric_offset() {
        let sim = Simulation::new(fixed_clock(), SchedulerConfig::default());
        let mass_j = Primary::Jupiter.mu() / GM_SUN;
        let mass_s = Primary::Saturn.mu() / GM_SUN;
        let expected = (mass_j * sim.primary(Primary::Jupiter).position
            + mass_s * sim.primary(Primary::Saturn).position)
            / (1.0 + mass_j + mass_s);
        assert_relative_eq!(sim.sun().position, expected);
        // Offset on the order of a solar radius or two, never AU.
        let norm = sim.sun().position.norm();
        assert!(
            norm > 0.1 * bodies::SUN_RADIUS_KM && norm < 3.0 * bodies::SUN_RADIUS_KM,
            "wobble {norm} km"
        );
    }

    #[test]
    fn spins_advance_wrapped_and_retrograde() {
        let mut sim = Simulation::new(fixed_clock(), SchedulerConfig::default());
        sim.clock_mut().set_time_scale(36_000.0);

        let earth_before = sim.primary(Primary::Earth).rotation.spin;
        let venus_before = sim.primary(Primary::Venus).rotation.spin;
        sim.tick(0.1);

        let earth_delta = 360.0 / Primary::Earth.rotation_period() * 3600.0;
        assert_relative_eq!(
            sim.primary(Primary::Earth).rotation.spin,
            (earth_before + earth_delta).rem_euclid(360.0),
            epsilon = 1e-9
        );
        let venus_delta = 360.0 / Primary::Venus.rotation_period() * 3600.0;
        assert!(venus_delta < 0.0);
        assert_relative_eq!(
            sim.primary(Primary::Venus).rotation.spin,
            (venus_before + venus_delta).rem_euclid(360.0),
            epsilon = 1e-9
        );

        for _ in 0..100 {
            sim.tick(0.1);
        }
        for node in sim.primaries() {
            assert!(
                (0.0..360.0).contains(&node.rotation.spin),
                "{} spin {}",
                node.body.name(),
                node.rotation.spin
            );
        }
    }

    #[test]
    fn synchronous_moons_spin_with_their_orbit() {
        let mut sim = Simulation::new(fixed_clock(), SchedulerConfig::default());
        sim.clock_mut().set_time_scale(36_000.0);

        let io_period = sim.moon("Io").unwrap().rotation_period;
        assert_relative_eq!(
            io_period,
            sim.moon("Io")
                .unwrap()
                .elements
                .period(Primary::Jupiter.mu())
                .unwrap(),
            max_relative = 1e-12
        );

        let io_before = sim.moon("Io").unwrap().rotation.spin;
        let metis_before = sim.moon("Metis").unwrap().rotation.spin;
        let metis_period = sim.moon("Metis").unwrap().rotation_period;
        sim.tick(0.1);

        // Io is outside the damping threshold: full-rate spin.
        assert_relative_eq!(
            sim.moon("Io").unwrap().rotation.spin,
            (io_before + 360.0 / io_period * 3600.0).rem_euclid(360.0),
            epsilon = 1e-9
        );
        // Metis orbits damped, so its tidally locked spin slows by the
        // same factor.
        let scale = sim.config().tiny_orbit_scale;
        assert_relative_eq!(
            sim.moon("Metis").unwrap().rotation.spin,
            (metis_before + 360.0 / (metis_period / scale) * 3600.0).rem_euclid(360.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn spin_matching_can_be_disabled() {
        let mut sim = Simulation::new(fixed_clock(), SchedulerConfig::default());
        sim.clock_mut().set_time_scale(36_000.0);
        sim.config_mut().match_spin_to_orbit_scale = false;

        let metis_before = sim.moon("Metis").unwrap().rotation.spin;
        let metis_period = sim.moon("Metis").unwrap().rotation_period;
        sim.tick(0.1);

        // The orbit is still damped, but the spin runs at full rate.
        assert_relative_eq!(
            sim.moon("Metis").unwrap().rotation.spin,
            (metis_before + 360.0 / metis_period * 3600.0).rem_euclid(360.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn failed_bodies_keep_their_last_state() {
        let mut sim = Simulation::new(fixed_clock(), SchedulerConfig::default());
        sim.clock_mut().set_time_scale(86_400.0);
        sim.tick(0.05);

        sim.primary_mut(Primary::Mars).elements.e = -0.25;
        sim.moon_mut("Io").unwrap().elements.e = f64::NAN;
        sim.comet_mut("Halley").unwrap().elements.a = 0.0;
        let mars_before = sim.primary(Primary::Mars).position;
        let io_before = sim.moon("Io").unwrap().position;
        let halley_before = sim.comet("Halley").unwrap().position;
        let earth_before = sim.primary(Primary::Earth).position;

        let report = sim.tick(0.05);
        assert_eq!(report.failed_bodies, 3);
        assert_eq!(sim.primary(Primary::Mars).position, mars_before);
        assert_eq!(sim.moon("Io").unwrap().position, io_before);
        assert_eq!(sim.comet("Halley").unwrap().position, halley_before);
        assert_ne!(sim.primary(Primary::Earth).position, earth_before);

        // The failure is not sticky: restore the record and the body
        // catches up next tick.
        sim.primary_mut(Primary::Mars).elements = Primary::Mars.elements();
        let report = sim.tick(0.05);
        assert_eq!(report.failed_bodies, 2);
        assert_ne!(sim.primary(Primary::Mars).position, mars_before);
    }

    #[test]
    fn comet_positions_smooth_toward_the_evaluated_state() {
        let mut sim = Simulation::new(fixed_clock(), SchedulerConfig::default());
        sim.clock_mut().set_time_scale(86_400.0);

        let halley_before = sim.comet("Halley").unwrap().position;
        sim.tick(0.1);
        let jd = sim.clock().julian_day();
        let node = sim.comet("Halley").unwrap();
        let evaluated = node.elements.state_at(GM_SUN, jd).unwrap();
        let blend = sim.config().position_blend;
        assert_relative_eq!(
            node.position,
            halley_before.lerp(&evaluated.position, blend),
            max_relative = 1e-12
        );
    }
}
