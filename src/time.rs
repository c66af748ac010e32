//! Civil time, Julian Day conversions, GMST, and the simulation clock.

use serde::{Deserialize, Serialize};
use time::{
    error::ComponentRange, Date, Duration, Month, OffsetDateTime, PrimitiveDateTime, Time,
    UtcOffset,
};

/// The J2000.0 reference epoch (Julian Day).
pub const J2000_JD: f64 = 2_451_545.0;

/// Longest stretch of real time a single clock advance will consume
/// (seconds) unless reconfigured.
pub const DEFAULT_FRAME_CAP: f64 = 0.1;

/// Julian Day for a civil timestamp.
///
/// The timestamp is converted to UTC first; the day fraction carries
/// through to nanosecond precision.
pub fn julian_day_from_civil(instant: OffsetDateTime) -> f64 {
    let instant = instant.to_offset(UtcOffset::UTC);
    let mut year = f64::from(instant.year());
    let mut month = f64::from(u8::from(instant.month()));
    let day = f64::from(instant.day())
        + (f64::from(instant.hour())
            + (f64::from(instant.minute())
                + (f64::from(instant.second()) + f64::from(instant.nanosecond()) * 1e-9) / 60.0)
                / 60.0)
            / 24.0;

    if month <= 2.0 {
        year -= 1.0;
        month += 12.0;
    }
    let a = (year / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (year + 4716.0)).floor() + (30.6001 * (month + 1.0)).floor() + day + b - 1524.5
}

/// Civil UTC timestamp for a Julian Day.
///
/// Inverse of [`julian_day_from_civil`] to within the resolution a
/// `f64` day number can hold (tens of microseconds for current dates).
pub fn civil_from_julian_day(jd: f64) -> Result<OffsetDateTime, ComponentRange> {
    let z = (jd + 0.5).floor();
    let f = jd + 0.5 - z;

    let a = if z < 2_299_161.0 {
        z
    } else {
        let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
        z + 1.0 + alpha - (alpha / 4.0).floor()
    };
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day_with_fraction = b - d - (30.6001 * e).floor() + f;
    let day = day_with_fraction.floor();
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };

    let mut remaining = (day_with_fraction - day) * 24.0;
    let hour = remaining.floor();
    remaining = (remaining - hour) * 60.0;
    let minute = remaining.floor();
    remaining = (remaining - minute) * 60.0;
    let second = remaining.floor();
    let nanosecond = ((remaining - second) * 1e9).round().min(999_999_999.0);

    let date = Date::from_calendar_date(year as i32, Month::try_from(month as u8)?, day as u8)?;
    let time = Time::from_hms_nano(hour as u8, minute as u8, second as u8, nanosecond as u32)?;
    Ok(PrimitiveDateTime::new(date, time).assume_utc())
}

/// Greenwich Mean Sidereal Time (degrees in `[0, 360)`) for a Julian
/// Day.
pub fn gmst_from_julian_day(jd: f64) -> f64 {
    let dj = jd - J2000_JD;
    let t = dj / 36_525.0;
    (280.460_618_37 + 360.985_647_366_29 * dj + 0.000_387_933 * t * t - t * t * t / 38_710_000.0)
        .rem_euclid(360.0)
}

/// The simulated wall clock.
///
/// Each [`advance`](SimulationClock::advance) consumes at most
/// [`frame_cap`](SimulationClock::frame_cap) seconds of real time, so a
/// stalled caller resuming after a long pause does not slingshot the
/// simulation, and scales the result by the current time scale.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationClock {
    now: OffsetDateTime,
    time_scale: f64,
    frame_cap: f64,
}

/// What one clock advance produced.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeAdvance {
    /// Simulated seconds elapsed in this advance.
    pub sim_delta: f64,
    /// The clock reading after the advance.
    pub instant: OffsetDateTime,
    /// The clock reading after the advance, as a Julian Day.
    pub julian_day: f64,
}

impl SimulationClock {
    pub fn starting_at(start: OffsetDateTime) -> Self {
        Self {
            now: start,
            time_scale: 1.0,
            frame_cap: DEFAULT_FRAME_CAP,
        }
    }

    pub fn starting_now() -> Self {
        Self::starting_at(OffsetDateTime::now_utc())
    }

    pub fn instant(&self) -> OffsetDateTime {
        self.now
    }

    pub fn julian_day(&self) -> f64 {
        julian_day_from_civil(self.now)
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Set the simulated-to-real time ratio. Non-finite or negative
    /// values are ignored; the clock only runs forward.
    pub fn set_time_scale(&mut self, scale: f64) {
        if scale.is_finite() && scale >= 0.0 {
            self.time_scale = scale;
        }
    }

    pub fn frame_cap(&self) -> f64 {
        self.frame_cap
    }

    pub fn set_frame_cap(&mut self, cap: f64) {
        if cap.is_finite() && cap >= 0.0 {
            self.frame_cap = cap;
        }
    }

    /// Advance by `real_elapsed` seconds of real time, clamped into
    /// `[0, frame_cap]`, scaled by the time scale.
    pub fn advance(&mut self, real_elapsed: f64) -> TimeAdvance {
        let clamped = if real_elapsed.is_finite() {
            real_elapsed.clamp(0.0, self.frame_cap)
        } else {
            0.0
        };
        let sim_delta = clamped * self.time_scale;
        self.now += Duration::seconds_f64(sim_delta);
        TimeAdvance {
            sim_delta,
            instant: self.now,
            julian_day: julian_day_from_civil(self.now),
        }
    }
}
