use bevy::log::debug;
use serde::{Deserialize, Serialize};

use crate::lighting::{lighting_at, LightingParams, Period};

/// Default length of one in-game day in real seconds.
pub const DEFAULT_DAY_LENGTH: f32 = 600.0;

/// Shortest day accepted; shorter settings are clamped to this.
pub const MIN_DAY_LENGTH: f32 = 1.0;

/// Wall clock hour shown at time zero.
const CLOCK_START_HOUR: f32 = 6.0;

fn clamp_day_length(seconds: f32) -> f32 {
    if seconds.is_finite() {
        seconds.max(MIN_DAY_LENGTH)
    } else {
        DEFAULT_DAY_LENGTH
    }
}

/// Day/night cycle state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayNightCycle {
    /// Fraction of the current day, in [0, 1).
    time: f32,
    /// Real seconds per in-game day.
    day_length: f32,
    /// Day number (starts at 1).
    day: u32,
    paused: bool,
    /// 1.0 = normal speed.
    time_scale: f32,
}

impl Default for DayNightCycle {
    fn default() -> Self {
        Self::new(DEFAULT_DAY_LENGTH)
    }
}

impl DayNightCycle {
    /// Start at the beginning of day 1.
    pub fn new(day_length: f32) -> Self {
        Self {
            time: 0.0,
            day_length: clamp_day_length(day_length),
            day: 1,
            paused: false,
            time_scale: 1.0,
        }
    }

    /// Advance by `delta_seconds` of real time.
    /// Returns true if a new day started.
    ///
    /// Wrapping subtracts whole days so the fractional overshoot carries over.
    pub fn advance(&mut self, delta_seconds: f32) -> bool {
        if self.paused || !delta_seconds.is_finite() || delta_seconds <= 0.0 {
            return false;
        }

        let step = delta_seconds * self.time_scale / self.day_length;
        if !step.is_finite() {
            return false;
        }

        let before = self.period();
        self.time += step;

        let whole_days = self.time.floor();
        let new_day = whole_days >= 1.0;
        if new_day {
            self.time -= whole_days;
            self.day = self.day.saturating_add(whole_days as u32);
        }

        let after = self.period();
        if before != after {
            debug!("Day {}: {} begins", self.day, after.name());
        }
        new_day
    }

    /// Current time of day in [0, 1).
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Jump to a time of day; values outside [0, 1) wrap.
    pub fn set_time(&mut self, time: f32) {
        let wrapped = time.rem_euclid(1.0);
        self.time = if wrapped >= 1.0 { 0.0 } else { wrapped };
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn day_length(&self) -> f32 {
        self.day_length
    }

    pub fn set_day_length(&mut self, seconds: f32) {
        self.day_length = clamp_day_length(seconds);
    }

    pub fn period(&self) -> Period {
        Period::from_time(self.time)
    }

    pub fn is_night(&self) -> bool {
        self.period() == Period::Night
    }

    /// Lighting for the exact current time.
    pub fn lighting(&self) -> LightingParams {
        lighting_at(self.time)
    }

    /// Formatted wall clock time (HH:MM).
    pub fn clock_string(&self) -> String {
        let hours = (self.time * 24.0 + CLOCK_START_HOUR) % 24.0;
        let minutes = (hours.fract() * 60.0) as u32;
        format!("{:02}:{:02}", hours as u32, minutes)
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Negative scales are clamped to zero.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advancing_scales_by_day_length() {
        let mut cycle = DayNightCycle::new(100.0);
        assert!(!cycle.advance(25.0));
        assert!((cycle.time() - 0.25).abs() < 1e-6);
        assert_eq!(cycle.day(), 1);
    }

    #[test]
    fn wrap_keeps_fractional_carry() {
        let mut cycle = DayNightCycle::new(100.0);
        cycle.set_time(0.95);
        assert!(cycle.advance(10.0));
        assert!((cycle.time() - 0.05).abs() < 1e-5);
        assert_eq!(cycle.day(), 2);
    }

    #[test]
    fn degenerate_day_length_is_clamped() {
        let mut cycle = DayNightCycle::new(0.0);
        assert_eq!(cycle.day_length(), MIN_DAY_LENGTH);
        assert!(cycle.advance(3.0));
        assert_eq!(cycle.day(), 4);
        assert_eq!(cycle.time(), 0.0);

        cycle.set_day_length(f32::NAN);
        assert_eq!(cycle.day_length(), DEFAULT_DAY_LENGTH);
    }

    #[test]
    fn huge_step_wraps_in_one_go() {
        let mut cycle = DayNightCycle::new(1.0);
        assert!(cycle.advance(1.0e9));
        assert!((0.0..1.0).contains(&cycle.time()));
        assert_eq!(cycle.day(), 1_000_000_001);

        cycle.set_time_scale(1.0e20);
        assert!(cycle.advance(1.0e9));
        assert_eq!(cycle.day(), u32::MAX);
        assert!((0.0..1.0).contains(&cycle.time()));

        assert!(!cycle.advance(f32::INFINITY));
        cycle.set_time_scale(1.0e35);
        assert!(!cycle.advance(1.0e9));
        assert!((0.0..1.0).contains(&cycle.time()));
    }

    #[test]
    fn paused_or_stopped_cycle_holds() {
        let mut cycle = DayNightCycle::new(100.0);
        cycle.set_paused(true);
        cycle.advance(50.0);
        assert_eq!(cycle.time(), 0.0);

        cycle.set_paused(false);
        cycle.set_time_scale(-3.0);
        cycle.advance(50.0);
        assert_eq!(cycle.time(), 0.0);

        cycle.set_time_scale(2.0);
        cycle.advance(10.0);
        assert!((cycle.time() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn set_time_wraps() {
        let mut cycle = DayNightCycle::default();
        cycle.set_time(1.25);
        assert!((cycle.time() - 0.25).abs() < 1e-6);
        cycle.set_time(-0.25);
        assert!((cycle.time() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn clock_and_night() {
        let mut cycle = DayNightCycle::default();
        assert_eq!(cycle.clock_string(), "06:00");
        assert!(!cycle.is_night());
        cycle.set_time(0.5);
        assert_eq!(cycle.clock_string(), "18:00");
        assert!(cycle.is_night());
        cycle.set_time(0.875);
        assert_eq!(cycle.clock_string(), "03:00");
    }

    #[test]
    fn lighting_tracks_time() {
        let mut cycle = DayNightCycle::default();
        cycle.set_time(0.7);
        assert_eq!(cycle.lighting(), LightingParams::NIGHT);
        assert_eq!(cycle.period(), Period::Night);
    }
}
