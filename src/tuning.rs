//! Game balance knobs.
//!
//! Units are logical pixels and ticks; gravity is a per-tick velocity change.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct Tuning {
    /// Added to velocity every tick
    pub gravity: f64,
    /// Velocity set by a tap (negative is up)
    pub flap_velocity: f64,
    /// Fixed horizontal position of the ball
    pub avatar_x: f64,
    /// Ball diameter; collisions use half of it
    pub avatar_size: f64,
    pub pipe_width: f64,
    pub pipe_spacing: f64,
    /// Gap height at the start of the process
    pub initial_gap: f64,
    pub min_gap: f64,
    pub gap_step: f64,
    /// Pipe speed at the start of the process, pixels per tick
    pub initial_speed: f64,
    pub speed_step: f64,
    /// Difficulty steps up whenever score is a multiple of this
    pub difficulty_every: u32,
    /// Minimum distance of a gap from the top and bottom edges
    pub gap_margin: f64,
    pub tick_rate: u32,
    /// Lives in easy mode; hard mode always ends on the first hit
    pub easy_lives: u32,
    /// Restore speed and gap on restart. Off keeps the difficulty reached
    /// by the previous run.
    pub reset_difficulty_on_restart: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.7,
            flap_velocity: -12.0,
            avatar_x: 50.0,
            avatar_size: 30.0,
            pipe_width: 80.0,
            pipe_spacing: 300.0,
            initial_gap: 150.0,
            min_gap: 100.0,
            gap_step: 10.0,
            initial_speed: 6.0,
            speed_step: 1.0,
            difficulty_every: 5,
            gap_margin: 50.0,
            tick_rate: 30,
            easy_lives: 3,
            reset_difficulty_on_restart: false,
        }
    }
}

impl Tuning {
    /// Collision radius, truncated to whole pixels
    pub fn avatar_radius(&self) -> f64 {
        (self.avatar_size / 2.0).floor()
    }

    pub fn tick(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let t = Tuning::default();
        assert_eq!(t.avatar_radius(), 15.0);
        assert_eq!(t.tick(), Duration::from_nanos(33_333_333));
        assert!(!t.reset_difficulty_on_restart);
    }
}
