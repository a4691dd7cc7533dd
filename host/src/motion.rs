use serde::{Deserialize, Serialize};

use crate::{WorldPos, is_nearly_zero};

/// Velocities below this magnitude snap to rest.
const REST_THRESHOLD: f32 = 0.1;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionSettings {
    /// World units per second at full axis input.
    pub speed_multiplier: f32,
    /// Fraction of velocity lost every tick.
    pub deceleration: f32,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            speed_multiplier: 20.0,
            deceleration: 0.2,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Smoothed player movement: axis input sets a velocity that decays every tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Motion {
    settings: MotionSettings,
    velocity: (f32, f32),
}

impl Motion {
    pub fn new(settings: MotionSettings) -> Self {
        Self {
            settings,
            velocity: (0.0, 0.0),
        }
    }

    pub fn settings(&self) -> MotionSettings {
        self.settings
    }

    pub fn velocity(&self) -> (f32, f32) {
        self.velocity
    }

    pub fn is_at_rest(&self) -> bool {
        is_nearly_zero(self.velocity.0) && is_nearly_zero(self.velocity.1)
    }

    /// Feeds one axis input, nearly-zero values leave the current velocity alone.
    pub fn apply_axis(&mut self, axis: Axis, value: f32) {
        if is_nearly_zero(value) || value.is_nan() {
            return;
        }

        let value = value.clamp(-1.0, 1.0);
        match axis {
            Axis::X => self.velocity.0 = value,
            Axis::Y => self.velocity.1 = value,
        }
    }

    /// Advances `position` by one tick of `dt` seconds, then decays the velocity.
    pub fn tick(&mut self, position: WorldPos, dt: f32) -> WorldPos {
        let mut position = position;

        if !self.is_at_rest() {
            position.x += self.velocity.0 * self.settings.speed_multiplier * dt;
            position.y += self.velocity.1 * self.settings.speed_multiplier * dt;
        }

        let keep = 1.0 - self.settings.deceleration.clamp(0.0, 1.0);
        self.velocity.0 = Self::decay(self.velocity.0, keep);
        self.velocity.1 = Self::decay(self.velocity.1, keep);

        position
    }

    pub fn stop(&mut self) {
        self.velocity = (0.0, 0.0);
    }

    fn decay(speed: f32, keep: f32) -> f32 {
        if is_nearly_zero(speed) {
            return speed;
        }
        let speed = speed * keep;
        if speed.abs() < REST_THRESHOLD { 0.0 } else { speed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_input_is_clamped() {
        let mut motion = Motion::new(MotionSettings::default());

        motion.apply_axis(Axis::X, 3.0);
        motion.apply_axis(Axis::Y, -0.5);

        assert_eq!(motion.velocity(), (1.0, -0.5));
    }

    #[test]
    fn zero_input_keeps_velocity() {
        let mut motion = Motion::new(MotionSettings::default());
        motion.apply_axis(Axis::X, 1.0);

        motion.apply_axis(Axis::X, 0.0);

        assert_eq!(motion.velocity(), (1.0, 0.0));
    }

    #[test]
    fn tick_moves_then_decays() {
        let mut motion = Motion::new(MotionSettings::default());
        motion.apply_axis(Axis::X, 1.0);

        let position = motion.tick(WorldPos::new(0.0, 0.0), 0.5);

        assert_eq!(position, WorldPos::new(10.0, 0.0));
        assert!((motion.velocity().0 - 0.8).abs() < 1e-6);
    }

    #[test]
    fn velocity_snaps_to_rest() {
        let mut motion = Motion::new(MotionSettings::default());
        motion.apply_axis(Axis::Y, 1.0);

        let mut ticks = 0;
        while !motion.is_at_rest() {
            motion.tick(WorldPos::default(), 1.0 / 60.0);
            ticks += 1;
            assert!(ticks < 100, "motion never settled");
        }

        // 0.8^n drops below 0.1 on the 11th tick
        assert_eq!(ticks, 11);
        assert_eq!(motion.velocity(), (0.0, 0.0));
    }

    #[test]
    fn resting_motion_does_not_move() {
        let mut motion = Motion::new(MotionSettings::default());

        assert_eq!(motion.tick(WorldPos::new(3.0, 4.0), 1.0), WorldPos::new(3.0, 4.0));
    }
}
