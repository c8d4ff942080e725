//! Mouse-look orientation for the vehicle: unbounded yaw, clamped pitch, and
//! rate-based roll, blended in with a slerp rather than snapped.

use engine_core::{EulerRot, Quat, Vec2};
use input::InputSnapshot;

use crate::flight::FlightConfig;

/// Builds target orientations from pointer and roll input.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationModel {
    /// Degrees of yaw per pixel of horizontal pointer motion.
    pub horizontal_sensitivity: f32,
    /// Degrees of pitch per pixel of vertical pointer motion.
    pub vertical_sensitivity: f32,
    pub invert_y: bool,
    /// Roll rate in degrees per second while a roll key is held.
    pub roll_speed: f32,
    /// Slerp rate toward the target orientation, per second.
    pub smoothing: f32,
    /// Pitch is held within `[-pitch_limit, pitch_limit]` degrees.
    pub pitch_limit: f32,
}

impl RotationModel {
    pub fn from_config(config: &FlightConfig) -> Self {
        Self {
            horizontal_sensitivity: config.horizontal_sensitivity,
            vertical_sensitivity: config.vertical_sensitivity,
            invert_y: config.invert_y,
            roll_speed: config.roll_speed,
            smoothing: config.rotation_smoothing,
            pitch_limit: config.pitch_limit,
        }
    }

    /// Yaw and pitch deltas in degrees for a pointer movement.
    ///
    /// Pointer y grows downward, so moving up raises the nose unless
    /// `invert_y` is set. Moving right turns right.
    pub fn pointer_to_angles(&self, delta: Vec2) -> (f32, f32) {
        let yaw = -delta.x * self.horizontal_sensitivity;
        let pitch_input = if self.invert_y { delta.y } else { -delta.y };
        (yaw, pitch_input * self.vertical_sensitivity)
    }

    /// Roll for this tick in degrees. Right roll wins when both are held.
    pub fn roll_step(&self, roll_left: bool, roll_right: bool, dt: f32) -> f32 {
        let mut rate = 0.0;
        if roll_left {
            rate = self.roll_speed;
        }
        if roll_right {
            rate = -self.roll_speed;
        }
        rate * dt
    }

    /// Add `delta` degrees to the pitch accumulator, saturating at the limit.
    pub fn accumulate_pitch(&self, pitch: f32, delta: f32) -> f32 {
        let next = pitch + delta;
        if !next.is_finite() {
            return pitch.clamp(-self.pitch_limit, self.pitch_limit);
        }
        next.clamp(-self.pitch_limit, self.pitch_limit)
    }

    /// Orientation the vehicle should turn toward.
    ///
    /// Yaw is composed onto `current`; the result is rebuilt around the
    /// accumulated pitch so pitch never drifts from the clamped scalar, and
    /// the roll step is applied last.
    pub fn target_orientation(&self, current: Quat, pitch: f32, yaw_delta: f32, roll_delta: f32) -> Quat {
        let yawed = current * Quat::from_rotation_y(yaw_delta.to_radians());
        let (yaw, _, roll) = yawed.to_euler(EulerRot::YXZ);
        let rebuilt = Quat::from_euler(EulerRot::YXZ, yaw, pitch.to_radians(), roll);
        (rebuilt * Quat::from_rotation_z(roll_delta.to_radians())).normalize()
    }

    /// Step from `current` toward `target` at the smoothing rate.
    pub fn smooth(&self, current: Quat, target: Quat, dt: f32) -> Quat {
        let t = (dt * self.smoothing).clamp(0.0, 1.0);
        current.slerp(target, t).normalize()
    }

    /// One fixed tick of mouse-look: updates `pitch` in place and returns the
    /// orientation to apply.
    pub fn step(&self, current: Quat, pitch: &mut f32, input: &InputSnapshot, dt: f32) -> Quat {
        let (yaw_delta, pitch_delta) = self.pointer_to_angles(input.pointer_delta);
        *pitch = self.accumulate_pitch(*pitch, pitch_delta);
        let roll_delta = self.roll_step(input.roll_left, input.roll_right, dt);
        let target = self.target_orientation(current, *pitch, yaw_delta, roll_delta);
        self.smooth(current, target, dt)
    }
}
