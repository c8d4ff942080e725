//! Transform component and utilities for spatial positioning.

use glam::{Quat, Vec3};

/// A 3D transform representing position, rotation, and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a transform with a uniform scale on all three axes.
    pub fn with_uniform_scale(position: Vec3, rotation: Quat, scale: f32) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::splat(scale),
        }
    }
}

/// Forward axis of an orientation (negative Z).
pub fn forward(rotation: Quat) -> Vec3 {
    rotation * -Vec3::Z
}

/// Right axis of an orientation (positive X).
pub fn right(rotation: Quat) -> Vec3 {
    rotation * Vec3::X
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_axes() {
        assert_eq!(forward(Quat::IDENTITY), -Vec3::Z);
        assert_eq!(right(Quat::IDENTITY), Vec3::X);
    }

    #[test]
    fn quarter_yaw_turns_forward_left() {
        let q = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        assert!((forward(q) - -Vec3::X).length() < 1e-5);
        assert!((right(q) - -Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn uniform_scale_fills_all_axes() {
        let t = Transform::with_uniform_scale(Vec3::ONE, Quat::IDENTITY, 75.0);
        assert_eq!(t.scale, Vec3::splat(75.0));
        assert_eq!(t.position, Vec3::ONE);
    }
}
