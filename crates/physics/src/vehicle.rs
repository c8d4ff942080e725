//! The command surface a flight controller drives: velocity, orientation,
//! and a kinematic toggle used while the vehicle is lifted off the ground.

use engine_core::{Quat, Vec3};
use rapier3d::na::{Quaternion, UnitQuaternion};
use rapier3d::prelude::*;

/// Physics integrator interface for the player vehicle.
pub trait VehicleBody {
    fn position(&self) -> Vec3;
    fn rotation(&self) -> Quat;
    fn linear_velocity(&self) -> Vec3;

    fn set_linear_velocity(&mut self, velocity: Vec3);
    fn set_rotation(&mut self, rotation: Quat);
    /// Teleport the body. Used while kinematic.
    fn set_position(&mut self, position: Vec3);

    /// Switch between kinematic (position driven) and dynamic (velocity
    /// integrated) mode.
    fn set_kinematic(&mut self, kinematic: bool);
    fn is_kinematic(&self) -> bool;
}

pub(crate) fn to_rotation(q: Quat) -> Rotation<Real> {
    UnitQuaternion::new_normalize(Quaternion::new(q.w, q.x, q.y, q.z))
}

/// A rapier rigid body borrowed from a [`crate::PhysicsWorld`].
pub struct RapierVehicle<'w> {
    body: &'w mut RigidBody,
}

impl<'w> RapierVehicle<'w> {
    pub fn new(body: &'w mut RigidBody) -> Self {
        Self { body }
    }
}

impl VehicleBody for RapierVehicle<'_> {
    fn position(&self) -> Vec3 {
        let t = self.body.translation();
        Vec3::new(t.x, t.y, t.z)
    }

    fn rotation(&self) -> Quat {
        let r = self.body.rotation();
        Quat::from_xyzw(r.i, r.j, r.k, r.w)
    }

    fn linear_velocity(&self) -> Vec3 {
        let v = self.body.linvel();
        Vec3::new(v.x, v.y, v.z)
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.body
            .set_linvel(vector![velocity.x, velocity.y, velocity.z], true);
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.body.set_rotation(to_rotation(rotation), true);
    }

    fn set_position(&mut self, position: Vec3) {
        self.body
            .set_translation(vector![position.x, position.y, position.z], true);
    }

    fn set_kinematic(&mut self, kinematic: bool) {
        if kinematic {
            // Gravity stays off once the vehicle has left the ground.
            self.body.set_gravity_scale(0.0, true);
            self.body.set_linvel(Vector::zeros(), true);
            self.body.set_angvel(Vector::zeros(), true);
            self.body
                .set_body_type(RigidBodyType::KinematicPositionBased, true);
        } else {
            self.body.set_body_type(RigidBodyType::Dynamic, true);
        }
    }

    fn is_kinematic(&self) -> bool {
        self.body.is_kinematic()
    }
}
