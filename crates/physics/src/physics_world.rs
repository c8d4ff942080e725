//! Physics world management with Rapier3D.

use crate::collision::CollisionGroup;
use crate::vehicle::{to_rotation, RapierVehicle};
use engine_core::{Quat, Vec3};
use rapier3d::na::Translation3;
use rapier3d::prelude::*;

/// Linear damping applied to the vehicle rigid body.
pub const VEHICLE_LINEAR_DAMPING: f32 = 1.5;
/// Angular damping applied to the vehicle rigid body.
pub const VEHICLE_ANGULAR_DAMPING: f32 = 2.0;

/// Main physics world containing all simulation state.
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub gravity: Vector<Real>,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub query_pipeline: QueryPipeline,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Create a new physics world with default gravity.
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            gravity: vector![0.0, -9.81, 0.0],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Set the step length used by [`PhysicsWorld::step`] (the fixed tick).
    pub fn set_timestep(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
    }

    /// Step the physics simulation by one fixed tick.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Add the player vehicle: a damped dynamic body with continuous collision
    /// detection and a ball collider.
    pub fn add_vehicle(&mut self, position: Vec3, rotation: Quat, radius: f32) -> RigidBodyHandle {
        let pose = Isometry::from_parts(
            Translation3::new(position.x, position.y, position.z),
            to_rotation(rotation),
        );
        let rigid_body = RigidBodyBuilder::dynamic()
            .position(pose)
            .linear_damping(VEHICLE_LINEAR_DAMPING)
            .angular_damping(VEHICLE_ANGULAR_DAMPING)
            .ccd_enabled(true)
            .build();
        let handle = self.rigid_body_set.insert(rigid_body);

        let collider = ColliderBuilder::ball(radius)
            .collision_groups(CollisionGroup::vehicle())
            .build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);
        log::debug!("Vehicle body added at {position}");
        handle
    }

    /// Add a ground plane collider (flat Y=0 half-space).
    pub fn add_ground_plane(&mut self) -> ColliderHandle {
        let collider = ColliderBuilder::halfspace(Vector::y_axis())
            .collision_groups(CollisionGroup::environment())
            .build();
        self.collider_set.insert(collider)
    }

    /// Borrow the vehicle body behind `handle`, or `None` if it no longer exists.
    pub fn vehicle(&mut self, handle: RigidBodyHandle) -> Option<RapierVehicle<'_>> {
        self.rigid_body_set.get_mut(handle).map(RapierVehicle::new)
    }
}
