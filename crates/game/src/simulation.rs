//! Frame driver wiring flight, physics, spawning, and cleanup together.

use engine_core::{forward, Quat, Time, Vec2, Vec3};
use input::InputSnapshot;
use physics::{PhysicsWorld, RigidBodyHandle, VehicleBody};
use procgen::{LifecycleManager, LifecycleReport, SceneBodies, WorldGenerator};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

use crate::config::{ConfigError, GameConfig};
use crate::flight::FlightController;

pub struct Simulation {
    time: Time,
    physics: PhysicsWorld,
    vehicle: RigidBodyHandle,
    flight: FlightController,
    generator: WorldGenerator,
    lifecycle: LifecycleManager,
    bodies: SceneBodies,
    rng: StdRng,
    last_report: LifecycleReport,
    /// Pointer motion not yet consumed by a fixed tick.
    pending_pointer: Vec2,
}

impl Simulation {
    /// Build the world from a validated config: ground, vehicle resting on
    /// it, and empty spawn registries.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let time = Time::with_fixed_rate(config.fixed_rate_hz);
        let mut physics = PhysicsWorld::new();
        physics.set_timestep(time.fixed_timestep_seconds());
        physics.add_ground_plane();

        let start = Vec3::new(0.0, config.vehicle_radius, 0.0);
        let vehicle = physics.add_vehicle(start, Quat::IDENTITY, config.vehicle_radius);

        let rng = match config.seed {
            Some(seed) => {
                log::info!("World seed {seed}");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            time,
            physics,
            vehicle,
            flight: FlightController::new(config.flight.clone(), start, Quat::IDENTITY),
            generator: WorldGenerator::new(config.spawner.clone(), start)?,
            lifecycle: LifecycleManager::new(config.lifecycle.clone())?,
            bodies: SceneBodies::new(),
            rng,
            last_report: LifecycleReport::default(),
            pending_pointer: Vec2::ZERO,
        })
    }

    /// Advance one frame of `dt`. `control_captured` gates mouse-look.
    ///
    /// Pointer motion is carried over until a fixed tick runs and is handed
    /// to exactly one tick, so the total turn depends only on the total
    /// motion and not on how frames line up with fixed steps. Held keys are
    /// seen by every tick of the frame.
    pub fn frame(&mut self, dt: Duration, input: &InputSnapshot, control_captured: bool) {
        self.time.advance(dt);
        let frame_dt = self.time.delta_seconds();
        self.pending_pointer += input.pointer_delta;

        {
            let mut vehicle = self.physics.vehicle(self.vehicle);
            self.flight.update(
                frame_dt,
                input,
                vehicle.as_mut().map(|v| v as &mut dyn VehicleBody),
            );
        }

        let fixed_dt = self.time.fixed_timestep_seconds();
        while self.time.should_fixed_update() {
            let tick_input = InputSnapshot {
                pointer_delta: std::mem::take(&mut self.pending_pointer),
                ..*input
            };
            {
                let mut vehicle = self.physics.vehicle(self.vehicle);
                self.flight.fixed_update(
                    fixed_dt,
                    &tick_input,
                    control_captured,
                    vehicle.as_mut().map(|v| v as &mut dyn VehicleBody),
                );
            }
            self.physics.step();
        }

        if let Some(vehicle) = self.physics.vehicle(self.vehicle) {
            self.flight.sync_pose(&vehicle);
        }

        let state = self.flight.state();
        let ship_position = state.position;
        let ship_forward = forward(state.orientation);

        self.generator
            .tick(ship_position, ship_forward, &mut self.bodies, &mut self.rng);
        self.last_report =
            self.lifecycle
                .update(ship_position, self.generator.bodies_mut(), &mut self.bodies);
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    pub fn flight(&self) -> &FlightController {
        &self.flight
    }

    pub fn generator(&self) -> &WorldGenerator {
        &self.generator
    }

    pub fn bodies(&self) -> &SceneBodies {
        &self.bodies
    }

    /// Counts from the most recent lifecycle pass.
    pub fn last_report(&self) -> LifecycleReport {
        self.last_report
    }
}
