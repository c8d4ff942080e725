//! Vehicle flight controller: a charged vertical takeoff followed by free
//! flight with smoothed thrust and mouse-look.
//!
//! The controller never owns the physics body. Each entry point borrows it
//! for the duration of the call and does nothing when it is missing.

use engine_core::{forward, right, EulerRot, Quat, Vec3};
use input::InputSnapshot;
use physics::VehicleBody;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::rotation::RotationModel;

/// Movement, takeoff, and look tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightConfig {
    #[serde(default = "default_forward_speed")]
    pub forward_speed: f32,
    #[serde(default = "default_strafe_speed")]
    pub strafe_speed: f32,
    /// Forward speed multiplier while boost and forward are both held.
    #[serde(default = "default_boost_multiplier")]
    pub boost_multiplier: f32,
    /// Height gained during the takeoff lift.
    #[serde(default = "default_takeoff_height")]
    pub takeoff_height: f32,
    /// Seconds the takeoff key must be held before lifting off.
    #[serde(default = "default_takeoff_charge_duration")]
    pub takeoff_charge_duration: f32,
    /// Seconds the lift itself takes.
    #[serde(default = "default_lift_duration")]
    pub lift_duration: f32,
    #[serde(default = "default_sensitivity")]
    pub horizontal_sensitivity: f32,
    #[serde(default = "default_sensitivity")]
    pub vertical_sensitivity: f32,
    #[serde(default = "default_rotation_smoothing")]
    pub rotation_smoothing: f32,
    #[serde(default = "default_roll_speed")]
    pub roll_speed: f32,
    #[serde(default)]
    pub invert_y: bool,
    /// Velocity blend rate toward the thrust target, per second.
    #[serde(default = "default_thrust_blend_rate")]
    pub thrust_blend_rate: f32,
    /// Velocity blend rate toward rest while braking, per second.
    #[serde(default = "default_brake_blend_rate")]
    pub brake_blend_rate: f32,
    #[serde(default = "default_pitch_limit")]
    pub pitch_limit: f32,
}

fn default_forward_speed() -> f32 {
    50.0
}
fn default_strafe_speed() -> f32 {
    30.0
}
fn default_boost_multiplier() -> f32 {
    2.0
}
fn default_takeoff_height() -> f32 {
    15.0
}
fn default_takeoff_charge_duration() -> f32 {
    5.0
}
fn default_lift_duration() -> f32 {
    3.0
}
fn default_sensitivity() -> f32 {
    0.1
}
fn default_rotation_smoothing() -> f32 {
    25.0
}
fn default_roll_speed() -> f32 {
    60.0
}
fn default_thrust_blend_rate() -> f32 {
    2.0
}
fn default_brake_blend_rate() -> f32 {
    5.0
}
fn default_pitch_limit() -> f32 {
    89.0
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            forward_speed: default_forward_speed(),
            strafe_speed: default_strafe_speed(),
            boost_multiplier: default_boost_multiplier(),
            takeoff_height: default_takeoff_height(),
            takeoff_charge_duration: default_takeoff_charge_duration(),
            lift_duration: default_lift_duration(),
            horizontal_sensitivity: default_sensitivity(),
            vertical_sensitivity: default_sensitivity(),
            rotation_smoothing: default_rotation_smoothing(),
            roll_speed: default_roll_speed(),
            invert_y: false,
            thrust_blend_rate: default_thrust_blend_rate(),
            brake_blend_rate: default_brake_blend_rate(),
            pitch_limit: default_pitch_limit(),
        }
    }
}

impl FlightConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("lift_duration", self.lift_duration),
            ("rotation_smoothing", self.rotation_smoothing),
            ("thrust_blend_rate", self.thrust_blend_rate),
            ("brake_blend_rate", self.brake_blend_rate),
        ];
        let non_negative = [
            ("forward_speed", self.forward_speed),
            ("strafe_speed", self.strafe_speed),
            ("boost_multiplier", self.boost_multiplier),
            ("takeoff_height", self.takeoff_height),
            ("takeoff_charge_duration", self.takeoff_charge_duration),
            ("horizontal_sensitivity", self.horizontal_sensitivity),
            ("vertical_sensitivity", self.vertical_sensitivity),
            ("roll_speed", self.roll_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidFlight { name, value });
            }
        }
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidFlight { name, value });
            }
        }
        if !(self.pitch_limit > 0.0 && self.pitch_limit < 90.0) {
            return Err(ConfigError::InvalidFlight {
                name: "pitch_limit",
                value: self.pitch_limit,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlightPhase {
    #[default]
    Grounded,
    TakingOff,
    Flying,
}

/// Progress of the vertical lift, advanced once per variable tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TakeoffSequence {
    pub start: Vec3,
    pub target: Vec3,
    pub elapsed: f32,
}

/// Everything the controller knows about the vehicle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleState {
    pub position: Vec3,
    pub orientation: Quat,
    pub velocity: Vec3,
    /// Accumulated pitch in degrees.
    pub pitch: f32,
    pub phase: FlightPhase,
    /// Seconds the takeoff key has been held continuously.
    pub takeoff_charge: f32,
    /// Set only while taking off.
    pub takeoff: Option<TakeoffSequence>,
}

impl VehicleState {
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
            velocity: Vec3::ZERO,
            pitch: 0.0,
            phase: FlightPhase::Grounded,
            takeoff_charge: 0.0,
            takeoff: None,
        }
    }
}

/// Pitch in degrees as seen in an orientation, wrapped to [-180, 180).
fn pitch_of(orientation: Quat) -> f32 {
    let (_, pitch, _) = orientation.to_euler(EulerRot::YXZ);
    let mut degrees = pitch.to_degrees();
    if degrees >= 180.0 {
        degrees -= 360.0;
    } else if degrees < -180.0 {
        degrees += 360.0;
    }
    degrees
}

pub struct FlightController {
    config: FlightConfig,
    rotation: RotationModel,
    state: VehicleState,
}

impl FlightController {
    pub fn new(config: FlightConfig, position: Vec3, orientation: Quat) -> Self {
        Self {
            rotation: RotationModel::from_config(&config),
            config,
            state: VehicleState::new(position, orientation),
        }
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    pub fn phase(&self) -> FlightPhase {
        self.state.phase
    }

    /// Variable-rate tick: takeoff charging and the lift sequence.
    pub fn update(&mut self, dt: f32, input: &InputSnapshot, body: Option<&mut dyn VehicleBody>) {
        let Some(body) = body else {
            return;
        };

        match self.state.phase {
            FlightPhase::Grounded => self.charge_takeoff(dt, input, body),
            FlightPhase::TakingOff => self.advance_takeoff(dt, body),
            FlightPhase::Flying => {}
        }
        self.sync_pose(body);
    }

    /// Fixed-rate tick: thrust and, while control is captured, mouse-look.
    pub fn fixed_update(
        &mut self,
        dt: f32,
        input: &InputSnapshot,
        control_captured: bool,
        body: Option<&mut dyn VehicleBody>,
    ) {
        let Some(body) = body else {
            return;
        };

        if self.state.phase == FlightPhase::Flying {
            self.apply_thrust(dt, input, body);
            if control_captured {
                let current = body.rotation();
                let applied = self.rotation.step(current, &mut self.state.pitch, input, dt);
                body.set_rotation(applied);
            }
        }
        self.sync_pose(body);
    }

    /// Copy the body's pose into the vehicle state.
    pub fn sync_pose(&mut self, body: &dyn VehicleBody) {
        self.state.position = body.position();
        self.state.orientation = body.rotation();
        self.state.velocity = body.linear_velocity();
    }

    fn charge_takeoff(&mut self, dt: f32, input: &InputSnapshot, body: &mut dyn VehicleBody) {
        if !input.takeoff_hold {
            self.state.takeoff_charge = 0.0;
            return;
        }

        self.state.takeoff_charge += dt;
        if self.state.takeoff_charge >= self.config.takeoff_charge_duration {
            self.begin_takeoff(body);
        }
    }

    fn begin_takeoff(&mut self, body: &mut dyn VehicleBody) {
        let start = body.position();
        let target = start + Vec3::Y * self.config.takeoff_height;

        body.set_kinematic(true);
        body.set_linear_velocity(Vec3::ZERO);

        self.state.takeoff_charge = 0.0;
        self.state.takeoff = Some(TakeoffSequence {
            start,
            target,
            elapsed: 0.0,
        });
        self.state.phase = FlightPhase::TakingOff;
        log::info!(
            "Takeoff: lifting {} units over {}s",
            self.config.takeoff_height,
            self.config.lift_duration
        );
    }

    fn advance_takeoff(&mut self, dt: f32, body: &mut dyn VehicleBody) {
        let Some(mut takeoff) = self.state.takeoff else {
            return;
        };

        takeoff.elapsed += dt;
        if takeoff.elapsed < self.config.lift_duration {
            let t = takeoff.elapsed / self.config.lift_duration;
            body.set_position(takeoff.start.lerp(takeoff.target, t));
            self.state.takeoff = Some(takeoff);
            return;
        }

        body.set_position(takeoff.target);
        body.set_kinematic(false);
        self.state.takeoff = None;
        self.state.phase = FlightPhase::Flying;

        let limit = self.config.pitch_limit;
        self.state.pitch = pitch_of(body.rotation()).clamp(-limit, limit);
        log::info!("Airborne at {} (pitch {:.1})", takeoff.target, self.state.pitch);
    }

    fn apply_thrust(&mut self, dt: f32, input: &InputSnapshot, body: &mut dyn VehicleBody) {
        let rotation = body.rotation();

        let mut speed = self.config.forward_speed;
        if input.boost && input.forward {
            speed *= self.config.boost_multiplier;
        }
        let forward_speed = if input.forward { speed } else { 0.0 };

        let mut strafe = 0.0;
        if input.strafe_left {
            strafe = -self.config.strafe_speed;
        }
        if input.strafe_right {
            strafe = self.config.strafe_speed;
        }

        let current = body.linear_velocity();
        let velocity = if input.brake {
            let t = (dt * self.config.brake_blend_rate).min(1.0);
            current.lerp(Vec3::ZERO, t)
        } else {
            let target = forward(rotation) * forward_speed + right(rotation) * strafe;
            let t = (dt * self.config.thrust_blend_rate).min(1.0);
            current.lerp(target, t)
        };
        body.set_linear_velocity(velocity);
    }
}
