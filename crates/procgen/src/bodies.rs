//! Spawned body records and the factory that owns their scene objects.

use engine_core::{Entity, Quat, Transform, Vec3, World};

/// Opaque handle to a spawned scene object.
pub type BodyHandle = Entity;

/// A body placed by the world generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnedBody {
    pub handle: BodyHandle,
    pub kind: usize,
    pub position: Vec3,
    pub rotation: Quat,
    /// Uniform scale on all axes.
    pub scale: f32,
    pub active: bool,
}

/// Creates and destroys the scene objects behind spawned bodies.
///
/// Every query on a destroyed handle reports the body as gone instead of
/// failing.
pub trait BodyFactory {
    fn spawn(&mut self, kind: usize, position: Vec3, rotation: Quat, scale: f32) -> BodyHandle;
    fn position(&self, handle: BodyHandle) -> Option<Vec3>;
    fn set_active(&mut self, handle: BodyHandle, active: bool);
    fn destroy(&mut self, handle: BodyHandle);
    fn is_alive(&self, handle: BodyHandle) -> bool;
}

/// Which of the configured body kinds an entity was spawned as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyKind(pub usize);

/// Whether the body is currently shown and simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visible(pub bool);

/// [`BodyFactory`] backed by an ECS world.
#[derive(Default)]
pub struct SceneBodies {
    world: World,
}

impl SceneBodies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live bodies.
    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.world.len() == 0
    }

    pub fn transform(&self, handle: BodyHandle) -> Option<Transform> {
        self.world.get::<&Transform>(handle).ok().map(|t| *t)
    }

    pub fn kind(&self, handle: BodyHandle) -> Option<usize> {
        self.world.get::<&BodyKind>(handle).ok().map(|k| k.0)
    }

    pub fn is_visible(&self, handle: BodyHandle) -> Option<bool> {
        self.world.get::<&Visible>(handle).ok().map(|v| v.0)
    }
}

impl BodyFactory for SceneBodies {
    fn spawn(&mut self, kind: usize, position: Vec3, rotation: Quat, scale: f32) -> BodyHandle {
        self.world.spawn((
            Transform::with_uniform_scale(position, rotation, scale),
            BodyKind(kind),
            Visible(true),
        ))
    }

    fn position(&self, handle: BodyHandle) -> Option<Vec3> {
        self.transform(handle).map(|t| t.position)
    }

    fn set_active(&mut self, handle: BodyHandle, active: bool) {
        if let Ok(mut visible) = self.world.get::<&mut Visible>(handle) {
            visible.0 = active;
        }
    }

    fn destroy(&mut self, handle: BodyHandle) {
        if self.world.despawn(handle).is_err() {
            log::trace!("Body {handle:?} already destroyed");
        }
    }

    fn is_alive(&self, handle: BodyHandle) -> bool {
        self.world.contains(handle)
    }
}
