//! Input handling for keyboard and mouse, and the per-tick snapshot the
//! flight controller consumes.

use glam::Vec2;
use std::collections::HashSet;

/// Immutable view of the pilot's controls for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub forward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub boost: bool,
    pub brake: bool,
    pub roll_left: bool,
    pub roll_right: bool,
    /// Raw pointer motion in pixels (+x right, +y down).
    pub pointer_delta: Vec2,
    pub takeoff_hold: bool,
}

/// Manages input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,

    /// Mouse buttons currently held.
    mouse_held: HashSet<MouseButton>,
    /// Mouse buttons pressed this frame.
    mouse_pressed: HashSet<MouseButton>,

    /// Mouse movement delta this frame.
    mouse_delta: Vec2,
    /// Accumulated mouse delta (for when cursor is locked).
    accumulated_delta: Vec2,

    /// Whether the cursor is captured/locked.
    cursor_locked: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.mouse_pressed.clear();
        self.mouse_delta = self.accumulated_delta;
        self.accumulated_delta = Vec2::ZERO;
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
            }
        }
    }

    /// Process a mouse button event.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.mouse_held.contains(&button) {
                    self.mouse_pressed.insert(button);
                }
                self.mouse_held.insert(button);
            }
            ElementState::Released => {
                self.mouse_held.remove(&button);
            }
        }
    }

    /// Process mouse movement.
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        self.accumulated_delta.x += delta.0 as f32;
        self.accumulated_delta.y += delta.1 as f32;
    }

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a mouse button was pressed this frame.
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_pressed.contains(&button)
    }

    /// Check if the cursor is locked.
    pub fn is_cursor_locked(&self) -> bool {
        self.cursor_locked
    }

    /// Set cursor lock state.
    pub fn set_cursor_locked(&mut self, locked: bool) {
        self.cursor_locked = locked;
    }

    /// Escape releases the cursor; a left click grabs it back.
    /// Returns the new lock state when it changed this frame.
    pub fn update_cursor_capture(&mut self) -> Option<bool> {
        if self.is_key_pressed(KeyCode::Escape) && self.cursor_locked {
            self.cursor_locked = false;
            log::debug!("Cursor released");
            return Some(false);
        }
        if self.is_mouse_pressed(MouseButton::Left) && !self.cursor_locked {
            self.cursor_locked = true;
            log::debug!("Cursor captured");
            return Some(true);
        }
        None
    }

    /// Sample the default flight bindings into a snapshot.
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            forward: self.is_key_held(KeyCode::KeyW),
            strafe_left: self.is_key_held(KeyCode::KeyA),
            strafe_right: self.is_key_held(KeyCode::KeyD),
            boost: self.is_key_held(KeyCode::ShiftLeft),
            brake: self.is_key_held(KeyCode::KeyS),
            roll_left: self.is_key_held(KeyCode::KeyQ),
            roll_right: self.is_key_held(KeyCode::KeyE),
            pointer_delta: self.mouse_delta,
            takeoff_hold: self.is_key_held(KeyCode::Space),
        }
    }
}

// Re-export for convenience
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_maps_default_bindings() {
        let mut input = InputState::new();
        for key in [KeyCode::KeyW, KeyCode::ShiftLeft, KeyCode::KeyD, KeyCode::Space] {
            input.process_keyboard(key, ElementState::Pressed);
        }
        input.process_mouse_motion((4.0, -2.0));
        input.begin_frame();

        let snap = input.snapshot();
        assert!(snap.forward && snap.boost && snap.strafe_right && snap.takeoff_hold);
        assert!(!snap.strafe_left && !snap.brake && !snap.roll_left && !snap.roll_right);
        assert_eq!(snap.pointer_delta, Vec2::new(4.0, -2.0));
    }

    #[test]
    fn mouse_delta_is_consumed_per_frame() {
        let mut input = InputState::new();
        input.process_mouse_motion((3.0, 1.0));
        input.process_mouse_motion((1.0, 1.0));
        input.begin_frame();
        assert_eq!(input.snapshot().pointer_delta, Vec2::new(4.0, 2.0));

        input.begin_frame();
        assert_eq!(input.snapshot().pointer_delta, Vec2::ZERO);
    }

    #[test]
    fn released_key_clears_snapshot_field() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::KeyS, ElementState::Pressed);
        assert!(input.snapshot().brake);
        input.process_keyboard(KeyCode::KeyS, ElementState::Released);
        assert!(!input.snapshot().brake);
    }

    #[test]
    fn escape_releases_and_click_recaptures() {
        let mut input = InputState::new();
        input.set_cursor_locked(true);

        input.process_keyboard(KeyCode::Escape, ElementState::Pressed);
        assert_eq!(input.update_cursor_capture(), Some(false));
        assert!(!input.is_cursor_locked());

        input.begin_frame();
        input.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert_eq!(input.update_cursor_capture(), Some(true));
        assert!(input.is_cursor_locked());

        input.begin_frame();
        assert_eq!(input.update_cursor_capture(), None);
    }
}
