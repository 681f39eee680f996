use nalgebra::Vector2;
use std::collections::HashMap;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

pub type KeyState = ElementState;

/// A key or button transition, in the order the window delivered it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key { code: KeyCode, state: KeyState },
    MouseButton { button: MouseButton, state: ElementState },
}

#[derive(Debug, Default)]
pub struct InputManager {
    key_states: HashMap<KeyCode, KeyState>,
    key_just_updated: Vec<KeyCode>,
    button_states: HashMap<MouseButton, ElementState>,
    button_just_updated: Vec<MouseButton>,
    frame_events: Vec<InputEvent>,
    mouse_wheel_delta: f32,
    mouse_pos: Option<PhysicalPosition<f32>>,
    mouse_delta: Vector2<f32>,
}

impl InputManager {
    pub fn process_event(&mut self, window_event: &WindowEvent) {
        match window_event {
            WindowEvent::KeyboardInput { event, .. } => {
                // held keys fire repeatedly, only real transitions count
                if event.repeat {
                    return;
                }
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.key_input(code, event.state);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(PhysicalPosition::new(position.x as f32, position.y as f32))
            }
            WindowEvent::CursorLeft { .. } => self.mouse_pos = None,
            WindowEvent::MouseWheel { delta, .. } => {
                let y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 40.0,
                };
                self.wheel_input(y);
            }
            WindowEvent::MouseInput { button, state, .. } => self.mouse_input(*button, *state),
            _ => {}
        }
    }

    pub fn key_input(&mut self, code: KeyCode, state: KeyState) {
        self.key_just_updated.push(code);
        self.key_states.insert(code, state);
        self.frame_events.push(InputEvent::Key { code, state });
    }

    pub fn mouse_input(&mut self, button: MouseButton, state: ElementState) {
        self.button_just_updated.push(button);
        self.button_states.insert(button, state);
        self.frame_events.push(InputEvent::MouseButton { button, state });
    }

    pub fn cursor_moved(&mut self, position: PhysicalPosition<f32>) {
        if let Some(last) = self.mouse_pos {
            self.mouse_delta += Vector2::new(position.x - last.x, position.y - last.y);
        }
        self.mouse_pos = Some(position);
    }

    pub fn wheel_input(&mut self, lines: f32) {
        self.mouse_wheel_delta += lines;
    }

    /// Every key and button transition of this frame, oldest first.
    pub fn frame_events(&self) -> &[InputEvent] {
        &self.frame_events
    }

    pub fn get_key_state(&self, key_code: KeyCode) -> KeyState {
        *self.key_states.get(&key_code).unwrap_or(&KeyState::Released)
    }

    // Only is true if the key was JUST pressed
    pub fn is_key_down(&self, key_code: KeyCode) -> bool {
        self.get_key_state(key_code) == KeyState::Pressed && self.key_just_updated.contains(&key_code)
    }

    // true if the key was JUST pressed or is being held
    pub fn is_key_pressed(&self, key_code: KeyCode) -> bool {
        self.get_key_state(key_code) == KeyState::Pressed
    }

    // Only is true if the key was JUST released
    pub fn is_key_released(&self, key_code: KeyCode) -> bool {
        self.get_key_state(key_code) == KeyState::Released && self.key_just_updated.contains(&key_code)
    }

    pub fn get_button_state(&self, button: MouseButton) -> ElementState {
        *self.button_states.get(&button).unwrap_or(&ElementState::Released)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.get_button_state(button) == ElementState::Pressed && self.button_just_updated.contains(&button)
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.get_button_state(button) == ElementState::Pressed
    }

    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.get_button_state(button) == ElementState::Released && self.button_just_updated.contains(&button)
    }

    pub fn get_mouse_pos(&self) -> Option<&PhysicalPosition<f32>> {
        self.mouse_pos.as_ref()
    }

    /// Cursor movement in pixels since the last frame.
    pub fn get_mouse_delta(&self) -> &Vector2<f32> {
        &self.mouse_delta
    }

    pub fn get_wheel_delta(&self) -> f32 {
        self.mouse_wheel_delta
    }

    pub fn next_frame(&mut self) {
        self.key_just_updated.clear();
        self.button_just_updated.clear();
        self.frame_events.clear();
        self.mouse_delta = Vector2::zeros();
        self.mouse_wheel_delta = 0.0;
    }
}
