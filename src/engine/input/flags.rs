use crate::input::{InputEvent, KeyState};
use log::{debug, trace};
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// The switches the simulation reads once per frame.
///
/// Holding any mouse button slows the simulation down by the configured factor,
/// Space asks for a fresh tower and Q / A set the arm direction. The arm value
/// isn't read by anything yet, it is kept as a control surface for a hinge actuator.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationFlags {
    time_dilation: f32,
    slow_motion: f32,
    arm_movement: i8,
    reset_requested: bool,
}

impl Default for SimulationFlags {
    fn default() -> Self {
        SimulationFlags::new(10.0)
    }
}

impl SimulationFlags {
    pub fn new(slow_motion: f32) -> Self {
        SimulationFlags {
            time_dilation: 1.0,
            slow_motion,
            arm_movement: 0,
            reset_requested: false,
        }
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::MouseButton { state, .. } => {
                self.time_dilation = match state {
                    ElementState::Pressed => self.slow_motion,
                    ElementState::Released => 1.0,
                };
                debug!("Time dilation set to {}", self.time_dilation);
            }
            InputEvent::Key {
                code,
                state: KeyState::Pressed,
            } => match code {
                KeyCode::Space => self.request_reset(),
                KeyCode::KeyQ => self.set_arm_movement(1),
                KeyCode::KeyA => self.set_arm_movement(-1),
                _ => {}
            },
            InputEvent::Key {
                state: KeyState::Released,
                ..
            } => self.set_arm_movement(0),
        }
    }

    /// Divisor applied to the frame time before it reaches the physics step.
    pub fn time_dilation(&self) -> f32 {
        self.time_dilation
    }

    pub fn arm_movement(&self) -> i8 {
        self.arm_movement
    }

    fn set_arm_movement(&mut self, direction: i8) {
        if self.arm_movement != direction {
            trace!("Arm movement {direction}");
        }
        self.arm_movement = direction;
    }

    pub fn request_reset(&mut self) {
        self.reset_requested = true;
    }

    pub fn is_reset_requested(&self) -> bool {
        self.reset_requested
    }

    /// Returns whether a reset was requested and clears the request.
    pub fn take_reset_request(&mut self) -> bool {
        std::mem::take(&mut self.reset_requested)
    }
}
