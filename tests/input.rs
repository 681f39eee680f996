use jenga::input::{InputEvent, InputManager, SimulationFlags};
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

#[test]
fn key_down_only_lasts_one_frame() {
    let mut input = InputManager::default();
    input.key_input(KeyCode::Space, ElementState::Pressed);

    assert!(input.is_key_down(KeyCode::Space));
    assert!(input.is_key_pressed(KeyCode::Space));

    input.next_frame();
    assert!(!input.is_key_down(KeyCode::Space));
    assert!(input.is_key_pressed(KeyCode::Space));

    input.key_input(KeyCode::Space, ElementState::Released);
    assert!(input.is_key_released(KeyCode::Space));
    assert!(!input.is_key_pressed(KeyCode::Space));
}

#[test]
fn frame_events_keep_their_order() {
    let mut input = InputManager::default();
    input.mouse_input(MouseButton::Left, ElementState::Pressed);
    input.key_input(KeyCode::KeyQ, ElementState::Pressed);
    input.mouse_input(MouseButton::Left, ElementState::Released);

    assert_eq!(
        input.frame_events(),
        &[
            InputEvent::MouseButton {
                button: MouseButton::Left,
                state: ElementState::Pressed
            },
            InputEvent::Key {
                code: KeyCode::KeyQ,
                state: ElementState::Pressed
            },
            InputEvent::MouseButton {
                button: MouseButton::Left,
                state: ElementState::Released
            },
        ]
    );

    input.next_frame();
    assert!(input.frame_events().is_empty());
}

#[test]
fn button_down_and_released_only_last_one_frame() {
    let mut input = InputManager::default();
    assert!(!input.is_button_released(MouseButton::Left));

    input.mouse_input(MouseButton::Left, ElementState::Pressed);
    assert!(input.is_button_down(MouseButton::Left));
    assert!(input.is_button_pressed(MouseButton::Left));

    input.next_frame();
    assert!(!input.is_button_down(MouseButton::Left));
    assert!(input.is_button_pressed(MouseButton::Left));

    input.mouse_input(MouseButton::Left, ElementState::Released);
    assert!(input.is_button_released(MouseButton::Left));
    assert!(!input.is_button_pressed(MouseButton::Left));

    input.next_frame();
    assert!(!input.is_button_released(MouseButton::Left));
}

#[test]
fn mouse_pos_tracks_the_last_cursor_position() {
    let mut input = InputManager::default();
    assert_eq!(input.get_mouse_pos(), None);

    input.cursor_moved(PhysicalPosition::new(4.0, 2.0));
    input.cursor_moved(PhysicalPosition::new(7.5, 3.0));
    assert_eq!(input.get_mouse_pos(), Some(&PhysicalPosition::new(7.5, 3.0)));

    input.next_frame();
    assert_eq!(input.get_mouse_pos(), Some(&PhysicalPosition::new(7.5, 3.0)));
}

#[test]
fn mouse_delta_accumulates_within_a_frame() {
    let mut input = InputManager::default();
    input.cursor_moved(PhysicalPosition::new(10.0, 10.0));
    assert_eq!(input.get_mouse_delta().norm(), 0.0);

    input.cursor_moved(PhysicalPosition::new(13.0, 14.0));
    input.cursor_moved(PhysicalPosition::new(15.0, 14.0));
    assert_eq!(input.get_mouse_delta().x, 5.0);
    assert_eq!(input.get_mouse_delta().y, 4.0);

    input.wheel_input(2.0);
    assert_eq!(input.get_wheel_delta(), 2.0);

    input.next_frame();
    assert_eq!(input.get_mouse_delta().norm(), 0.0);
    assert_eq!(input.get_wheel_delta(), 0.0);
}

#[test]
fn flags_follow_a_full_press_release_sequence() {
    let mut input = InputManager::default();
    let mut flags = SimulationFlags::default();

    input.mouse_input(MouseButton::Middle, ElementState::Pressed);
    input.key_input(KeyCode::KeyA, ElementState::Pressed);
    for event in input.frame_events() {
        flags.handle_event(event);
    }
    assert_eq!(flags.time_dilation(), 10.0);
    assert_eq!(flags.arm_movement(), -1);
    assert!(!flags.is_reset_requested());

    input.next_frame();
    input.mouse_input(MouseButton::Middle, ElementState::Released);
    input.key_input(KeyCode::KeyA, ElementState::Released);
    input.key_input(KeyCode::Space, ElementState::Pressed);
    for event in input.frame_events() {
        flags.handle_event(event);
    }
    assert_eq!(flags.time_dilation(), 1.0);
    assert_eq!(flags.arm_movement(), 0);
    assert!(flags.take_reset_request());
}
