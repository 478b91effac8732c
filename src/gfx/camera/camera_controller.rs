use cgmath::{InnerSpace, Vector3, Zero};

use crate::input::{Action, InputState, KeyBindings, ToggleLatch};

use super::fps_camera::FpsCamera;

/// One-shot requests raised by toggle keys during a controller update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerActions {
    pub toggle_shading: bool,
    pub toggle_cursor_capture: bool,
}

/// Maps held keys and cursor motion to first-person camera movement
pub struct CameraController {
    pub move_speed: f32,
    pub turn_speed: f32,
    bindings: KeyBindings,
    shading_latch: ToggleLatch,
    cursor_latch: ToggleLatch,
    last_cursor: Option<(f64, f64)>,
    mouse_look: bool,
}

impl CameraController {
    pub fn new(move_speed: f32, turn_speed: f32) -> Self {
        Self {
            move_speed,
            turn_speed,
            bindings: KeyBindings::default(),
            shading_latch: ToggleLatch::default(),
            cursor_latch: ToggleLatch::default(),
            last_cursor: None,
            mouse_look: true,
        }
    }

    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Forgets the previous cursor sample; the next one is discarded
    pub fn reset_mouse_look(&mut self) {
        self.last_cursor = None;
    }

    pub fn set_mouse_look(&mut self, enabled: bool) {
        self.mouse_look = enabled;
        self.reset_mouse_look();
    }

    pub fn mouse_look(&self) -> bool {
        self.mouse_look
    }

    /// Applies one frame of input to the camera
    ///
    /// Movement is `move_speed * dt` per held key along the camera front
    /// flattened onto the XZ plane (or the direction at right angles to it);
    /// rise and fall move along world Y.
    pub fn update_camera(
        &mut self,
        input: &InputState,
        camera: &mut FpsCamera,
        dt: f32,
    ) -> ControllerActions {
        let held = |action| input.is_action_pressed(&self.bindings, action);

        let forward = camera.horizontal_front();
        let left = Vector3::new(forward.z, 0.0, -forward.x);

        let mut horizontal = Vector3::zero();
        if held(Action::MoveForward) {
            horizontal += forward;
        }
        if held(Action::MoveBackward) {
            horizontal -= forward;
        }
        if held(Action::MoveLeft) {
            horizontal += left;
        }
        if held(Action::MoveRight) {
            horizontal -= left;
        }

        let mut vertical = 0.0;
        if held(Action::Rise) {
            vertical += 1.0;
        }
        if held(Action::Fall) {
            vertical -= 1.0;
        }

        let step = self.move_speed * dt;
        if horizontal.magnitude2() > 0.0 {
            camera.translate(horizontal * step);
        }
        if vertical != 0.0 {
            camera.translate(Vector3::unit_y() * (vertical * step));
        }

        let actions = ControllerActions {
            toggle_shading: self.shading_latch.update(held(Action::ToggleShading)),
            toggle_cursor_capture: self
                .cursor_latch
                .update(held(Action::ToggleCursorCapture)),
        };

        if self.mouse_look {
            self.apply_mouse_look(input.cursor(), camera);
        }

        actions
    }

    fn apply_mouse_look(&mut self, cursor: (f64, f64), camera: &mut FpsCamera) {
        if let Some((last_x, last_y)) = self.last_cursor.replace(cursor) {
            let dx = (cursor.0 - last_x) as f32;
            let dy = (cursor.1 - last_y) as f32;
            // Screen y grows downwards
            camera.update_angle(dx * self.turn_speed, -dy * self.turn_speed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{assert_abs_diff_eq, Point3, Rad};
    use winit::{event::ElementState, keyboard::KeyCode};

    const DT: f32 = 0.016;

    fn setup() -> (CameraController, FpsCamera, InputState) {
        (
            CameraController::new(6.0, 0.0005),
            FpsCamera::new(Point3::new(0.0, 0.0, 3.0), 1.0),
            InputState::new(),
        )
    }

    fn press(input: &mut InputState, key: KeyCode) {
        input.process_key(key, ElementState::Pressed);
    }

    #[test]
    fn horizontal_keys_leave_height_unchanged() {
        let (mut controller, mut camera, mut input) = setup();
        camera.update_angle(0.3, 0.6);
        let start = camera.position();

        for key in [KeyCode::KeyW, KeyCode::KeyA, KeyCode::KeyS, KeyCode::KeyD] {
            let mut input = InputState::new();
            press(&mut input, key);
            let before = camera.position();
            controller.update_camera(&input, &mut camera, DT);
            assert_abs_diff_eq!(camera.position().y, start.y, epsilon = 1e-6);
            assert!((camera.position() - before).magnitude() > 0.0);
        }

        press(&mut input, KeyCode::KeyW);
        controller.update_camera(&input, &mut camera, DT);
        assert_abs_diff_eq!(camera.position().y, start.y, epsilon = 1e-6);
    }

    #[test]
    fn vertical_keys_change_only_height() {
        let (mut controller, mut camera, mut input) = setup();
        press(&mut input, KeyCode::Space);
        let start = camera.position();
        controller.update_camera(&input, &mut camera, DT);
        let end = camera.position();
        assert_eq!(end.x, start.x);
        assert_eq!(end.z, start.z);
        assert_abs_diff_eq!(end.y - start.y, 6.0 * DT, epsilon = 1e-6);

        let mut input = InputState::new();
        press(&mut input, KeyCode::ShiftLeft);
        controller.update_camera(&input, &mut camera, DT);
        assert_abs_diff_eq!(camera.position().y, start.y, epsilon = 1e-6);
    }

    #[test]
    fn forward_step_ignores_pitch() {
        let (mut controller, mut camera, mut input) = setup();
        camera.update_angle(0.0, 1.2);
        press(&mut input, KeyCode::KeyW);
        let start = camera.position();
        controller.update_camera(&input, &mut camera, DT);
        let moved = (camera.position() - start).magnitude();
        assert_abs_diff_eq!(moved, 6.0 * DT, epsilon = 1e-5);
    }

    #[test]
    fn strafing_is_perpendicular_to_view() {
        let (mut controller, mut camera, mut input) = setup();
        press(&mut input, KeyCode::KeyD);
        let start = camera.position();
        controller.update_camera(&input, &mut camera, DT);
        let offset = camera.position() - start;
        // Looking down -Z, right is +X
        assert!(offset.x > 0.0);
        assert_abs_diff_eq!(offset.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn held_toggle_key_fires_once() {
        let (mut controller, mut camera, mut input) = setup();
        press(&mut input, KeyCode::Digit2);
        let toggles = (0..30)
            .filter(|_| controller.update_camera(&input, &mut camera, DT).toggle_shading)
            .count();
        assert_eq!(toggles, 1);

        input.process_key(KeyCode::Digit2, ElementState::Released);
        controller.update_camera(&input, &mut camera, DT);
        press(&mut input, KeyCode::Digit2);
        assert!(controller.update_camera(&input, &mut camera, DT).toggle_shading);
    }

    #[test]
    fn first_cursor_sample_is_discarded() {
        let (mut controller, mut camera, mut input) = setup();
        input.process_mouse_motion((500.0, -300.0));
        let (yaw, pitch) = (camera.yaw(), camera.pitch());

        controller.update_camera(&input, &mut camera, DT);
        assert_eq!(camera.yaw(), yaw);
        assert_eq!(camera.pitch(), pitch);

        input.process_mouse_motion((100.0, 0.0));
        controller.update_camera(&input, &mut camera, DT);
        assert_abs_diff_eq!(camera.yaw().0, yaw.0 + 100.0 * 0.0005, epsilon = 1e-6);
    }

    #[test]
    fn reset_discards_the_next_sample_again() {
        let (mut controller, mut camera, mut input) = setup();
        controller.update_camera(&input, &mut camera, DT);
        controller.reset_mouse_look();
        input.process_mouse_motion((250.0, 250.0));
        let yaw = camera.yaw();
        controller.update_camera(&input, &mut camera, DT);
        assert_eq!(camera.yaw(), yaw);
    }

    #[test]
    fn mouse_up_pitches_camera_up() {
        let (mut controller, mut camera, mut input) = setup();
        controller.update_camera(&input, &mut camera, DT);
        input.process_mouse_motion((0.0, -200.0));
        controller.update_camera(&input, &mut camera, DT);
        assert!(camera.pitch() > Rad(0.0));
    }

    #[test]
    fn disabled_mouse_look_ignores_motion() {
        let (mut controller, mut camera, mut input) = setup();
        controller.set_mouse_look(false);
        controller.update_camera(&input, &mut camera, DT);
        input.process_mouse_motion((400.0, 0.0));
        let yaw = camera.yaw();
        controller.update_camera(&input, &mut camera, DT);
        assert_eq!(camera.yaw(), yaw);
    }
}
