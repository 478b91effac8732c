use winit::keyboard::KeyCode;

/// Semantic input actions understood by the camera controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    Rise,
    Fall,
    ToggleShading,
    ToggleCursorCapture,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::MoveForward,
        Action::MoveBackward,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Rise,
        Action::Fall,
        Action::ToggleShading,
        Action::ToggleCursorCapture,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            Action::MoveForward => "move forward",
            Action::MoveBackward => "move backward",
            Action::MoveLeft => "strafe left",
            Action::MoveRight => "strafe right",
            Action::Rise => "rise",
            Action::Fall => "fall",
            Action::ToggleShading => "toggle flat/smooth shading",
            Action::ToggleCursorCapture => "release/capture cursor",
        }
    }
}

/// Physical key bound to each [`Action`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pub move_forward: KeyCode,
    pub move_backward: KeyCode,
    pub move_left: KeyCode,
    pub move_right: KeyCode,
    pub rise: KeyCode,
    pub fall: KeyCode,
    pub toggle_shading: KeyCode,
    pub toggle_cursor_capture: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_forward: KeyCode::KeyW,
            move_backward: KeyCode::KeyS,
            move_left: KeyCode::KeyA,
            move_right: KeyCode::KeyD,
            rise: KeyCode::Space,
            fall: KeyCode::ShiftLeft,
            toggle_shading: KeyCode::Digit2,
            toggle_cursor_capture: KeyCode::Tab,
        }
    }
}

impl KeyBindings {
    pub fn key(&self, action: Action) -> KeyCode {
        match action {
            Action::MoveForward => self.move_forward,
            Action::MoveBackward => self.move_backward,
            Action::MoveLeft => self.move_left,
            Action::MoveRight => self.move_right,
            Action::Rise => self.rise,
            Action::Fall => self.fall,
            Action::ToggleShading => self.toggle_shading,
            Action::ToggleCursorCapture => self.toggle_cursor_capture,
        }
    }

    /// Rebinds one action (builder pattern)
    pub fn with_binding(mut self, action: Action, key: KeyCode) -> Self {
        let slot = match action {
            Action::MoveForward => &mut self.move_forward,
            Action::MoveBackward => &mut self.move_backward,
            Action::MoveLeft => &mut self.move_left,
            Action::MoveRight => &mut self.move_right,
            Action::Rise => &mut self.rise,
            Action::Fall => &mut self.fall,
            Action::ToggleShading => &mut self.toggle_shading,
            Action::ToggleCursorCapture => &mut self.toggle_cursor_capture,
        };
        *slot = key;
        self
    }

    /// One help line per action, used by the overlay
    pub fn help_lines(&self) -> Vec<String> {
        Action::ALL
            .iter()
            .map(|action| format!("{:?}: {}", self.key(*action), action.description()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_wasd_layout() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.key(Action::MoveForward), KeyCode::KeyW);
        assert_eq!(bindings.key(Action::ToggleShading), KeyCode::Digit2);
        assert_eq!(bindings.key(Action::ToggleCursorCapture), KeyCode::Tab);
    }

    #[test]
    fn rebinding_changes_only_that_action() {
        let bindings = KeyBindings::default().with_binding(Action::Rise, KeyCode::KeyE);
        assert_eq!(bindings.key(Action::Rise), KeyCode::KeyE);
        assert_eq!(bindings.key(Action::Fall), KeyCode::ShiftLeft);
    }

    #[test]
    fn help_has_a_line_per_action() {
        assert_eq!(KeyBindings::default().help_lines().len(), Action::ALL.len());
    }
}
