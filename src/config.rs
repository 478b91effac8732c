//! Demo configuration
//!
//! Plain data with defaults and builder-style overrides; nothing is read from
//! disk.

use std::time::Duration;

use cgmath::Point3;

use crate::input::KeyBindings;

#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub title: String,
    pub window_size: (u32, u32),
    /// Camera translation speed in world units per second
    pub move_speed: f32,
    /// Camera rotation in radians per pixel of mouse motion
    pub turn_speed: f32,
    pub background: [f32; 3],
    pub vsync: bool,
    pub report_interval: Duration,
    pub camera_position: Point3<f32>,
    pub key_bindings: KeyBindings,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "Ruya".to_string(),
            window_size: (1450, 875),
            move_speed: 6.0,
            turn_speed: 0.0005,
            background: [0.9, 0.9, 0.9],
            vsync: true,
            report_interval: Duration::from_secs(1),
            camera_position: Point3::new(0.0, 0.0, 3.0),
            key_bindings: KeyBindings::default(),
        }
    }
}

impl DemoConfig {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width.max(1), height.max(1));
        self
    }

    pub fn with_move_speed(mut self, speed: f32) -> Self {
        self.move_speed = speed;
        self
    }

    pub fn with_turn_speed(mut self, speed: f32) -> Self {
        self.turn_speed = speed;
        self
    }

    pub fn with_background(mut self, color: [f32; 3]) -> Self {
        self.background = color;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_report_interval(mut self, interval: Duration) -> Self {
        self.report_interval = interval;
        self
    }

    pub fn with_camera_position(mut self, position: Point3<f32>) -> Self {
        self.camera_position = position;
        self
    }

    pub fn with_key_bindings(mut self, bindings: KeyBindings) -> Self {
        self.key_bindings = bindings;
        self
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.window_size.0 as f32 / self.window_size.1 as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Action;
    use winit::keyboard::KeyCode;

    #[test]
    fn defaults_match_the_demo() {
        let config = DemoConfig::default();
        assert_eq!(config.window_size, (1450, 875));
        assert_eq!(config.move_speed, 6.0);
        assert_eq!(config.turn_speed, 0.0005);
        assert_eq!(config.background, [0.9, 0.9, 0.9]);
        assert_eq!(config.report_interval, Duration::from_secs(1));
    }

    #[test]
    fn builders_override_fields() {
        let config = DemoConfig::default()
            .with_title("test")
            .with_window_size(0, 600)
            .with_move_speed(2.0)
            .with_vsync(false)
            .with_key_bindings(KeyBindings::default().with_binding(Action::Rise, KeyCode::KeyE));

        assert_eq!(config.title, "test");
        assert_eq!(config.window_size, (1, 600));
        assert_eq!(config.move_speed, 2.0);
        assert!(!config.vsync);
        assert_eq!(config.key_bindings.key(Action::Rise), KeyCode::KeyE);
    }
}
