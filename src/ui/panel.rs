// src/ui/panel.rs
//! Default overlay panel
//!
//! Shows frame statistics, the shading mode selector, camera state, scene
//! counts and the control help.

use cgmath::Deg;

use crate::{
    gfx::{camera::FpsCamera, rendering::ShadingMode, scene::SceneStats},
    performance::PerformanceMonitor,
};

/// Read-only state shown by [`overlay_panel`]
pub struct OverlayInfo<'a> {
    pub camera: &'a FpsCamera,
    pub scene: SceneStats,
    pub performance: &'a PerformanceMonitor,
    pub help: &'a [String],
    pub cursor_captured: bool,
}

/// Draws the overlay window
///
/// Returns true when the shading mode was changed from the panel.
pub fn overlay_panel(ui: &imgui::Ui, info: &OverlayInfo<'_>, shading_mode: &mut ShadingMode) -> bool {
    let display_size = ui.io().display_size;
    // Minimised windows report a zero display size
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return false;
    }

    let mut changed = false;
    ui.window("Ruya")
        .size([340.0, 0.0], imgui::Condition::FirstUseEver)
        .position([16.0, 16.0], imgui::Condition::FirstUseEver)
        .always_auto_resize(true)
        .collapsible(true)
        .build(|| {
            info.performance.render_ui(ui);
            ui.separator();

            ui.text("Shading");
            for mode in ShadingMode::ALL {
                ui.same_line();
                if ui.radio_button(mode.label(), shading_mode, mode) {
                    changed = true;
                }
            }
            ui.separator();

            for line in camera_lines(info.camera) {
                ui.text(line);
            }
            ui.text(format!(
                "Objects: {}  Lights: {}",
                info.scene.objects, info.scene.lights
            ));

            if ui.collapsing_header("Controls", imgui::TreeNodeFlags::DEFAULT_OPEN) {
                for line in info.help {
                    ui.text(line);
                }
                ui.text("Esc: quit");
            }

            ui.separator();
            ui.text_disabled(cursor_hint(info.cursor_captured));
        });

    changed
}

fn camera_lines(camera: &FpsCamera) -> [String; 2] {
    let position = camera.position();
    let yaw: Deg<f32> = camera.yaw().into();
    let pitch: Deg<f32> = camera.pitch().into();
    [
        format!(
            "Camera: ({:.2}, {:.2}, {:.2})",
            position.x, position.y, position.z
        ),
        format!("Yaw {:.1}°  Pitch {:.1}°", yaw.0, pitch.0),
    ]
}

fn cursor_hint(captured: bool) -> &'static str {
    if captured {
        "Mouse look active, press Tab to release the cursor"
    } else {
        "Cursor released, press Tab to look around"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyBindings;
    use cgmath::Point3;

    #[test]
    fn camera_lines_show_position_and_degrees() {
        let camera = FpsCamera::new(Point3::new(1.0, 2.5, -3.0), 1.0);
        let [position, angles] = camera_lines(&camera);
        assert_eq!(position, "Camera: (1.00, 2.50, -3.00)");
        assert_eq!(angles, "Yaw -90.0°  Pitch 0.0°");
    }

    // One test owns the imgui context; imgui allows a single active context
    #[test]
    fn panel_reports_no_change_without_interaction() {
        let camera = FpsCamera::new(Point3::new(0.0, 0.0, 3.0), 1.0);
        let monitor = PerformanceMonitor::default();
        let help = KeyBindings::default().help_lines();
        let info = OverlayInfo {
            camera: &camera,
            scene: SceneStats::default(),
            performance: &monitor,
            help: &help,
            cursor_captured: true,
        };

        let mut context = imgui::Context::create();
        context.set_ini_filename(None);
        context.fonts().build_rgba32_texture();

        // Minimised window: nothing is drawn
        context.io_mut().display_size = [0.0, 0.0];
        let mut mode = ShadingMode::Flat;
        let ui = context.frame();
        assert!(!overlay_panel(ui, &info, &mut mode));
        context.render();

        context.io_mut().display_size = [1280.0, 720.0];
        let ui = context.frame();
        assert!(!overlay_panel(ui, &info, &mut mode));
        assert_eq!(mode, ShadingMode::Flat);
        context.render();
    }

    #[test]
    fn cursor_hint_follows_capture_state() {
        assert!(cursor_hint(true).contains("release"));
        assert!(cursor_hint(false).contains("look around"));
    }
}
