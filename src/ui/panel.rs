// src/ui/panel.rs
//! The "Courtside" control panel and its keyboard shortcuts

use winit::keyboard::KeyCode;

use crate::{court::Showcase, performance::PerformanceMonitor};

/// Something the user asked the showcase to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowcaseAction {
    Shoot,
    Dribble,
    ResetPose,
    ToggleWireframe,
}

impl ShowcaseAction {
    /// Every action in panel order
    pub const ALL: [ShowcaseAction; 4] = [
        ShowcaseAction::Shoot,
        ShowcaseAction::Dribble,
        ShowcaseAction::ResetPose,
        ShowcaseAction::ToggleWireframe,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ShowcaseAction::Shoot => "Shoot",
            ShowcaseAction::Dribble => "Dribble",
            ShowcaseAction::ResetPose => "Reset Pose",
            ShowcaseAction::ToggleWireframe => "Toggle Wireframe",
        }
    }

    /// Shortcut key for the action, `None` for unbound keys
    ///
    /// `C` is left to the camera (Shift+C resets the view).
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::KeyS => Some(ShowcaseAction::Shoot),
            KeyCode::KeyD => Some(ShowcaseAction::Dribble),
            KeyCode::KeyR => Some(ShowcaseAction::ResetPose),
            KeyCode::KeyW => Some(ShowcaseAction::ToggleWireframe),
            _ => None,
        }
    }

    /// Runs the action against the showcase
    ///
    /// # Returns
    /// Whether the showcase accepted it; wireframe toggling always succeeds
    pub fn apply(self, showcase: &mut Showcase) -> bool {
        match self {
            ShowcaseAction::Shoot => showcase.shoot(),
            ShowcaseAction::Dribble => showcase.dribble(),
            ShowcaseAction::ResetPose => showcase.reset_pose(),
            ShowcaseAction::ToggleWireframe => {
                showcase.toggle_wireframe();
                true
            }
        }
    }
}

/// Draws the control panel
///
/// # Returns
/// The action whose button was clicked this frame, if any
pub fn courtside_panel(
    ui: &imgui::Ui,
    showcase: &Showcase,
    monitor: &PerformanceMonitor,
) -> Option<ShowcaseAction> {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return None;
    }

    let mut clicked = None;
    ui.window("Courtside")
        .size([300.0, 360.0], imgui::Condition::FirstUseEver)
        .position([20.0, 20.0], imgui::Condition::FirstUseEver)
        .resizable(true)
        .collapsible(true)
        .build(|| {
            for action in ShowcaseAction::ALL {
                if ui.button_with_size(action.label(), [-1.0, 0.0]) {
                    clicked = Some(action);
                }
            }

            ui.spacing();
            ui.text(format!(
                "Wireframe: {}",
                if showcase.is_wireframe() { "on" } else { "off" }
            ));
            let running = showcase.animator().active_count();
            if running > 0 {
                ui.text(format!("Animations running: {}", running));
            }

            ui.separator();
            let stats = showcase.scene().statistics();
            ui.text(format!("Meshes: {}", stats.mesh_count));
            ui.text(format!("Lights: {}", stats.light_count));
            ui.text(format!("Triangles: {}", stats.total_triangles));

            ui.separator();
            monitor.render_section(ui);

            ui.separator();
            ui.text_disabled("S/D/R/W shortcuts, Shift+C resets the camera");
        });

    clicked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcut_keys() {
        assert_eq!(ShowcaseAction::from_key(KeyCode::KeyS), Some(ShowcaseAction::Shoot));
        assert_eq!(ShowcaseAction::from_key(KeyCode::KeyD), Some(ShowcaseAction::Dribble));
        assert_eq!(ShowcaseAction::from_key(KeyCode::KeyR), Some(ShowcaseAction::ResetPose));
        assert_eq!(
            ShowcaseAction::from_key(KeyCode::KeyW),
            Some(ShowcaseAction::ToggleWireframe)
        );
        assert_eq!(ShowcaseAction::from_key(KeyCode::KeyC), None);
    }

    #[test]
    fn test_actions_on_empty_showcase() {
        let mut showcase = Showcase::empty();
        assert!(!ShowcaseAction::Shoot.apply(&mut showcase));
        assert!(!ShowcaseAction::Dribble.apply(&mut showcase));
        assert!(!ShowcaseAction::ResetPose.apply(&mut showcase));
        assert!(ShowcaseAction::ToggleWireframe.apply(&mut showcase));
        assert!(showcase.is_wireframe());
    }

    #[test]
    fn test_actions_drive_showcase() {
        let mut showcase = Showcase::new().unwrap();
        assert!(ShowcaseAction::Shoot.apply(&mut showcase));
        assert_eq!(showcase.animator().active_count(), 1);
        assert!(ShowcaseAction::ResetPose.apply(&mut showcase));
        assert!(showcase.animator().is_idle());
    }
}
