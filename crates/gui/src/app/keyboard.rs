//! Keyboard shortcut handling

use eframe::egui;

use crate::state::ViewerSession;
use plan3d_viewer_lib::command::RotateDirection;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, session: &mut ViewerSession) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    let (rotate, escape, home) = ctx.input(|i| {
        let rotate = i.key_pressed(egui::Key::R).then(|| {
            if i.modifiers.shift {
                RotateDirection::Left
            } else {
                RotateDirection::Right
            }
        });
        (
            rotate,
            i.key_pressed(egui::Key::Escape),
            i.key_pressed(egui::Key::Home),
        )
    });

    // R / Shift+R: quarter turn of the selected object
    if let Some(direction) = rotate {
        session.rotate_selected(direction);
    }
    // Escape: deselect
    if escape {
        session.clear_selection();
    }
    // Home: reset camera
    if home {
        session.reset_camera();
    }
}
