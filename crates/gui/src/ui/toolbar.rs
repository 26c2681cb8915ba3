//! Toolbar: furniture type selector, add and rotate actions

use egui::Ui;
use plan_shared::FurnitureType;

use crate::i18n::{furniture_key, t};
use crate::state::ViewerSession;
use plan3d_viewer_lib::command::RotateDirection;

pub fn show(ui: &mut Ui, session: &mut ViewerSession, add_type: &mut FurnitureType) {
    ui.horizontal(|ui| {
        ui.label(t("tb.type"));
        egui::ComboBox::from_id_salt("furniture_type")
            .selected_text(t(furniture_key(*add_type)))
            .show_ui(ui, |ui| {
                for ty in FurnitureType::ALL {
                    ui.selectable_value(add_type, ty, t(furniture_key(ty)));
                }
            });

        if ui.button(t("tb.add")).clicked() {
            session.add_object(*add_type);
        }

        ui.separator();

        let has_selection = session.selected_id().is_some();
        if ui
            .add_enabled(has_selection, egui::Button::new(t("tb.rotate_left")))
            .clicked()
        {
            session.rotate_selected(RotateDirection::Left);
        }
        if ui
            .add_enabled(has_selection, egui::Button::new(t("tb.rotate_right")))
            .clicked()
        {
            session.rotate_selected(RotateDirection::Right);
        }
    });
}
