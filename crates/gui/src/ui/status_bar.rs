use egui::Ui;
use plan_shared::PlanDocument;

use crate::i18n::t;
use crate::state::ViewerSession;

pub fn show(ui: &mut Ui, plan: &PlanDocument, session: &ViewerSession, pointer_px: Option<(f64, f64)>) {
    ui.horizontal(|ui| {
        ui.weak(format!("{}: {}", t("status.elements"), plan.elements.len()));
        ui.separator();
        ui.weak(format!("{}: {}", t("status.objects"), plan.objects3d.len()));
        ui.separator();

        match session.selected_id() {
            Some(id) => {
                ui.label(format!("{}: {id}", t("status.selected")));
                if session.is_dragging() {
                    ui.colored_label(
                        egui::Color32::from_rgb(14, 165, 233),
                        t("status.dragging"),
                    );
                }
            }
            None => {
                ui.weak(format!("{}: {}", t("status.selected"), t("status.none")));
            }
        }

        // Right-aligned pointer position
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if let Some((x, y)) = pointer_px {
                ui.monospace(format!("{}: {x:.0}, {y:.0} px", t("status.pointer")));
            }
        });
    });
}
