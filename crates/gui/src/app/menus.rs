//! Application menu bar and settings window

use eframe::egui;
use plan_shared::PlanDocument;

use crate::i18n::{lang, set_lang, t, Lang};
use crate::state::settings::ViewerSettings;
use crate::state::ViewerSession;

/// Show the file menu. Returns a plan the user opened.
pub fn file_menu(ui: &mut egui::Ui, plan: &PlanDocument) -> Option<PlanDocument> {
    let mut opened = None;
    ui.menu_button(t("menu.file"), |ui| {
        if ui.button(t("menu.open")).clicked() {
            ui.close_menu();
            if let Some(path) = rfd::FileDialog::new()
                .set_title(t("menu.open_title"))
                .add_filter("JSON", &["json"])
                .pick_file()
            {
                match crate::load_plan_file(&path) {
                    Ok(loaded) => {
                        tracing::info!("Loaded plan from {}", path.display());
                        opened = Some(loaded);
                    }
                    Err(e) => tracing::error!("{}: {e}", t("msg.load_failed")),
                }
            }
        }
        if ui.button(t("menu.save")).clicked() {
            ui.close_menu();
            if let Some(path) = rfd::FileDialog::new()
                .set_title(t("menu.save_title"))
                .add_filter("JSON", &["json"])
                .set_file_name("plan.json")
                .save_file()
            {
                let result = plan.to_json_pretty().and_then(|json| {
                    std::fs::write(&path, json).map_err(|e| format!("Failed to write plan: {e}"))
                });
                match result {
                    Ok(()) => tracing::info!("Saved plan to {}", path.display()),
                    Err(e) => tracing::error!("{}: {e}", t("msg.save_failed")),
                }
            }
        }
        ui.separator();
        if ui.button(t("menu.quit")).clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
    opened
}

/// Show the view menu
pub fn view_menu(
    ui: &mut egui::Ui,
    session: &mut ViewerSession,
    settings: &mut ViewerSettings,
    show_settings_window: &mut bool,
) {
    ui.menu_button(t("menu.view"), |ui| {
        if ui.button(t("menu.reset_camera")).clicked() {
            session.reset_camera();
            ui.close_menu();
        }
        ui.checkbox(&mut settings.grid.visible, t("menu.grid"));
        ui.separator();

        ui.menu_button(t("menu.language"), |ui| {
            let current = lang();
            if ui.radio(current == Lang::Ru, "Русский").clicked() {
                set_lang(Lang::Ru);
                settings.language = Lang::Ru;
                ui.close_menu();
            }
            if ui.radio(current == Lang::En, "English").clicked() {
                set_lang(Lang::En);
                settings.language = Lang::En;
                ui.close_menu();
            }
        });

        if ui.button(t("menu.settings")).clicked() {
            *show_settings_window = true;
            ui.close_menu();
        }
    });
}

/// Show the settings window
pub fn settings_window(ctx: &egui::Context, settings: &mut ViewerSettings, open: &mut bool) {
    if !*open {
        return;
    }

    let mut still_open = true;
    egui::Window::new(t("settings.title"))
        .open(&mut still_open)
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            show_grid_settings(ui, settings);
            show_camera_settings(ui, settings);
            show_viewport_settings(ui, settings);
            show_settings_buttons(ui, settings, open);
        });
    if !still_open {
        *open = false;
    }
}

fn show_grid_settings(ui: &mut egui::Ui, settings: &mut ViewerSettings) {
    ui.heading(t("settings.grid"));
    ui.checkbox(&mut settings.grid.visible, t("settings.grid_visible"));

    ui.horizontal(|ui| {
        ui.label(t("settings.grid_size"));
        ui.add(
            egui::DragValue::new(&mut settings.grid.size)
                .speed(0.1)
                .range(0.1..=10.0)
                .suffix(" m"),
        );
    });

    ui.horizontal(|ui| {
        ui.label(t("settings.grid_range"));
        ui.add(
            egui::DragValue::new(&mut settings.grid.range)
                .speed(1)
                .range(1..=50),
        );
    });

    ui.horizontal(|ui| {
        ui.label(t("settings.grid_opacity"));
        ui.add(egui::Slider::new(&mut settings.grid.opacity, 0.0..=1.0));
    });
    ui.add_space(10.0);
}

fn show_camera_settings(ui: &mut egui::Ui, settings: &mut ViewerSettings) {
    ui.heading(t("settings.camera"));

    ui.horizontal(|ui| {
        ui.label(t("settings.fov"));
        ui.add(
            egui::DragValue::new(&mut settings.camera.fov_degrees)
                .speed(1.0)
                .range(20.0..=110.0)
                .suffix("°"),
        );
    });

    ui.horizontal(|ui| {
        ui.label(t("settings.orbit"));
        ui.add(egui::Slider::new(&mut settings.camera.orbit_sensitivity, 0.05..=2.0));
    });

    ui.horizontal(|ui| {
        ui.label(t("settings.zoom"));
        ui.add(egui::Slider::new(&mut settings.camera.zoom_sensitivity, 0.0005..=0.01));
    });
    ui.add_space(10.0);
}

fn show_viewport_settings(ui: &mut egui::Ui, settings: &mut ViewerSettings) {
    ui.heading(t("settings.viewport"));
    ui.horizontal(|ui| {
        ui.label(t("settings.bg_color"));
        let [r, g, b] = settings.viewport.background_color;
        let mut color = egui::Color32::from_rgb(r, g, b);
        if ui.color_edit_button_srgba(&mut color).changed() {
            settings.viewport.background_color = [color.r(), color.g(), color.b()];
        }
    });

    ui.horizontal(|ui| {
        ui.label(t("settings.sel_color"));
        let [r, g, b] = settings.viewport.selection_color;
        let mut color = egui::Color32::from_rgb(r, g, b);
        if ui.color_edit_button_srgba(&mut color).changed() {
            settings.viewport.selection_color = [color.r(), color.g(), color.b()];
        }
    });
    ui.add_space(10.0);
}

fn show_settings_buttons(ui: &mut egui::Ui, settings: &mut ViewerSettings, open: &mut bool) {
    ui.separator();
    ui.horizontal(|ui| {
        if ui.button(t("settings.apply")).clicked() {
            settings.save();
        }
        if ui.button(t("settings.reset")).clicked() {
            let language = settings.language;
            *settings = ViewerSettings {
                language,
                ..ViewerSettings::default()
            };
        }
        if ui.button(t("settings.close")).clicked() {
            *open = false;
        }
    });
}
