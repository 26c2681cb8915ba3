//! Main application module

mod keyboard;
mod menus;
mod styles;

use std::sync::mpsc::{self, Receiver};

use eframe::egui;
use plan_shared::{FurnitureType, PlanDocument};

use crate::state::{ViewerSession, ViewerSettings};
use crate::ui::{status_bar, toolbar};
use crate::viewport::ViewerPanel;

/// Main application. Owns the plan document and feeds it to the viewer.
pub struct PlanApp {
    plan: PlanDocument,
    session: ViewerSession,
    /// Plans emitted by the viewer's change callback
    plan_rx: Receiver<PlanDocument>,
    viewport: ViewerPanel,
    settings: ViewerSettings,
    /// Type used by the toolbar's add button
    add_type: FurnitureType,
    show_settings_window: bool,
    /// Settings as last persisted
    saved_settings: ViewerSettings,
}

impl PlanApp {
    pub fn new(cc: &eframe::CreationContext<'_>, initial_plan: Option<PlanDocument>) -> Self {
        let settings = ViewerSettings::load();
        crate::i18n::set_lang(settings.language);

        styles::configure_styles(&cc.egui_ctx);

        let plan = initial_plan.unwrap_or_else(|| PlanDocument::new(1000.0, 1000.0, 100.0));

        let (tx, plan_rx) = mpsc::channel();
        let session = ViewerSession::new(
            plan.clone(),
            Box::new(move |next| {
                if tx.send(next).is_err() {
                    tracing::warn!("Plan receiver dropped, edit lost");
                }
            }),
        );

        let mut viewport = ViewerPanel::new();

        // Initialize GL renderer if glow context is available
        if let Some(gl) = cc.gl.as_ref() {
            viewport.init_gl(gl);
        }

        Self {
            plan,
            session,
            plan_rx,
            viewport,
            saved_settings: settings.clone(),
            settings,
            add_type: FurnitureType::Sofa,
            show_settings_window: false,
        }
    }

    /// Adopt the newest plan the viewer emitted and hand it back
    fn drain_plan_changes(&mut self) {
        let mut latest = None;
        while let Ok(next) = self.plan_rx.try_recv() {
            latest = Some(next);
        }
        if let Some(next) = latest {
            self.plan = next;
            self.session.set_plan(self.plan.clone());
        }
    }

    /// Replace the owned plan (file open)
    fn replace_plan(&mut self, plan: PlanDocument) {
        self.plan = plan;
        self.session.clear_selection();
        self.session.set_plan(self.plan.clone());
    }
}

impl eframe::App for PlanApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_plan_changes();

        keyboard::handle_keyboard(ctx, &mut self.session);

        // ── Menu bar ──────────────────────────────────────────
        let mut opened = None;
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                opened = menus::file_menu(ui, &self.plan);
                menus::view_menu(
                    ui,
                    &mut self.session,
                    &mut self.settings,
                    &mut self.show_settings_window,
                );
            });
        });
        if let Some(plan) = opened {
            self.replace_plan(plan);
        }

        // ── Settings window ──────────────────────────────────
        menus::settings_window(ctx, &mut self.settings, &mut self.show_settings_window);

        // ── Toolbar ───────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                toolbar::show(ui, &mut self.session, &mut self.add_type);
            });

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.plan, &self.session, self.viewport.hover_plan_px());
            });

        // ── Central panel: 3D viewport ───────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &mut self.session, &self.settings);
            });

        // Edits made this frame reach the owner before the next one
        self.drain_plan_changes();
    }

    fn on_exit(&mut self, gl: Option<&glow::Context>) {
        if self.settings != self.saved_settings {
            self.settings.save();
        }
        if let Some(gl) = gl {
            self.viewport.destroy_gl(gl);
        }
        tracing::info!("Viewer closed");
    }
}
