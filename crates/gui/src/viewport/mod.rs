//! 3D viewport panel with OpenGL rendering

mod gl_renderer;
mod renderer;
pub use plan3d_viewer_lib::viewport::{camera, mesh};

use std::sync::{Arc, Mutex};

use egui::Ui;

use crate::build::RenderGroup;
use crate::state::settings::ViewerSettings;
use crate::state::ViewerSession;
use camera::ArcBallCamera;
use gl_renderer::GlRenderer;
use mesh::LineMeshData;

/// Height of the selection outline above the object's base
const OUTLINE_LIFT: f32 = 0.01;

/// 3D viewport panel with OpenGL rendering
pub struct ViewerPanel {
    gl_renderer: Option<Arc<Mutex<GlRenderer>>>,
    /// Scene handed to the paint callback, keyed by plan version
    snapshot: Option<(u64, Arc<RenderGroup>)>,
    /// Primary drag started over empty space
    orbiting: bool,
    /// Pointer position on the floor, in plan pixels
    hover_plan_px: Option<(f64, f64)>,
}

impl ViewerPanel {
    pub fn new() -> Self {
        Self {
            gl_renderer: None,
            snapshot: None,
            orbiting: false,
            hover_plan_px: None,
        }
    }

    /// Initialize GL renderer (must be called with a GL context)
    pub fn init_gl(&mut self, gl: &glow::Context) {
        match GlRenderer::new(gl) {
            Ok(renderer) => self.gl_renderer = Some(Arc::new(Mutex::new(renderer))),
            Err(e) => tracing::error!("GL renderer unavailable, using wireframe fallback: {e}"),
        }
    }

    /// Release GL resources
    pub fn destroy_gl(&mut self, gl: &glow::Context) {
        if let Some(renderer) = self.gl_renderer.take() {
            if let Ok(mut r) = renderer.lock() {
                r.destroy(gl);
            }
        }
        self.snapshot = None;
    }

    pub fn hover_plan_px(&self) -> Option<(f64, f64)> {
        self.hover_plan_px
    }

    pub fn show(&mut self, ui: &mut Ui, session: &mut ViewerSession, settings: &ViewerSettings) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        session.camera.fov = settings.camera.fov_degrees.to_radians();

        self.handle_pointer(ui, &response, rect, session, settings);

        // ── Scroll zoom ─────────────────────────────
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                session.camera.zoom(scroll * settings.camera.zoom_sensitivity);
            }
        }

        self.hover_plan_px = response
            .hover_pos()
            .and_then(|pos| session.pointer_plan_px(pos, rect));

        // Continuous render loop while the viewport is alive
        ui.ctx().request_repaint();

        if !ui.is_rect_visible(rect) {
            return;
        }

        self.refresh_snapshot(session);
        self.render_gl(ui, rect, session, settings);

        let painter = ui.painter_at(rect);
        draw_camera_info(&painter, rect, &session.camera);
    }

    fn handle_pointer(
        &mut self,
        ui: &Ui,
        response: &egui::Response,
        rect: egui::Rect,
        session: &mut ViewerSession,
        settings: &ViewerSettings,
    ) {
        let (pressed, released, pointer_pos) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
            )
        });

        if pressed && response.hovered() {
            if let Some(pos) = pointer_pos {
                self.orbiting = session.pointer_down(pos, rect).is_none();
            }
        }

        if session.is_dragging() {
            if !response.contains_pointer() {
                session.pointer_leave();
            } else if let Some(pos) = pointer_pos {
                if response.drag_delta() != egui::Vec2::ZERO {
                    session.pointer_move(pos, rect);
                }
            }
        } else if self.orbiting && response.dragged_by(egui::PointerButton::Primary) {
            let delta = response.drag_delta() * settings.camera.orbit_sensitivity;
            session.camera.rotate(delta.x, delta.y);
        }

        if response.dragged_by(egui::PointerButton::Secondary) {
            let delta = response.drag_delta();
            session.camera.pan(delta.x * 0.01, delta.y * 0.01);
        }

        if released {
            session.pointer_up();
            self.orbiting = false;
        }
    }

    fn refresh_snapshot(&mut self, session: &mut ViewerSession) {
        let version = session.version();
        if matches!(self.snapshot, Some((v, _)) if v == version) {
            return;
        }
        let group = session.sync_scene().clone();
        self.snapshot = Some((version, Arc::new(group)));
    }

    fn selection_outline(session: &ViewerSession, settings: &ViewerSettings) -> Option<LineMeshData> {
        let id = session.selected_id()?;
        let node = session.group().furniture_node(id)?;
        let c = settings.viewport.selection_color;
        let color = [c[0] as f32 / 255.0, c[1] as f32 / 255.0, c[2] as f32 / 255.0, 1.0];
        let corners = node.footprint().map(|p| p + glam::Vec3::Y * OUTLINE_LIFT);
        Some(mesh::footprint_outline(corners, color))
    }

    fn render_gl(
        &self,
        ui: &mut Ui,
        rect: egui::Rect,
        session: &ViewerSession,
        settings: &ViewerSettings,
    ) {
        let Some((version, group)) = self.snapshot.clone() else {
            return;
        };

        if let Some(gl_renderer) = &self.gl_renderer {
            let renderer_clone = gl_renderer.clone();
            let camera = session.camera;
            let outline = Self::selection_outline(session, settings);
            let grid_settings = settings.grid.clone();
            let bg_color = settings.viewport.background_color;

            let callback = egui::PaintCallback {
                rect,
                callback: Arc::new(egui_glow::CallbackFn::new(move |info, painter| {
                    let gl = painter.gl();

                    let clip = info.clip_rect_in_pixels();
                    let viewport = [
                        clip.left_px as f32,
                        clip.from_bottom_px as f32,
                        clip.width_px as f32,
                        clip.height_px as f32,
                    ];

                    if let Ok(mut r) = renderer_clone.lock() {
                        r.update_grid(gl, &grid_settings);
                        r.sync_scene(gl, &group, version);
                        r.sync_outline(gl, outline.as_ref());

                        let render_params = gl_renderer::RenderParams {
                            viewport,
                            grid_visible: grid_settings.visible,
                            bg_color,
                        };
                        r.paint(gl, &camera, &render_params);
                    }
                })),
            };

            ui.painter().add(callback);
        } else {
            // Fallback: software wireframe rendering
            renderer::paint_viewport(ui, rect, &session.camera, &group, session.selected_id(), settings);
        }
    }
}

impl Default for ViewerPanel {
    fn default() -> Self {
        Self::new()
    }
}

fn draw_camera_info(painter: &egui::Painter, rect: egui::Rect, camera: &ArcBallCamera) {
    let overlay_rect = egui::Rect::from_min_size(
        egui::pos2(rect.right() - 140.0, rect.top() + 4.0),
        egui::vec2(136.0, 44.0),
    );
    painter.rect_filled(
        overlay_rect,
        4.0,
        egui::Color32::from_rgba_premultiplied(255, 255, 255, 180),
    );
    painter.text(
        overlay_rect.min + egui::vec2(6.0, 4.0),
        egui::Align2::LEFT_TOP,
        format!(
            "Dist: {:.1}\nYaw: {:.0}  Pitch: {:.0}",
            camera.distance,
            camera.yaw.to_degrees(),
            camera.pitch.to_degrees(),
        ),
        egui::FontId::monospace(10.0),
        egui::Color32::from_rgb(71, 85, 105),
    );
}
