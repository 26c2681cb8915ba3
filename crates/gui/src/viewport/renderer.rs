//! Wireframe rendering for the viewport when no GL context is available

use egui::{Color32, Rect, Stroke, Ui};
use glam::Vec3;

use super::camera::ArcBallCamera;
use crate::build::{NodeKind, RenderGroup, SceneNode};
use crate::state::settings::{GridSettings, ViewerSettings};

/// Paint the 3D viewport using egui's painter (wireframe rendering)
pub fn paint_viewport(
    ui: &Ui,
    rect: Rect,
    camera: &ArcBallCamera,
    group: &RenderGroup,
    selected: Option<&String>,
    settings: &ViewerSettings,
) {
    let painter = ui.painter_at(rect);

    // Background
    let bg = &settings.viewport.background_color;
    painter.rect_filled(rect, 0.0, Color32::from_rgb(bg[0], bg[1], bg[2]));

    if settings.grid.visible {
        draw_grid(&painter, rect, camera, &settings.grid);
    }

    let sel = &settings.viewport.selection_color;
    for node in group.nodes() {
        let stroke = match &node.kind {
            NodeKind::Ground => continue,
            NodeKind::Furniture { object_id, .. } if selected == Some(object_id) => {
                Stroke::new(2.0, Color32::from_rgb(sel[0], sel[1], sel[2]))
            }
            _ => Stroke::new(1.0, node_color(node)),
        };
        draw_node_edges(&painter, rect, camera, node, stroke);
    }
}

fn node_color(node: &SceneNode) -> Color32 {
    let [r, g, b] = node.color.map(|c| (c.clamp(0.0, 1.0) * 255.0) as u8);
    Color32::from_rgb(r, g, b)
}

/// Triangle edges of a node projected to screen
fn draw_node_edges(
    painter: &egui::Painter,
    rect: Rect,
    camera: &ArcBallCamera,
    node: &SceneNode,
    stroke: Stroke,
) {
    let world = node.world_positions();
    for tri in node.mesh.indices.chunks_exact(3) {
        for k in 0..3 {
            let (Some(a), Some(b)) = (
                world.get(tri[k] as usize),
                world.get(tri[(k + 1) % 3] as usize),
            ) else {
                continue;
            };
            if let (Some(pa), Some(pb)) = (camera.project(*a, rect), camera.project(*b, rect)) {
                painter.line_segment([pa, pb], stroke);
            }
        }
    }
}

fn draw_grid(painter: &egui::Painter, rect: Rect, camera: &ArcBallCamera, settings: &GridSettings) {
    let alpha = (settings.opacity * 255.0) as u8;
    let grid_color = Color32::from_rgba_unmultiplied(148, 163, 184, alpha);
    let stroke = Stroke::new(0.5, grid_color);

    let range = settings.range;
    let step = settings.size;
    let extent = range as f32 * step;

    for i in -range..=range {
        let f = i as f32 * step;

        // Lines along Z
        if let (Some(a), Some(b)) = (
            camera.project(Vec3::new(f, 0.0, -extent), rect),
            camera.project(Vec3::new(f, 0.0, extent), rect),
        ) {
            if rect.contains(a) || rect.contains(b) {
                painter.line_segment([a, b], stroke);
            }
        }
        // Lines along X
        if let (Some(a), Some(b)) = (
            camera.project(Vec3::new(-extent, 0.0, f), rect),
            camera.project(Vec3::new(extent, 0.0, f), rect),
        ) {
            if rect.contains(a) || rect.contains(b) {
                painter.line_segment([a, b], stroke);
            }
        }
    }
}
