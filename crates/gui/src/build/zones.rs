//! Zone polygons -> flat translucent surfaces

use earcutr::earcut;
use kurbo::{BezPath, Point, Shape};
use plan_shared::{ElementGeometry, PlanElement, Point2};

use super::{BuildContext, NodeKind, NodeTransform, SceneNode, TYPED_ZONE_COLOR, ZONE_COLOR, ZONE_OPACITY};
use crate::coords::to_scene_xz;
use crate::viewport::mesh::{flat_mesh, rgb_hex};

/// Height of zone surfaces above the ground, keeps them from z-fighting with it
pub const ZONE_LIFT: f32 = 0.005;

/// Finite polygon vertices, with consecutive duplicates and a closing duplicate removed
fn usable_points(points: &[Point2]) -> Vec<(f64, f64)> {
    let mut pts: Vec<(f64, f64)> = points.iter().filter_map(Point2::coords).collect();
    pts.dedup();
    if pts.len() > 3 && pts.first() == pts.last() {
        pts.pop();
    }
    pts
}

/// Outline of the zone on the scene plane, as (x, z)
fn scene_outline(points: &[(f64, f64)], scale: f64) -> BezPath {
    let mut path = BezPath::new();
    for (i, &(px, py)) in points.iter().enumerate() {
        let s = to_scene_xz(px, py, scale);
        let pt = Point::new(s.x, s.z);
        if i == 0 {
            path.move_to(pt);
        } else {
            path.line_to(pt);
        }
    }
    path.close_path();
    path
}

/// Build one zone surface, or None if the polygon cannot be filled.
pub fn build_zone(element: &PlanElement, ctx: &BuildContext) -> Option<SceneNode> {
    let ElementGeometry::Polygon { points, .. } = &element.geometry else {
        tracing::trace!("Skipping zone {:?}: not a polygon", element.id);
        return None;
    };

    let points = usable_points(points);
    if points.len() < 3 {
        tracing::trace!("Skipping zone {:?}: {} usable points", element.id, points.len());
        return None;
    }

    let outline = scene_outline(&points, ctx.scale);
    let area = outline.area();
    if !area.is_finite() || area.abs() <= f64::EPSILON {
        tracing::trace!("Skipping zone {:?}: zero area", element.id);
        return None;
    }

    let flat: Vec<f64> = outline
        .elements()
        .iter()
        .filter_map(|el| match el {
            kurbo::PathEl::MoveTo(p) | kurbo::PathEl::LineTo(p) => Some([p.x, p.y]),
            _ => None,
        })
        .flatten()
        .collect();

    let indices = earcut(&flat, &[], 2).unwrap_or_default();
    if indices.is_empty() {
        tracing::trace!("Skipping zone {:?}: triangulation failed", element.id);
        return None;
    }

    let verts: Vec<[f32; 2]> = flat
        .chunks_exact(2)
        .map(|c| [c[0] as f32, c[1] as f32])
        .collect();
    let triangles: Vec<u32> = indices.into_iter().map(|i| i as u32).collect();

    let zone_type = element.zone_type().map(str::to_string);
    let color = rgb_hex(if zone_type.is_some() {
        TYPED_ZONE_COLOR
    } else {
        ZONE_COLOR
    });

    Some(
        SceneNode::new(
            NodeKind::Zone {
                element_id: element.id.clone(),
                zone_type,
            },
            flat_mesh(&verts, &triangles, ZONE_LIFT, color),
            NodeTransform::IDENTITY,
            color,
        )
        .with_opacity(ZONE_OPACITY),
    )
}
