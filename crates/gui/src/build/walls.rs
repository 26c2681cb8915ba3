//! Wall segments -> extruded boxes

use glam::Vec3;
use plan_shared::{ElementGeometry, PlanElement};

use super::{
    BuildContext, NodeKind, NodeTransform, SceneNode, LOAD_BEARING_WALL_COLOR, WALL_COLOR, WALL_HEIGHT,
    WALL_THICKNESS,
};
use crate::coords::to_scene_xz;
use crate::viewport::mesh::{cuboid, rgb_hex};

/// Build one wall box, or None if the segment is malformed.
///
/// The box's long axis is local X; it is yawed by `-atan2(dz, dx)` of the
/// mapped segment so its ends land on the mapped endpoints.
pub fn build_wall(element: &PlanElement, ctx: &BuildContext) -> Option<SceneNode> {
    let ElementGeometry::Segment {
        start: Some(start),
        end: Some(end),
        ..
    } = &element.geometry
    else {
        tracing::trace!("Skipping wall {:?}: not a segment with both endpoints", element.id);
        return None;
    };

    let (Some((x0, y0)), Some((x1, y1))) = (start.coords(), end.coords()) else {
        tracing::trace!("Skipping wall {:?}: missing or non-finite endpoint", element.id);
        return None;
    };

    let dx_px = x1 - x0;
    let dy_px = y1 - y0;
    let length = (dx_px * dx_px + dy_px * dy_px).sqrt() / ctx.scale;
    if !length.is_finite() || length <= f64::EPSILON {
        tracing::trace!("Skipping wall {:?}: degenerate length {length}", element.id);
        return None;
    }

    let a = to_scene_xz(x0, y0, ctx.scale);
    let b = to_scene_xz(x1, y1, ctx.scale);
    let center = to_scene_xz((x0 + x1) / 2.0, (y0 + y1) / 2.0, ctx.scale);
    let rotation_y = -(b.z - a.z).atan2(b.x - a.x);

    let load_bearing = element.is_load_bearing();
    let color = rgb_hex(if load_bearing {
        LOAD_BEARING_WALL_COLOR
    } else {
        WALL_COLOR
    });

    let mesh = cuboid(
        length as f32,
        WALL_HEIGHT as f32,
        WALL_THICKNESS as f32,
        color,
    );
    let transform = NodeTransform::new(
        Vec3::new(
            center.x as f32,
            (WALL_HEIGHT / 2.0) as f32,
            center.z as f32,
        ),
        rotation_y as f32,
    );

    Some(SceneNode::new(
        NodeKind::Wall {
            element_id: element.id.clone(),
            load_bearing,
        },
        mesh,
        transform,
        color,
    ))
}
