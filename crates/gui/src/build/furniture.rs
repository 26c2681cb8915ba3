//! Placed objects -> colored boxes

use glam::Vec3;
use plan_shared::{FurnitureType, PlacedObject};

use super::{NodeKind, NodeTransform, SceneNode};
use crate::coords::safe_number;
use crate::viewport::mesh::{cuboid, rgb_hex};

/// Display color for an object category. Unknown categories share one color.
pub fn color_for_type(object_type: &str) -> u32 {
    match FurnitureType::from_type_str(object_type) {
        FurnitureType::Sofa => 0x38bdf8,
        FurnitureType::Table => 0x22c55e,
        FurnitureType::Wardrobe => 0xf59e0b,
        FurnitureType::Bed => 0xa855f7,
        FurnitureType::Chair | FurnitureType::Other => 0x94a3b8,
    }
}

/// Build a furniture box, or None if its size or position is unusable.
pub fn build_furniture(object: &PlacedObject) -> Option<SceneNode> {
    let size = object.size_or_default();
    let size_ok = [size.x, size.y, size.z]
        .iter()
        .all(|v| v.is_finite() && *v > 0.0);
    if !size_ok {
        tracing::trace!("Skipping object {}: bad size {:?}", object.id, size);
        return None;
    }
    if !object.position.x.is_finite() || !object.position.z.is_finite() {
        tracing::trace!("Skipping object {}: non-finite position", object.id);
        return None;
    }

    let y = safe_number(object.center_y(), size.y / 2.0);
    let rotation_y = safe_number(object.rotation_y(), 0.0);
    let color = rgb_hex(color_for_type(&object.object_type));

    Some(SceneNode::new(
        NodeKind::Furniture {
            object_id: object.id.clone(),
            object_type: object.object_type.clone(),
        },
        cuboid(size.x as f32, size.y as f32, size.z as f32, color),
        NodeTransform::new(
            Vec3::new(object.position.x as f32, y as f32, object.position.z as f32),
            rotation_y as f32,
        ),
        color,
    ))
}
