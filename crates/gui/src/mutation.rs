//! Pure plan edits.
//!
//! Each function takes the current document by reference and returns a new
//! value; the input is never modified. Edits addressed to an unknown id
//! return an unchanged copy.

use plan_shared::{ObjectId, ObjectPosition, PlacedObject, PlanDocument, Rotation3, Vec3d};

/// Where new objects appear (meters)
pub const DEFAULT_OBJECT_POSITION: ObjectPosition = ObjectPosition {
    x: 0.0,
    y: Some(0.5),
    z: 0.0,
};

/// Size of new objects (meters)
pub const DEFAULT_OBJECT_SIZE: Vec3d = Vec3d {
    x: 1.2,
    y: 0.7,
    z: 0.8,
};

/// Generate a fresh object id
pub fn new_object_id() -> ObjectId {
    uuid::Uuid::new_v4().to_string()
}

/// Generate an id not yet used by any object of `plan`
pub fn unused_object_id(plan: &PlanDocument) -> ObjectId {
    let mut id = new_object_id();
    while plan.contains_object(&id) {
        id = new_object_id();
    }
    id
}

/// Append a new object of `object_type` with a generated id.
pub fn add_object(plan: &PlanDocument, object_type: &str) -> (PlanDocument, ObjectId) {
    let id = unused_object_id(plan);
    (add_object_with_id(plan, object_type, &id), id)
}

/// Append a new object with a caller-chosen id. No-op if the id is taken.
pub fn add_object_with_id(plan: &PlanDocument, object_type: &str, id: &str) -> PlanDocument {
    let mut next = plan.clone();
    if plan.contains_object(id) {
        tracing::debug!("add_object: id {id} already present, ignoring");
        return next;
    }
    next.objects3d.push(PlacedObject {
        id: id.to_string(),
        object_type: object_type.to_string(),
        position: DEFAULT_OBJECT_POSITION,
        size: Some(DEFAULT_OBJECT_SIZE),
        rotation: Some(Rotation3::yaw(0.0)),
        extra: Default::default(),
    });
    next
}

/// Replace the position of object `id`.
pub fn move_object(plan: &PlanDocument, id: &str, position: ObjectPosition) -> PlanDocument {
    let mut next = plan.clone();
    match next.objects3d.iter_mut().find(|o| o.id == id) {
        Some(obj) => obj.position = position,
        None => tracing::debug!("move_object: unknown id {id}"),
    }
    next
}

/// Add `delta` radians to the yaw of object `id`.
pub fn rotate_object(plan: &PlanDocument, id: &str, delta: f64) -> PlanDocument {
    let mut next = plan.clone();
    match next.objects3d.iter_mut().find(|o| o.id == id) {
        Some(obj) => {
            let mut rotation = obj.rotation.unwrap_or_default();
            rotation.y += delta;
            obj.rotation = Some(rotation);
        }
        None => tracing::debug!("rotate_object: unknown id {id}"),
    }
    next
}
