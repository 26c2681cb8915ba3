//! Pointer-driven furniture dragging.
//!
//! `Idle` until a pointer-down hits a furniture volume, then `Dragging(id)`
//! until pointer-up. Each move while dragging projects the pointer onto the
//! floor plane and yields the plan with that object's x/z replaced.

use glam::Vec3;
use plan_shared::{ObjectId, ObjectPosition, PlanDocument};

use crate::build::RenderGroup;
use crate::mutation::move_object;
use crate::viewport::picking::{ray_plane_y, Ray};

/// Height of the plane dragged objects slide on
pub const DRAG_PLANE_HEIGHT: f32 = 0.0;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { object_id: ObjectId },
}

/// Drag state machine. Holds at most one dragged id.
#[derive(Debug, Default)]
pub struct InteractionController {
    state: DragState,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn dragged_id(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging { object_id } => Some(object_id),
            DragState::Idle => None,
        }
    }

    /// Start a drag if the ray hits a furniture volume. Returns the hit id.
    pub fn pointer_down(&mut self, ray: &Ray, group: &RenderGroup) -> Option<ObjectId> {
        let (id, dist) = group.pick_furniture(ray)?;
        tracing::debug!("Drag start on {id} at distance {dist:.3}");
        self.state = DragState::Dragging {
            object_id: id.clone(),
        };
        Some(id)
    }

    /// Move the dragged object to where the ray meets the floor.
    ///
    /// Updates the rendered node in `group` and returns the edited plan.
    /// None while idle, when the ray misses the plane, or when the object
    /// is not in `plan`.
    pub fn pointer_move(
        &mut self,
        ray: &Ray,
        group: &mut RenderGroup,
        plan: &PlanDocument,
    ) -> Option<PlanDocument> {
        let DragState::Dragging { object_id } = &self.state else {
            return None;
        };
        let hit = ray_plane_y(ray, DRAG_PLANE_HEIGHT)?;
        self.drag_to(object_id.clone(), hit, group, plan)
    }

    fn drag_to(
        &self,
        id: ObjectId,
        hit: Vec3,
        group: &mut RenderGroup,
        plan: &PlanDocument,
    ) -> Option<PlanDocument> {
        let current = plan.find_object(&id)?;
        let position = ObjectPosition::new(hit.x as f64, current.position.y, hit.z as f64);

        if let Some(node) = group.furniture_node_mut(&id) {
            node.transform.position.x = hit.x;
            node.transform.position.z = hit.z;
        }

        tracing::trace!("Drag {id} to ({:.3}, {:.3})", hit.x, hit.z);
        Some(move_object(plan, &id, position))
    }

    /// End the drag. The last move already committed the position.
    pub fn pointer_up(&mut self) {
        if let DragState::Dragging { object_id } = &self.state {
            tracing::debug!("Drag end on {object_id}");
        }
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::build_scene;
    use crate::fixtures::*;

    fn down_at(x: f32, z: f32) -> Ray {
        Ray::new(Vec3::new(x, 10.0, z), Vec3::NEG_Y)
    }

    /// Ray from above-ish that meets y = 0 at (x, z)
    fn towards_floor(x: f32, z: f32) -> Ray {
        let target = Vec3::new(x, 0.0, z);
        let origin = target + Vec3::new(3.0, 8.0, 4.0);
        Ray::new(origin, target - origin)
    }

    #[test]
    fn test_down_on_empty_space_stays_idle() {
        let plan = sample_plan();
        let group = build_scene(&plan);
        let mut c = InteractionController::new();
        assert!(c.pointer_down(&down_at(8.0, 8.0), &group).is_none());
        assert_eq!(c.state(), &DragState::Idle);
    }

    #[test]
    fn test_move_while_idle_does_nothing() {
        let plan = sample_plan();
        let mut group = build_scene(&plan);
        let mut c = InteractionController::new();
        assert!(c.pointer_move(&towards_floor(2.0, 5.0), &mut group, &plan).is_none());
    }

    #[test]
    fn test_drag_moves_only_target() {
        let plan = sample_plan();
        let mut group = build_scene(&plan);
        let mut c = InteractionController::new();

        let hit = c.pointer_down(&down_at(1.0, -1.0), &group);
        assert_eq!(hit.as_deref(), Some("sofa-1"));
        assert!(c.is_dragging());

        let next = c
            .pointer_move(&towards_floor(2.0, 5.0), &mut group, &plan)
            .unwrap();
        c.pointer_up();
        assert!(!c.is_dragging());

        let moved = next.find_object("sofa-1").unwrap();
        assert!((moved.position.x - 2.0).abs() < 1e-4);
        assert!((moved.position.z - 5.0).abs() < 1e-4);
        assert_eq!(moved.position.y, plan.find_object("sofa-1").unwrap().position.y);

        for obj in next.objects3d.iter().filter(|o| o.id != "sofa-1") {
            assert_eq!(Some(obj), plan.find_object(&obj.id));
        }

        let node = group.furniture_node("sofa-1").unwrap();
        assert!((node.transform.position.x - 2.0).abs() < 1e-4);
        assert!((node.transform.position.z - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_ray_missing_floor_is_ignored() {
        let plan = sample_plan();
        let mut group = build_scene(&plan);
        let mut c = InteractionController::new();
        c.pointer_down(&down_at(1.0, -1.0), &group);

        let upward = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Y);
        assert!(c.pointer_move(&upward, &mut group, &plan).is_none());
        assert!(c.is_dragging());
    }

    #[test]
    fn test_nearest_object_wins() {
        // Two objects in a row along a horizontal ray
        let plan = plan_with(
            1000.0,
            1000.0,
            100.0,
            vec![],
            vec![object_at("far", "bed", -3.0, 0.0), object_at("near", "sofa", 3.0, 0.0)],
        );
        let group = build_scene(&plan);
        let mut c = InteractionController::new();
        let ray = Ray::new(Vec3::new(10.0, 0.5, 0.0), Vec3::NEG_X);
        assert_eq!(c.pointer_down(&ray, &group).as_deref(), Some("near"));
    }
}
