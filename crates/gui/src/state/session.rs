//! Per-viewer session: everything one viewport instance owns.
//!
//! The external owner hands plans in through [`ViewerSession::set_plan`] and
//! receives every accepted edit through the change callback. The session keeps
//! a mirror of the latest plan so a drag can chain moves without waiting for
//! the owner to push the value back.

use egui::{Pos2, Rect};
use plan_shared::{FurnitureType, ObjectId, PlanDocument};

use crate::build::{RenderGroup, SceneCache};
use crate::command::{apply_command, PlanCommand, RotateDirection};
use crate::coords::to_plan_px;
use crate::mutation;
use crate::state::interaction::{InteractionController, DRAG_PLANE_HEIGHT};
use crate::state::selection::SelectionState;
use crate::viewport::camera::ArcBallCamera;
use crate::viewport::picking::ray_plane_y;

/// Receives every plan produced by an accepted edit
pub type PlanChangeCallback = Box<dyn FnMut(PlanDocument)>;

pub struct ViewerSession {
    pub camera: ArcBallCamera,
    pub selection: SelectionState,
    controller: InteractionController,
    cache: SceneCache,
    plan: PlanDocument,
    version: u64,
    on_plan_change: PlanChangeCallback,
}

impl ViewerSession {
    pub fn new(plan: PlanDocument, on_plan_change: PlanChangeCallback) -> Self {
        Self {
            camera: ArcBallCamera::new(),
            selection: SelectionState::default(),
            controller: InteractionController::new(),
            cache: SceneCache::new(),
            plan,
            version: 0,
            on_plan_change,
        }
    }

    /// Latest plan value seen or produced by this session
    pub fn plan(&self) -> &PlanDocument {
        &self.plan
    }

    /// Bumped on every content change of the plan
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Adopt a plan pushed by the owner. The newest value always wins over
    /// the session's own mirror, including mid-drag.
    pub fn set_plan(&mut self, plan: PlanDocument) {
        if plan == self.plan {
            return;
        }
        self.plan = plan;
        self.version += 1;

        if let Some(id) = self.controller.dragged_id() {
            if !self.plan.contains_object(id) {
                tracing::debug!("Dragged object {id} vanished from the plan, ending drag");
                self.controller.pointer_up();
            }
        }
        let plan = &self.plan;
        self.selection.retain_existing(|id| plan.contains_object(id));
    }

    /// Rebuild the scene if the plan changed since the last build
    pub fn sync_scene(&mut self) -> &RenderGroup {
        self.cache.ensure(&self.plan, self.version);
        self.cache.group()
    }

    /// Scene as of the last `sync_scene`
    pub fn group(&self) -> &RenderGroup {
        self.cache.group()
    }

    pub fn rebuild_count(&self) -> u64 {
        self.cache.rebuild_count()
    }

    fn commit(&mut self, next: PlanDocument) {
        if next == self.plan {
            return;
        }
        self.plan = next;
        self.version += 1;
        (self.on_plan_change)(self.plan.clone());
    }

    // ── Pointer ───────────────────────────────────────────────

    /// Press at `pos` inside `rect`. Selects and starts dragging the hit object.
    pub fn pointer_down(&mut self, pos: Pos2, rect: Rect) -> Option<ObjectId> {
        self.sync_scene();
        let ray = self.camera.screen_ray(pos, rect);
        let hit = self.controller.pointer_down(&ray, self.cache.group())?;
        self.selection.select(hit.clone());
        Some(hit)
    }

    /// Pointer moved. Returns true if the dragged object moved.
    pub fn pointer_move(&mut self, pos: Pos2, rect: Rect) -> bool {
        if !self.controller.is_dragging() {
            return false;
        }
        self.sync_scene();
        let ray = self.camera.screen_ray(pos, rect);
        match self
            .controller
            .pointer_move(&ray, self.cache.group_mut(), &self.plan)
        {
            Some(next) => {
                self.commit(next);
                true
            }
            None => false,
        }
    }

    pub fn pointer_up(&mut self) {
        self.controller.pointer_up();
    }

    /// Pointer left the viewport: ends a drag like a release
    pub fn pointer_leave(&mut self) {
        self.controller.pointer_up();
    }

    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    pub fn dragged_id(&self) -> Option<&str> {
        self.controller.dragged_id()
    }

    /// Plan pixel coordinates under the pointer, on the floor plane
    pub fn pointer_plan_px(&self, pos: Pos2, rect: Rect) -> Option<(f64, f64)> {
        let ray = self.camera.screen_ray(pos, rect);
        let hit = ray_plane_y(&ray, DRAG_PLANE_HEIGHT)?;
        Some(to_plan_px(
            hit.x as f64,
            hit.z as f64,
            crate::coords::scale_or_default(self.plan.px_per_meter()),
        ))
    }

    // ── Edits ─────────────────────────────────────────────────

    /// Add an object of `ty` and select it
    pub fn add_object(&mut self, ty: FurnitureType) -> ObjectId {
        let (next, id) = mutation::add_object(&self.plan, ty.as_str());
        self.commit(next);
        self.selection.select(id.clone());
        tracing::info!("Added {ty} {id}");
        id
    }

    /// Rotate the selected object by a quarter turn. False if nothing is selected.
    pub fn rotate_selected(&mut self, direction: RotateDirection) -> bool {
        let Some(id) = self.selection.selected().cloned() else {
            return false;
        };
        if !self.plan.contains_object(&id) {
            return false;
        }
        let next = mutation::rotate_object(&self.plan, &id, direction.delta());
        self.commit(next);
        true
    }

    /// Apply a plan command through the session so the callback fires
    pub fn apply(&mut self, cmd: PlanCommand) {
        let next = apply_command(&self.plan, &cmd);
        self.commit(next);
    }

    // ── Selection / camera ────────────────────────────────────

    /// Select an object by id. False if it is not in the plan.
    pub fn select(&mut self, id: &str) -> bool {
        if !self.plan.contains_object(id) {
            return false;
        }
        self.selection.select(id.to_string());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selected_id(&self) -> Option<&ObjectId> {
        self.selection.selected()
    }

    pub fn reset_camera(&mut self) {
        let fov = self.camera.fov;
        self.camera = ArcBallCamera::new();
        self.camera.fov = fov;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn session_with(plan: PlanDocument) -> (ViewerSession, Rc<RefCell<Vec<PlanDocument>>>) {
        let emitted = Rc::new(RefCell::new(Vec::new()));
        let sink = emitted.clone();
        let session = ViewerSession::new(plan, Box::new(move |p| sink.borrow_mut().push(p)));
        (session, emitted)
    }

    #[test]
    fn test_add_selects_and_emits() {
        let (mut s, emitted) = session_with(empty_plan());
        let id = s.add_object(FurnitureType::Bed);
        assert_eq!(s.selected_id(), Some(&id));
        assert_eq!(emitted.borrow().len(), 1);
        assert_eq!(emitted.borrow()[0].objects3d[0].object_type, "bed");
    }

    #[test]
    fn test_rotate_requires_selection() {
        let (mut s, emitted) = session_with(sample_plan());
        assert!(!s.rotate_selected(RotateDirection::Right));
        assert!(emitted.borrow().is_empty());

        assert!(s.select("bed-1"));
        assert!(s.rotate_selected(RotateDirection::Right));
        assert!(s.rotate_selected(RotateDirection::Right));
        let y = s.plan().find_object("bed-1").unwrap().rotation_y();
        assert!((y - std::f64::consts::PI).abs() < 1e-12);
        assert_eq!(emitted.borrow().len(), 2);
    }

    #[test]
    fn test_select_unknown_id_rejected() {
        let (mut s, _) = session_with(sample_plan());
        assert!(!s.select("nope"));
        assert!(s.selected_id().is_none());
    }

    #[test]
    fn test_set_plan_same_content_keeps_version() {
        let (mut s, _) = session_with(sample_plan());
        s.sync_scene();
        s.set_plan(sample_plan());
        assert_eq!(s.version(), 0);
        s.sync_scene();
        assert_eq!(s.rebuild_count(), 1);
    }

    #[test]
    fn test_set_plan_last_write_wins() {
        let (mut s, _) = session_with(sample_plan());
        s.select("table-1");
        let mut newer = sample_plan();
        newer.objects3d.retain(|o| o.id != "table-1");
        s.set_plan(newer.clone());
        assert_eq!(s.plan(), &newer);
        assert!(s.selected_id().is_none());
        assert_eq!(s.sync_scene().furniture().count(), 2);
    }

    #[test]
    fn test_apply_unknown_id_does_not_emit() {
        let (mut s, emitted) = session_with(sample_plan());
        s.apply(PlanCommand::RotateObject {
            id: "missing".into(),
            delta: 1.0,
        });
        assert!(emitted.borrow().is_empty());
        assert_eq!(s.version(), 0);
    }

    #[test]
    fn test_reset_camera_keeps_fov() {
        let (mut s, _) = session_with(empty_plan());
        s.camera.fov = 1.0;
        s.camera.rotate(30.0, 10.0);
        s.reset_camera();
        assert_eq!(s.camera.fov, 1.0);
        assert_eq!(s.camera.target, glam::Vec3::ZERO);
    }
}
