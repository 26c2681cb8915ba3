//! Headless test harness for programmatic plan manipulation.
//!
//! Wraps a [`ViewerSession`] with a fixed viewport rect and records every
//! plan the session emits, standing in for the external plan owner.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use egui::{Pos2, Rect};
use glam::Vec3;
use plan_shared::{FurnitureType, ObjectId, PlanDocument};

use crate::build::RenderGroup;
use crate::command::PlanCommand;
use crate::state::session::ViewerSession;
use crate::validation::MeshValidator;

/// Default headless viewport size
pub const HARNESS_VIEWPORT: [f32; 2] = [800.0, 600.0];

/// Headless test harness: session, fixed viewport and captured emissions
pub struct ViewerHarness {
    pub session: ViewerSession,
    rect: Rect,
    emitted: Rc<RefCell<Vec<PlanDocument>>>,
}

impl ViewerHarness {
    /// Create a harness viewing `plan`.
    pub fn new(plan: PlanDocument) -> Self {
        let emitted = Rc::new(RefCell::new(Vec::new()));
        let sink = emitted.clone();
        let session = ViewerSession::new(plan, Box::new(move |p| sink.borrow_mut().push(p)));
        Self {
            session,
            rect: Rect::from_min_size(
                Pos2::ZERO,
                egui::vec2(HARNESS_VIEWPORT[0], HARNESS_VIEWPORT[1]),
            ),
            emitted,
        }
    }

    /// Create a harness with an empty plan.
    pub fn empty() -> Self {
        Self::new(PlanDocument::new(1000.0, 1000.0, 100.0))
    }

    /// Use a different viewport rect (e.g. offset from the window origin)
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    // ── Plan ──────────────────────────────────────────────────

    pub fn plan(&self) -> &PlanDocument {
        self.session.plan()
    }

    /// Push a plan from the owner side
    pub fn set_plan(&mut self, plan: PlanDocument) {
        self.session.set_plan(plan);
    }

    /// Load a plan from JSON string
    pub fn load_plan_json(&mut self, json: &str) -> Result<(), String> {
        let plan = PlanDocument::from_json(json)?;
        self.set_plan(plan);
        Ok(())
    }

    /// Export the current plan as JSON
    pub fn export_plan_json(&self) -> Result<String, String> {
        self.plan().to_json_pretty()
    }

    /// Every plan emitted through the change callback, oldest first
    pub fn emitted(&self) -> Ref<'_, Vec<PlanDocument>> {
        self.emitted.borrow()
    }

    pub fn last_emitted(&self) -> Option<PlanDocument> {
        self.emitted.borrow().last().cloned()
    }

    /// Play the owner: push the last emitted plan back into the session
    pub fn acknowledge(&mut self) {
        if let Some(plan) = self.last_emitted() {
            self.session.set_plan(plan);
        }
    }

    // ── Edits ─────────────────────────────────────────────────

    pub fn add_object(&mut self, ty: FurnitureType) -> ObjectId {
        self.session.add_object(ty)
    }

    pub fn apply(&mut self, cmd: PlanCommand) {
        self.session.apply(cmd);
    }

    // ── Pointer ───────────────────────────────────────────────

    pub fn pointer_down(&mut self, pos: Pos2) -> Option<ObjectId> {
        self.session.pointer_down(pos, self.rect)
    }

    pub fn pointer_move(&mut self, pos: Pos2) -> bool {
        self.session.pointer_move(pos, self.rect)
    }

    pub fn pointer_up(&mut self) {
        self.session.pointer_up();
    }

    /// Screen position of a world point
    pub fn screen_pos_of(&self, point: Vec3) -> Option<Pos2> {
        self.session.camera.project(point, self.rect)
    }

    /// Screen position of an object's box center
    pub fn screen_pos_of_object(&mut self, id: &str) -> Option<Pos2> {
        let center = self.build().furniture_node(id)?.transform.position;
        self.screen_pos_of(center)
    }

    /// Press on `id`, drag to floor point (x, z), release. True if the object moved.
    pub fn drag_object_to(&mut self, id: &str, x: f32, z: f32) -> bool {
        let Some(start) = self.screen_pos_of_object(id) else {
            return false;
        };
        let Some(end) = self.screen_pos_of(Vec3::new(x, 0.0, z)) else {
            return false;
        };
        if self.pointer_down(start).as_deref() != Some(id) {
            self.pointer_up();
            return false;
        }
        let moved = self.pointer_move(end);
        self.pointer_up();
        moved
    }

    // ── Build + inspection ────────────────────────────────────

    /// Bring the scene up to date with the plan and return it
    pub fn build(&mut self) -> &RenderGroup {
        self.session.sync_scene()
    }

    /// Validator for an object's mesh, after building
    pub fn validate_object(&mut self, id: &str) -> Option<Vec<String>> {
        let node = self.build().furniture_node(id)?;
        Some(MeshValidator::new(&node.mesh).validate_all())
    }
}

impl Default for ViewerHarness {
    fn default() -> Self {
        Self::empty()
    }
}
