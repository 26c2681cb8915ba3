//! Plan document -> render-ready scene graph.
//!
//! Every call produces a complete [`RenderGroup`] from scratch. Malformed
//! elements are skipped (logged at `trace`), never reported as errors.

mod cache;
mod furniture;
mod walls;
mod zones;

pub use cache::SceneCache;
pub use furniture::{build_furniture, color_for_type};
pub use walls::build_wall;
pub use zones::build_zone;

use glam::{Mat4, Vec3};
use plan_shared::{ElementType, ObjectId, PlanDocument};

use crate::coords::{safe_number, scale_or_default};
use crate::viewport::mesh::{self, rgb_hex, MeshData};
use crate::viewport::picking::{pick_nearest, Aabb, Ray};

/// Wall height in meters, independent of `meta.ceiling_height_m`
pub const WALL_HEIGHT: f64 = 2.7;
/// Wall thickness in meters
pub const WALL_THICKNESS: f64 = 0.2;
/// Canvas size assumed when `meta.width`/`meta.height` are missing
pub const DEFAULT_CANVAS_PX: f64 = 1000.0;

pub const GROUND_COLOR: u32 = 0xf8fafc;
pub const WALL_COLOR: u32 = 0x9ca3af;
pub const LOAD_BEARING_WALL_COLOR: u32 = 0x475569;
pub const ZONE_COLOR: u32 = 0xe2e8f0;
pub const TYPED_ZONE_COLOR: u32 = 0xcbd5e1;
pub const ZONE_OPACITY: f32 = 0.8;

/// What a scene node was built from
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Ground,
    Wall {
        element_id: Option<String>,
        load_bearing: bool,
    },
    Zone {
        element_id: Option<String>,
        zone_type: Option<String>,
    },
    Furniture {
        object_id: ObjectId,
        object_type: String,
    },
}

/// Translation plus rotation about the vertical axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeTransform {
    pub position: Vec3,
    pub rotation_y: f32,
}

impl NodeTransform {
    pub const IDENTITY: NodeTransform = NodeTransform {
        position: Vec3::ZERO,
        rotation_y: 0.0,
    };

    pub fn new(position: Vec3, rotation_y: f32) -> Self {
        Self {
            position,
            rotation_y,
        }
    }

    /// Model matrix (local -> world)
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_rotation_y(self.rotation_y)
    }
}

/// One renderable volume or surface
#[derive(Clone, Debug)]
pub struct SceneNode {
    pub kind: NodeKind,
    /// Geometry in the node's local frame
    pub mesh: MeshData,
    pub transform: NodeTransform,
    pub color: [f32; 3],
    pub opacity: f32,
    /// Local-space bounds of `mesh`
    pub bounds: Aabb,
}

impl SceneNode {
    pub fn new(kind: NodeKind, mesh: MeshData, transform: NodeTransform, color: [f32; 3]) -> Self {
        let bounds = Aabb::from_mesh(&mesh);
        Self {
            kind,
            mesh,
            transform,
            color,
            opacity: 1.0,
            bounds,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Source object id for furniture nodes
    pub fn object_id(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Furniture { object_id, .. } => Some(object_id),
            _ => None,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }

    /// Mesh vertex positions in world space
    pub fn world_positions(&self) -> Vec<Vec3> {
        let m = self.transform.matrix();
        self.mesh.positions().map(|p| m.transform_point3(p)).collect()
    }

    /// Footprint corners of the local bounds at floor level of the node, in world space
    pub fn footprint(&self) -> [Vec3; 4] {
        let m = self.transform.matrix();
        let (lo, hi) = (self.bounds.min, self.bounds.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, lo.y, hi.z),
        ]
        .map(|p| m.transform_point3(p))
    }
}

/// The complete render state for one plan value
#[derive(Clone, Debug, Default)]
pub struct RenderGroup {
    nodes: Vec<SceneNode>,
}

impl RenderGroup {
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn push(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }

    pub fn ground(&self) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.kind == NodeKind::Ground)
    }

    pub fn walls(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Wall { .. }))
    }

    pub fn zones(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Zone { .. }))
    }

    pub fn furniture(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter().filter(|n| n.object_id().is_some())
    }

    pub fn furniture_node(&self, id: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.object_id() == Some(id))
    }

    pub fn furniture_node_mut(&mut self, id: &str) -> Option<&mut SceneNode> {
        self.nodes.iter_mut().find(|n| n.object_id() == Some(id))
    }

    /// Nearest furniture volume hit by the ray, with its hit distance
    pub fn pick_furniture(&self, ray: &Ray) -> Option<(ObjectId, f32)> {
        let candidates = self.nodes.iter().filter_map(|n| {
            n.object_id()
                .map(|id| (id.to_string(), n.transform.matrix(), &n.bounds))
        });
        pick_nearest(ray, candidates)
    }
}

/// Parameters shared by the per-element builders
#[derive(Clone, Copy, Debug)]
pub struct BuildContext {
    /// Effective pixels per meter
    pub scale: f64,
}

impl BuildContext {
    pub fn from_plan(plan: &PlanDocument) -> Self {
        Self {
            scale: scale_or_default(plan.px_per_meter()),
        }
    }
}

/// Build the ground plane sized from the pixel canvas
pub fn build_ground(plan: &PlanDocument, ctx: &BuildContext) -> SceneNode {
    let width_px = safe_number(plan.meta.width.unwrap_or(DEFAULT_CANVAS_PX), DEFAULT_CANVAS_PX);
    let height_px = safe_number(plan.meta.height.unwrap_or(DEFAULT_CANVAS_PX), DEFAULT_CANVAS_PX);
    let width = (width_px.max(0.0) / ctx.scale) as f32;
    let depth = (height_px.max(0.0) / ctx.scale) as f32;
    let color = rgb_hex(GROUND_COLOR);
    SceneNode::new(
        NodeKind::Ground,
        mesh::ground_plane(width, depth, color),
        NodeTransform::IDENTITY,
        color,
    )
}

/// Build the full scene for a plan document
pub fn build_scene(plan: &PlanDocument) -> RenderGroup {
    let ctx = BuildContext::from_plan(plan);
    let mut group = RenderGroup::default();

    group.push(build_ground(plan, &ctx));

    let mut skipped = 0usize;
    for element in &plan.elements {
        let node = match element.element_type {
            ElementType::Wall => walls::build_wall(element, &ctx),
            ElementType::Zone => zones::build_zone(element, &ctx),
            _ => continue,
        };
        match node {
            Some(node) => group.push(node),
            None => skipped += 1,
        }
    }

    for object in &plan.objects3d {
        match furniture::build_furniture(object) {
            Some(node) => group.push(node),
            None => skipped += 1,
        }
    }

    tracing::debug!(
        "Built scene: {} walls, {} zones, {} objects ({} skipped)",
        group.walls().count(),
        group.zones().count(),
        group.furniture().count(),
        skipped
    );

    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;

    #[test]
    fn test_empty_plan_has_only_ground() {
        let group = build_scene(&empty_plan());
        assert_eq!(group.len(), 1);
        assert!(group.ground().is_some());
    }

    #[test]
    fn test_ground_size_from_canvas() {
        let plan = plan_with(800.0, 600.0, 200.0, vec![], vec![]);
        let group = build_scene(&plan);
        let size = group.ground().unwrap().bounds.size();
        assert!((size.x - 4.0).abs() < 1e-6);
        assert!((size.z - 3.0).abs() < 1e-6);
        assert_eq!(size.y, 0.0);
    }

    #[test]
    fn test_ground_defaults_without_meta() {
        let group = build_scene(&PlanDocument::default());
        let size = group.ground().unwrap().bounds.size();
        assert!((size.x - 10.0).abs() < 1e-6);
        assert!((size.z - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_non_geometric_elements_ignored() {
        let plan = plan_with(
            1000.0,
            1000.0,
            100.0,
            vec![door((0.0, 0.0), (80.0, 0.0)), label(10.0, 10.0)],
            vec![],
        );
        assert_eq!(build_scene(&plan).len(), 1);
    }

    #[test]
    fn test_wall_height_ignores_ceiling_height() {
        let mut plan = plan_with(1000.0, 1000.0, 100.0, vec![wall((0.0, 0.0), (100.0, 0.0))], vec![]);
        for ceiling in [None, Some(3.0), Some(12.0)] {
            plan.meta.ceiling_height_m = ceiling;
            let group = build_scene(&plan);
            let w = group.walls().next().unwrap();
            assert!((w.bounds.size().y - 2.7).abs() < 1e-6, "ceiling {ceiling:?}");
            assert!((w.transform.position.y - 1.35).abs() < 1e-6, "ceiling {ceiling:?}");
        }
        assert_eq!(plan.meta.ceiling_height_m, Some(12.0));
    }

    #[test]
    fn test_pick_furniture_by_ray() {
        let plan = plan_with(
            1000.0,
            1000.0,
            100.0,
            vec![],
            vec![object_at("a", "sofa", 0.0, 0.0), object_at("b", "bed", 3.0, 0.0)],
        );
        let group = build_scene(&plan);
        let ray = Ray::new(Vec3::new(3.0, 10.0, 0.0), Vec3::NEG_Y);
        let (id, _) = group.pick_furniture(&ray).unwrap();
        assert_eq!(id, "b");

        let miss = Ray::new(Vec3::new(1.5, 10.0, 0.0), Vec3::NEG_Y);
        assert!(group.pick_furniture(&miss).is_none());
    }
}
