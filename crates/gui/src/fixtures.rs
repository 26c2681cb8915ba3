//! Factory functions for creating test data.
//!
//! Provides convenient helpers to construct `PlanDocument`, elements and
//! placed objects used in tests and by the scripting interface.

use plan_shared::*;

use crate::mutation::{DEFAULT_OBJECT_POSITION, DEFAULT_OBJECT_SIZE};

// ── Element factories ───────────────────────────────────────────

fn segment(element_type: ElementType, a: (f64, f64), b: (f64, f64), load_bearing: Option<bool>) -> PlanElement {
    PlanElement::new(
        None,
        element_type,
        ElementGeometry::Segment {
            start: Some(Point2::new(a.0, a.1)),
            end: Some(Point2::new(b.0, b.1)),
            load_bearing,
            extra: ExtraFields::new(),
        },
    )
}

/// Plain wall between two pixel points.
pub fn wall(a: (f64, f64), b: (f64, f64)) -> PlanElement {
    segment(ElementType::Wall, a, b, None)
}

/// Load-bearing wall between two pixel points.
pub fn load_bearing_wall(a: (f64, f64), b: (f64, f64)) -> PlanElement {
    segment(ElementType::Wall, a, b, Some(true))
}

/// Door segment (not rendered).
pub fn door(a: (f64, f64), b: (f64, f64)) -> PlanElement {
    segment(ElementType::Door, a, b, None)
}

/// Zone polygon through the given pixel points.
pub fn zone(points: &[(f64, f64)]) -> PlanElement {
    PlanElement::new(
        None,
        ElementType::Zone,
        ElementGeometry::Polygon {
            points: points.iter().map(|&(x, y)| Point2::new(x, y)).collect(),
            zone_type: None,
            extra: ExtraFields::new(),
        },
    )
}

/// Text label at a pixel point (not rendered).
pub fn label(x: f64, y: f64) -> PlanElement {
    PlanElement::new(None, ElementType::Label, ElementGeometry::Point { at: Point2::new(x, y) })
}

// ── Object factories ────────────────────────────────────────────

/// Object of default size standing at (x, z).
pub fn object_at(id: &str, object_type: &str, x: f64, z: f64) -> PlacedObject {
    PlacedObject {
        id: id.to_string(),
        object_type: object_type.to_string(),
        position: ObjectPosition::new(x, DEFAULT_OBJECT_POSITION.y, z),
        size: Some(DEFAULT_OBJECT_SIZE),
        rotation: Some(Rotation3::yaw(0.0)),
        extra: Default::default(),
    }
}

// ── Plan factories ──────────────────────────────────────────────

/// Plan with canvas size, scale, elements and objects.
pub fn plan_with(
    width: f64,
    height: f64,
    px_per_meter: f64,
    elements: Vec<PlanElement>,
    objects: Vec<PlacedObject>,
) -> PlanDocument {
    let mut plan = PlanDocument::new(width, height, px_per_meter);
    plan.elements = elements;
    plan.objects3d = objects;
    plan
}

/// 1000x1000 px canvas at 100 px/m with nothing on it.
pub fn empty_plan() -> PlanDocument {
    plan_with(1000.0, 1000.0, 100.0, vec![], vec![])
}

/// Corners of an L-shaped room: 4x4 m with the 2x2 m corner at (+x, +y) removed.
pub const L_ROOM: [(f64, f64); 6] = [
    (0.0, 0.0),
    (400.0, 0.0),
    (400.0, 200.0),
    (200.0, 200.0),
    (200.0, 400.0),
    (0.0, 400.0),
];

/// L-shaped room: six walls around [`L_ROOM`] plus a zone filling it.
pub fn l_shaped_plan() -> PlanDocument {
    let mut elements: Vec<PlanElement> = (0..L_ROOM.len())
        .map(|i| {
            let w = wall(L_ROOM[i], L_ROOM[(i + 1) % L_ROOM.len()]);
            PlanElement {
                id: Some(format!("wall-{i}")),
                ..w
            }
        })
        .collect();
    elements.push(PlanElement {
        id: Some("room".into()),
        ..zone(&L_ROOM)
    });
    plan_with(1000.0, 1000.0, 100.0, elements, vec![])
}

/// L-shaped room with a door, a label, a typed zone and three objects.
pub fn sample_plan() -> PlanDocument {
    let mut plan = l_shaped_plan();
    plan.elements[0].load_bearing = Some(true);
    if let Some(room) = plan.elements.last_mut() {
        room.zone_type = Some("living".into());
    }
    plan.elements.push(door((100.0, 400.0), (180.0, 400.0)));
    plan.elements.push(label(100.0, 100.0));
    plan.objects3d = vec![
        object_at("sofa-1", "sofa", 1.0, -1.0),
        object_at("table-1", "table", 1.0, -3.0),
        object_at("bed-1", "bed", 3.0, -1.0),
    ];
    plan.extra
        .insert("version".into(), serde_json::Value::from(3));
    plan
}

/// `sample_plan` as JSON, the way an external store would hand it over.
pub fn sample_plan_json() -> String {
    serde_json::to_string(&sample_plan()).unwrap_or_default()
}
