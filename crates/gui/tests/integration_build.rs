//! Integration tests for the plan → scene pipeline.
//!
//! Parses plan JSON the way an external store hands it over, builds the
//! scene and checks placement and mesh integrity of every node.

use glam::Vec3;
use plan3d_viewer_lib::build::{build_scene, NodeKind, SceneCache, WALL_HEIGHT};
use plan3d_viewer_lib::coords::to_scene_xz;
use plan3d_viewer_lib::fixtures::*;
use plan3d_viewer_lib::validation::MeshValidator;
use plan_shared::PlanDocument;

fn approx(a: f32, b: f32, tol: f32) -> bool {
    (a - b).abs() < tol
}

#[test]
fn test_sample_plan_from_json_builds_every_part() {
    let plan = PlanDocument::from_json(&sample_plan_json()).unwrap();
    let group = build_scene(&plan);

    assert!(group.ground().is_some());
    assert_eq!(group.walls().count(), 6);
    assert_eq!(group.zones().count(), 1);
    assert_eq!(group.furniture().count(), 3);
    // Door and label produce nothing
    assert_eq!(group.len(), 11);
}

#[test]
fn test_every_node_mesh_is_valid() {
    let group = build_scene(&sample_plan());
    for node in group.nodes() {
        let v = MeshValidator::new(&node.mesh);
        let errors = v.validate_all();
        assert!(errors.is_empty(), "{:?}: {:?}", node.kind, errors);
        assert!(v.triangle_count() > 0);
    }
}

#[test]
fn test_wall_ends_land_on_mapped_endpoints() {
    let plan = l_shaped_plan();
    let group = build_scene(&plan);

    for (i, wall) in group.walls().enumerate() {
        let a = to_scene_xz(L_ROOM[i].0, L_ROOM[i].1, 100.0);
        let b = to_scene_xz(L_ROOM[(i + 1) % 6].0, L_ROOM[(i + 1) % 6].1, 100.0);

        let half = wall.bounds.max.x;
        let m = wall.transform.matrix();
        let start = m.transform_point3(Vec3::new(-half, 0.0, 0.0));
        let end = m.transform_point3(Vec3::new(half, 0.0, 0.0));

        assert!(approx(start.x, a.x as f32, 1e-4) && approx(start.z, a.z as f32, 1e-4), "wall {i} start {start:?}");
        assert!(approx(end.x, b.x as f32, 1e-4) && approx(end.z, b.z as f32, 1e-4), "wall {i} end {end:?}");
        assert!(approx(wall.transform.position.y, (WALL_HEIGHT / 2.0) as f32, 1e-6));
    }
}

#[test]
fn test_zone_sits_inside_walls() {
    let group = build_scene(&l_shaped_plan());
    let zone = group.zones().next().unwrap();
    let v = MeshValidator::new(&zone.mesh);
    let aabb = v.aabb();

    // 4x4 m L-room: x ∈ [0, 4], z ∈ [-4, 0]
    assert!(approx(aabb.min.x, 0.0, 1e-5) && approx(aabb.max.x, 4.0, 1e-5));
    assert!(approx(aabb.min.z, -4.0, 1e-5) && approx(aabb.max.z, 0.0, 1e-5));
    assert!(approx(v.surface_area(), 12.0, 1e-3));
    assert!(zone.is_transparent());
}

#[test]
fn test_unknown_types_still_render() {
    let json = r#"{
        "meta": {"width": 500, "height": 500, "unit": "px"},
        "elements": [
            {"type": "stairs", "geometry": {"kind": "segment", "start": {"x": 0, "y": 0}, "end": {"x": 100, "y": 0}}},
            {"type": "wall", "geometry": {"kind": "segment", "start": {"x": 0, "y": 0}, "end": {"x": 300, "y": 0}}}
        ],
        "objects3d": [
            {"id": "lamp", "type": "lamp", "position": {"x": 1, "z": -1}}
        ]
    }"#;
    let plan = PlanDocument::from_json(json).unwrap();
    let group = build_scene(&plan);

    assert_eq!(group.walls().count(), 1);
    let lamp = group.furniture_node("lamp").unwrap();
    // No size → unit cube resting on the floor
    assert!(approx(lamp.transform.position.y, 0.5, 1e-6));
    assert!(matches!(
        &lamp.kind,
        NodeKind::Furniture { object_type, .. } if object_type == "lamp"
    ));

    // No scale → 100 px per meter
    let wall = group.walls().next().unwrap();
    assert!(approx(wall.bounds.size().x, 3.0, 1e-5));
}

#[test]
fn test_partly_broken_json_still_renders_valid_walls() {
    let json = r#"{
        "meta": {"width": 800, "height": 600, "scale": {}},
        "elements": [
            {"id": "ok-1", "type": "wall", "geometry": {"kind": "segment", "start": {"x": 0, "y": 0}, "end": {"x": 400, "y": 0}}},
            {"id": "null-x", "type": "wall", "geometry": {"kind": "segment", "start": {"x": null, "y": 0}, "end": {"x": 100, "y": 0}}},
            {"id": "no-end", "type": "wall", "geometry": {"kind": "segment", "start": {"x": 0, "y": 0}}},
            {"id": "ok-2", "type": "wall", "geometry": {"kind": "segment", "start": {"x": 400, "y": 0}, "end": {"x": 400, "y": 300}}},
            {"id": "z-short", "type": "zone", "geometry": {"kind": "polygon", "points": [{"x": 10}, {"x": 0, "y": 0}, {"x": 100, "y": 0}, {"x": 0, "y": 100}]}}
        ]
    }"#;
    let plan = PlanDocument::from_json(json).unwrap();
    assert_eq!(plan.elements.len(), 5);

    let group = build_scene(&plan);
    let ids: Vec<_> = group
        .walls()
        .filter_map(|w| match &w.kind {
            NodeKind::Wall { element_id, .. } => element_id.clone(),
            _ => None,
        })
        .collect();
    assert_eq!(ids, vec!["ok-1".to_string(), "ok-2".to_string()]);

    // Empty scale object → 100 px per meter
    let first = group.walls().next().unwrap();
    assert!(approx(first.bounds.size().x, 4.0, 1e-5));

    // The point without `y` is dropped; the other three still form a zone
    let zone = group.zones().next().unwrap();
    assert_eq!(zone.mesh.vertex_count(), 3);
}

#[test]
fn test_malformed_document_parts_are_skipped() {
    let mut plan = sample_plan();
    plan.elements.push(wall((f64::NAN, 0.0), (100.0, 0.0)));
    plan.elements.push(wall((50.0, 50.0), (50.0, 50.0)));
    plan.elements.push(zone(&[(0.0, 0.0), (100.0, 0.0)]));
    let mut broken = object_at("broken", "sofa", f64::INFINITY, 0.0);
    broken.rotation = None;
    plan.objects3d.push(broken);

    let group = build_scene(&plan);
    assert_eq!(group.walls().count(), 6);
    assert_eq!(group.zones().count(), 1);
    assert_eq!(group.furniture().count(), 3);
}

#[test]
fn test_cache_rebuilds_only_on_new_version() {
    let plan = sample_plan();
    let mut cache = SceneCache::new();
    cache.ensure(&plan, 0);
    cache.ensure(&plan, 0);
    cache.ensure(&plan, 0);
    assert_eq!(cache.rebuild_count(), 1);

    cache.ensure(&plan, 1);
    assert_eq!(cache.rebuild_count(), 2);
    assert_eq!(cache.group().furniture().count(), 3);
}
