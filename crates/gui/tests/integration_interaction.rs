//! Integration tests for pointer interaction through the headless harness.
//!
//! The harness plays the plan owner: it records every emitted plan and can
//! push plans back into the session.

use glam::Vec3;
use plan3d_viewer_lib::fixtures::*;
use plan3d_viewer_lib::harness::ViewerHarness;
use plan_shared::FurnitureType;

const TOL: f64 = 2e-3;

#[test]
fn test_drag_moves_only_the_target() {
    let mut h = ViewerHarness::new(sample_plan());
    let before = h.plan().clone();

    let start = h.screen_pos_of_object("sofa-1").unwrap();
    let end = h.screen_pos_of(Vec3::new(2.0, 0.0, 5.0)).unwrap();

    assert_eq!(h.pointer_down(start).as_deref(), Some("sofa-1"));
    assert!(h.session.is_dragging());
    assert!(h.pointer_move(end));
    h.pointer_up();
    assert!(!h.session.is_dragging());

    let emitted = h.last_emitted().unwrap();
    let sofa = emitted.find_object("sofa-1").unwrap();
    assert!((sofa.position.x - 2.0).abs() < TOL, "x = {}", sofa.position.x);
    assert!((sofa.position.z - 5.0).abs() < TOL, "z = {}", sofa.position.z);
    // Height is not touched by a floor drag
    assert_eq!(sofa.position.y, before.find_object("sofa-1").unwrap().position.y);

    for id in ["table-1", "bed-1"] {
        assert_eq!(emitted.find_object(id), before.find_object(id));
    }
    assert_eq!(emitted.elements, before.elements);
    assert_eq!(emitted.extra, before.extra);
}

#[test]
fn test_drag_emits_once_per_move_and_chains() {
    let mut h = ViewerHarness::new(sample_plan());
    let start = h.screen_pos_of_object("bed-1").unwrap();
    let waypoints = [Vec3::new(3.0, 0.0, 0.0), Vec3::new(2.5, 0.0, 1.0), Vec3::new(2.0, 0.0, 2.0)];
    let screen: Vec<_> = waypoints
        .iter()
        .map(|p| h.screen_pos_of(*p).unwrap())
        .collect();

    h.pointer_down(start);
    for pos in &screen {
        assert!(h.pointer_move(*pos));
    }
    h.pointer_up();

    assert_eq!(h.emitted().len(), 3);
    let bed = h.plan().find_object("bed-1").unwrap().clone();
    assert!((bed.position.x - 2.0).abs() < TOL);
    assert!((bed.position.z - 2.0).abs() < TOL);

    // The rendered node follows the plan
    let node = h.build().furniture_node("bed-1").unwrap();
    assert!((node.transform.position.x - 2.0).abs() < TOL as f32);
    assert!((node.transform.position.z - 2.0).abs() < TOL as f32);
}

#[test]
fn test_press_on_empty_floor_starts_nothing() {
    let mut h = ViewerHarness::new(sample_plan());
    let empty = h.screen_pos_of(Vec3::new(-3.0, 0.0, 3.0)).unwrap();

    assert!(h.pointer_down(empty).is_none());
    assert!(!h.session.is_dragging());
    assert!(!h.pointer_move(egui::pos2(400.0, 300.0)));
    h.pointer_up();

    assert!(h.emitted().is_empty());
    assert!(h.session.selected_id().is_none());
}

#[test]
fn test_move_above_horizon_is_ignored() {
    let mut h = ViewerHarness::new(sample_plan());
    let before = h.plan().clone();
    let start = h.screen_pos_of_object("table-1").unwrap();

    h.pointer_down(start);
    // Far above the viewport: the ray points at the sky
    assert!(!h.pointer_move(egui::pos2(400.0, -2000.0)));
    h.pointer_up();

    assert!(h.emitted().is_empty());
    assert_eq!(h.plan(), &before);
}

#[test]
fn test_selection_persists_after_release() {
    let mut h = ViewerHarness::new(sample_plan());
    let start = h.screen_pos_of_object("sofa-1").unwrap();
    h.pointer_down(start);
    h.pointer_up();
    assert_eq!(h.session.selected_id().map(String::as_str), Some("sofa-1"));

    // Pressing on empty floor keeps the selection
    let empty = h.screen_pos_of(Vec3::new(-3.0, 0.0, 3.0)).unwrap();
    h.pointer_down(empty);
    h.pointer_up();
    assert_eq!(h.session.selected_id().map(String::as_str), Some("sofa-1"));
}

#[test]
fn test_pointer_leave_ends_drag() {
    let mut h = ViewerHarness::new(sample_plan());
    let start = h.screen_pos_of_object("sofa-1").unwrap();
    h.pointer_down(start);
    h.session.pointer_leave();
    assert!(!h.session.is_dragging());

    let far = h.screen_pos_of(Vec3::new(0.0, 0.0, 3.0)).unwrap();
    assert!(!h.pointer_move(far));
    assert!(h.emitted().is_empty());
}

#[test]
fn test_owner_removing_dragged_object_ends_drag() {
    let mut h = ViewerHarness::new(sample_plan());
    let start = h.screen_pos_of_object("sofa-1").unwrap();
    h.pointer_down(start);

    let mut newer = sample_plan();
    newer.objects3d.retain(|o| o.id != "sofa-1");
    h.set_plan(newer);

    assert!(!h.session.is_dragging());
    assert!(h.session.selected_id().is_none());
    assert!(h.build().furniture_node("sofa-1").is_none());
}

#[test]
fn test_added_object_can_be_dragged() {
    let mut h = ViewerHarness::empty();
    let id = h.add_object(FurnitureType::Wardrobe);
    h.acknowledge();

    assert!(h.drag_object_to(&id, 1.5, -2.0));
    let obj = h.plan().find_object(&id).unwrap();
    assert!((obj.position.x - 1.5).abs() < TOL);
    assert!((obj.position.z + 2.0).abs() < TOL);
    assert_eq!(obj.object_type, "wardrobe");
    assert_eq!(h.emitted().len(), 2);
}

#[test]
fn test_offset_viewport_rect() {
    let rect = egui::Rect::from_min_size(egui::pos2(120.0, 40.0), egui::vec2(640.0, 480.0));
    let mut h = ViewerHarness::new(sample_plan()).with_rect(rect);

    assert!(h.drag_object_to("table-1", -1.0, 1.0));
    let table = h.plan().find_object("table-1").unwrap();
    assert!((table.position.x + 1.0).abs() < TOL);
    assert!((table.position.z - 1.0).abs() < TOL);
}
