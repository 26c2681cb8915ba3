//! Integration tests for the JSON command protocol.

use plan3d_viewer_lib::command::{apply_command, execute_json, execute_json_batch, PlanCommand};
use plan3d_viewer_lib::fixtures::*;
use plan3d_viewer_lib::harness::ViewerHarness;
use plan_shared::{FurnitureType, ObjectPosition, PlanDocument};

#[test]
fn test_batch_add_move_rotate_inspect() {
    let mut h = ViewerHarness::empty();
    let responses = execute_json_batch(
        &mut h,
        r#"[
            {"command": "add_object", "object_type": "bed"},
            {"command": "add_object", "object_type": "chair"},
            {"command": "inspect"}
        ]"#,
    )
    .unwrap();
    assert!(responses.iter().all(|r| r.success));

    let bed_id = responses[0].data.as_ref().unwrap()["id"].as_str().unwrap().to_string();
    let data = responses[2].data.as_ref().unwrap();
    assert_eq!(data["object_count"], 2);
    assert_eq!(data["furniture_nodes"], 2);

    let mv = format!(
        r#"{{"command": "move_object", "id": "{bed_id}", "position": {{"x": 2.0, "z": -1.5}}}}"#
    );
    assert!(execute_json(&mut h, &mv).unwrap().success);
    let rot = format!(r#"{{"command": "rotate_object", "id": "{bed_id}", "delta": 0.5}}"#);
    assert!(execute_json(&mut h, &rot).unwrap().success);

    let bed = h.plan().find_object(&bed_id).unwrap();
    assert_eq!(bed.position, ObjectPosition::new(2.0, None, -1.5));
    assert!((bed.rotation_y() - 0.5).abs() < 1e-12);
    assert_eq!(h.emitted().len(), 4);
}

#[test]
fn test_unknown_ids_are_reported_without_emitting() {
    let mut h = ViewerHarness::new(sample_plan());
    let responses = execute_json_batch(
        &mut h,
        r#"[
            {"command": "move_object", "id": "ghost", "position": {"x": 1, "z": 1}},
            {"command": "rotate_object", "id": "ghost", "delta": 1.0},
            {"command": "select", "id": "ghost"},
            {"command": "rotate_selected", "direction": "left"}
        ]"#,
    )
    .unwrap();

    assert!(responses.iter().all(|r| !r.success));
    assert!(responses[0].error.as_deref().unwrap().contains("ghost"));
    assert!(h.emitted().is_empty());
    assert_eq!(h.plan(), &sample_plan());
}

#[test]
fn test_select_and_rotate_selected_quarter_turns() {
    let mut h = ViewerHarness::new(sample_plan());
    let responses = execute_json_batch(
        &mut h,
        r#"[
            {"command": "select", "id": "table-1"},
            {"command": "rotate_selected", "direction": "right"},
            {"command": "rotate_selected", "direction": "right"},
            {"command": "rotate_selected", "direction": "left"},
            {"command": "clear_selection"},
            {"command": "rotate_selected", "direction": "left"}
        ]"#,
    )
    .unwrap();

    let ok: Vec<bool> = responses.iter().map(|r| r.success).collect();
    assert_eq!(ok, vec![true, true, true, true, true, false]);

    let yaw = h.plan().find_object("table-1").unwrap().rotation_y();
    assert!((yaw - std::f64::consts::FRAC_PI_2).abs() < 1e-12, "yaw = {yaw}");
}

#[test]
fn test_pointer_commands_drag_an_object() {
    let mut h = ViewerHarness::new(sample_plan());
    let start = h.screen_pos_of_object("sofa-1").unwrap();
    let end = h.screen_pos_of(glam::Vec3::new(0.5, 0.0, -2.0)).unwrap();

    let batch = format!(
        r#"[
            {{"command": "pointer_down", "x": {}, "y": {}}},
            {{"command": "pointer_move", "x": {}, "y": {}}},
            {{"command": "pointer_up"}}
        ]"#,
        start.x, start.y, end.x, end.y
    );
    let responses = execute_json_batch(&mut h, &batch).unwrap();
    assert_eq!(responses[0].data.as_ref().unwrap()["hit"], "sofa-1");
    assert_eq!(responses[1].data.as_ref().unwrap()["moved"], true);

    let sofa = h.plan().find_object("sofa-1").unwrap();
    assert!((sofa.position.x - 0.5).abs() < 2e-3);
    assert!((sofa.position.z + 2.0).abs() < 2e-3);
}

#[test]
fn test_export_plan_round_trips_extra_fields() {
    let mut h = ViewerHarness::new(sample_plan());
    let resp = execute_json(&mut h, r#"{"command": "export_plan"}"#).unwrap();
    let json = resp.data.unwrap()["plan_json"].as_str().unwrap().to_string();

    let plan = PlanDocument::from_json(&json).unwrap();
    assert_eq!(plan, sample_plan());
    assert_eq!(plan.extra["version"], 3);
}

#[test]
fn test_malformed_command_json_is_an_error() {
    let mut h = ViewerHarness::empty();
    assert!(execute_json(&mut h, "{not json").is_err());
    assert!(execute_json(&mut h, r#"{"command": "teleport"}"#).is_err());
    assert!(execute_json_batch(&mut h, r#"{"command": "inspect"}"#).is_err());
}

#[test]
fn test_apply_command_is_pure() {
    let plan = sample_plan();
    let next = apply_command(&plan, &PlanCommand::add(FurnitureType::Chair));
    assert_eq!(plan, sample_plan());
    assert_eq!(next.objects3d.len(), 4);
    assert_eq!(next.objects3d[3].object_type, "chair");
    assert_eq!(next.objects3d[..3], plan.objects3d[..]);
}
