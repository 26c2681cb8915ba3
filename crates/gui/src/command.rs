//! Plan edit commands and the JSON scripting protocol.
//!
//! [`PlanCommand`] is the value form of the three plan edits, applied by the
//! pure [`apply_command`] reducer. [`HarnessCommand`] adds pointer and
//! selection gestures and is executed against a [`ViewerHarness`].

use plan_shared::{FurnitureType, ObjectId, ObjectPosition, PlanDocument};
use serde::{Deserialize, Serialize};

use crate::harness::ViewerHarness;
use crate::mutation::{add_object, add_object_with_id, move_object, rotate_object, unused_object_id};

/// Quarter-turn direction for the rotate controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotateDirection {
    Left,
    Right,
}

impl RotateDirection {
    /// Yaw change in radians
    pub fn delta(self) -> f64 {
        match self {
            RotateDirection::Left => -std::f64::consts::FRAC_PI_2,
            RotateDirection::Right => std::f64::consts::FRAC_PI_2,
        }
    }
}

/// A single plan edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum PlanCommand {
    /// Append a new object; `id` is generated when omitted
    AddObject {
        object_type: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<ObjectId>,
    },
    /// Replace an object's position
    MoveObject {
        id: ObjectId,
        position: ObjectPosition,
    },
    /// Add `delta` radians to an object's yaw
    RotateObject { id: ObjectId, delta: f64 },
}

impl PlanCommand {
    pub fn add(ty: FurnitureType) -> Self {
        PlanCommand::AddObject {
            object_type: ty.as_str().to_string(),
            id: None,
        }
    }

    pub fn rotate(id: impl Into<ObjectId>, direction: RotateDirection) -> Self {
        PlanCommand::RotateObject {
            id: id.into(),
            delta: direction.delta(),
        }
    }
}

/// Apply one command to a plan, returning the new plan.
pub fn apply_command(plan: &PlanDocument, cmd: &PlanCommand) -> PlanDocument {
    match cmd {
        PlanCommand::AddObject { object_type, id } => match id {
            Some(id) => add_object_with_id(plan, object_type, id),
            None => add_object(plan, object_type).0,
        },
        PlanCommand::MoveObject { id, position } => move_object(plan, id, *position),
        PlanCommand::RotateObject { id, delta } => rotate_object(plan, id, *delta),
    }
}

/// A command the scripting interface can execute against the harness.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum HarnessCommand {
    AddObject {
        object_type: String,
    },
    MoveObject {
        id: ObjectId,
        position: ObjectPosition,
    },
    RotateObject {
        id: ObjectId,
        delta: f64,
    },
    /// Press at screen coordinates
    PointerDown {
        x: f32,
        y: f32,
    },
    /// Move to screen coordinates
    PointerMove {
        x: f32,
        y: f32,
    },
    PointerUp,
    Select {
        id: ObjectId,
    },
    ClearSelection,
    RotateSelected {
        direction: RotateDirection,
    },
    /// List plan contents and the built scene
    Inspect,
    /// Export the current plan as JSON
    ExportPlan,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut ViewerHarness, cmd: HarnessCommand) -> CommandResponse {
    match cmd {
        HarnessCommand::AddObject { object_type } => {
            let ty = FurnitureType::from_type_str(&object_type);
            let id = if ty.as_str() == object_type {
                harness.add_object(ty)
            } else {
                // Free-form type strings bypass the type selector
                let id = unused_object_id(harness.plan());
                harness.apply(PlanCommand::AddObject {
                    object_type,
                    id: Some(id.clone()),
                });
                id
            };
            CommandResponse::ok_with_data(serde_json::json!({ "id": id }))
        }

        HarnessCommand::MoveObject { id, position } => {
            if !harness.plan().contains_object(&id) {
                return CommandResponse::err(format!("Unknown object: {id}"));
            }
            harness.apply(PlanCommand::MoveObject { id, position });
            CommandResponse::ok()
        }

        HarnessCommand::RotateObject { id, delta } => {
            if !harness.plan().contains_object(&id) {
                return CommandResponse::err(format!("Unknown object: {id}"));
            }
            harness.apply(PlanCommand::RotateObject { id, delta });
            CommandResponse::ok()
        }

        HarnessCommand::PointerDown { x, y } => {
            let hit = harness.pointer_down(egui::pos2(x, y));
            CommandResponse::ok_with_data(serde_json::json!({ "hit": hit }))
        }

        HarnessCommand::PointerMove { x, y } => {
            let moved = harness.pointer_move(egui::pos2(x, y));
            CommandResponse::ok_with_data(serde_json::json!({ "moved": moved }))
        }

        HarnessCommand::PointerUp => {
            harness.pointer_up();
            CommandResponse::ok()
        }

        HarnessCommand::Select { id } => {
            if harness.session.select(&id) {
                CommandResponse::ok_with_data(serde_json::json!({ "selected": id }))
            } else {
                CommandResponse::err(format!("Unknown object: {id}"))
            }
        }

        HarnessCommand::ClearSelection => {
            harness.session.clear_selection();
            CommandResponse::ok()
        }

        HarnessCommand::RotateSelected { direction } => {
            if harness.session.rotate_selected(direction) {
                CommandResponse::ok()
            } else {
                CommandResponse::err("No object selected")
            }
        }

        HarnessCommand::Inspect => {
            let objects: Vec<serde_json::Value> = harness
                .plan()
                .objects3d
                .iter()
                .map(|o| {
                    serde_json::json!({
                        "id": o.id,
                        "type": o.object_type,
                        "position": [o.position.x, o.center_y(), o.position.z],
                        "rotation_y": o.rotation_y(),
                    })
                })
                .collect();
            let (walls, zones, furniture) = {
                let group = harness.build();
                (
                    group.walls().count(),
                    group.zones().count(),
                    group.furniture().count(),
                )
            };
            CommandResponse::ok_with_data(serde_json::json!({
                "element_count": harness.plan().elements.len(),
                "object_count": objects.len(),
                "objects": objects,
                "wall_nodes": walls,
                "zone_nodes": zones,
                "furniture_nodes": furniture,
                "selected": harness.session.selected_id(),
            }))
        }

        HarnessCommand::ExportPlan => match harness.export_plan_json() {
            Ok(json) => CommandResponse::ok_with_data(serde_json::json!({ "plan_json": json })),
            Err(e) => CommandResponse::err(e),
        },
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut ViewerHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: HarnessCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut ViewerHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<HarnessCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}
