mod app;
mod ui;
mod viewport;

// Re-export library modules so that `crate::build`, `crate::state`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use plan3d_viewer_lib::build;
pub use plan3d_viewer_lib::i18n;
pub use plan3d_viewer_lib::state;

use app::PlanApp;
use plan_shared::PlanDocument;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plan3d_viewer=info".into()),
        )
        .init();

    // Parse --plan <path> argument
    let initial_plan = parse_plan_arg();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Plan 3D Viewer")
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "plan3d-viewer",
        native_options,
        Box::new(move |cc| Ok(Box::new(PlanApp::new(cc, initial_plan)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

fn parse_plan_arg() -> Option<PlanDocument> {
    let args: Vec<String> = std::env::args().collect();
    let pos = args.iter().position(|a| a == "--plan")?;
    let Some(path) = args.get(pos + 1) else {
        tracing::error!("--plan requires a path");
        return None;
    };
    match load_plan_file(std::path::Path::new(path)) {
        Ok(plan) => {
            tracing::info!(
                "Loaded plan from {path} ({} elements, {} objects)",
                plan.elements.len(),
                plan.objects3d.len()
            );
            Some(plan)
        }
        Err(e) => {
            tracing::error!("{e}");
            None
        }
    }
}

/// Read and parse a plan document from disk
pub fn load_plan_file(path: &std::path::Path) -> Result<PlanDocument, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read plan file {}: {e}", path.display()))?;
    PlanDocument::from_json(&json)
}
