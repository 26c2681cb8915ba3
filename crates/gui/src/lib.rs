// Library crate: exposes testable modules for integration tests and the scripting interface.
// GUI-specific modules (app, ui, GL rendering) remain in the binary crate.

pub mod build;
pub mod command;
pub mod coords;
pub mod fixtures;
pub mod harness;
pub mod i18n;
pub mod mutation;
pub mod state;
pub mod validation;

/// Subset of viewport types needed by the builder and the session
/// (MeshData, camera, picking). The GL renderer stays in the binary crate.
pub mod viewport {
    pub mod camera;
    pub mod mesh;
    pub mod picking;
}
