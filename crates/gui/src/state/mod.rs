pub mod interaction;
pub mod selection;
pub mod session;
pub mod settings;

pub use interaction::{DragState, InteractionController};
pub use selection::SelectionState;
pub use session::{PlanChangeCallback, ViewerSession};
pub use settings::ViewerSettings;
