use plan_shared::ObjectId;

/// Currently selected furniture object (single select)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionState {
    selected: Option<ObjectId>,
}

impl SelectionState {
    /// Selected object id, if any
    pub fn selected(&self) -> Option<&ObjectId> {
        self.selected.as_ref()
    }

    /// Check if an object is selected
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    pub fn has_selection(&self) -> bool {
        self.selected.is_some()
    }

    /// Select an object (replaces previous selection)
    pub fn select(&mut self, id: ObjectId) {
        self.selected = Some(id);
    }

    /// Clear selection
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Drop the selection if its object is no longer present
    pub fn retain_existing(&mut self, exists: impl Fn(&str) -> bool) {
        if let Some(id) = &self.selected {
            if !exists(id) {
                self.selected = None;
            }
        }
    }
}
