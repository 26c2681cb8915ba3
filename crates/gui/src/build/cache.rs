//! Scene cache management

use plan_shared::PlanDocument;

use super::{build_scene, RenderGroup};

/// Cached render group, rebuilt when the plan version changes
pub struct SceneCache {
    group: RenderGroup,
    version: u64,
    rebuild_count: u64,
}

impl Default for SceneCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneCache {
    pub fn new() -> Self {
        Self {
            group: RenderGroup::default(),
            version: u64::MAX, // force first rebuild
            rebuild_count: 0,
        }
    }

    /// Check if cache is still valid
    pub fn is_valid(&self, plan_version: u64) -> bool {
        self.version == plan_version
    }

    /// Replace the cached group with a fresh build of `plan`
    pub fn rebuild(&mut self, plan: &PlanDocument, version: u64) {
        self.group = build_scene(plan);
        self.version = version;
        self.rebuild_count += 1;
    }

    /// Rebuild only if `version` differs from the cached one
    pub fn ensure(&mut self, plan: &PlanDocument, version: u64) {
        if !self.is_valid(version) {
            self.rebuild(plan, version);
        }
    }

    /// Force the next `ensure` to rebuild
    pub fn invalidate(&mut self) {
        self.version = u64::MAX;
    }

    /// Rebuild counter
    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn group(&self) -> &RenderGroup {
        &self.group
    }

    /// Mutable access for in-place drag updates between rebuilds
    pub fn group_mut(&mut self) -> &mut RenderGroup {
        &mut self.group
    }
}
