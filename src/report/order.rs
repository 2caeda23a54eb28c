//! Numbered rendering of a resolved execution order.

use crate::core::error::GraphResult;
use crate::graph::patch::Patch;
use crate::graph::resolve::Schedule;

/// Renders the resolved order of a patch as a numbered listing, one leaf per
/// line with its full pathname and kind.
///
/// Qualified schedule entries are mapped back to pathnames by walking each
/// segment through the live hierarchy, so the listing shows instance names
/// rooted at the patch the report was built from.
pub struct OrderReport<'a> {
    patch: &'a Patch,
}

impl<'a> OrderReport<'a> {
    /// Build a report rooted at `patch`.
    pub fn new(patch: &'a Patch) -> Self {
        Self { patch }
    }

    /// Resolve the patch and render the listing.
    ///
    /// Fails with [`crate::core::error::GraphError::CircularDependency`] if
    /// the patch cannot be resolved.
    pub fn render(&self) -> GraphResult<String> {
        let schedule = self.patch.resolve()?;
        self.render_schedule(&schedule)
    }

    /// Render a previously issued schedule against the same patch.
    pub fn render_schedule(&self, schedule: &Schedule) -> GraphResult<String> {
        let mut lines = vec!["PROCESSING ORDER:".to_string()];
        for (index, qualified) in schedule.iter().enumerate() {
            let pathname = self.patch.pathname_of(qualified)?;
            let block = self.patch.block_at(qualified)?;
            lines.push(format!("{:2}. {} ({})", index + 1, pathname, block.kind()));
        }
        Ok(lines.join("\n"))
    }
}
