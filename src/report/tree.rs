//! Indented hierarchy rendering.

use crate::core::port::DEFAULT_INPUT;
use crate::graph::patch::Patch;
use std::fmt;

/// Renders a patch hierarchy as an indented tree, one block per line as
/// `name (kind)`, nested patches indented two spaces per level.
///
/// With [`HierarchyTree::with_connections`], each child's line (or rendered
/// subtree, for nested patches) is followed by the connections leaving it at
/// its parent's level. The text is meant for console and log output; its
/// exact shape is not a stable interface.
pub struct HierarchyTree<'a> {
    patch: &'a Patch,
    annotate: bool,
}

impl<'a> HierarchyTree<'a> {
    /// Render `patch` without connection annotations.
    pub fn new(patch: &'a Patch) -> Self {
        Self {
            patch,
            annotate: false,
        }
    }

    /// Also list each child's outgoing connections beneath its line.
    pub fn with_connections(mut self) -> Self {
        self.annotate = true;
        self
    }

    /// Produce the rendered tree (no trailing newline).
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        Self::render_patch(self.patch, 0, self.annotate, &mut lines);
        lines.join("\n")
    }

    fn render_patch(patch: &Patch, indent: usize, annotate: bool, lines: &mut Vec<String>) {
        let prefix = "  ".repeat(indent);
        lines.push(format!("{prefix}{} ({})", patch.name(), Patch::KIND));

        for (local_name, block) in patch.blocks() {
            match block.as_patch() {
                Some(nested) => Self::render_patch(nested, indent + 1, annotate, lines),
                None => lines.push(format!("{prefix}  {} ({})", block.name(), block.kind())),
            }
            if annotate {
                Self::render_outgoing(patch, local_name, &prefix, lines);
            }
        }
    }

    /// Annotation lines for every connection leaving `local_name`.
    /// Destinations show their instance name, with the port appended only
    /// when it is not the default input.
    fn render_outgoing(patch: &Patch, local_name: &str, prefix: &str, lines: &mut Vec<String>) {
        for connection in patch.connections() {
            if connection.from.block != local_name {
                continue;
            }
            let destination = patch
                .get(&connection.to.block)
                .map(|block| block.name())
                .unwrap_or(connection.to.block.as_str());
            let port_suffix = if connection.to.port == DEFAULT_INPUT {
                String::new()
            } else {
                format!(".{}", connection.to.port)
            };
            lines.push(format!(
                "{prefix}    -> {} connects to: {destination}{port_suffix}",
                connection.from.port
            ));
        }
    }
}

impl fmt::Display for HierarchyTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
