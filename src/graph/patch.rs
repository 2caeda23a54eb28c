//! Patch structure: the block registry, connections, and passthrough aliases.
//!
//! A patch is itself a block, so patches nest to arbitrary depth. The patch
//! exclusively owns its children; after `add` they are reached through the
//! patch's accessors, and dot-qualified paths address blocks deeper in the
//! hierarchy.

use crate::core::block::Block;
use crate::core::error::{GraphError, GraphResult, ProcessError, ProcessResult};
use crate::core::naming;
use crate::core::port::{PortDirection, PortSpec, DEFAULT_INPUT, DEFAULT_OUTPUT};
use crate::core::signal::SignalMap;
use crate::graph::connection::{Connection, Endpoint};
use crate::graph::resolve::{OrderResolver, Schedule};
use indexmap::IndexMap;
use log::debug;
use std::fmt;

/// A container block: owns child blocks, the connections wiring their ports
/// together, and the alias maps that present an aggregate interface when the
/// patch is nested inside a parent.
///
/// Children are registered under caller-chosen local names and kept in
/// insertion order. Connections are validated against the registry and the
/// declared port sets at call time; cycles are only detected when an order
/// is resolved (see [`crate::graph::resolve`]), because a patch may pass
/// through cyclic intermediate states while it is being edited.
pub struct Patch {
    name: String,
    ports: PortSpec,
    blocks: IndexMap<String, Box<dyn Block>>,
    connections: Vec<Connection>,
    input_aliases: IndexMap<String, Endpoint>,
    output_aliases: IndexMap<String, Endpoint>,
}

impl Patch {
    /// Kind tag used for default names and diagnostics.
    pub const KIND: &'static str = "patch";

    /// Create an empty patch with a synthesized name ("patch_1", ...).
    pub fn new() -> Self {
        Self {
            name: naming::global().assign(Self::KIND),
            ports: PortSpec::mono(),
            blocks: IndexMap::new(),
            connections: Vec::new(),
            input_aliases: IndexMap::new(),
            output_aliases: IndexMap::new(),
        }
    }

    /// Replace the synthesized name with an explicit one.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The instance name of this patch.
    pub fn name(&self) -> &str {
        &self.name
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Register `block` under `local_name`, taking ownership.
    ///
    /// Fails with [`GraphError::DuplicateName`] if the local name is already
    /// taken; the existing entry is left untouched.
    pub fn add(&mut self, local_name: impl Into<String>, block: impl Block + 'static) -> GraphResult<()> {
        let local_name = local_name.into();
        if self.blocks.contains_key(&local_name) {
            return Err(GraphError::DuplicateName(local_name));
        }

        debug!(
            "patch '{}': add '{}' ({})",
            self.name,
            local_name,
            block.kind()
        );
        self.blocks.insert(local_name, Box::new(block));
        Ok(())
    }

    /// Connect an output port of one child to an input port of another.
    ///
    /// Both blocks must be registered here and both ports must be declared
    /// (`from_port` among the source's outputs, `to_port` among the
    /// destination's inputs). Re-adding an identical connection is a no-op.
    /// A failed call stores nothing.
    pub fn connect(
        &mut self,
        from: &str,
        from_port: &str,
        to: &str,
        to_port: &str,
    ) -> GraphResult<()> {
        let source = self
            .blocks
            .get(from)
            .ok_or_else(|| GraphError::BlockNotFound(from.to_string()))?;
        let dest = self
            .blocks
            .get(to)
            .ok_or_else(|| GraphError::BlockNotFound(to.to_string()))?;

        if !source.ports().has_output(from_port) {
            return Err(GraphError::PortNotDeclared {
                block: from.to_string(),
                port: from_port.to_string(),
                direction: PortDirection::Output,
            });
        }
        if !dest.ports().has_input(to_port) {
            return Err(GraphError::PortNotDeclared {
                block: to.to_string(),
                port: to_port.to_string(),
                direction: PortDirection::Input,
            });
        }

        let connection = Connection::new(Endpoint::new(from, from_port), Endpoint::new(to, to_port));
        if self.connections.contains(&connection) {
            return Ok(());
        }

        debug!("patch '{}': connect {}", self.name, connection);
        self.connections.push(connection);
        Ok(())
    }

    /// Connect two children on their default ports ("output" -> "input").
    pub fn chain(&mut self, from: &str, to: &str) -> GraphResult<()> {
        self.connect(from, DEFAULT_OUTPUT, to, DEFAULT_INPUT)
    }

    /// Remove the exact matching connection.
    ///
    /// Fails with [`GraphError::ConnectionNotFound`] if no stored connection
    /// matches all four names.
    pub fn disconnect(
        &mut self,
        from: &str,
        from_port: &str,
        to: &str,
        to_port: &str,
    ) -> GraphResult<()> {
        let position = self
            .connections
            .iter()
            .position(|c| c.matches(from, from_port, to, to_port))
            .ok_or_else(|| GraphError::ConnectionNotFound {
                from: from.to_string(),
                from_port: from_port.to_string(),
                to: to.to_string(),
                to_port: to_port.to_string(),
            })?;

        let removed = self.connections.remove(position);
        debug!("patch '{}': disconnect {}", self.name, removed);
        Ok(())
    }

    /// Expose a child input port under an external name on this patch.
    ///
    /// The referenced child must exist and declare `port` as an input; a
    /// failed call records nothing. Mapping an already-mapped external name
    /// replaces that alias.
    pub fn map_input(
        &mut self,
        external: impl Into<String>,
        block: &str,
        port: &str,
    ) -> GraphResult<()> {
        self.check_alias_target(block, port, PortDirection::Input)?;
        let external = external.into();
        debug!(
            "patch '{}': map input '{}' -> {}.{}",
            self.name, external, block, port
        );
        self.input_aliases
            .insert(external, Endpoint::new(block, port));
        Ok(())
    }

    /// Expose a child output port under an external name on this patch.
    ///
    /// Validation mirrors [`Patch::map_input`] with the output direction.
    pub fn map_output(
        &mut self,
        external: impl Into<String>,
        block: &str,
        port: &str,
    ) -> GraphResult<()> {
        self.check_alias_target(block, port, PortDirection::Output)?;
        let external = external.into();
        debug!(
            "patch '{}': map output '{}' -> {}.{}",
            self.name, external, block, port
        );
        self.output_aliases
            .insert(external, Endpoint::new(block, port));
        Ok(())
    }

    fn check_alias_target(
        &self,
        block: &str,
        port: &str,
        direction: PortDirection,
    ) -> GraphResult<()> {
        let target = self
            .blocks
            .get(block)
            .ok_or_else(|| GraphError::BlockNotFound(block.to_string()))?;
        if !target.ports().has_port(port, direction) {
            return Err(GraphError::PortNotDeclared {
                block: block.to_string(),
                port: port.to_string(),
                direction,
            });
        }
        Ok(())
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Get a direct child by local name.
    pub fn get(&self, local_name: &str) -> Option<&dyn Block> {
        self.blocks.get(local_name).map(|b| b.as_ref())
    }

    /// Get a direct child mutably by local name.
    pub fn get_mut(&mut self, local_name: &str) -> Option<&mut dyn Block> {
        self.blocks.get_mut(local_name).map(|b| b.as_mut() as &mut dyn Block)
    }

    /// Get a direct child that is itself a patch, for post-add authoring.
    pub fn patch_mut(&mut self, local_name: &str) -> GraphResult<&mut Patch> {
        let block = self
            .blocks
            .get_mut(local_name)
            .ok_or_else(|| GraphError::BlockNotFound(local_name.to_string()))?;
        block
            .as_patch_mut()
            .ok_or_else(|| GraphError::NotAPatch(local_name.to_string()))
    }

    /// Check whether a direct child is registered under `local_name`.
    pub fn contains(&self, local_name: &str) -> bool {
        self.blocks.contains_key(local_name)
    }

    /// Iterate over direct children as (local name, block) pairs, in
    /// insertion order.
    pub fn blocks(&self) -> impl Iterator<Item = (&str, &dyn Block)> {
        self.blocks.iter().map(|(name, block)| (name.as_str(), block.as_ref()))
    }

    /// Number of direct children.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// True if this patch has no children.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The stored connections, in creation order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Number of stored connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Look up an external input alias.
    pub fn input_alias(&self, external: &str) -> Option<&Endpoint> {
        self.input_aliases.get(external)
    }

    /// Look up an external output alias.
    pub fn output_alias(&self, external: &str) -> Option<&Endpoint> {
        self.output_aliases.get(external)
    }

    /// Iterate over input aliases as (external name, target) pairs.
    pub fn input_aliases(&self) -> impl Iterator<Item = (&str, &Endpoint)> {
        self.input_aliases.iter().map(|(name, ep)| (name.as_str(), ep))
    }

    /// Iterate over output aliases as (external name, target) pairs.
    pub fn output_aliases(&self) -> impl Iterator<Item = (&str, &Endpoint)> {
        self.output_aliases.iter().map(|(name, ep)| (name.as_str(), ep))
    }

    // ========================================================================
    // Addressing
    // ========================================================================

    /// Find the block at a dot-qualified path relative to this patch.
    ///
    /// Each path segment except the last must name a nested patch. Fails
    /// with [`GraphError::BlockNotFound`] naming the first missing segment,
    /// or [`GraphError::NotAPatch`] if the path descends through a leaf.
    pub fn block_at(&self, path: &str) -> GraphResult<&dyn Block> {
        let mut current = self;
        let mut segments = path.split('.').peekable();

        loop {
            let segment = match segments.next() {
                Some(segment) => segment,
                None => return Err(GraphError::BlockNotFound(path.to_string())),
            };
            let block = current
                .blocks
                .get(segment)
                .ok_or_else(|| GraphError::BlockNotFound(segment.to_string()))?;

            if segments.peek().is_none() {
                return Ok(block.as_ref());
            }
            current = block
                .as_patch()
                .ok_or_else(|| GraphError::NotAPatch(segment.to_string()))?;
        }
    }

    /// The full pathname of the block at a dot-qualified path: the
    /// dot-joined chain of instance names from this patch down to the block.
    ///
    /// Qualified paths use local registry names; the result uses instance
    /// names, rooted at this patch's own name.
    pub fn pathname_of(&self, path: &str) -> GraphResult<String> {
        let mut parts = vec![self.name.clone()];
        let mut current = self;
        let mut segments = path.split('.').peekable();

        loop {
            let segment = match segments.next() {
                Some(segment) => segment,
                None => return Err(GraphError::BlockNotFound(path.to_string())),
            };
            let block = current
                .blocks
                .get(segment)
                .ok_or_else(|| GraphError::BlockNotFound(segment.to_string()))?;
            parts.push(block.name().to_string());

            if segments.peek().is_none() {
                return Ok(parts.join("."));
            }
            current = block
                .as_patch()
                .ok_or_else(|| GraphError::NotAPatch(segment.to_string()))?;
        }
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Resolve the execution order of every transitively-owned leaf block.
    ///
    /// Convenience for [`OrderResolver::resolve`]; see
    /// [`crate::graph::resolve`] for the contract.
    pub fn resolve(&self) -> GraphResult<Schedule> {
        OrderResolver::new(self).resolve()
    }
}

impl Default for Patch {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Patch")
            .field("name", &self.name)
            .field("blocks", &self.blocks.keys().collect::<Vec<_>>())
            .field("connections", &self.connections)
            .finish_non_exhaustive()
    }
}

impl Block for Patch {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        Self::KIND
    }

    fn ports(&self) -> &PortSpec {
        // A nested patch participates in its parent's wiring through the
        // default mono interface; aliases are bookkeeping for a future
        // execution driver and do not change the declared set.
        &self.ports
    }

    fn process(&mut self, _inputs: &SignalMap) -> ProcessResult<SignalMap> {
        // Driving the resolved order through the children is the execution
        // driver's job, which does not exist yet.
        Err(ProcessError::NotImplemented(self.name.clone()))
    }

    fn as_patch(&self) -> Option<&Patch> {
        Some(self)
    }

    fn as_patch_mut(&mut self) -> Option<&mut Patch> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::block::Passthrough;
    use crate::core::error::ProcessResult;
    use crate::core::signal::SignalMap;

    /// Leaf block with caller-chosen port names, for wiring tests.
    struct Shaped {
        name: String,
        ports: PortSpec,
    }

    impl Shaped {
        fn new(name: &str, inputs: &[&str], outputs: &[&str]) -> Self {
            Self {
                name: name.to_string(),
                ports: PortSpec::new(inputs.iter().copied(), outputs.iter().copied()),
            }
        }
    }

    impl Block for Shaped {
        fn name(&self) -> &str {
            &self.name
        }

        fn kind(&self) -> &str {
            "shaped"
        }

        fn ports(&self) -> &PortSpec {
            &self.ports
        }

        fn process(&mut self, _inputs: &SignalMap) -> ProcessResult<SignalMap> {
            Ok(SignalMap::new())
        }
    }

    fn leaf(name: &str) -> Passthrough {
        Passthrough::new().with_name(name)
    }

    #[test]
    fn test_add_and_lookup() {
        let mut patch = Patch::new().with_name("Top");
        patch.add("a", leaf("A")).unwrap();
        patch.add("b", leaf("B")).unwrap();

        assert_eq!(patch.block_count(), 2);
        assert!(patch.contains("a"));
        assert!(!patch.contains("c"));
        assert_eq!(patch.get("a").map(|b| b.name()), Some("A"));
        assert!(patch.get("c").is_none());

        let names: Vec<&str> = patch.blocks().map(|(name, _)| name).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let mut patch = Patch::new();
        patch.add("x", leaf("first")).unwrap();

        let err = patch.add("x", leaf("second")).unwrap_err();
        assert_eq!(err, GraphError::DuplicateName("x".to_string()));

        // The first entry survives
        assert_eq!(patch.block_count(), 1);
        assert_eq!(patch.get("x").map(|b| b.name()), Some("first"));
    }

    #[test]
    fn test_chain_uses_default_ports() {
        let mut patch = Patch::new();
        patch.add("a", leaf("A")).unwrap();
        patch.add("b", leaf("B")).unwrap();
        patch.chain("a", "b").unwrap();

        assert_eq!(patch.connection_count(), 1);
        assert!(patch.connections()[0].matches("a", "output", "b", "input"));
    }

    #[test]
    fn test_connect_custom_ports() {
        let mut patch = Patch::new();
        patch.add("stereo", Shaped::new("st", &["left", "right"], &["left_out", "right_out"])).unwrap();
        patch.add("split", Shaped::new("sp", &["main_in"], &["out1", "out2"])).unwrap();

        patch.connect("stereo", "left_out", "split", "main_in").unwrap();
        assert!(patch.connections()[0].matches("stereo", "left_out", "split", "main_in"));
    }

    #[test]
    fn test_connect_unknown_names() {
        let mut patch = Patch::new();
        patch.add("a", leaf("A")).unwrap();

        let err = patch.chain("ghost", "a").unwrap_err();
        assert_eq!(err, GraphError::BlockNotFound("ghost".to_string()));

        let err = patch.chain("a", "ghost").unwrap_err();
        assert_eq!(err, GraphError::BlockNotFound("ghost".to_string()));

        assert_eq!(patch.connection_count(), 0);
    }

    #[test]
    fn test_connect_undeclared_ports_store_nothing() {
        let mut patch = Patch::new();
        patch.add("a", leaf("A")).unwrap();
        patch.add("b", leaf("B")).unwrap();

        let err = patch.connect("a", "sidechain", "b", "input").unwrap_err();
        assert_eq!(
            err,
            GraphError::PortNotDeclared {
                block: "a".to_string(),
                port: "sidechain".to_string(),
                direction: PortDirection::Output,
            }
        );

        let err = patch.connect("a", "output", "b", "aux").unwrap_err();
        assert_eq!(
            err,
            GraphError::PortNotDeclared {
                block: "b".to_string(),
                port: "aux".to_string(),
                direction: PortDirection::Input,
            }
        );

        assert_eq!(patch.connection_count(), 0);
    }

    #[test]
    fn test_connect_is_idempotent() {
        let mut patch = Patch::new();
        patch.add("a", leaf("A")).unwrap();
        patch.add("b", leaf("B")).unwrap();

        patch.chain("a", "b").unwrap();
        patch.chain("a", "b").unwrap();
        assert_eq!(patch.connection_count(), 1);
    }

    #[test]
    fn test_disconnect_exact_match() {
        let mut patch = Patch::new();
        patch.add("a", leaf("A")).unwrap();
        patch.add("b", leaf("B")).unwrap();
        patch.add("c", leaf("C")).unwrap();
        patch.chain("a", "b").unwrap();
        patch.chain("a", "c").unwrap();

        patch.disconnect("a", "output", "b", "input").unwrap();
        assert_eq!(patch.connection_count(), 1);
        assert!(patch.connections()[0].matches("a", "output", "c", "input"));

        // A second removal of the same tuple has nothing to match
        let err = patch.disconnect("a", "output", "b", "input").unwrap_err();
        assert_eq!(
            err,
            GraphError::ConnectionNotFound {
                from: "a".to_string(),
                from_port: "output".to_string(),
                to: "b".to_string(),
                to_port: "input".to_string(),
            }
        );
    }

    #[test]
    fn test_map_input_validates_eagerly() {
        let mut patch = Patch::new();
        patch.add("mixer", Shaped::new("m", &["in1", "in2"], &["mix"])).unwrap();

        patch.map_input("left", "mixer", "in1").unwrap();
        assert_eq!(patch.input_alias("left"), Some(&Endpoint::new("mixer", "in1")));

        let err = patch.map_input("bad", "ghost", "in1").unwrap_err();
        assert_eq!(err, GraphError::BlockNotFound("ghost".to_string()));
        assert!(patch.input_alias("bad").is_none());

        // "mix" is an output, not an input
        let err = patch.map_input("bad", "mixer", "mix").unwrap_err();
        assert_eq!(
            err,
            GraphError::PortNotDeclared {
                block: "mixer".to_string(),
                port: "mix".to_string(),
                direction: PortDirection::Input,
            }
        );
        assert!(patch.input_alias("bad").is_none());
    }

    #[test]
    fn test_map_output_validates_eagerly() {
        let mut patch = Patch::new();
        patch.add("mixer", Shaped::new("m", &["in1", "in2"], &["mix"])).unwrap();

        patch.map_output("main", "mixer", "mix").unwrap();
        assert_eq!(patch.output_alias("main"), Some(&Endpoint::new("mixer", "mix")));

        let err = patch.map_output("bad", "mixer", "in1").unwrap_err();
        assert_eq!(
            err,
            GraphError::PortNotDeclared {
                block: "mixer".to_string(),
                port: "in1".to_string(),
                direction: PortDirection::Output,
            }
        );
    }

    #[test]
    fn test_remapping_replaces_the_alias() {
        let mut patch = Patch::new();
        patch.add("m", Shaped::new("m", &["in1", "in2"], &["mix"])).unwrap();

        patch.map_input("side", "m", "in1").unwrap();
        patch.map_input("side", "m", "in2").unwrap();

        assert_eq!(patch.input_alias("side"), Some(&Endpoint::new("m", "in2")));
        assert_eq!(patch.input_aliases().count(), 1);
    }

    #[test]
    fn test_patch_is_a_block() {
        let mut patch = Patch::new().with_name("sub");
        assert_eq!(Block::kind(&patch), "patch");
        assert_eq!(Block::ports(&patch).inputs(), ["input"]);
        assert_eq!(Block::ports(&patch).outputs(), ["output"]);

        let err = patch.process(&SignalMap::new()).unwrap_err();
        assert_eq!(err, ProcessError::NotImplemented("sub".to_string()));
    }

    #[test]
    fn test_nested_patch_wires_like_a_leaf() {
        let mut outer = Patch::new();
        outer.add("pre", leaf("pre")).unwrap();
        outer.add("sub", Patch::new().with_name("Sub")).unwrap();

        outer.chain("pre", "sub").unwrap();
        assert!(outer.connections()[0].matches("pre", "output", "sub", "input"));
    }

    #[test]
    fn test_patch_mut_for_post_add_authoring() {
        let mut outer = Patch::new();
        outer.add("sub", Patch::new().with_name("Sub")).unwrap();
        outer.add("leaf", leaf("L")).unwrap();

        outer.patch_mut("sub").unwrap().add("inner", leaf("I")).unwrap();
        assert_eq!(outer.get("sub").unwrap().as_patch().unwrap().block_count(), 1);

        let err = outer.patch_mut("leaf").unwrap_err();
        assert_eq!(err, GraphError::NotAPatch("leaf".to_string()));

        let err = outer.patch_mut("ghost").unwrap_err();
        assert_eq!(err, GraphError::BlockNotFound("ghost".to_string()));
    }

    #[test]
    fn test_block_at_walks_the_hierarchy() {
        let mut sub = Patch::new().with_name("Sub");
        sub.add("inner", leaf("Inner")).unwrap();

        let mut top = Patch::new().with_name("Top");
        top.add("sub", sub).unwrap();
        top.add("leaf", leaf("Leaf")).unwrap();

        assert_eq!(top.block_at("leaf").unwrap().name(), "Leaf");
        assert_eq!(top.block_at("sub.inner").unwrap().name(), "Inner");
        assert_eq!(top.block_at("sub").unwrap().name(), "Sub");

        let err = top.block_at("sub.ghost").unwrap_err();
        assert_eq!(err, GraphError::BlockNotFound("ghost".to_string()));

        let err = top.block_at("leaf.too.deep").unwrap_err();
        assert_eq!(err, GraphError::NotAPatch("leaf".to_string()));
    }

    #[test]
    fn test_pathname_joins_instance_names() {
        let mut level2 = Patch::new().with_name("Level2");
        level2.add("final", leaf("FinalModule")).unwrap();

        let mut level1 = Patch::new().with_name("Level1");
        level1.add("l2", level2).unwrap();

        let mut level0 = Patch::new().with_name("Level0");
        level0.add("l1", level1).unwrap();

        assert_eq!(
            level0.pathname_of("l1.l2.final").unwrap(),
            "Level0.Level1.Level2.FinalModule"
        );
        assert_eq!(level0.pathname_of("l1").unwrap(), "Level0.Level1");
    }

    #[test]
    fn test_failed_connect_leaves_connections_unchanged() {
        let mut patch = Patch::new();
        patch.add("a", leaf("A")).unwrap();
        patch.add("b", leaf("B")).unwrap();
        patch.chain("a", "b").unwrap();

        let before: Vec<Connection> = patch.connections().to_vec();
        let _ = patch.connect("a", "nope", "b", "input");
        let _ = patch.chain("a", "ghost");
        assert_eq!(patch.connections(), &before[..]);
    }
}
