//! Error types for patchbay.
//!
//! Uses thiserror for structured errors with context. Errors carry the local
//! names involved so an authoring tool can point at the offending block, and
//! they compare by value so tests can assert on exact failures.

use crate::core::port::PortDirection;
use thiserror::Error;

/// Errors from patch construction, validation, and order resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Block '{0}' not found")]
    BlockNotFound(String),

    #[error("Block name '{0}' is already taken in this patch")]
    DuplicateName(String),

    #[error("Block '{block}' has no {direction} port '{port}'")]
    PortNotDeclared {
        block: String,
        port: String,
        direction: PortDirection,
    },

    #[error("Connection {from}.{from_port} -> {to}.{to_port} not found")]
    ConnectionNotFound {
        from: String,
        from_port: String,
        to: String,
        to_port: String,
    },

    #[error("Circular dependency detected; unresolved blocks: {names:?}")]
    CircularDependency { names: Vec<String> },

    #[error("Block '{0}' is not a patch and cannot be descended into")]
    NotAPatch(String),
}

/// Errors from invoking the process contract on a block.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    #[error("Processing is not implemented for '{0}'")]
    NotImplemented(String),

    #[error("Missing input '{port}' for block '{block}'")]
    MissingInput { block: String, port: String },

    #[error("Incompatible signals in block '{block}': {detail}")]
    IncompatibleSignals { block: String, detail: String },
}

// ============================================================================
// Error Utilities
// ============================================================================

impl GraphError {
    /// Local names of the blocks involved in this error.
    ///
    /// Lets an authoring tool highlight the offending blocks without parsing
    /// the message text.
    pub fn blocks_involved(&self) -> Vec<&str> {
        match self {
            GraphError::BlockNotFound(name)
            | GraphError::DuplicateName(name)
            | GraphError::NotAPatch(name) => vec![name],
            GraphError::PortNotDeclared { block, .. } => vec![block],
            GraphError::ConnectionNotFound { from, to, .. } => vec![from, to],
            GraphError::CircularDependency { names } => {
                names.iter().map(String::as_str).collect()
            }
        }
    }
}

/// Result type alias for patch operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Result type alias for process invocations.
pub type ProcessResult<T> = Result<T, ProcessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_message_names_the_direction() {
        let err = GraphError::PortNotDeclared {
            block: "mixer_1".to_string(),
            port: "in9".to_string(),
            direction: PortDirection::Input,
        };
        let msg = err.to_string();
        assert!(msg.contains("mixer_1"));
        assert!(msg.contains("input"));
        assert!(msg.contains("in9"));
    }

    #[test]
    fn test_connection_error_message() {
        let err = GraphError::ConnectionNotFound {
            from: "a".to_string(),
            from_port: "output".to_string(),
            to: "b".to_string(),
            to_port: "input".to_string(),
        };
        assert_eq!(err.to_string(), "Connection a.output -> b.input not found");
    }

    #[test]
    fn test_blocks_involved() {
        let err = GraphError::CircularDependency {
            names: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(err.blocks_involved(), ["a", "b"]);

        let err = GraphError::BlockNotFound("src".to_string());
        assert_eq!(err.blocks_involved(), ["src"]);

        let err = GraphError::ConnectionNotFound {
            from: "x".to_string(),
            from_port: "output".to_string(),
            to: "y".to_string(),
            to_port: "input".to_string(),
        };
        assert_eq!(err.blocks_involved(), ["x", "y"]);
    }

    #[test]
    fn test_process_error_display() {
        let err = ProcessError::NotImplemented("patch_3".to_string());
        assert!(err.to_string().contains("patch_3"));

        let err = ProcessError::MissingInput {
            block: "mixer_1".to_string(),
            port: "in2".to_string(),
        };
        assert_eq!(err.to_string(), "Missing input 'in2' for block 'mixer_1'");
    }
}
