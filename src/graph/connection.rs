//! Connection types for the patch.

use std::fmt;

/// An endpoint of a connection (local block name + port name).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    /// The local name of the block within its patch.
    pub block: String,
    /// The port name on that block.
    pub port: String,
}

impl Endpoint {
    /// Create a new endpoint.
    pub fn new(block: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            block: block.into(),
            port: port.into(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.block, self.port)
    }
}

/// A directed connection between two ports within one patch.
///
/// The destination depends on the source: order resolution schedules the
/// source's block before the destination's. Connections compare by value, so
/// an identical reconnect is a no-op and disconnect removes exact matches
/// only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Connection {
    /// Source endpoint (an output port).
    pub from: Endpoint,
    /// Destination endpoint (an input port).
    pub to: Endpoint,
}

impl Connection {
    /// Create a new connection.
    pub fn new(from: Endpoint, to: Endpoint) -> Self {
        Self { from, to }
    }

    /// Check against the four names that identify a connection.
    pub fn matches(&self, from: &str, from_port: &str, to: &str, to_port: &str) -> bool {
        self.from.block == from
            && self.from.port == from_port
            && self.to.block == to
            && self.to.port == to_port
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_display() {
        let endpoint = Endpoint::new("reverb", "output");
        assert_eq!(endpoint.to_string(), "reverb.output");
    }

    #[test]
    fn test_connection_value_equality() {
        let a = Connection::new(Endpoint::new("a", "output"), Endpoint::new("b", "input"));
        let b = Connection::new(Endpoint::new("a", "output"), Endpoint::new("b", "input"));
        let c = Connection::new(Endpoint::new("a", "output"), Endpoint::new("b", "side"));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_connection_matches() {
        let conn = Connection::new(Endpoint::new("a", "output"), Endpoint::new("b", "input"));
        assert!(conn.matches("a", "output", "b", "input"));
        assert!(!conn.matches("a", "output", "b", "side"));
        assert!(!conn.matches("b", "output", "a", "input"));
    }

    #[test]
    fn test_connection_display() {
        let conn = Connection::new(Endpoint::new("src", "sine"), Endpoint::new("mix", "in1"));
        assert_eq!(conn.to_string(), "src.sine -> mix.in1");
    }
}
