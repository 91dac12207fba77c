//! Error types for sqlnode.

use thiserror::Error;

use crate::ast::NodeKind;

/// The main error type for node operations.
#[derive(Debug, Error)]
pub enum NodeError {
    /// The expression normalizer got something that is neither a node source
    /// nor a factory producing one.
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    /// A node kind tag outside the closed enumeration. Signals a version
    /// mismatch between whoever produced the tree and this crate.
    #[error("Unknown operation node kind: '{0}'")]
    UnknownNodeKind(String),

    /// A root-only operation was given a non-root node.
    #[error("{0} is not a root operation node")]
    NotARootNode(NodeKind),

    /// A transformer returned a node of a different kind than it was given.
    #[error("Transformer changed node kind from {from} to {to}")]
    KindChanged { from: NodeKind, to: NodeKind },

    /// A raw node whose fragments do not surround its parameters.
    #[error("Raw node has {fragments} SQL fragments for {parameters} parameters")]
    RawArity { fragments: usize, parameters: usize },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed JSON node tree.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NodeError {
    /// Create an invalid-expression error reporting the serialized offending value.
    pub fn invalid_expression(value: &serde_json::Value) -> Self {
        Self::InvalidExpression(value.to_string())
    }
}

/// Result type alias for node operations.
pub type NodeResult<T> = Result<T, NodeError>;
