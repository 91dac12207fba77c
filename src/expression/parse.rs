//! Expression normalization.
//!
//! Resolves an [`ExpressionInput`] (a ready node source, a factory that
//! builds one from an [`ExpressionBuilder`], or an untyped value from a
//! dynamic boundary) into a concrete node.

use crate::ast::{NodeKind, OperationNode};
use crate::error::{NodeError, NodeResult};

use super::{AliasedOperationNodeSource, ExpressionBuilder, OperationNodeSource};

type Factory<'a, E> = Box<dyn FnOnce(&ExpressionBuilder) -> E + 'a>;

pub enum ExpressionInput<'a, E> {
    Expression(E),
    Factory(Factory<'a, E>),
    /// A value that arrived without static type information, e.g. from JSON.
    /// Accepted only if it is a serialized node.
    Untyped(serde_json::Value),
}

impl<'a, E> ExpressionInput<'a, E> {
    pub fn factory(factory: impl FnOnce(&ExpressionBuilder) -> E + 'a) -> Self {
        Self::Factory(Box::new(factory))
    }
}

impl<E> From<serde_json::Value> for ExpressionInput<'_, E> {
    fn from(value: serde_json::Value) -> Self {
        Self::Untyped(value)
    }
}

/// Resolve an expression or expression factory into a node.
pub fn parse_expression<E: OperationNodeSource>(input: ExpressionInput<'_, E>) -> NodeResult<OperationNode> {
    match input {
        ExpressionInput::Expression(expr) => Ok(expr.to_operation_node()),
        ExpressionInput::Factory(factory) => Ok(factory(&ExpressionBuilder::new()).to_operation_node()),
        ExpressionInput::Untyped(value) => parse_untyped(value),
    }
}

/// Like [`parse_expression`], but the result must be an aliased expression
/// and is always an `Alias` node.
pub fn parse_aliased_expression<E: AliasedOperationNodeSource>(
    input: ExpressionInput<'_, E>,
) -> NodeResult<OperationNode> {
    match input {
        ExpressionInput::Expression(expr) => Ok(expr.to_operation_node()),
        ExpressionInput::Factory(factory) => Ok(factory(&ExpressionBuilder::new()).to_operation_node()),
        ExpressionInput::Untyped(value) => {
            if !is_aliased_operation_node_source(&value) {
                return Err(NodeError::invalid_expression(&value));
            }
            parse_untyped(value)
        }
    }
}

/// A serialized node is a node source; anything else is rejected with the
/// offending value in the message. Unknown node kinds keep their own error.
fn parse_untyped(value: serde_json::Value) -> NodeResult<OperationNode> {
    if !is_operation_node_source(&value) {
        return Err(NodeError::invalid_expression(&value));
    }
    OperationNode::from_json_value(value.clone()).map_err(|e| match e {
        NodeError::Json(_) => NodeError::invalid_expression(&value),
        other => other,
    })
}

/// Whether an untyped value has the shape of a serialized node.
pub fn is_operation_node_source(value: &serde_json::Value) -> bool {
    value.get("kind").is_some_and(serde_json::Value::is_string)
}

/// Whether an untyped value has the shape of a serialized `Alias` node.
pub fn is_aliased_operation_node_source(value: &serde_json::Value) -> bool {
    is_operation_node_source(value)
        && value.get("kind").and_then(serde_json::Value::as_str) == Some(NodeKind::Alias.name())
        && value.get("alias").is_some()
        && value.get("node").is_some()
}
