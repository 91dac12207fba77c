//! Node sources: anything that can turn itself into an operation node.
//!
//! Builders, typed expression wrappers and raw fragments all implement
//! [`OperationNodeSource`]; the tree never needs to know who produced it.

mod builder;
mod parse;

pub use builder::*;
pub use parse::*;

use std::marker::PhantomData;
use std::sync::Arc;

use crate::ast::{AliasNode, OperationNode, RootOperationNode};

/// Converts a value into an operation node on demand. Must be side-effect
/// free: the same value yields the same node on every call.
pub trait OperationNodeSource {
    fn to_operation_node(&self) -> OperationNode;
}

/// A node source carrying an alias. Its node form is always an `Alias` node.
pub trait AliasedOperationNodeSource: OperationNodeSource {
    fn alias(&self) -> &str;
    fn expression(&self) -> &dyn OperationNodeSource;
}

impl OperationNodeSource for OperationNode {
    fn to_operation_node(&self) -> OperationNode {
        self.clone()
    }
}

impl OperationNodeSource for RootOperationNode {
    fn to_operation_node(&self) -> OperationNode {
        self.clone().into()
    }
}

impl<N> OperationNodeSource for Arc<N>
where
    OperationNode: From<Arc<N>>,
{
    fn to_operation_node(&self) -> OperationNode {
        Arc::clone(self).into()
    }
}

impl<S: OperationNodeSource + ?Sized> OperationNodeSource for &S {
    fn to_operation_node(&self) -> OperationNode {
        (**self).to_operation_node()
    }
}

/// An expression whose SQL result type is `T`.
///
/// `T` exists for callers that type-check their queries; at the node level
/// the expression is nothing but its node.
pub struct Expression<T> {
    node: OperationNode,
    _type: PhantomData<fn() -> T>,
}

impl<T> Expression<T> {
    pub fn new(node: impl Into<OperationNode>) -> Self {
        Self {
            node: node.into(),
            _type: PhantomData,
        }
    }

    /// `expression AS alias`
    pub fn as_(self, alias: impl Into<String>) -> AliasedExpression<T> {
        AliasedExpression {
            expression: self,
            alias: alias.into(),
        }
    }
}

impl<T> Clone for Expression<T> {
    fn clone(&self) -> Self {
        Self::new(self.node.clone())
    }
}

impl<T> std::fmt::Debug for Expression<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Expression").field(&self.node).finish()
    }
}

impl<T> OperationNodeSource for Expression<T> {
    fn to_operation_node(&self) -> OperationNode {
        self.node.clone()
    }
}

pub struct AliasedExpression<T> {
    expression: Expression<T>,
    alias: String,
}

impl<T> Clone for AliasedExpression<T> {
    fn clone(&self) -> Self {
        Self {
            expression: self.expression.clone(),
            alias: self.alias.clone(),
        }
    }
}

impl<T> std::fmt::Debug for AliasedExpression<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AliasedExpression")
            .field("expression", &self.expression)
            .field("alias", &self.alias)
            .finish()
    }
}

impl<T> OperationNodeSource for AliasedExpression<T> {
    fn to_operation_node(&self) -> OperationNode {
        AliasNode::create(self.expression.to_operation_node(), self.alias.clone()).into()
    }
}

impl<T> AliasedOperationNodeSource for AliasedExpression<T> {
    fn alias(&self) -> &str {
        &self.alias
    }

    fn expression(&self) -> &dyn OperationNodeSource {
        &self.expression
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ColumnNode, NodeKind};

    #[test]
    fn test_aliased_expression_node_is_alias() {
        let expr: Expression<i64> = Expression::new(ColumnNode::create("age"));
        let aliased = expr.as_("years");

        assert_eq!(aliased.alias(), "years");
        assert_eq!(aliased.expression().to_operation_node().kind(), NodeKind::Column);

        match aliased.to_operation_node() {
            OperationNode::Alias(alias) => {
                assert_eq!(alias.alias.name, "years");
                assert_eq!(alias.node.kind(), NodeKind::Column);
            }
            other => panic!("expected alias, got {}", other.kind()),
        }
    }

    #[test]
    fn test_same_node_every_call() {
        let expr: Expression<i64> = Expression::new(ColumnNode::create("age"));
        assert!(expr.to_operation_node().ptr_eq(&expr.to_operation_node()));
    }
}
