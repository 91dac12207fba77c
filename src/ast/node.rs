//! The closed operation-node enumeration.
//!
//! Every variant holds its payload behind an `Arc`, so cloning a node is a
//! reference-count bump and unchanged subtrees are shared between the input
//! and output of a transformation. Reference identity is observable through
//! [`OperationNode::ptr_eq`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::*;
use crate::error::{NodeError, NodeResult};

macro_rules! operation_nodes {
    ($($kind:ident => $node:ident),* $(,)?) => {
        /// An immutable node of a SQL operation tree.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "kind")]
        pub enum OperationNode {
            $($kind(Arc<$node>),)*
        }

        /// Discriminant of an [`OperationNode`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum NodeKind {
            $($kind,)*
        }

        impl NodeKind {
            pub const ALL: &'static [NodeKind] = &[$(NodeKind::$kind,)*];

            pub fn name(&self) -> &'static str {
                match self {
                    $(NodeKind::$kind => stringify!($kind),)*
                }
            }
        }

        impl OperationNode {
            pub fn kind(&self) -> NodeKind {
                match self {
                    $(OperationNode::$kind(_) => NodeKind::$kind,)*
                }
            }

            /// True when both values are the same variant pointing at the same allocation.
            pub fn ptr_eq(&self, other: &OperationNode) -> bool {
                match (self, other) {
                    $((OperationNode::$kind(a), OperationNode::$kind(b)) => Arc::ptr_eq(a, b),)*
                    _ => false,
                }
            }
        }

        $(
            impl From<$node> for OperationNode {
                fn from(node: $node) -> Self {
                    OperationNode::$kind(Arc::new(node))
                }
            }

            impl From<Arc<$node>> for OperationNode {
                fn from(node: Arc<$node>) -> Self {
                    OperationNode::$kind(node)
                }
            }
        )*
    };
}

operation_nodes! {
    // Identifiers and references
    Identifier => IdentifierNode,
    SchemableIdentifier => SchemableIdentifierNode,
    Table => TableNode,
    Column => ColumnNode,
    Reference => ReferenceNode,
    SelectAll => SelectAllNode,
    Alias => AliasNode,
    Raw => RawNode,
    // Values
    Value => ValueNode,
    ValueList => ValueListNode,
    Values => ValuesNode,
    // Expressions
    Operator => OperatorNode,
    BinaryOperation => BinaryOperationNode,
    UnaryOperation => UnaryOperationNode,
    And => AndNode,
    Or => OrNode,
    Parens => ParensNode,
    Function => FunctionNode,
    // Clauses
    Selection => SelectionNode,
    From => FromNode,
    Join => JoinNode,
    On => OnNode,
    Where => WhereNode,
    GroupBy => GroupByNode,
    Having => HavingNode,
    OrderBy => OrderByNode,
    OrderByItem => OrderByItemNode,
    Limit => LimitNode,
    Offset => OffsetNode,
    Returning => ReturningNode,
    ColumnUpdate => ColumnUpdateNode,
    SetOperation => SetOperationNode,
    With => WithNode,
    CommonTableExpression => CommonTableExpressionNode,
    CommonTableExpressionName => CommonTableExpressionNameNode,
    // DML
    SelectQuery => SelectQueryNode,
    InsertQuery => InsertQueryNode,
    UpdateQuery => UpdateQueryNode,
    DeleteQuery => DeleteQueryNode,
    // DDL
    DataType => DataTypeNode,
    ColumnDefinition => ColumnDefinitionNode,
    References => ReferencesNode,
    AddColumn => AddColumnNode,
    DropColumn => DropColumnNode,
    RenameColumn => RenameColumnNode,
    AlterTable => AlterTableNode,
    CreateTable => CreateTableNode,
    CreateView => CreateViewNode,
    CreateIndex => CreateIndexNode,
    CreateSchema => CreateSchemaNode,
    CreateType => CreateTypeNode,
    DropTable => DropTableNode,
    DropView => DropViewNode,
    DropIndex => DropIndexNode,
    DropSchema => DropSchemaNode,
    DropType => DropTypeNode,
}

impl NodeKind {
    /// Whether nodes of this kind can stand as a complete, independently
    /// compilable statement.
    pub fn is_root(&self) -> bool {
        match self {
            NodeKind::AlterTable
            | NodeKind::CreateIndex
            | NodeKind::CreateSchema
            | NodeKind::CreateTable
            | NodeKind::CreateType
            | NodeKind::CreateView
            | NodeKind::DeleteQuery
            | NodeKind::DropIndex
            | NodeKind::DropSchema
            | NodeKind::DropTable
            | NodeKind::DropType
            | NodeKind::DropView
            | NodeKind::InsertQuery
            | NodeKind::Raw
            | NodeKind::SelectQuery
            | NodeKind::UpdateQuery => true,
            NodeKind::Identifier
            | NodeKind::SchemableIdentifier
            | NodeKind::Table
            | NodeKind::Column
            | NodeKind::Reference
            | NodeKind::SelectAll
            | NodeKind::Alias
            | NodeKind::Value
            | NodeKind::ValueList
            | NodeKind::Values
            | NodeKind::Operator
            | NodeKind::BinaryOperation
            | NodeKind::UnaryOperation
            | NodeKind::And
            | NodeKind::Or
            | NodeKind::Parens
            | NodeKind::Function
            | NodeKind::Selection
            | NodeKind::From
            | NodeKind::Join
            | NodeKind::On
            | NodeKind::Where
            | NodeKind::GroupBy
            | NodeKind::Having
            | NodeKind::OrderBy
            | NodeKind::OrderByItem
            | NodeKind::Limit
            | NodeKind::Offset
            | NodeKind::Returning
            | NodeKind::ColumnUpdate
            | NodeKind::SetOperation
            | NodeKind::With
            | NodeKind::CommonTableExpression
            | NodeKind::CommonTableExpressionName
            | NodeKind::DataType
            | NodeKind::ColumnDefinition
            | NodeKind::References
            | NodeKind::AddColumn
            | NodeKind::DropColumn
            | NodeKind::RenameColumn => false,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NodeKind {
    type Err = NodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| NodeError::UnknownNodeKind(s.to_string()))
    }
}

impl OperationNode {
    pub fn is_root(&self) -> bool {
        self.kind().is_root()
    }

    /// View this node as a root operation node, if it is one.
    pub fn as_root(&self) -> Option<RootOperationNode> {
        RootOperationNode::try_from(self.clone()).ok()
    }

    /// Load a node tree from JSON.
    ///
    /// Every `kind` tag is checked against the closed enumeration before
    /// deserializing, so a tree from a newer producer fails with
    /// [`NodeError::UnknownNodeKind`] naming the offending tag.
    pub fn from_json(json: &str) -> NodeResult<Self> {
        Self::from_json_value(serde_json::from_str(json)?)
    }

    pub fn from_json_value(value: serde_json::Value) -> NodeResult<Self> {
        check_kinds(&value)?;
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> NodeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn check_kinds(value: &serde_json::Value) -> NodeResult<()> {
    match value {
        serde_json::Value::Object(map) => {
            if let Some(kind) = map.get("kind") {
                let tag = kind
                    .as_str()
                    .ok_or_else(|| NodeError::UnknownNodeKind(kind.to_string()))?;
                // Runtime values may legitimately carry JSON objects of their own.
                if tag.parse::<NodeKind>()? == NodeKind::Value {
                    return Ok(());
                }
            }
            map.values().try_for_each(check_kinds)
        }
        serde_json::Value::Array(items) => items.iter().try_for_each(check_kinds),
        _ => Ok(()),
    }
}

macro_rules! root_operation_nodes {
    ($($kind:ident => $node:ident),* $(,)?) => {
        /// A node that can stand at the top of a complete statement.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(into = "OperationNode", try_from = "OperationNode")]
        pub enum RootOperationNode {
            $($kind(Arc<$node>),)*
        }

        impl RootOperationNode {
            pub fn kind(&self) -> NodeKind {
                match self {
                    $(RootOperationNode::$kind(_) => NodeKind::$kind,)*
                }
            }
        }

        impl From<RootOperationNode> for OperationNode {
            fn from(root: RootOperationNode) -> Self {
                match root {
                    $(RootOperationNode::$kind(node) => OperationNode::$kind(node),)*
                }
            }
        }

        impl TryFrom<OperationNode> for RootOperationNode {
            type Error = NodeError;

            fn try_from(node: OperationNode) -> Result<Self, Self::Error> {
                match node {
                    $(OperationNode::$kind(node) => Ok(RootOperationNode::$kind(node)),)*
                    other => Err(NodeError::NotARootNode(other.kind())),
                }
            }
        }

        $(
            impl From<$node> for RootOperationNode {
                fn from(node: $node) -> Self {
                    RootOperationNode::$kind(Arc::new(node))
                }
            }

            impl From<Arc<$node>> for RootOperationNode {
                fn from(node: Arc<$node>) -> Self {
                    RootOperationNode::$kind(node)
                }
            }
        )*
    };
}

root_operation_nodes! {
    AlterTable => AlterTableNode,
    CreateIndex => CreateIndexNode,
    CreateSchema => CreateSchemaNode,
    CreateTable => CreateTableNode,
    CreateType => CreateTypeNode,
    CreateView => CreateViewNode,
    DeleteQuery => DeleteQueryNode,
    DropIndex => DropIndexNode,
    DropSchema => DropSchemaNode,
    DropTable => DropTableNode,
    DropType => DropTypeNode,
    DropView => DropViewNode,
    InsertQuery => InsertQueryNode,
    Raw => RawNode,
    SelectQuery => SelectQueryNode,
    UpdateQuery => UpdateQueryNode,
}

impl RootOperationNode {
    pub fn to_operation_node(&self) -> OperationNode {
        self.clone().into()
    }

    pub fn ptr_eq(&self, other: &RootOperationNode) -> bool {
        self.to_operation_node().ptr_eq(&other.to_operation_node())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_kinds() {
        let roots: Vec<NodeKind> = NodeKind::ALL.iter().copied().filter(|k| k.is_root()).collect();
        assert_eq!(roots.len(), 16);
        assert!(NodeKind::SelectQuery.is_root());
        assert!(NodeKind::Raw.is_root());
        assert!(!NodeKind::With.is_root());
        assert!(!NodeKind::Table.is_root());
    }

    #[test]
    fn test_kind_round_trip_by_name() {
        for kind in NodeKind::ALL {
            assert_eq!(kind.name().parse::<NodeKind>().unwrap(), *kind);
        }
        assert!(matches!(
            "MergeQuery".parse::<NodeKind>(),
            Err(NodeError::UnknownNodeKind(k)) if k == "MergeQuery"
        ));
    }

    #[test]
    fn test_ptr_eq_is_identity_not_equality() {
        let a: OperationNode = TableNode::create("users").into();
        let b: OperationNode = TableNode::create("users").into();
        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));
        assert!(a.ptr_eq(&a.clone()));
    }

    #[test]
    fn test_try_from_non_root() {
        let node: OperationNode = ColumnNode::create("id").into();
        assert!(matches!(
            RootOperationNode::try_from(node),
            Err(NodeError::NotARootNode(NodeKind::Column))
        ));
    }

    #[test]
    fn test_from_json_rejects_unknown_kind() {
        let json = r#"{
            "kind": "SelectQuery",
            "selections": [],
            "from": { "froms": [ { "kind": "LateralTable", "name": "x" } ] }
        }"#;
        match OperationNode::from_json(json) {
            Err(NodeError::UnknownNodeKind(kind)) => assert_eq!(kind, "LateralTable"),
            other => panic!("expected unknown kind, got {:?}", other),
        }
    }

    #[test]
    fn test_json_round_trip() {
        let query: OperationNode = SelectQueryNode::create(vec![TableNode::create("users").into()]).into();
        let json = query.to_json().unwrap();
        assert_eq!(OperationNode::from_json(&json).unwrap(), query);
    }
}
