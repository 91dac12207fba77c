//! Identifier, table and column reference nodes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{NodeError, NodeResult};

use super::{OperationNode, ValueNode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierNode {
    pub name: String,
}

impl IdentifierNode {
    pub fn create(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// An identifier that may carry a schema qualifier: `schema.name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemableIdentifierNode {
    #[serde(default)]
    pub schema: Option<Arc<IdentifierNode>>,
    pub identifier: Arc<IdentifierNode>,
}

impl SchemableIdentifierNode {
    pub fn create(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            identifier: Arc::new(IdentifierNode::create(name)),
        }
    }

    pub fn create_with_schema(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(Arc::new(IdentifierNode::create(schema))),
            identifier: Arc::new(IdentifierNode::create(name)),
        }
    }

    /// The bare (unqualified) name.
    pub fn name(&self) -> &str {
        &self.identifier.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableNode {
    pub table: Arc<SchemableIdentifierNode>,
}

impl TableNode {
    pub fn create(table: impl Into<String>) -> Self {
        Self {
            table: Arc::new(SchemableIdentifierNode::create(table)),
        }
    }

    pub fn create_with_schema(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            table: Arc::new(SchemableIdentifierNode::create_with_schema(schema, table)),
        }
    }

    /// Parse `"table"` or `"schema.table"`.
    pub fn parse(name: &str) -> Self {
        match name.split_once('.') {
            Some((schema, table)) => Self::create_with_schema(schema.trim(), table.trim()),
            None => Self::create(name.trim()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnNode {
    pub column: Arc<IdentifierNode>,
}

impl ColumnNode {
    pub fn create(column: impl Into<String>) -> Self {
        Self {
            column: Arc::new(IdentifierNode::create(column)),
        }
    }
}

/// `*`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectAllNode {}

impl SelectAllNode {
    pub fn create() -> Self {
        Self {}
    }
}

/// A column (or `*`) optionally qualified by a table: `table.column`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceNode {
    #[serde(default)]
    pub table: Option<Arc<TableNode>>,
    /// A `Column` or `SelectAll` node.
    pub column: OperationNode,
}

impl ReferenceNode {
    pub fn create(table: Option<TableNode>, column: impl Into<OperationNode>) -> Self {
        Self {
            table: table.map(Arc::new),
            column: column.into(),
        }
    }

    /// Parse `"column"`, `"table.column"`, `"schema.table.column"`, or a trailing `*`.
    pub fn parse(reference: &str) -> OperationNode {
        let (table, column) = match reference.rsplit_once('.') {
            Some((table, column)) => (Some(TableNode::parse(table)), column.trim()),
            None => (None, reference.trim()),
        };
        let column: OperationNode = if column == "*" {
            SelectAllNode::create().into()
        } else {
            ColumnNode::create(column).into()
        };
        match table {
            Some(table) => ReferenceNode::create(Some(table), column).into(),
            None if matches!(column, OperationNode::SelectAll(_)) => column,
            None => ReferenceNode::create(None, column).into(),
        }
    }
}

/// `node AS alias`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasNode {
    pub node: OperationNode,
    pub alias: Arc<IdentifierNode>,
}

impl AliasNode {
    pub fn create(node: impl Into<OperationNode>, alias: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            alias: Arc::new(IdentifierNode::create(alias)),
        }
    }
}

/// Literal SQL text interleaved with parameters.
///
/// `sql_fragments` always holds one more element than `parameters`; the
/// rendered SQL is `f0 p0 f1 p1 ... fn`. Both constructors and JSON loading
/// reject any other shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNodeParts")]
pub struct RawNode {
    pub sql_fragments: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<OperationNode>,
}

#[derive(Deserialize)]
struct RawNodeParts {
    sql_fragments: Vec<String>,
    #[serde(default)]
    parameters: Vec<OperationNode>,
}

impl TryFrom<RawNodeParts> for RawNode {
    type Error = NodeError;

    fn try_from(parts: RawNodeParts) -> NodeResult<Self> {
        RawNode::create(parts.sql_fragments, parts.parameters)
    }
}

impl RawNode {
    pub fn create(sql_fragments: Vec<String>, parameters: Vec<OperationNode>) -> NodeResult<Self> {
        if sql_fragments.len() != parameters.len() + 1 {
            return Err(NodeError::RawArity {
                fragments: sql_fragments.len(),
                parameters: parameters.len(),
            });
        }
        Ok(Self {
            sql_fragments,
            parameters,
        })
    }

    pub fn create_with_sql(sql: impl Into<String>) -> Self {
        Self {
            sql_fragments: vec![sql.into()],
            parameters: vec![],
        }
    }

    /// Raw SQL with `?` markers replaced by the given values, in order.
    ///
    /// Every `?` is a marker, including one inside a quoted literal or a
    /// Postgres `?` operator. Build such SQL with [`RawNode::create`].
    pub fn with_values(sql: &str, values: Vec<ValueNode>) -> NodeResult<Self> {
        let sql_fragments: Vec<String> = sql.split('?').map(str::to_string).collect();
        Self::create(sql_fragments, values.into_iter().map(OperationNode::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_fragments_must_surround_parameters() {
        let err = RawNode::with_values("select ?", vec![]).unwrap_err();
        assert!(matches!(err, NodeError::RawArity { fragments: 2, parameters: 0 }));

        let raw = RawNode::with_values("select ?", vec![ValueNode::create(1)]).unwrap();
        assert_eq!(raw.sql_fragments, vec!["select ".to_string(), String::new()]);
    }

    #[test]
    fn test_malformed_raw_json_is_rejected() {
        let json = r#"{ "kind": "Raw", "sql_fragments": ["select "], "parameters": [
            { "kind": "Value", "value": { "Int": 1 } }
        ] }"#;
        let err = OperationNode::from_json(json).unwrap_err();
        assert!(err.to_string().contains("1 SQL fragments for 1 parameters"));
    }
}
