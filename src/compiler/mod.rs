//! Compiled query artifact and the compiler contract.
//!
//! A compiler turns a root node into SQL text plus positional parameters.
//! Compilation is deterministic: the same tree always yields the same SQL
//! and parameters. Only the [`QueryId`] differs between compilations.

mod default;
mod dialect;

pub use default::DefaultQueryCompiler;
pub use dialect::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ast::{RawNode, RootOperationNode, Value};

/// Opaque identity of one compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryId(Uuid);

impl QueryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for QueryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for QueryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The output of compiling a root node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledQuery {
    /// The tree that was compiled, after any plugin transformations.
    pub query: RootOperationNode,
    pub query_id: QueryId,
    pub sql: String,
    /// Bound values, in placeholder order.
    pub parameters: Vec<Value>,
}

impl CompiledQuery {
    /// Wrap literal SQL that bypasses the builder. Carries no parameters.
    pub fn raw(sql: impl Into<String>) -> Self {
        let sql = sql.into();
        Self {
            query: RawNode::create_with_sql(sql.clone()).into(),
            query_id: QueryId::new(),
            sql,
            parameters: vec![],
        }
    }
}

/// Turns a root node into a [`CompiledQuery`].
pub trait QueryCompiler {
    fn compile_query(&self, query: &RootOperationNode) -> CompiledQuery;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeKind;

    #[test]
    fn test_raw_artifact() {
        let compiled = CompiledQuery::raw("select 1");
        assert_eq!(compiled.sql, "select 1");
        assert!(compiled.parameters.is_empty());
        assert_eq!(compiled.query.kind(), NodeKind::Raw);

        let RootOperationNode::Raw(raw) = &compiled.query else {
            panic!("expected raw root");
        };
        assert_eq!(raw.sql_fragments, vec!["select 1".to_string()]);
        assert!(raw.parameters.is_empty());
    }

    #[test]
    fn test_raw_artifacts_get_fresh_ids() {
        let a = CompiledQuery::raw("select 1");
        let b = CompiledQuery::raw("select 1");
        assert_ne!(a.query_id, b.query_id);
    }
}
