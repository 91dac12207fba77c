//! # sqlnode
//!
//! Immutable SQL operation trees, structural transformers over them, and a
//! compiler that turns a root node into SQL plus parameters.
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use sqlnode::prelude::*;
//!
//! let query: RootOperationNode = SelectQueryNode::create(vec![TableNode::create("person").into()])
//!     .with_where(BinaryOperationNode::create(
//!         ReferenceNode::parse("id"),
//!         Operator::Eq,
//!         ValueNode::create(1),
//!     ))
//!     .into();
//!
//! let mut pipeline = QueryPipeline::new(Dialect::Postgres).with_plugin(WithSchemaPlugin::new("app"));
//! let compiled = pipeline.compile(&query)?;
//! // => "select * from app.person where id = $1"
//! ```
//!
//! ## Layers
//!
//! | Module        | Role                                              |
//! |---------------|---------------------------------------------------|
//! | `ast`         | Node kinds, root nodes, JSON loading              |
//! | `expression`  | Node sources and expression normalization         |
//! | `transformer` | Identity-preserving rewrites, schema qualification |
//! | `compiler`    | Dialects and the compiled query artifact          |
//! | `plugin`      | Plugins run before compilation                    |

pub mod ast;
pub mod compiler;
pub mod config;
pub mod error;
pub mod expression;
pub mod plugin;
pub mod transformer;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::compiler::{
        CompiledQuery, DefaultQueryCompiler, Dialect, PostgresDialect, QueryCompiler, QueryId, SqlDialect,
        SqliteDialect,
    };
    pub use crate::config::PipelineConfig;
    pub use crate::error::*;
    pub use crate::expression::*;
    pub use crate::plugin::{QueryPipeline, QueryPlugin, WithSchemaPlugin};
    pub use crate::transformer::{IdentityTransformer, OperationNodeTransformer, WithSchemaTransformer};
}
