//! The operation-node model.
//!
//! A closed family of immutable nodes covering every syntactic piece of a
//! query: identifiers, clauses, expressions, DML and DDL statements.

mod clauses;
mod ddl;
mod identifiers;
mod node;
mod operators;
mod queries;
mod values;

pub use clauses::*;
pub use ddl::*;
pub use identifiers::*;
pub use node::*;
pub use operators::*;
pub use queries::*;
pub use values::*;
