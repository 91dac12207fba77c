//! Tree transformers.
//!
//! ## Architecture
//!
//! ```text
//! RootOperationNode → transform_node (any-node hook) → walk_node → transform_<kind> → walk_<kind> → ...
//! ```
//!
//! Implement [`OperationNodeTransformer`] and override only the kinds you
//! care about; everything else is rebuilt structurally, and subtrees that
//! did not change are shared with the input.

mod traits;
mod walk;
mod with_schema;

pub use traits::*;
pub use walk::*;
pub use with_schema::*;
