//! Python syntax tree model.
//!
//! Every node kind is a variant of a closed enum, so each traversal matches
//! exhaustively and a new node kind fails to compile until every walker
//! handles it. Trees are plain owned data: the pipeline owns the root for one
//! run and passes consume and return subtrees.
//!
//! The JSON form (`serde`) is the interchange format with external parsers:
//!
//! ```json
//! { "body": [ { "node": "Expr", "value": { "node": "Name", "id": "x" } } ] }
//! ```

pub mod ast;
mod build;
pub mod walk;

pub use ast::*;
pub use walk::{Node, NodeRef, Walk, walk, walk_from};
