//! Schema-checked syntax tree
//!
//! The parser builds the tree bottom-up from [`AstNode`] values. Each node
//! type has a fixed shape in the [`schema`] table; constructors refuse to
//! build nodes that break it, so a finished tree is valid by construction.
//!
//! ## Tree shapes
//!
//! ```text
//! ROOT      FILENAME OPTIONS (DEFMOD | IMPMOD | PGMMOD)
//! DEFMOD    IDENT IMPLIST? DEFLIST?
//! IMPMOD    IDENT EXPR? IMPLIST? BLOCK
//! BLOCK     DECLLIST? STMTSEQ?
//! ```
//!
//! `?` marks a slot that holds `EMPTY` when the construct is absent.

mod node;
mod node_type;
pub mod schema;

pub use node::{AstNode, NodeError};
pub use node_type::AstNodeType;
