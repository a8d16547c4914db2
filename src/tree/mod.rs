//! Tree Model
//!
//! The game tree is built once from a nested [`TreeSpec`] and is immutable in
//! shape afterwards. Nodes live in a flat arena and refer to each other by
//! [`NodeId`], so the parent back-reference is a plain index.
//!
//! Search state is never stored on the nodes: each engine keeps its own
//! run-scoped side table keyed by [`NodeId`].

pub mod arena;
pub mod error;
pub mod node;
pub mod spec;

pub use arena::{BuildOptions, GameTree};
pub use error::TreeFormatError;
pub use node::{Node, NodeId, NodeKind};
pub use spec::{TreeDocument, TreeSpec};
