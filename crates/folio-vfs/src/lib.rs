//! Virtual file tree for folio.
//!
//! The whole site is a small in-memory tree of named nodes, built once at
//! startup from a declarative manifest and never mutated afterwards.
//! Sessions navigate it by holding a [`NodeId`]; nothing in here does any
//! I/O after construction.

pub mod manifest;
mod tree;

pub use manifest::Manifest;
pub use tree::{FileNode, FileTree, NodeId, TreeBuilder};
