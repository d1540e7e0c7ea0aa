//! In-memory graph representation.
//!
//! The serialized form wires nodes together through name strings. Passes that
//! need to walk edges (the rewriter and the constant folder) work on `Graph`
//! instead, where every input is resolved to a producer id once, at import.

mod arena;
mod import;


pub use arena::{Edge, EdgeKind, Graph, MAX_NODES, Node, NodeId};
pub use import::{ImportError, import_graph_def};
