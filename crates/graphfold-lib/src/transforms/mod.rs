//! Graph rewriting passes.
//!
//! `fold` drives the others in order:
//! restrict (`subgraph`) → fold (`constant_fold`) → reconcile (`boundary`) →
//! prune (`prune`).

mod boundary;
mod constant_fold;
mod fold;
mod prune;
mod subgraph;

#[cfg(test)]
mod fold_tests;
#[cfg(test)]
mod prune_tests;

pub use boundary::replace_boundary_placeholders;
pub use constant_fold::{
    ConstantEvaluator, ConstantFolder, DTYPE_ATTR, EvaluationError, FoldStats, VALUE_ATTR,
};
pub use fold::{FoldPipeline, fold_constants};
pub use prune::remove_unused_nodes;
pub use subgraph::{
    BOUNDARY_SEPARATOR, BoundaryRewriter, FeedFetchRewriter, RECV_PREFIX, RewriteError,
    SEND_PREFIX, recv_node_name, send_node_name,
};
