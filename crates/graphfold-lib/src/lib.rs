#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Constant folding for serialized computation graphs.
//!
//! The pipeline imports a `GraphDef`, restricts it to the requested inputs and
//! outputs, folds every subgraph whose value is known statically, maps the
//! boundary nodes the restriction introduced back to the caller's node names,
//! and drops whatever the outputs no longer depend on.
//!
//! # Example
//!
//! ```
//! use graphfold_core::{GraphDef, NodeDef, Tensor};
//! use graphfold_lib::fold_constants;
//!
//! let graph = GraphDef::new(vec![
//!     NodeDef::constant("two", Tensor::scalar_int(2)),
//!     NodeDef::constant("three", Tensor::scalar_int(3)),
//!     NodeDef::new("sum", "Add").with_inputs(["two", "three"]),
//! ]);
//!
//! let folded = fold_constants(&graph, &[], &["sum"]).unwrap();
//! assert_eq!(folded.len(), 1);
//! assert_eq!(folded.node[0].op, "Const");
//! ```

pub mod dump;
pub mod graph;
pub mod ops;
pub mod options;
pub mod transforms;


pub use dump::GraphPrinter;
pub use options::FoldOptions;
pub use transforms::{
    FoldPipeline, fold_constants, remove_unused_nodes, replace_boundary_placeholders,
};

use graph::ImportError;
use transforms::{EvaluationError, RewriteError};

/// Errors that abort a pipeline run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A declared output, or a node it depends on, is missing from the graph.
    #[error("bad graph structure, no node named '{node}' found for input lookup")]
    Structural { node: String },

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Rewrite(#[from] RewriteError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

pub type Result<T> = std::result::Result<T, Error>;
