//! The folding pipeline.

use graphfold_core::GraphDef;

use super::boundary::replace_boundary_placeholders;
use super::constant_fold::{ConstantEvaluator, ConstantFolder};
use super::prune::remove_unused_nodes;
use super::subgraph::{BoundaryRewriter, FeedFetchRewriter};
use crate::Result;
use crate::graph::import_graph_def;
use crate::ops::{OpRegistry, StandardOps};

/// Import, restrict, fold, reconcile, prune.
///
/// Each collaborator can be swapped out; the defaults are [`StandardOps`],
/// [`FeedFetchRewriter`] and [`ConstantFolder`] with default options.
pub struct FoldPipeline {
    ops: Box<dyn OpRegistry>,
    rewriter: Box<dyn BoundaryRewriter>,
    evaluator: Box<dyn ConstantEvaluator>,
}

impl Default for FoldPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl FoldPipeline {
    pub fn new() -> Self {
        Self {
            ops: Box::new(StandardOps::new()),
            rewriter: Box::new(FeedFetchRewriter),
            evaluator: Box::new(ConstantFolder::default()),
        }
    }

    pub fn with_ops(mut self, ops: impl OpRegistry + 'static) -> Self {
        self.ops = Box::new(ops);
        self
    }

    pub fn with_rewriter(mut self, rewriter: impl BoundaryRewriter + 'static) -> Self {
        self.rewriter = Box::new(rewriter);
        self
    }

    pub fn with_evaluator(mut self, evaluator: impl ConstantEvaluator + 'static) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    /// Fold `graph` down to what `outputs` need, given `inputs` are fed.
    ///
    /// The first failing stage aborts the run; its error is returned as is.
    pub fn run(&self, graph: &GraphDef, inputs: &[&str], outputs: &[&str]) -> Result<GraphDef> {
        let imported = import_graph_def(graph, self.ops.as_ref())?;
        let restricted = self.rewriter.rewrite(imported, inputs, outputs)?;
        let folded = self.evaluator.fold(restricted, self.ops.as_ref())?;

        let serialized = folded.to_graph_def();
        let reconciled = replace_boundary_placeholders(graph, &serialized, inputs, outputs);
        let pruned = remove_unused_nodes(&reconciled, inputs, outputs)?;

        tracing::info!(
            before = graph.len(),
            after = pruned.len(),
            "folded constants"
        );
        Ok(pruned)
    }
}

/// Run the default pipeline.
pub fn fold_constants(graph: &GraphDef, inputs: &[&str], outputs: &[&str]) -> Result<GraphDef> {
    FoldPipeline::new().run(graph, inputs, outputs)
}
