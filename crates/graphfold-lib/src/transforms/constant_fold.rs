//! Constant folding.
//!
//! Evaluates every node whose inputs are all known constants and turns it into
//! a `Const` node holding the result. Folding is best effort: a node whose
//! kernel fails, or whose result is too large, is left alone.

use graphfold_core::{AttrValue, Tensor};

use crate::graph::{EdgeKind, Graph, Node};
use crate::ops::{CONST_OP, OpRegistry};
use crate::options::FoldOptions;

/// Attribute holding the element type of a `Const` node.
pub const DTYPE_ATTR: &str = "dtype";
/// Attribute holding the literal of a `Const` node.
pub const VALUE_ATTR: &str = "value";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    #[error("constant '{node}' is invalid: {reason}")]
    InvalidConstant { node: String, reason: String },
}

/// Replaces statically computable nodes with constants.
///
/// Boundary nodes must survive: implementations never fold or remove stateful
/// ops.
pub trait ConstantEvaluator {
    fn fold(&self, graph: Graph, ops: &dyn OpRegistry) -> Result<Graph, EvaluationError>;
}

/// Counts from one folding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FoldStats {
    /// Nodes turned into constants.
    pub folded: usize,
    /// Candidates left alone (kernel failure, size limit, excluded op).
    pub skipped: usize,
}

/// The default evaluator, running the registry's reference kernels.
#[derive(Debug, Clone, Default)]
pub struct ConstantFolder {
    options: FoldOptions,
}

enum Outcome {
    NotFoldable,
    Skipped(String),
    Folded(Tensor),
}

impl ConstantFolder {
    pub fn new(options: FoldOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FoldOptions {
        &self.options
    }

    /// Fold in topological order, so folded nodes feed their consumers.
    pub fn fold_with_stats(
        &self,
        mut graph: Graph,
        ops: &dyn OpRegistry,
    ) -> Result<(Graph, FoldStats), EvaluationError> {
        let mut values: Vec<Option<Tensor>> = vec![None; graph.len()];
        let mut stats = FoldStats::default();

        for id in graph.topological_order() {
            let node = graph.node(id);
            if node.op == CONST_OP {
                values[id as usize] = Some(constant_value(node)?);
                continue;
            }

            match self.evaluate(node, &values, ops) {
                Outcome::NotFoldable => {}
                Outcome::Skipped(reason) => {
                    tracing::debug!(node = %node.name, op = %node.op, %reason, "not folded");
                    stats.skipped += 1;
                }
                Outcome::Folded(value) => {
                    tracing::debug!(node = %node.name, op = %node.op, "folded");
                    make_constant(graph.node_mut(id), value.clone());
                    values[id as usize] = Some(value);
                    stats.folded += 1;
                }
            }
        }

        tracing::info!(
            folded = stats.folded,
            skipped = stats.skipped,
            "constant folding done"
        );
        Ok((graph, stats))
    }

    fn evaluate(&self, node: &Node, values: &[Option<Tensor>], ops: &dyn OpRegistry) -> Outcome {
        let Some(kernel) = ops
            .lookup(&node.op)
            .filter(|def| def.is_foldable())
            .and_then(|def| def.kernel)
        else {
            return Outcome::NotFoldable;
        };

        let mut args: Vec<&Tensor> = Vec::with_capacity(node.inputs.len());
        for edge in &node.inputs {
            let Some(value) = &values[edge.source as usize] else {
                return Outcome::NotFoldable;
            };
            match edge.kind {
                EdgeKind::Data { output: 0 } => args.push(value),
                EdgeKind::Data { .. } => return Outcome::NotFoldable,
                EdgeKind::Control => {}
            }
        }

        if self.options.is_excluded(&node.op) {
            return Outcome::Skipped("op excluded by options".to_string());
        }

        let value = match kernel(node, &args) {
            Ok(value) => value,
            Err(err) => return Outcome::Skipped(err.to_string()),
        };
        let limit = self.options.max_constant_elements;
        if value.len() > limit {
            return Outcome::Skipped(format!(
                "result has {} elements, limit is {limit}",
                value.len()
            ));
        }
        Outcome::Folded(value)
    }
}

impl ConstantEvaluator for ConstantFolder {
    fn fold(&self, graph: Graph, ops: &dyn OpRegistry) -> Result<Graph, EvaluationError> {
        self.fold_with_stats(graph, ops).map(|(graph, _)| graph)
    }
}

/// Literal held by a `Const` node, checked against its declared shape and type.
fn constant_value(node: &Node) -> Result<Tensor, EvaluationError> {
    let invalid = |reason: String| EvaluationError::InvalidConstant {
        node: node.name.clone(),
        reason,
    };

    let value = node
        .attrs
        .get(VALUE_ATTR)
        .and_then(AttrValue::as_tensor)
        .ok_or_else(|| invalid(format!("missing tensor attribute '{VALUE_ATTR}'")))?;
    value.validate().map_err(invalid)?;

    if let Some(attr) = node.attrs.get(DTYPE_ATTR) {
        match attr.as_type() {
            Some(dtype) if dtype == value.dtype() => {}
            Some(dtype) => {
                return Err(invalid(format!(
                    "dtype is {dtype} but the value holds {}",
                    value.dtype()
                )));
            }
            None => return Err(invalid(format!("attribute '{DTYPE_ATTR}' is not a type"))),
        }
    }

    Ok(value.clone())
}

/// Turn `node` into a `Const` holding `value`. The name is kept.
fn make_constant(node: &mut Node, value: Tensor) {
    node.op = CONST_OP.to_string();
    node.inputs.clear();
    node.attrs.clear();
    node.attrs
        .insert(DTYPE_ATTR.to_string(), AttrValue::Type(value.dtype()));
    node.attrs.insert(VALUE_ATTR.to_string(), AttrValue::Tensor(value));
}
