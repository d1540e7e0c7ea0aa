//! Import a `GraphDef` into an executable `Graph`.
//!
//! Resolves every input reference to an edge and rejects anything the rest of
//! the pipeline could trip over: unknown ops, duplicate or empty names,
//! dangling references, out-of-range outputs and cycles.

use graphfold_core::{GraphDef, parse_input};

use super::{Edge, Graph, MAX_NODES, Node, NodeId};
use crate::ops::OpRegistry;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    #[error("node #{index} has an empty name")]
    EmptyName { index: usize },

    #[error("duplicate node name '{0}'")]
    DuplicateNode(String),

    #[error("node '{node}': unknown op '{op}'")]
    UnknownOp { node: String, op: String },

    #[error("node '{node}': malformed input '{input}'")]
    MalformedInput { node: String, input: String },

    #[error("node '{node}': input '{input}' refers to a node that does not exist")]
    DanglingInput { node: String, input: String },

    #[error("node '{node}': input '{input}' reads output {output} but its producer has {available} outputs")]
    OutputOutOfRange {
        node: String,
        input: String,
        output: u32,
        available: u32,
    },

    #[error("node '{node}': control input '{input}' precedes data inputs")]
    ControlBeforeData { node: String, input: String },

    #[error("node '{node}': op '{op}' expects {expected} data inputs, got {actual}")]
    InputCount {
        node: String,
        op: String,
        expected: usize,
        actual: usize,
    },

    #[error("graph contains a cycle through node '{node}'")]
    Cycle { node: String },

    #[error("graph has {count} nodes, more than the limit of {limit}")]
    TooManyNodes { count: usize, limit: usize },
}

pub(super) fn check_node_count(count: usize) -> Result<(), ImportError> {
    if count > MAX_NODES {
        return Err(ImportError::TooManyNodes {
            count,
            limit: MAX_NODES,
        });
    }
    Ok(())
}

/// Build a `Graph` from its serialized form.
pub fn import_graph_def(def: &GraphDef, ops: &dyn OpRegistry) -> Result<Graph, ImportError> {
    check_node_count(def.len())?;
    let mut graph = Graph::new();
    let mut num_outputs: Vec<u32> = Vec::with_capacity(def.len());
    let mut arity: Vec<Option<usize>> = Vec::with_capacity(def.len());

    // Nodes first, so inputs may refer forward.
    for (index, node_def) in def.node.iter().enumerate() {
        if node_def.name.is_empty() {
            return Err(ImportError::EmptyName { index });
        }
        if graph.contains(&node_def.name) {
            return Err(ImportError::DuplicateNode(node_def.name.clone()));
        }
        let op = ops
            .lookup(&node_def.op)
            .ok_or_else(|| ImportError::UnknownOp {
                node: node_def.name.clone(),
                op: node_def.op.clone(),
            })?;
        num_outputs.push(op.num_outputs);
        arity.push(op.num_inputs);

        let mut node = Node::new(node_def.name.clone(), node_def.op.clone());
        node.attrs = node_def.attr.clone();
        graph.add_node(node);
    }

    for (index, node_def) in def.node.iter().enumerate() {
        let id = index as NodeId;
        let edges = resolve_inputs(&graph, node_def, &num_outputs)?;

        let data_count = edges.iter().filter(|e| !e.is_control()).count();
        if let Some(expected) = arity[index]
            && expected != data_count
        {
            return Err(ImportError::InputCount {
                node: node_def.name.clone(),
                op: node_def.op.clone(),
                expected,
                actual: data_count,
            });
        }

        graph.node_mut(id).inputs = edges;
    }

    if let Some(node) = find_cycle(&graph) {
        return Err(ImportError::Cycle {
            node: graph.node(node).name.clone(),
        });
    }

    tracing::debug!(nodes = graph.len(), "imported graph");
    Ok(graph)
}

fn resolve_inputs(
    graph: &Graph,
    node_def: &graphfold_core::NodeDef,
    num_outputs: &[u32],
) -> Result<Vec<Edge>, ImportError> {
    let mut edges = Vec::with_capacity(node_def.input.len());
    let mut seen_control = false;

    for input in &node_def.input {
        let malformed = || ImportError::MalformedInput {
            node: node_def.name.clone(),
            input: input.clone(),
        };

        let parsed = parse_input(input);
        if parsed.name.is_empty() {
            return Err(malformed());
        }
        let source = graph
            .find(parsed.name)
            .ok_or_else(|| ImportError::DanglingInput {
                node: node_def.name.clone(),
                input: input.clone(),
            })?;

        if parsed.is_control() {
            if !parsed.suffix.is_empty() {
                return Err(malformed());
            }
            seen_control = true;
            edges.push(Edge::control(source));
            continue;
        }

        if seen_control {
            return Err(ImportError::ControlBeforeData {
                node: node_def.name.clone(),
                input: input.clone(),
            });
        }
        let output = parsed.output_index().ok_or_else(malformed)?;
        let available = num_outputs[source as usize];
        if output >= available {
            return Err(ImportError::OutputOutOfRange {
                node: node_def.name.clone(),
                input: input.clone(),
                output,
                available,
            });
        }
        edges.push(Edge::data(source, output));
    }

    Ok(edges)
}

/// A node on a cycle, if the graph has one.
///
/// Nodes left over by a topological sort are on a cycle or downstream of one.
/// Repeatedly trimming leftovers with no leftover consumers removes the
/// downstream tails.
fn find_cycle(graph: &Graph) -> Option<NodeId> {
    let order = graph.topological_order();
    if order.len() == graph.len() {
        return None;
    }

    let mut remaining = vec![true; graph.len()];
    for id in order {
        remaining[id as usize] = false;
    }

    let consumers = graph.consumers();
    loop {
        let mut changed = false;
        for id in 0..graph.len() {
            if remaining[id] && !consumers[id].iter().any(|&c| remaining[c as usize]) {
                remaining[id] = false;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    remaining.iter().position(|&r| r).map(|id| id as NodeId)
}
