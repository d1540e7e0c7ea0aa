//! Dead node elimination.
//!
//! Keeps the nodes the declared outputs depend on, plus the declared inputs.

use std::collections::HashSet;

use graphfold_core::GraphDef;
use graphfold_core::node_ref::{filter_graph_def, map_names_to_nodes, node_name_from_input};

use crate::{Error, Result};

/// Drop every node that no declared output depends on.
///
/// Walks input references backwards from `outputs`, one wave at a time.
/// Declared inputs are marked as used up front: they are always kept, and the
/// walk never continues through them. An output that is also an input is still
/// looked up.
///
/// Fails with [`Error::Structural`] on the first name the walk reaches that
/// has no node, including a missing output. Survivors keep their relative
/// order; edges are not rewritten.
pub fn remove_unused_nodes(
    graph: &GraphDef,
    inputs: &[&str],
    outputs: &[&str],
) -> Result<GraphDef> {
    let by_name = map_names_to_nodes(graph);

    let mut used: HashSet<&str> = inputs.iter().copied().collect();
    let mut wave: Vec<&str> = outputs.to_vec();

    while !wave.is_empty() {
        let mut next = Vec::new();
        for name in wave {
            used.insert(name);
            let node = by_name.get(name).ok_or_else(|| Error::Structural {
                node: name.to_string(),
            })?;
            for input in &node.input {
                let producer = node_name_from_input(input);
                if used.insert(producer) {
                    next.push(producer);
                }
            }
        }
        wave = next;
    }

    let pruned = filter_graph_def(graph, |n| used.contains(n.name.as_str()));
    tracing::debug!(
        before = graph.len(),
        after = pruned.len(),
        "removed unused nodes"
    );
    Ok(pruned)
}
