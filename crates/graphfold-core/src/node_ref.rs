//! Input reference strings.
//!
//! A node lists its producers as strings of the form
//! `[^]name[:suffix]`:
//!
//! - `name`: data edge from output 0 of `name`
//! - `name:2`: data edge from output 2
//! - `^name`: control edge (ordering only, no data)
//!
//! Renaming passes substitute only the `name` part and keep prefix and suffix
//! byte-for-byte.

use std::collections::HashMap;

use crate::graph_def::{GraphDef, NodeDef};

/// Control-edge marker.
pub const CONTROL_PREFIX: &str = "^";

/// The three structural pieces of an input reference.
///
/// Borrowed from the parsed string; `prefix + name + suffix` reproduces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef<'a> {
    /// `"^"` for control edges, otherwise empty.
    pub prefix: &'a str,
    /// Base name of the referenced node.
    pub name: &'a str,
    /// Everything from the first `':'` on, otherwise empty.
    pub suffix: &'a str,
}

impl<'a> NodeRef<'a> {
    pub fn is_control(&self) -> bool {
        !self.prefix.is_empty()
    }

    /// Rebuild the reference around a different base name.
    pub fn with_name(&self, name: &str) -> String {
        let mut out = String::with_capacity(self.prefix.len() + name.len() + self.suffix.len());
        out.push_str(self.prefix);
        out.push_str(name);
        out.push_str(self.suffix);
        out
    }

    /// Output slot named by the suffix.
    ///
    /// Bare references read slot 0. Returns `None` when the suffix is not a
    /// decimal index.
    pub fn output_index(&self) -> Option<u32> {
        match self.suffix.strip_prefix(':') {
            None => Some(0),
            Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                digits.parse().ok()
            }
            Some(_) => None,
        }
    }
}

impl std::fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.prefix, self.name, self.suffix)
    }
}

/// Split an input reference into prefix, base name and suffix.
///
/// Never fails: a string without markers is all base name.
///
/// # Examples
/// ```
/// use graphfold_core::node_ref::parse_input;
/// let r = parse_input("^scope/add:1");
/// assert_eq!((r.prefix, r.name, r.suffix), ("^", "scope/add", ":1"));
/// assert_eq!(r.to_string(), "^scope/add:1");
/// ```
pub fn parse_input(input: &str) -> NodeRef<'_> {
    let (prefix, rest) = match input.strip_prefix(CONTROL_PREFIX) {
        Some(rest) => (CONTROL_PREFIX, rest),
        None => ("", input),
    };
    let (name, suffix) = match rest.find(':') {
        Some(colon) => rest.split_at(colon),
        None => (rest, ""),
    };
    NodeRef {
        prefix,
        name,
        suffix,
    }
}

/// Base node name of an input reference.
pub fn node_name_from_input(input: &str) -> &str {
    parse_input(input).name
}

pub fn is_control_input(input: &str) -> bool {
    input.starts_with(CONTROL_PREFIX)
}

/// Spell out the implicit `:0` of bare data references.
///
/// Control references and references that already carry a suffix are
/// returned unchanged.
pub fn canonical_input_name(input: &str) -> String {
    let parsed = parse_input(input);
    if parsed.is_control() || !parsed.suffix.is_empty() {
        input.to_string()
    } else {
        format!("{input}:0")
    }
}

/// Index nodes by name.
///
/// Names are expected to be unique. If they are not, the last node with a
/// given name wins.
pub fn map_names_to_nodes(graph: &GraphDef) -> HashMap<&str, &NodeDef> {
    graph.node.iter().map(|n| (n.name.as_str(), n)).collect()
}

/// Copy the nodes accepted by `keep`, preserving their order.
pub fn filter_graph_def(graph: &GraphDef, mut keep: impl FnMut(&NodeDef) -> bool) -> GraphDef {
    GraphDef {
        node: graph.node.iter().filter(|n| keep(n)).cloned().collect(),
    }
}
