#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for graphfold.
//!
//! Two layers:
//! - **Schema layer**: `GraphDef`/`NodeDef`, the serialized node-list form of a
//!   computation graph, with JSON and binary codecs
//! - **Reference layer**: helpers for the string-encoded input references that
//!   wire nodes together (`^name`, `name`, `name:1`)

pub mod colors;
pub mod graph_def;
pub mod node_ref;
pub mod tensor;

mod binary;
mod json;

#[cfg(test)]
mod graph_def_tests;
#[cfg(test)]
mod node_ref_tests;

pub use colors::Colors;
pub use graph_def::{AttrValue, GraphDef, NodeDef};
pub use json::GraphError;
pub use node_ref::{NodeRef, node_name_from_input, parse_input};
pub use tensor::{DataType, Tensor, TensorValues};
