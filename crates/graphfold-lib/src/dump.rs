//! Text dump of a `GraphDef` for inspection and snapshot tests.
//!
//! One node per line:
//!
//! ```text
//! sum = Add(a, b:1, ^init) {T=int}
//! ```
//!
//! Scalar tensors print as their value, anything larger as `dtype[shape]`.

use std::fmt::Write;

use graphfold_core::{AttrValue, Colors, GraphDef, NodeDef, Tensor, TensorValues};

/// Printer for `GraphDef` with configurable output options.
pub struct GraphPrinter<'a> {
    graph: &'a GraphDef,
    colors: Colors,
}

impl<'a> GraphPrinter<'a> {
    pub fn new(graph: &'a GraphDef) -> Self {
        Self {
            graph,
            colors: Colors::OFF,
        }
    }

    pub fn with_colors(mut self, colors: Colors) -> Self {
        self.colors = colors;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    fn format(&self, w: &mut String) -> std::fmt::Result {
        for node in &self.graph.node {
            self.format_node(w, node)?;
            writeln!(w)?;
        }
        Ok(())
    }

    fn format_node(&self, w: &mut String, node: &NodeDef) -> std::fmt::Result {
        let c = self.colors;
        write!(w, "{}{}{} = {}(", c.name, node.name, c.reset, node.op)?;
        for (i, input) in node.input.iter().enumerate() {
            if i > 0 {
                w.push_str(", ");
            }
            w.push_str(input);
        }
        w.push(')');

        if node.attr.is_empty() {
            return Ok(());
        }
        write!(w, " {}{{", c.attrs)?;
        for (i, (key, value)) in node.attr.iter().enumerate() {
            if i > 0 {
                w.push_str(", ");
            }
            write!(w, "{key}=")?;
            self.format_attr(w, value)?;
        }
        write!(w, "}}{}", c.reset)
    }

    fn format_attr(&self, w: &mut String, value: &AttrValue) -> std::fmt::Result {
        let c = self.colors;
        match value {
            AttrValue::I(v) => w.write_str(&c.paint_literal(v)),
            AttrValue::F(v) => w.write_str(&c.paint_literal(v)),
            AttrValue::B(v) => w.write_str(&c.paint_literal(v)),
            AttrValue::S(v) => w.write_str(&c.paint_literal(v)),
            AttrValue::Type(t) => write!(w, "{t}"),
            AttrValue::Shape(dims) => write!(w, "{}", join(dims)),
            AttrValue::Tensor(t) => self.format_tensor(w, t),
            AttrValue::List(items) => {
                w.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        w.push_str(", ");
                    }
                    self.format_attr(w, item)?;
                }
                w.push(']');
                Ok(())
            }
        }
    }

    fn format_tensor(&self, w: &mut String, t: &Tensor) -> std::fmt::Result {
        let c = self.colors;
        if !t.is_scalar() || t.len() != 1 {
            return write!(w, "{}{}", t.dtype(), join(&t.shape));
        }
        match &t.values {
            TensorValues::Float(v) => w.write_str(&c.paint_literal(v[0])),
            TensorValues::Int(v) => w.write_str(&c.paint_literal(v[0])),
            TensorValues::Bool(v) => w.write_str(&c.paint_literal(v[0])),
        }
    }
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}
