use std::path::PathBuf;

use graphfold_core::Colors;
use graphfold_lib::GraphPrinter;

use super::fail;
use super::graph_loader::load_graph;

pub struct DumpArgs {
    pub graph_path: PathBuf,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    match render(&args) {
        Ok(text) => print!("{}", text),
        Err(msg) => fail(msg),
    }
}

pub(crate) fn render(args: &DumpArgs) -> Result<String, String> {
    let graph = load_graph(&args.graph_path)?;
    let colors = Colors::new(args.color);
    Ok(GraphPrinter::new(&graph).with_colors(colors).dump())
}
