use std::path::PathBuf;

use graphfold_lib::remove_unused_nodes;

use super::fail;
use super::graph_loader::{load_graph, write_graph};

pub struct PruneArgs {
    pub graph_path: PathBuf,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub output: Option<PathBuf>,
    pub binary: bool,
}

pub fn run(args: PruneArgs) {
    if let Err(msg) = execute(&args) {
        fail(msg);
    }
}

pub(crate) fn execute(args: &PruneArgs) -> Result<(), String> {
    let graph = load_graph(&args.graph_path)?;

    let inputs: Vec<&str> = args.inputs.iter().map(String::as_str).collect();
    let outputs: Vec<&str> = args.outputs.iter().map(String::as_str).collect();
    let pruned = remove_unused_nodes(&graph, &inputs, &outputs).map_err(|e| e.to_string())?;

    write_graph(&pruned, args.output.as_deref(), args.binary)
}
