use std::path::PathBuf;

use graphfold_lib::graph::import_graph_def;
use graphfold_lib::ops::StandardOps;

use super::fail;
use super::graph_loader::load_graph;

pub struct CheckArgs {
    pub graph_path: PathBuf,
    pub permissive: bool,
}

pub fn run(args: CheckArgs) {
    if let Err(msg) = execute(&args) {
        fail(msg);
    }

    // Silent on success (like cargo check)
}

pub(crate) fn execute(args: &CheckArgs) -> Result<(), String> {
    let graph = load_graph(&args.graph_path)?;
    let ops = if args.permissive {
        StandardOps::permissive()
    } else {
        StandardOps::new()
    };

    let imported = import_graph_def(&graph, &ops).map_err(|e| e.to_string())?;
    tracing::info!(nodes = imported.len(), "graph is valid");
    Ok(())
}
