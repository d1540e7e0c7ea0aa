use std::path::PathBuf;

use graphfold_lib::FoldPipeline;
use graphfold_lib::ops::StandardOps;
use graphfold_lib::transforms::ConstantFolder;

use super::fail;
use super::graph_loader::{load_graph, load_options, write_graph};

pub struct FoldArgs {
    pub graph_path: PathBuf,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub output: Option<PathBuf>,
    pub binary: bool,
    pub config: Option<PathBuf>,
    pub max_constant_elements: Option<usize>,
    pub exclude_ops: Vec<String>,
    pub permissive: bool,
}

pub fn run(args: FoldArgs) {
    if let Err(msg) = execute(&args) {
        fail(msg);
    }
}

pub(crate) fn execute(args: &FoldArgs) -> Result<(), String> {
    let graph = load_graph(&args.graph_path)?;
    let options = load_options(
        args.config.as_deref(),
        args.max_constant_elements,
        &args.exclude_ops,
    )?;

    let ops = if args.permissive {
        StandardOps::permissive()
    } else {
        StandardOps::new()
    };
    let pipeline = FoldPipeline::new()
        .with_ops(ops)
        .with_evaluator(ConstantFolder::new(options));

    let inputs: Vec<&str> = args.inputs.iter().map(String::as_str).collect();
    let outputs: Vec<&str> = args.outputs.iter().map(String::as_str).collect();
    let folded = pipeline
        .run(&graph, &inputs, &outputs)
        .map_err(|e| e.to_string())?;

    write_graph(&folded, args.output.as_deref(), args.binary)
}
