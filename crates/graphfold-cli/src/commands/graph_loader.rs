use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use graphfold_core::GraphDef;
use graphfold_lib::FoldOptions;

/// Read a graph from a file, or from stdin when `path` is `-`.
///
/// The format is sniffed: binary when the magic matches, JSON otherwise.
pub fn load_graph(path: &Path) -> Result<GraphDef, String> {
    let (bytes, origin) = if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .map_err(|e| format!("failed to read stdin: {}", e))?;
        (buf, "<stdin>".to_string())
    } else {
        let bytes =
            fs::read(path).map_err(|e| format!("failed to read '{}': {}", path.display(), e))?;
        (bytes, path.display().to_string())
    };

    GraphDef::from_bytes(&bytes).map_err(|e| format!("failed to parse '{}': {}", origin, e))
}

/// Write a graph to `output`, or to stdout.
pub fn write_graph(graph: &GraphDef, output: Option<&Path>, binary: bool) -> Result<(), String> {
    let bytes = if binary {
        graph
            .to_binary()
            .map_err(|e| format!("failed to encode graph: {}", e))?
    } else {
        let mut json = graph.to_json_pretty();
        json.push('\n');
        json.into_bytes()
    };

    match output {
        Some(path) => fs::write(path, &bytes)
            .map_err(|e| format!("failed to write '{}': {}", path.display(), e)),
        None => io::stdout()
            .lock()
            .write_all(&bytes)
            .map_err(|e| format!("failed to write stdout: {}", e)),
    }
}

/// Fold options from an optional JSON file, with flag overrides applied on top.
pub fn load_options(
    config: Option<&Path>,
    max_constant_elements: Option<usize>,
    exclude_ops: &[String],
) -> Result<FoldOptions, String> {
    let mut options = match config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("failed to read '{}': {}", path.display(), e))?;
            serde_json::from_str(&text)
                .map_err(|e| format!("invalid config '{}': {}", path.display(), e))?
        }
        None => FoldOptions::default(),
    };

    if let Some(max) = max_constant_elements {
        options.max_constant_elements = max;
    }
    for op in exclude_ops {
        if !options.is_excluded(op) {
            options.excluded_ops.push(op.clone());
        }
    }
    Ok(options)
}
