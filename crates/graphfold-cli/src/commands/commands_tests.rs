use std::fs;
use std::path::{Path, PathBuf};

use graphfold_core::GraphDef;
use indoc::indoc;
use tempfile::TempDir;

use super::check::{self, CheckArgs};
use super::dump::{self, DumpArgs};
use super::fold::{self, FoldArgs};
use super::graph_loader::{load_graph, load_options};
use super::prune::{self, PruneArgs};

const MODEL: &str = indoc! {r#"
    {
      "node": [
        { "name": "x", "op": "Placeholder", "attr": { "dtype": { "type": "float" } } },
        { "name": "two", "op": "Const", "attr": {
            "dtype": { "type": "float" },
            "value": { "tensor": { "values": { "float": [2.0] } } } } },
        { "name": "three", "op": "Const", "attr": {
            "dtype": { "type": "float" },
            "value": { "tensor": { "values": { "float": [3.0] } } } } },
        { "name": "five", "op": "Add", "input": ["two", "three"] },
        { "name": "y", "op": "Mul", "input": ["x", "five"] },
        { "name": "dead", "op": "Neg", "input": ["x"] }
      ]
    }
"#};

fn write_model(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("model.json");
    fs::write(&path, MODEL).unwrap();
    path
}

fn fold_args(graph_path: PathBuf, output: &Path) -> FoldArgs {
    FoldArgs {
        graph_path,
        inputs: vec!["x".into()],
        outputs: vec!["y".into()],
        output: Some(output.to_path_buf()),
        binary: false,
        config: None,
        max_constant_elements: None,
        exclude_ops: Vec::new(),
        permissive: false,
    }
}

fn dump_file(path: PathBuf) -> String {
    dump::render(&DumpArgs {
        graph_path: path,
        color: false,
    })
    .unwrap()
}

#[test]
fn fold_writes_json() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.json");

    fold::execute(&fold_args(write_model(&dir), &out)).unwrap();

    insta::assert_snapshot!(dump_file(out), @r"
    five = Const() {dtype=float, value=5}
    y = Mul(x, five)
    x = Placeholder() {dtype=float}
    ");
}

#[test]
fn fold_writes_binary_that_loads_back() {
    let dir = TempDir::new().unwrap();
    let json_out = dir.path().join("out.json");
    let bin_out = dir.path().join("out.gfld");

    fold::execute(&fold_args(write_model(&dir), &json_out)).unwrap();
    let mut args = fold_args(write_model(&dir), &bin_out);
    args.binary = true;
    fold::execute(&args).unwrap();

    let bytes = fs::read(&bin_out).unwrap();
    assert_eq!(&bytes[..4], b"GFLD");
    assert_eq!(load_graph(&bin_out).unwrap(), load_graph(&json_out).unwrap());
}

#[test]
fn fold_honors_config_and_flags() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("fold.json");
    fs::write(&config, r#"{ "excluded_ops": ["Add"] }"#).unwrap();
    let out = dir.path().join("out.json");

    let mut args = fold_args(write_model(&dir), &out);
    args.config = Some(config);
    fold::execute(&args).unwrap();

    insta::assert_snapshot!(dump_file(out), @r"
    two = Const() {dtype=float, value=2}
    three = Const() {dtype=float, value=3}
    five = Add(two, three)
    y = Mul(x, five)
    x = Placeholder() {dtype=float}
    ");
}

#[test]
fn options_flags_override_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("fold.json");
    fs::write(
        &config,
        r#"{ "max_constant_elements": 10, "excluded_ops": ["Div"] }"#,
    )
    .unwrap();

    let options = load_options(Some(&config), Some(3), &["Mul".into(), "Div".into()]).unwrap();

    assert_eq!(options.max_constant_elements, 3);
    assert_eq!(options.excluded_ops, ["Div", "Mul"]);
}

#[test]
fn bad_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("fold.json");
    fs::write(&config, r#"{ "max_constant_elements": "many" }"#).unwrap();

    let err = load_options(Some(&config), None, &[]).unwrap_err();

    assert!(err.starts_with("invalid config '"), "{err}");
}

#[test]
fn fold_reports_pipeline_errors() {
    let dir = TempDir::new().unwrap();
    let mut args = fold_args(write_model(&dir), &dir.path().join("out.json"));
    args.outputs = vec!["missing_node".into()];

    let err = fold::execute(&args).unwrap_err();

    assert_eq!(err, "fetch node 'missing_node' not found in graph");
}

#[test]
fn prune_keeps_constants() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("pruned.json");

    prune::execute(&PruneArgs {
        graph_path: write_model(&dir),
        inputs: Vec::new(),
        outputs: vec!["y".into()],
        output: Some(out.clone()),
        binary: false,
    })
    .unwrap();

    insta::assert_snapshot!(dump_file(out), @r"
    x = Placeholder() {dtype=float}
    two = Const() {dtype=float, value=2}
    three = Const() {dtype=float, value=3}
    five = Add(two, three)
    y = Mul(x, five)
    ");
}

#[test]
fn prune_reports_missing_output() {
    let dir = TempDir::new().unwrap();

    let err = prune::execute(&PruneArgs {
        graph_path: write_model(&dir),
        inputs: Vec::new(),
        outputs: vec!["missing_node".into()],
        output: None,
        binary: false,
    })
    .unwrap_err();

    assert_eq!(
        err,
        "bad graph structure, no node named 'missing_node' found for input lookup"
    );
}

#[test]
fn check_accepts_valid_and_rejects_unknown_ops() {
    let dir = TempDir::new().unwrap();
    let model = write_model(&dir);
    check::execute(&CheckArgs {
        graph_path: model,
        permissive: false,
    })
    .unwrap();

    let custom = dir.path().join("custom.json");
    let graph = GraphDef::from_json(r#"{ "node": [ { "name": "c", "op": "Conv2D" } ] }"#).unwrap();
    fs::write(&custom, graph.to_json_pretty()).unwrap();

    let err = check::execute(&CheckArgs {
        graph_path: custom.clone(),
        permissive: false,
    })
    .unwrap_err();
    assert_eq!(err, "node 'c': unknown op 'Conv2D'");

    check::execute(&CheckArgs {
        graph_path: custom,
        permissive: true,
    })
    .unwrap();
}

#[test]
fn missing_and_malformed_files() {
    let dir = TempDir::new().unwrap();

    let err = load_graph(&dir.path().join("nope.json")).unwrap_err();
    assert!(err.starts_with("failed to read '"), "{err}");

    let garbage = dir.path().join("garbage.json");
    fs::write(&garbage, "{ not json").unwrap();
    let err = load_graph(&garbage).unwrap_err();
    assert!(err.starts_with("failed to parse '"), "{err}");
}
