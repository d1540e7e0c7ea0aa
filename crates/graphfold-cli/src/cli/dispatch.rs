//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs that mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors
//! - `Into<*Args>` impls to bridge dispatch → command handlers

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::fold::FoldArgs;
use crate::commands::prune::PruneArgs;

pub struct FoldParams {
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

impl FoldParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            graph_path: graph_path(m),
            inputs: names(m, "inputs"),
            outputs: names(m, "outputs"),
            output: m.get_one::<PathBuf>("output").cloned(),
            binary: m.get_flag("binary"),
            config: m.get_one::<PathBuf>("config").cloned(),
            max_constant_elements: m.get_one::<usize>("max_constant_elements").copied(),
            exclude_ops: names(m, "exclude_op"),
            permissive: m.get_flag("permissive"),
        }
    }
}

impl From<FoldParams> for FoldArgs {
    fn from(p: FoldParams) -> Self {
        Self {
            graph_path: p.graph_path,
            inputs: p.inputs,
            outputs: p.outputs,
            output: p.output,
            binary: p.binary,
            config: p.config,
            max_constant_elements: p.max_constant_elements,
            exclude_ops: p.exclude_ops,
            permissive: p.permissive,
        }
    }
}

pub struct PruneParams {
    pub graph_path: PathBuf,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub output: Option<PathBuf>,
    pub binary: bool,
}

impl PruneParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            graph_path: graph_path(m),
            inputs: names(m, "inputs"),
            outputs: names(m, "outputs"),
            output: m.get_one::<PathBuf>("output").cloned(),
            binary: m.get_flag("binary"),
        }
    }
}

impl From<PruneParams> for PruneArgs {
    fn from(p: PruneParams) -> Self {
        Self {
            graph_path: p.graph_path,
            inputs: p.inputs,
            outputs: p.outputs,
            output: p.output,
            binary: p.binary,
        }
    }
}

pub struct CheckParams {
    pub graph_path: PathBuf,
    pub permissive: bool,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            graph_path: graph_path(m),
            permissive: m.get_flag("permissive"),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            graph_path: p.graph_path,
            permissive: p.permissive,
        }
    }
}

pub struct DumpParams {
    pub graph_path: PathBuf,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            graph_path: graph_path(m),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            graph_path: p.graph_path,
            color: p.color.should_colorize(),
        }
    }
}

fn graph_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("graph_path")
        .cloned()
        .expect("clap enforces the required GRAPH argument")
}

/// Values of a delimited or repeated arg, empty names dropped.
fn names(m: &ArgMatches, id: &str) -> Vec<String> {
    m.get_many::<String>(id)
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
