//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Graph file, or `-` for stdin (positional).
pub fn graph_path_arg() -> Arg {
    Arg::new("graph_path")
        .value_name("GRAPH")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Graph file (JSON or binary), or - for stdin")
}

/// Fed node names (--inputs a,b).
pub fn inputs_arg() -> Arg {
    Arg::new("inputs")
        .long("inputs")
        .value_name("NAMES")
        .value_delimiter(',')
        .action(ArgAction::Append)
        .help("Comma-separated input node names")
}

/// Fetched node names (--outputs c).
pub fn outputs_arg() -> Arg {
    Arg::new("outputs")
        .long("outputs")
        .value_name("NAMES")
        .value_delimiter(',')
        .action(ArgAction::Append)
        .required(true)
        .help("Comma-separated output node names")
}

/// Write output to file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write output to file")
}

/// Emit the binary format instead of JSON (--binary).
pub fn binary_arg() -> Arg {
    Arg::new("binary")
        .long("binary")
        .action(ArgAction::SetTrue)
        .help("Write the binary graph format instead of JSON")
}

/// Fold options file (--config).
pub fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("JSON file with fold options")
}

/// Size limit for folded results (--max-constant-elements).
pub fn max_constant_elements_arg() -> Arg {
    Arg::new("max_constant_elements")
        .long("max-constant-elements")
        .value_name("N")
        .value_parser(value_parser!(usize))
        .help("Do not fold results with more elements than this")
}

/// Op never folded (--exclude-op, repeatable).
pub fn exclude_op_arg() -> Arg {
    Arg::new("exclude_op")
        .long("exclude-op")
        .value_name("OP")
        .action(ArgAction::Append)
        .help("Never fold nodes of this op (repeatable)")
}

/// Accept unknown ops (--permissive).
pub fn permissive_arg() -> Arg {
    Arg::new("permissive")
        .long("permissive")
        .action(ArgAction::SetTrue)
        .help("Accept unknown ops and leave them unfolded")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Log verbosity (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Verbosity level (-v for info, -vv for debug)")
}
