//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("graphfold")
        .about("Constant folding and dead node elimination for computation graphs")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(fold_command())
        .subcommand(prune_command())
        .subcommand(check_command())
        .subcommand(dump_command())
}

/// Fold constants and prune.
pub fn fold_command() -> Command {
    Command::new("fold")
        .about("Fold constant subgraphs and drop unused nodes")
        .override_usage(
            "\
  graphfold fold <GRAPH> --outputs <NAMES> [--inputs <NAMES>]
  graphfold fold - --outputs <NAMES> -o <FILE>",
        )
        .after_help(
            r#"EXAMPLES:
  graphfold fold model.json --outputs logits                # fold everything
  graphfold fold model.json --inputs x --outputs y -o out.json
  graphfold fold model.json --outputs y --binary -o out.gfld
  graphfold fold model.json --outputs y --exclude-op Div    # keep divisions
  cat model.json | graphfold fold - --outputs y             # from stdin"#,
        )
        .arg(graph_path_arg())
        .arg(inputs_arg())
        .arg(outputs_arg())
        .arg(output_file_arg())
        .arg(binary_arg())
        .arg(config_arg())
        .arg(max_constant_elements_arg())
        .arg(exclude_op_arg())
        .arg(permissive_arg())
}

/// Dead node elimination only.
pub fn prune_command() -> Command {
    Command::new("prune")
        .about("Drop nodes the outputs do not depend on")
        .after_help(
            r#"EXAMPLES:
  graphfold prune model.json --outputs y
  graphfold prune model.json --inputs x --outputs y -o pruned.json"#,
        )
        .arg(graph_path_arg())
        .arg(inputs_arg())
        .arg(outputs_arg())
        .arg(output_file_arg())
        .arg(binary_arg())
}

/// Validate a graph.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Validate a graph")
        .after_help(
            r#"EXAMPLES:
  graphfold check model.json                # known ops only
  graphfold check model.json --permissive   # accept unknown ops"#,
        )
        .arg(graph_path_arg())
        .arg(permissive_arg())
}

/// Show a graph as text.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Print a graph, one node per line")
        .after_help(
            r#"EXAMPLES:
  graphfold dump model.json
  graphfold dump out.gfld --color always | less -R"#,
        )
        .arg(graph_path_arg())
        .arg(color_arg())
}
