pub mod check;
pub mod dump;
pub mod fold;
pub mod graph_loader;
pub mod prune;

#[cfg(test)]
mod commands_tests;

/// Print `error: <msg>` and exit with status 1.
pub fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("error: {}", msg);
    std::process::exit(1);
}
