//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI parser for `compdb-link`.
#[derive(Debug, Parser)]
#[command(
    name = "compdb-link",
    version,
    about = "Link compile_commands.json files from a catkin workspace's build tree into its src tree",
    long_about = "Link compile_commands.json files from the \"build\" directory of a catkin \
                  workspace into the matching packages of its \"src\" directory.\n\n\
                  The workspace must be configured to export compile commands: \
                  `catkin config --cmake-args -DCMAKE_EXPORT_COMPILE_COMMANDS=1`"
)]
pub struct Cli {
    /// Path to the catkin workspace (defaults to the current directory).
    #[arg(short, long, value_name = "PATH", env = "COMPDB_LINK_PATH")]
    pub path: Option<PathBuf>,
}
