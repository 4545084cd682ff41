// CLI module
// Command-line interface and argument parsing

mod args;

pub use args::{CliArgs, LayoutArg};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// On invalid arguments (including a missing or extra INPUT) clap prints the
/// usage message and exits with a non-zero status.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
