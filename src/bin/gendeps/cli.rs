//! CLI definitions using clap.
//!
//! `gendeps` takes no arguments. Help and version flags are handled here
//! rather than by clap so that usage always goes to stderr.

use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

/// Generate the Julia definitions of the TAO bindings on stdout
#[derive(Debug, Parser)]
#[command(name = "gendeps")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Print usage and exit
    #[arg(short, long)]
    pub help: bool,
}

/// Parse the command line.
///
/// At most one argument is accepted. A lone `--` is rejected as well, since
/// clap would otherwise take it as the end of options.
pub fn parse_from<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.len() > 2 || args.get(1).is_some_and(|arg| arg == "--") {
        let extra: Vec<_> = args[1..].iter().map(|arg| arg.to_string_lossy()).collect();
        return Err(Cli::command().error(
            ErrorKind::UnknownArgument,
            format!("unexpected argument '{}'", extra.join(" ")),
        ));
    }
    Cli::try_parse_from(args)
}

/// One-line usage message.
pub fn usage(program: &str) -> String {
    format!("Usage: {} [--help|-h]", program)
}
