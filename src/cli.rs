use clap::{CommandFactory, Parser};
use std::ffi::OsString;

#[derive(Parser, Debug)]
#[command(name = "rmplaysnippet")]
#[command(about = "Remove a code snippet from play.golang.org given its URL or ID")]
#[command(long_about = "Remove a code snippet from play.golang.org given its URL or ID.\n\n\
    Always connects to the production datastore, ignoring any local value of \
    DATASTORE_EMULATOR_HOST.")]
#[command(override_usage = "rmplaysnippet {http(s)://play.golang.org/p/<id> | <id>}")]
#[command(version, disable_version_flag = true)]
pub struct Cli {
    /// Snippet share URL or bare snippet ID
    #[arg(value_name = "URL|ID")]
    pub target: OsString,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// The one-line usage string, as clap prints it on argument errors.
pub fn usage() -> String {
    Cli::command().render_usage().to_string()
}
