//! @dose
//! purpose: This module defines the command-line interface for tokcount using the clap derive
//!     macros. One positional file path plus optional flags that override tokcount.toml.
//!
//! when-editing:
//!     - !The path is optional at the clap level so a missing path prints our usage line
//!       and exits 1 instead of clap's usage error
//!     - Flags left unset are None/false so config values can fill them in
//!
//! invariants:
//!     - PathBuf is used for the file argument to ensure proper path handling
//!
//! gotchas:
//!     - --encoding wins over --model when both are given
//!     - --allow-special and --no-allow-special override each other; the last one wins

use clap::Parser;
use std::path::PathBuf;

pub const USAGE: &str = "Usage: tokcount <filepath>";

#[derive(Parser, Debug)]
#[command(name = "tokcount")]
#[command(author, version, about = "Count the tokens a model would see for a file")]
pub struct Cli {
    /// File whose contents are tokenized
    #[arg(value_name = "FILEPATH")]
    pub path: Option<PathBuf>,

    /// Model whose encoding is used (defaults to gpt-5)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Encoding to use directly, e.g. o200k_base or cl100k_base
    #[arg(short, long)]
    pub encoding: Option<String>,

    /// Count special tokens such as <|endoftext|> instead of rejecting them
    #[arg(long, overrides_with = "no_allow_special")]
    pub allow_special: bool,

    /// Reject special tokens even if tokcount.toml allows them
    #[arg(long, overrides_with = "allow_special")]
    pub no_allow_special: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long)]
    pub verbose: bool,
}
