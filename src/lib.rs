//! @dose
//! purpose: This is the library crate root for tokcount, exposing the reader, the token
//!     counter and the count command for use as both a CLI tool and a library.
//!
//! when-editing:
//!     - !All public modules must be declared here with pub mod
//!     - Keep the re-export list organized by module
//!
//! gotchas:
//!     - The lib.rs is separate from main.rs - library consumers get lib, CLI gets main

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod reader;
pub mod tokenizer;

// Re-export main types for convenience
pub use cli::Cli;
pub use commands::{run_count, CountOptions, TokenReport};
pub use config::Config;
pub use error::{Error, Result};
pub use reader::read_file;
pub use tokenizer::{count_tokens, Encoding, TokenCounter, DEFAULT_MODEL};
