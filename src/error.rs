//! @dose
//! purpose: Error type shared by the reader, the model registry and the token counter.
//!     The binary matches on NotFound to pick its message; every other variant is
//!     reported through its Display impl.
//!
//! when-editing:
//!     - !NotFound must stay distinct from Io so the CLI can report missing files separately
//!     - Keep Display messages single-line; the CLI prints them as one line of output
//!
//! invariants:
//!     - Every fallible library function returns crate::Result

use std::path::PathBuf;
use std::string::FromUtf8Error;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("File not found at '{}'", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{}' is not valid UTF-8: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },

    #[error("no encoding is known for model '{0}'")]
    UnknownModel(String),

    #[error("unknown encoding '{0}'")]
    UnknownEncoding(String),

    #[error("encountered text corresponding to disallowed special token '{token}'")]
    DisallowedSpecial { token: String },

    #[error("failed to load tokenizer: {0}")]
    Tokenizer(String),
}
