//! @dose
//! purpose: Registry of the tiktoken encodings tokcount understands and the table that
//!     maps model identifiers onto them. The vocabularies themselves come from tiktoken-rs;
//!     this module only decides which one a model uses.
//!
//! when-editing:
//!     - !Exact model names are checked before prefixes (gpt-4o must not fall into gpt-4)
//!     - !Prefix entries are ordered most specific first
//!     - New encodings need a name, a special-token list, a loader and a cell in load()
//!
//! invariants:
//!     - Every Encoding round-trips through name() and from_name()
//!     - load() builds each CoreBPE at most once per process
//!
//! gotchas:
//!     - gpt2 shares its vocabulary with r50k_base and maps onto it

use crate::error::{Error, Result};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tiktoken_rs::CoreBPE;

/// Model used when neither the command line nor tokcount.toml names one
pub const DEFAULT_MODEL: &str = "gpt-5";

const ENDOFTEXT: &str = "<|endoftext|>";
const FIM_PREFIX: &str = "<|fim_prefix|>";
const FIM_MIDDLE: &str = "<|fim_middle|>";
const FIM_SUFFIX: &str = "<|fim_suffix|>";
const ENDOFPROMPT: &str = "<|endofprompt|>";

/// A tiktoken byte-pair encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    O200kBase,
    Cl100kBase,
    P50kBase,
    P50kEdit,
    R50kBase,
}

const MODEL_TO_ENCODING: &[(&str, Encoding)] = &[
    // reasoning
    ("o1", Encoding::O200kBase),
    ("o3", Encoding::O200kBase),
    ("o4-mini", Encoding::O200kBase),
    // chat
    ("gpt-5", Encoding::O200kBase),
    ("gpt-4.1", Encoding::O200kBase),
    ("gpt-4o", Encoding::O200kBase),
    ("gpt-4", Encoding::Cl100kBase),
    ("gpt-3.5-turbo", Encoding::Cl100kBase),
    ("gpt-3.5", Encoding::Cl100kBase),
    ("gpt-35-turbo", Encoding::Cl100kBase),
    // base
    ("davinci-002", Encoding::Cl100kBase),
    ("babbage-002", Encoding::Cl100kBase),
    // embeddings
    ("text-embedding-ada-002", Encoding::Cl100kBase),
    ("text-embedding-3-small", Encoding::Cl100kBase),
    ("text-embedding-3-large", Encoding::Cl100kBase),
    // legacy completions
    ("text-davinci-003", Encoding::P50kBase),
    ("text-davinci-002", Encoding::P50kBase),
    ("text-davinci-001", Encoding::R50kBase),
    ("text-curie-001", Encoding::R50kBase),
    ("text-babbage-001", Encoding::R50kBase),
    ("text-ada-001", Encoding::R50kBase),
    ("davinci", Encoding::R50kBase),
    ("curie", Encoding::R50kBase),
    ("babbage", Encoding::R50kBase),
    ("ada", Encoding::R50kBase),
    // code
    ("code-davinci-002", Encoding::P50kBase),
    ("code-davinci-001", Encoding::P50kBase),
    ("code-cushman-002", Encoding::P50kBase),
    ("code-cushman-001", Encoding::P50kBase),
    ("davinci-codex", Encoding::P50kBase),
    ("cushman-codex", Encoding::P50kBase),
    // edit
    ("text-davinci-edit-001", Encoding::P50kEdit),
    ("code-davinci-edit-001", Encoding::P50kEdit),
    // open source
    ("gpt2", Encoding::R50kBase),
    ("gpt-2", Encoding::R50kBase),
];

const MODEL_PREFIX_TO_ENCODING: &[(&str, Encoding)] = &[
    ("o1-", Encoding::O200kBase),
    ("o3-", Encoding::O200kBase),
    ("o4-mini-", Encoding::O200kBase),
    ("gpt-5-", Encoding::O200kBase),
    ("gpt-4.5-", Encoding::O200kBase),
    ("gpt-4.1-", Encoding::O200kBase),
    ("chatgpt-4o-", Encoding::O200kBase),
    ("gpt-4o-", Encoding::O200kBase),
    ("gpt-oss-", Encoding::O200kBase),
    ("gpt-4-", Encoding::Cl100kBase),
    ("gpt-3.5-turbo-", Encoding::Cl100kBase),
    ("gpt-35-turbo-", Encoding::Cl100kBase),
    ("ft:gpt-4o", Encoding::O200kBase),
    ("ft:gpt-4", Encoding::Cl100kBase),
    ("ft:gpt-3.5-turbo", Encoding::Cl100kBase),
    ("ft:davinci-002", Encoding::Cl100kBase),
    ("ft:babbage-002", Encoding::Cl100kBase),
];

static O200K_BASE: OnceCell<CoreBPE> = OnceCell::new();
static CL100K_BASE: OnceCell<CoreBPE> = OnceCell::new();
static P50K_BASE: OnceCell<CoreBPE> = OnceCell::new();
static P50K_EDIT: OnceCell<CoreBPE> = OnceCell::new();
static R50K_BASE: OnceCell<CoreBPE> = OnceCell::new();

impl Encoding {
    pub const ALL: [Encoding; 5] = [
        Encoding::O200kBase,
        Encoding::Cl100kBase,
        Encoding::P50kBase,
        Encoding::P50kEdit,
        Encoding::R50kBase,
    ];

    /// Look up the encoding a model tokenizes with
    pub fn for_model(model: &str) -> Result<Self> {
        if let Some((_, encoding)) = MODEL_TO_ENCODING.iter().find(|(name, _)| *name == model) {
            return Ok(*encoding);
        }
        MODEL_PREFIX_TO_ENCODING
            .iter()
            .find(|(prefix, _)| model.starts_with(prefix))
            .map(|(_, encoding)| *encoding)
            .ok_or_else(|| Error::UnknownModel(model.to_string()))
    }

    /// Parse a canonical encoding name such as `o200k_base`
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|encoding| encoding.name() == name)
            .ok_or_else(|| Error::UnknownEncoding(name.to_string()))
    }

    pub fn name(self) -> &'static str {
        match self {
            Encoding::O200kBase => "o200k_base",
            Encoding::Cl100kBase => "cl100k_base",
            Encoding::P50kBase => "p50k_base",
            Encoding::P50kEdit => "p50k_edit",
            Encoding::R50kBase => "r50k_base",
        }
    }

    /// Special-token strings registered by this encoding
    pub fn special_tokens(self) -> &'static [&'static str] {
        match self {
            Encoding::O200kBase => &[ENDOFTEXT, ENDOFPROMPT],
            Encoding::Cl100kBase => &[ENDOFTEXT, FIM_PREFIX, FIM_MIDDLE, FIM_SUFFIX, ENDOFPROMPT],
            Encoding::P50kEdit => &[ENDOFTEXT, FIM_PREFIX, FIM_MIDDLE, FIM_SUFFIX],
            Encoding::P50kBase | Encoding::R50kBase => &[ENDOFTEXT],
        }
    }

    /// Build the tokenizer for this encoding, reusing it on later calls
    pub fn load(self) -> Result<&'static CoreBPE> {
        let (cell, loader): (&'static OnceCell<CoreBPE>, fn() -> anyhow::Result<CoreBPE>) =
            match self {
                Encoding::O200kBase => (&O200K_BASE, tiktoken_rs::o200k_base),
                Encoding::Cl100kBase => (&CL100K_BASE, tiktoken_rs::cl100k_base),
                Encoding::P50kBase => (&P50K_BASE, tiktoken_rs::p50k_base),
                Encoding::P50kEdit => (&P50K_EDIT, tiktoken_rs::p50k_edit),
                Encoding::R50kBase => (&R50K_BASE, tiktoken_rs::r50k_base),
            };

        cell.get_or_try_init(|| {
            tracing::debug!(encoding = self.name(), "loading tokenizer");
            loader().map_err(|e| Error::Tokenizer(format!("{}: {}", self.name(), e)))
        })
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}
