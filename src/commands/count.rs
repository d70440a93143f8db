//! @dose
//! purpose: This module implements the count command: read a file, pick the encoding from
//!     the flags and tokcount.toml, count the tokens and build a report for printing.
//!
//! when-editing:
//!     - !The file is read before the encoding is resolved, so a missing file is reported
//!       even when the model name is also bad
//!     - !Precedence is flag > tokcount.toml > built-in default
//!     - !--model on the command line also shadows an encoding set in tokcount.toml
//!
//! invariants:
//!     - The report path is the path exactly as the user passed it
//!     - The text report is always two lines: the file, then the token count
//!
//! flows:
//!     - Resolve: merge Cli and Config into CountOptions
//!     - Count: read_file -> TokenCounter::count -> TokenReport

use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use crate::reader::read_file;
use crate::tokenizer::{Encoding, TokenCounter, DEFAULT_MODEL};
use serde::Serialize;
use std::path::Path;

/// Settings for a single count, after merging flags with the config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountOptions {
    pub model: String,
    pub encoding: Option<String>,
    pub allow_special: bool,
}

impl Default for CountOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            encoding: None,
            allow_special: false,
        }
    }
}

impl CountOptions {
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        let defaults = Self::default();
        Self {
            model: cli
                .model
                .clone()
                .or_else(|| config.model.clone())
                .unwrap_or(defaults.model),
            // a model named on the command line outranks an encoding from the config file
            encoding: cli.encoding.clone().or_else(|| match cli.model {
                Some(_) => None,
                None => config.encoding.clone(),
            }),
            allow_special: if cli.no_allow_special {
                false
            } else {
                cli.allow_special || config.allow_special.unwrap_or(defaults.allow_special)
            },
        }
    }

    /// Build the counter these options describe
    pub fn counter(&self) -> Result<TokenCounter> {
        let encoding = match &self.encoding {
            Some(name) => Encoding::from_name(name)?,
            None => Encoding::for_model(&self.model)?,
        };
        Ok(TokenCounter::new(encoding).allow_special(self.allow_special))
    }
}

/// Outcome of counting one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenReport {
    pub path: String,
    pub model: Option<String>,
    pub encoding: Encoding,
    pub tokens: usize,
}

impl TokenReport {
    pub fn render_text(&self) -> String {
        format!("File: {}\nNumber of tokens: {}", self.path, self.tokens)
    }

    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn run_count(path: &Path, options: &CountOptions) -> Result<TokenReport> {
    let text = read_file(path)?;
    let counter = options.counter()?;
    let tokens = counter.count(&text)?;

    Ok(TokenReport {
        path: path.display().to_string(),
        model: match options.encoding {
            Some(_) => None,
            None => Some(options.model.clone()),
        },
        encoding: counter.encoding(),
        tokens,
    })
}
