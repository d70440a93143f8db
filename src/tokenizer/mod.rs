//! @dose
//! purpose: Token counting on top of tiktoken-rs. A TokenCounter pairs an encoding with a
//!     special-token policy and returns how many tokens a text produces.
//!
//! when-editing:
//!     - !By default text containing a special-token string is rejected, matching tiktoken
//!     - With allow_special, special-token strings count as one token each
//!
//! invariants:
//!     - count("") == 0 for every encoding
//!     - Counting is deterministic for a given encoding and text
//!
//! gotchas:
//!     - Empty text short-circuits before the encoding is loaded

mod encoding;

pub use encoding::{Encoding, DEFAULT_MODEL};

use crate::error::{Error, Result};

/// Counts tokens for one encoding
#[derive(Debug, Clone, Copy)]
pub struct TokenCounter {
    encoding: Encoding,
    allow_special: bool,
}

impl TokenCounter {
    pub fn new(encoding: Encoding) -> Self {
        Self {
            encoding,
            allow_special: false,
        }
    }

    /// Counter for the encoding `model` tokenizes with
    pub fn for_model(model: &str) -> Result<Self> {
        Encoding::for_model(model).map(Self::new)
    }

    /// Treat special-token strings as special tokens instead of rejecting them
    pub fn allow_special(mut self, allow: bool) -> Self {
        self.allow_special = allow;
        self
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn count(&self, text: &str) -> Result<usize> {
        if text.is_empty() {
            return Ok(0);
        }

        let bpe = self.encoding.load()?;
        let tokens = if self.allow_special {
            bpe.encode_with_special_tokens(text).len()
        } else {
            if let Some(token) = first_special_token(text, self.encoding.special_tokens()) {
                return Err(Error::DisallowedSpecial {
                    token: token.to_string(),
                });
            }
            bpe.encode_ordinary(text).len()
        };

        tracing::debug!(encoding = %self.encoding, tokens, "counted tokens");
        Ok(tokens)
    }
}

/// Count tokens in `text` the way the default model does.
pub fn count_tokens(text: &str) -> Result<usize> {
    TokenCounter::for_model(DEFAULT_MODEL)?.count(text)
}

/// The special token that appears earliest in `text`, if any
fn first_special_token<'a>(text: &str, specials: &[&'a str]) -> Option<&'a str> {
    specials
        .iter()
        .filter_map(|token| text.find(token).map(|at| (at, *token)))
        .min_by_key(|(at, _)| *at)
        .map(|(_, token)| token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_tokens_empty() {
        assert_eq!(count_tokens("").unwrap(), 0);
        for encoding in Encoding::ALL {
            assert_eq!(TokenCounter::new(encoding).count("").unwrap(), 0);
        }
    }

    #[test]
    fn test_count_tokens_hello_world() {
        assert_eq!(count_tokens("hello world").unwrap(), 2);
    }

    #[test]
    fn test_count_tokens_punctuation() {
        // "Hello" "," " world" "!"
        assert_eq!(count_tokens("Hello, world!").unwrap(), 4);
    }

    #[test]
    fn test_count_tokens_deterministic() {
        let text = "fn main() {\n    println!(\"Hello, world!\");\n}\n";
        let first = count_tokens(text).unwrap();
        for _ in 0..3 {
            assert_eq!(count_tokens(text).unwrap(), first);
        }
    }

    #[test]
    fn test_concatenation_does_not_shrink() {
        let a = "The quick brown fox ";
        let b = "jumps over the lazy dog.";
        let joined = format!("{a}{b}");
        let whole = count_tokens(&joined).unwrap();
        assert!(whole >= count_tokens(a).unwrap());
        assert!(whole >= count_tokens(b).unwrap());
    }

    #[test]
    fn test_count_unicode() {
        let tokens = count_tokens("Hello 世界 🌍").unwrap();
        assert!(tokens > 0);
    }

    #[test]
    fn test_disallowed_special_rejected() {
        let err = count_tokens("before <|endoftext|> after").unwrap_err();
        assert!(matches!(err, Error::DisallowedSpecial { ref token } if token == "<|endoftext|>"));
    }

    #[test]
    fn test_allowed_special_counts_once() {
        let counter = TokenCounter::new(Encoding::O200kBase).allow_special(true);
        assert_eq!(counter.count("<|endoftext|>").unwrap(), 1);
    }

    #[test]
    fn test_special_tokens_are_per_encoding() {
        // fim tokens are not registered by o200k_base, so they are ordinary text there
        let o200k = TokenCounter::new(Encoding::O200kBase);
        assert!(o200k.count("<|fim_prefix|>").unwrap() > 1);

        let cl100k = TokenCounter::new(Encoding::Cl100kBase);
        assert!(matches!(
            cl100k.count("<|fim_prefix|>"),
            Err(Error::DisallowedSpecial { .. })
        ));
    }

    #[test]
    fn test_first_special_token_picks_earliest() {
        let specials = Encoding::Cl100kBase.special_tokens();
        let text = "x <|fim_suffix|> y <|endoftext|>";
        assert_eq!(first_special_token(text, specials), Some("<|fim_suffix|>"));
        assert_eq!(first_special_token("plain", specials), None);
    }

    #[test]
    fn test_for_model_unknown() {
        assert!(matches!(
            TokenCounter::for_model("not-a-model"),
            Err(Error::UnknownModel(_))
        ));
    }
}
