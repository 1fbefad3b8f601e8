//! Word padding
//!
//! Fills each word up to a target length with one charset character
//! repeated, producing one variant per charset character.

use crate::charset::{self, CharacterSet};
use crate::error::{GeneratorError, Result};

/// Validated padding configuration
#[derive(Debug, Clone)]
pub struct PaddingSpec {
    target_length: usize,
    charset: CharacterSet,
    prepend: bool,
}

impl PaddingSpec {
    /// Create a padding spec, rejecting a zero target length or an empty charset
    pub fn new(target_length: usize, charset: CharacterSet, prepend: bool) -> Result<Self> {
        if target_length == 0 {
            return Err(GeneratorError::InvalidTargetLength(target_length));
        }
        if charset.is_empty() {
            return Err(GeneratorError::EmptyCharset(charset.to_string()));
        }

        Ok(Self {
            target_length,
            charset,
            prepend,
        })
    }

    /// Create a padding spec from a charset token string such as `?d!`
    pub fn from_tokens(target_length: usize, tokens: &str, prepend: bool) -> Result<Self> {
        Self::new(target_length, charset::resolve(tokens), prepend).map_err(|err| match err {
            GeneratorError::EmptyCharset(_) => GeneratorError::EmptyCharset(tokens.to_string()),
            other => other,
        })
    }

    pub fn target_length(&self) -> usize {
        self.target_length
    }

    pub fn charset(&self) -> &CharacterSet {
        &self.charset
    }

    pub fn prepend(&self) -> bool {
        self.prepend
    }

    /// Pad a word, returning one variant per charset character
    ///
    /// Words already at or over the target length produce nothing.
    pub fn pad(&self, word: &str) -> Vec<String> {
        let word_len = word.chars().count();
        if word_len >= self.target_length {
            return Vec::new();
        }

        let fill = self.target_length - word_len;
        self.charset
            .iter()
            .map(|c| {
                let padding: String = std::iter::repeat(c).take(fill).collect();
                let mut padded = String::with_capacity(word.len() + padding.len());
                if self.prepend {
                    padded.push_str(&padding);
                    padded.push_str(word);
                } else {
                    padded.push_str(word);
                    padded.push_str(&padding);
                }
                padded
            })
            .collect()
    }
}

/// Convenience wrapper around [`PaddingSpec::pad`]
pub fn pad(word: &str, spec: &PaddingSpec) -> Vec<String> {
    spec.pad(word)
}
