//! Word filtering module
//!
//! Decides per-word inclusion based on length bounds and a character blacklist.

use crate::charset::{self, CharacterSet};
use crate::error::{GeneratorError, Result};

/// Length constraint applied to each word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthCriterion {
    /// All lengths pass
    #[default]
    Any,
    /// Length must equal the value
    Exact(usize),
    /// Length must fall within the optional inclusive bounds
    Range { min: Option<usize>, max: Option<usize> },
}

impl LengthCriterion {
    /// Build a criterion from the command-line options
    ///
    /// `exact` takes precedence over the min/max bounds.
    pub fn from_options(exact: Option<usize>, min: Option<usize>, max: Option<usize>) -> Result<Self> {
        if let Some(length) = exact {
            return Ok(Self::Exact(length));
        }

        match (min, max) {
            (None, None) => Ok(Self::Any),
            (Some(min), Some(max)) if min > max => {
                Err(GeneratorError::InvalidLengthRange { min, max })
            }
            (min, max) => Ok(Self::Range { min, max }),
        }
    }

    #[inline]
    pub fn matches(&self, length: usize) -> bool {
        match *self {
            Self::Any => true,
            Self::Exact(exact) => length == exact,
            Self::Range { min, max } => {
                min.map_or(true, |min| length >= min) && max.map_or(true, |max| length <= max)
            }
        }
    }
}

/// Filter criteria for word extraction
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub length: LengthCriterion,
    /// Characters that disqualify a word; empty excludes nothing
    pub blacklist: CharacterSet,
}

impl FilterCriteria {
    pub fn new(length: LengthCriterion, blacklist: CharacterSet) -> Self {
        Self { length, blacklist }
    }

    /// Build criteria from a blacklist token string such as `?d?s`
    pub fn with_blacklist_tokens(length: LengthCriterion, tokens: &str) -> Self {
        Self::new(length, charset::resolve(tokens))
    }

    /// Check if a word passes every configured criterion
    #[inline]
    pub fn passes(&self, word: &str) -> bool {
        let word_len = if word.is_ascii() {
            word.len()
        } else {
            word.chars().count()
        };

        self.length.matches(word_len) && !self.blacklist.intersects(word)
    }

    /// True when nothing is filtered out
    pub fn is_identity(&self) -> bool {
        self.length == LengthCriterion::Any && self.blacklist.is_empty()
    }
}
