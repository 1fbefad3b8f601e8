//! Charset resolution
//!
//! Expands token strings such as `?l?d!` into a concrete, ordered set of
//! characters. Symbolic placeholders are a `?` followed by one of
//! `l u d h H s a`; anything else is taken literally.

use ahash::RandomState;
use hashbrown::HashSet;
use std::fmt;

/// Lowercase letters
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
/// Uppercase letters
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// Digits
pub const DIGITS: &str = "0123456789";
/// Hexadecimal (lowercase)
pub const HEX_LOWER: &str = "0123456789abcdef";
/// Hexadecimal (uppercase)
pub const HEX_UPPER: &str = "0123456789ABCDEF";
/// Special characters
pub const SPECIAL: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";
/// Accented letters
pub const ACCENTED: &str = "áéíóúÁÉÍÓÚñÑüÜ";

/// Predefined placeholder table, keyed by the letter following `?`
pub const PREDEFINED: &[(char, &str)] = &[
    ('l', LOWERCASE),
    ('u', UPPERCASE),
    ('d', DIGITS),
    ('h', HEX_LOWER),
    ('H', HEX_UPPER),
    ('s', SPECIAL),
    ('a', ACCENTED),
];

/// Look up the literal sequence for a placeholder symbol
#[inline]
pub fn predefined(symbol: char) -> Option<&'static str> {
    PREDEFINED
        .iter()
        .find(|(s, _)| *s == symbol)
        .map(|(_, chars)| *chars)
}

/// An ordered, duplicate-free set of characters
///
/// Iteration order is first-seen order, which matters when the set is used
/// as a padding charset. Membership checks are hashed.
#[derive(Clone, Default)]
pub struct CharacterSet {
    chars: Vec<char>,
    index: HashSet<char, RandomState>,
}

impl CharacterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a character, returning false if it was already present
    pub fn insert(&mut self, c: char) -> bool {
        if self.index.insert(c) {
            self.chars.push(c);
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn contains(&self, c: char) -> bool {
        self.index.contains(&c)
    }

    /// True if any character of `word` is in the set
    #[inline]
    pub fn intersects(&self, word: &str) -> bool {
        !self.is_empty() && word.chars().any(|c| self.contains(c))
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }
}

impl FromIterator<char> for CharacterSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut set = Self::new();
        for c in iter {
            set.insert(c);
        }
        set
    }
}

impl PartialEq for CharacterSet {
    fn eq(&self, other: &Self) -> bool {
        self.chars == other.chars
    }
}

impl Eq for CharacterSet {}

impl fmt::Debug for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CharacterSet({:?})", self.to_string())
    }
}

impl fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// Resolve a token string into a character set
///
/// Scans left to right. A recognized `?X` placeholder expands to its
/// predefined sequence; an unrecognized one leaves both `?` and `X` as
/// literals. Never fails: an empty input yields an empty set.
pub fn resolve(tokens: &str) -> CharacterSet {
    let mut set = CharacterSet::new();
    let mut chars = tokens.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '?' {
            if let Some(expansion) = chars.peek().and_then(|&next| predefined(next)) {
                chars.next();
                expansion.chars().for_each(|ch| {
                    set.insert(ch);
                });
                continue;
            }
        }
        set.insert(c);
    }

    set
}
