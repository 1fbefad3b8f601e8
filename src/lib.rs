//! # Dictionary Generator
//!
//! Wordlist transformation for password research.
//!
//! ## Features
//!
//! - **Extraction**: keep words by exact length or min/max bounds, dropping any
//!   word that contains a blacklisted character
//! - **Padding**: fill words up to a target length with each character of a charset
//! - **Combinations**: every case permutation of a word, optionally with leetspeak
//!   substitutions
//! - **Charset placeholders**: `?l ?u ?d ?h ?H ?s ?a` mixed freely with literal characters
//! - **Encoding detection**: Latin-1 and UTF-16 wordlists are decoded transparently
//!
//! ## Usage
//!
//! ```bash
//! # Words of exactly 8 characters without digits
//! dictionary-generator extractWords -f wordlist.txt -e 8 -c "?d"
//!
//! # Pad to 10 characters with digits
//! dictionary-generator generateDictionary -f wordlist.txt -l 10 -c "?d"
//!
//! # Case and leetspeak variants
//! dictionary-generator generateCombinatory -f wordlist.txt --extended
//! ```
//!
//! ## Example
//!
//! ```rust
//! use dictionary_generator::charset::resolve;
//! use dictionary_generator::combinator::expand;
//! use dictionary_generator::padder::PaddingSpec;
//!
//! assert_eq!(resolve("?l?d").len(), 36);
//!
//! let spec = PaddingSpec::from_tokens(5, "xy", false).unwrap();
//! assert_eq!(spec.pad("abc"), vec!["abcxx", "abcyy"]);
//!
//! assert_eq!(expand("ab", false).len(), 4);
//! ```

pub mod charset;
pub mod cli;
pub mod combinator;
pub mod dedup;
pub mod encoding;
pub mod error;
pub mod filter;
pub mod output;
pub mod padder;
pub mod processor;
pub mod progress;

pub use cli::Args;
pub use error::GeneratorError;
pub use processor::{Job, Processor, ProcessorConfig};
