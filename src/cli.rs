//! Command-line interface definition for dictionary-generator
//!
//! One subcommand per pipeline, plus global options shared by all three.

use crate::encoding::encoding_for_label;
use crate::error::GeneratorError;
use crate::output::DEFAULT_BUFFER_SIZE;
use clap::{Parser, Subcommand};
use encoding_rs::Encoding;
use std::path::{Path, PathBuf};

/// Wordlist transformer for password research
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dictionary-generator",
    version,
    about = "Filter, pad and case-expand wordlists",
    long_about = r#"
Transform wordlists (one word per line) for password research:

  extractWords         keep words matching length bounds and free of blacklisted characters
  generateDictionary   pad words up to a target length with each character of a charset
  generateCombinatory  expand words into every case permutation and leetspeak variant

EXAMPLES:
    # Words of exactly 8 characters without digits or specials
    dictionary-generator extractWords -f rockyou.txt -e 8 -c "?d?s"

    # Pad every word to 10 characters with digits, in front
    dictionary-generator generateDictionary -f names.txt -l 10 -c "?d" --prepend

    # All case and substitution variants
    dictionary-generator generateCombinatory -f base.txt --extended
"#
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Append to the output file instead of overwriting it
    #[arg(long, global = true, default_value_t = false)]
    pub append: bool,

    /// Input encoding label, e.g. latin1 or utf-16le (default: auto-detect)
    #[arg(long, global = true, value_name = "LABEL")]
    pub encoding: Option<String>,

    /// Buffer size for the output file (default: 8MB)
    #[arg(long, global = true, value_name = "SIZE")]
    pub buffer_size: Option<String>,
}

/// Available pipelines
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Extract words from a dictionary file
    #[command(
        name = "extractWords",
        alias = "extract-words",
        long_about = r##"Extract words from a dictionary file, filtering on length and a character blacklist.

Blacklist placeholders:
  ?l  Lowercase letters (abcdefghijklmnopqrstuvwxyz)
  ?u  Uppercase letters (ABCDEFGHIJKLMNOPQRSTUVWXYZ)
  ?d  Digits (0123456789)
  ?h  Hexadecimal (0123456789abcdef)
  ?H  Hexadecimal uppercase (0123456789ABCDEF)
  ?s  Special characters (!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~)
  ?a  Accented letters (áéíóúÁÉÍÓÚñÑüÜ)
Any other character is blacklisted literally."##
    )]
    ExtractWords(ExtractArgs),

    /// Generate a new dictionary by padding words
    #[command(
        name = "generateDictionary",
        alias = "generate-dictionary",
        long_about = r#"Pad each word up to the target length with every character of the charset,
one output word per charset character. Words already at or over the target length are skipped.

Charset placeholders: ?l ?u ?d ?h ?H ?s ?a (see extractWords --help); other characters are literal."#
    )]
    GenerateDictionary(PadArgs),

    /// Generate case and substitution variants of words
    #[command(
        name = "generateCombinatory",
        alias = "generate-combinatory",
        long_about = r#"Generate every uppercase/lowercase combination of each word.

With --extended, lowercase letters are also replaced by common substitutes:
  a -> 4 @    b -> 8      c -> < (    e -> 3      g -> 6 9    i -> 1 !
  l -> 1 |    o -> 0      s -> 5 $    t -> 7 +    z -> 2

Output grows exponentially with the number of letters in a word."#
    )]
    GenerateCombinatory(CombineArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Path to the dictionary file
    #[arg(short, long, value_name = "PATH")]
    pub file: PathBuf,

    /// Keep words with length lower or equal
    #[arg(short = 'x', long, value_name = "N")]
    pub max_length: Option<usize>,

    /// Keep words with exactly this length
    #[arg(short, long, value_name = "N", conflicts_with_all = ["min_length", "max_length"])]
    pub exact_length: Option<usize>,

    /// Keep words with length greater or equal
    #[arg(short, long, value_name = "N")]
    pub min_length: Option<usize>,

    /// Blacklisted characters, literal or placeholders such as ?d?s
    #[arg(short, long, value_name = "CHARS", default_value = "")]
    pub conditions: String,

    /// Output file name
    #[arg(short, long, value_name = "PATH", default_value = "extractedWords.txt")]
    pub output: PathBuf,
}

#[derive(clap::Args, Debug, Clone)]
pub struct PadArgs {
    /// Path to the dictionary file
    #[arg(short, long, value_name = "PATH")]
    pub file: PathBuf,

    /// Target word length
    #[arg(short = 'l', long = "max-length", visible_alias = "length", value_name = "N")]
    pub target_length: usize,

    /// Characters to pad the words with, literal or placeholders such as ?d
    #[arg(short, long, value_name = "CHARS")]
    pub charset: String,

    /// Prepend characters instead of appending
    #[arg(short, long, default_value_t = false)]
    pub prepend: bool,

    /// Output file name
    #[arg(short, long, value_name = "PATH", default_value = "generatedDictionary.txt")]
    pub output: PathBuf,
}

#[derive(clap::Args, Debug, Clone)]
pub struct CombineArgs {
    /// Path to the dictionary file
    #[arg(short, long, value_name = "PATH")]
    pub file: PathBuf,

    /// Include common character substitutions
    #[arg(short, long, default_value_t = false)]
    pub extended: bool,

    /// Keep variants already produced for an earlier word
    #[arg(long, default_value_t = false)]
    pub no_dedup: bool,

    /// Output file name
    #[arg(short, long, value_name = "PATH", default_value = "combinatoryDictionary.txt")]
    pub output: PathBuf,
}

impl Command {
    /// Input file of the selected pipeline
    pub fn input(&self) -> &Path {
        match self {
            Self::ExtractWords(args) => &args.file,
            Self::GenerateDictionary(args) => &args.file,
            Self::GenerateCombinatory(args) => &args.file,
        }
    }

    /// Output file of the selected pipeline
    pub fn output(&self) -> &Path {
        match self {
            Self::ExtractWords(args) => &args.output,
            Self::GenerateDictionary(args) => &args.output,
            Self::GenerateCombinatory(args) => &args.output,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ExtractWords(_) => "extractWords",
            Self::GenerateDictionary(_) => "generateDictionary",
            Self::GenerateCombinatory(_) => "generateCombinatory",
        }
    }
}

impl Args {
    /// Parse buffer size string to bytes
    pub fn parse_buffer_size(&self) -> Result<usize, GeneratorError> {
        self.buffer_size
            .as_deref()
            .map_or(Ok(DEFAULT_BUFFER_SIZE), parse_size)
    }

    /// Resolve the forced input encoding, if any
    pub fn input_encoding(&self) -> Result<Option<&'static Encoding>, GeneratorError> {
        self.encoding.as_deref().map(encoding_for_label).transpose()
    }
}

/// Parse human-readable size string to bytes
fn parse_size(size_str: &str) -> Result<usize, GeneratorError> {
    let size_str = size_str.trim().to_uppercase();

    let (num_str, multiplier) = if let Some(num) = size_str.strip_suffix("GB") {
        (num, 1024 * 1024 * 1024)
    } else if let Some(num) = size_str.strip_suffix("MB") {
        (num, 1024 * 1024)
    } else if let Some(num) = size_str.strip_suffix("KB") {
        (num, 1024)
    } else if let Some(num) = size_str.strip_suffix('B') {
        (num, 1)
    } else {
        (size_str.as_str(), 1)
    };

    let num: usize = num_str
        .trim()
        .parse()
        .map_err(|_| GeneratorError::InvalidSize(size_str.clone()))?;

    num.checked_mul(multiplier)
        .filter(|&bytes| bytes > 0)
        .ok_or_else(|| GeneratorError::InvalidSize(size_str.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extract() {
        let args = Args::try_parse_from([
            "dictionary-generator",
            "extractWords",
            "-f",
            "words.txt",
            "-e",
            "8",
            "-c",
            "?d?s",
        ])
        .unwrap();

        let Command::ExtractWords(extract) = &args.command else {
            panic!("expected extractWords");
        };
        assert_eq!(extract.exact_length, Some(8));
        assert_eq!(extract.conditions, "?d?s");
        assert_eq!(extract.output, PathBuf::from("extractedWords.txt"));
        assert_eq!(args.command.input(), Path::new("words.txt"));
    }

    #[test]
    fn test_exact_conflicts_with_bounds() {
        let result = Args::try_parse_from([
            "dictionary-generator",
            "extractWords",
            "-f",
            "words.txt",
            "-e",
            "8",
            "-m",
            "4",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_min_and_max_together() {
        let args = Args::try_parse_from([
            "dictionary-generator",
            "extract-words",
            "-f",
            "words.txt",
            "-m",
            "4",
            "-x",
            "10",
        ])
        .unwrap();

        let Command::ExtractWords(extract) = &args.command else {
            panic!("expected extractWords");
        };
        assert_eq!(extract.min_length, Some(4));
        assert_eq!(extract.max_length, Some(10));
    }

    #[test]
    fn test_parse_generate_dictionary() {
        let args = Args::try_parse_from([
            "dictionary-generator",
            "generateDictionary",
            "-f",
            "names.txt",
            "-l",
            "10",
            "-c",
            "?d",
            "-p",
            "-o",
            "out.txt",
            "--append",
        ])
        .unwrap();

        let Command::GenerateDictionary(pad) = &args.command else {
            panic!("expected generateDictionary");
        };
        assert_eq!(pad.target_length, 10);
        assert_eq!(pad.charset, "?d");
        assert!(pad.prepend);
        assert!(args.append);
        assert_eq!(args.command.output(), Path::new("out.txt"));
    }

    #[test]
    fn test_charset_is_required() {
        let result = Args::try_parse_from([
            "dictionary-generator",
            "generateDictionary",
            "-f",
            "names.txt",
            "-l",
            "10",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_generate_combinatory() {
        let args = Args::try_parse_from([
            "dictionary-generator",
            "generateCombinatory",
            "-f",
            "base.txt",
            "-e",
            "--no-dedup",
            "-q",
        ])
        .unwrap();

        let Command::GenerateCombinatory(combine) = &args.command else {
            panic!("expected generateCombinatory");
        };
        assert!(combine.extended);
        assert!(combine.no_dedup);
        assert!(args.quiet);
        assert_eq!(combine.output, PathBuf::from("combinatoryDictionary.txt"));
        assert_eq!(args.command.name(), "generateCombinatory");
    }

    #[test]
    fn test_input_encoding() {
        let args = Args::try_parse_from([
            "dictionary-generator",
            "generateCombinatory",
            "-f",
            "base.txt",
            "--encoding",
            "latin1",
        ])
        .unwrap();
        assert!(args.input_encoding().unwrap().is_some());

        let args = Args::try_parse_from(["dictionary-generator", "generateCombinatory", "-f", "base.txt"]).unwrap();
        assert!(args.input_encoding().unwrap().is_none());
    }

    #[test]
    fn test_default_buffer_size() {
        let args = Args::try_parse_from(["dictionary-generator", "generateCombinatory", "-f", "base.txt"]).unwrap();
        assert_eq!(args.parse_buffer_size().unwrap(), DEFAULT_BUFFER_SIZE);

        let args = Args::try_parse_from([
            "dictionary-generator",
            "generateCombinatory",
            "-f",
            "base.txt",
            "--buffer-size",
            "1MB",
        ])
        .unwrap();
        assert_eq!(args.parse_buffer_size().unwrap(), 1024 * 1024);
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("64MB").unwrap(), 64 * 1024 * 1024);
        assert_eq!(parse_size("8GB").unwrap(), 8 * 1024 * 1024 * 1024);
        assert_eq!(parse_size("1024KB").unwrap(), 1024 * 1024);
        assert_eq!(parse_size("512").unwrap(), 512);
        assert!(parse_size("lots").is_err());
        assert!(parse_size("0KB").is_err());
    }
}
