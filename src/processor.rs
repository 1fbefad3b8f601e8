//! Core processing engine
//!
//! Reads the input wordlist line by line, runs each line through the selected
//! pipeline and writes the results. Lines are independent of each other; the
//! only cross-line state is the combinatory deduplicator.

use crate::charset;
use crate::cli::{Args, Command};
use crate::combinator::Expander;
use crate::dedup::{create_deduplicator, Deduplicator};
use crate::encoding::EncodedLineIterator;
use crate::error::GeneratorError;
use crate::filter::{FilterCriteria, LengthCriterion};
use crate::output::OutputWriter;
use crate::padder::PaddingSpec;
use crate::progress::{
    create_bytes_progress_bar, print_header, print_info, print_success, print_warning,
    ProcessingStats,
};

use anyhow::Context;
use bytesize::ByteSize;
use colored::*;
use encoding_rs::Encoding;
use indicatif::ProgressBar;
use std::fs;
use std::path::{Path, PathBuf};

/// A fully validated pipeline
#[derive(Debug, Clone)]
pub enum Job {
    /// Keep words passing the filter criteria
    Extract(FilterCriteria),
    /// Pad words up to a target length
    Pad(PaddingSpec),
    /// Expand words into case and substitution variants
    Combine { expander: Expander, dedup: bool },
}

impl Job {
    /// Build and validate the job for a subcommand
    pub fn from_command(command: &Command) -> Result<Self, GeneratorError> {
        match command {
            Command::ExtractWords(args) => {
                let length = LengthCriterion::from_options(args.exact_length, args.min_length, args.max_length)?;
                Ok(Self::Extract(FilterCriteria::new(length, charset::resolve(&args.conditions))))
            }
            Command::GenerateDictionary(args) => Ok(Self::Pad(PaddingSpec::from_tokens(
                args.target_length,
                &args.charset,
                args.prepend,
            )?)),
            Command::GenerateCombinatory(args) => Ok(Self::Combine {
                expander: Expander::new(args.extended),
                dedup: !args.no_dedup,
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Extract(_) => "extractWords",
            Self::Pad(_) => "generateDictionary",
            Self::Combine { .. } => "generateCombinatory",
        }
    }

    /// One-line description for verbose output
    pub fn describe(&self) -> String {
        match self {
            Self::Extract(criteria) => format!(
                "length {:?}, blacklist {:?} ({} chars)",
                criteria.length,
                criteria.blacklist.to_string(),
                criteria.blacklist.len()
            ),
            Self::Pad(spec) => format!(
                "target length {}, charset {:?} ({} chars), {}",
                spec.target_length(),
                spec.charset().to_string(),
                spec.charset().len(),
                if spec.prepend() { "prepend" } else { "append" }
            ),
            Self::Combine { expander, dedup } => format!(
                "extended: {} ({} substitutable letters), dedup across words: {}",
                expander.extended(),
                expander.table().len(),
                dedup
            ),
        }
    }
}

/// Processor configuration
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    pub job: Job,
    pub output: PathBuf,
    pub append: bool,
    pub buffer_size: usize,
    /// Forced input encoding; detected per file when `None`
    pub encoding: Option<&'static Encoding>,
    pub quiet: bool,
    pub verbose: bool,
}

impl ProcessorConfig {
    /// Validate the command line into a configuration
    ///
    /// Every configuration error surfaces here, before any file is opened.
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        Ok(Self {
            job: Job::from_command(&args.command)?,
            output: args.command.output().to_path_buf(),
            append: args.append,
            buffer_size: args.parse_buffer_size()?,
            encoding: args.input_encoding()?,
            quiet: args.quiet,
            verbose: args.verbose,
        })
    }
}

/// Main processor
pub struct Processor {
    config: ProcessorConfig,
}

impl Processor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self { config }
    }

    /// Run the configured job over an input file
    pub fn process(&self, input: &Path) -> anyhow::Result<ProcessingStats> {
        let config = &self.config;

        let total_bytes = fs::metadata(input)
            .with_context(|| format!("Failed to read input file {:?}", input))?
            .len();

        let lines = match config.encoding {
            Some(encoding) => EncodedLineIterator::with_encoding(input, encoding),
            None => EncodedLineIterator::new(input),
        }
        .with_context(|| format!("Failed to open input file {:?}", input))?;
        log::debug!("Reading {:?} as {}", input, lines.encoding().name());

        let mut output = OutputWriter::open(config.output.clone(), config.buffer_size, config.append)
            .with_context(|| format!("Failed to open output file {:?}", config.output))?;

        if !config.quiet {
            print_header(&format!("Running {}...", config.job.name()));
            print_info(&format!("Input:  {:?}", input));
            print_info(&format!("Output: {:?}", config.output));
            if config.verbose {
                print_info(&format!("Job:    {}", config.job.describe()));
            }
        }

        let pb = if config.quiet {
            ProgressBar::hidden()
        } else {
            create_bytes_progress_bar(total_bytes, "Processing...")
        };

        let mut tracked = TrackedLines { inner: lines, pb: &pb };
        let mut stats = ProcessingStats::new();
        let mut emit = |word: &str| output.write_line(word);

        match &config.job {
            Job::Extract(criteria) => {
                if criteria.is_identity() {
                    log::info!("No length or blacklist criteria given, every line is kept");
                }
                extract_words(&mut tracked, criteria, &mut stats, &mut emit)?
            }
            Job::Pad(spec) => generate_dictionary(&mut tracked, spec, &mut stats, &mut emit)?,
            Job::Combine { expander, dedup } => {
                let mut dedup = create_deduplicator(*dedup);
                generate_combinatory(&mut tracked, expander, dedup.as_mut(), &mut stats, &mut emit)?;
                log::debug!("Deduplicator holds ~{} bytes", dedup.memory_usage());
            }
        }

        stats.set_bytes_processed(tracked.inner.bytes_read());
        pb.finish_with_message("Complete".green().to_string());
        output
            .flush()
            .with_context(|| format!("Failed to write output file {:?}", config.output))?;

        if !config.quiet {
            if output.lines_written() == 0 && stats.lines_read > 0 {
                print_warning("No words were written");
            }
            print_success(&format!("Output written to: {:?}", output.path()));
            print_info(&format!(
                "Words written: {} ({})",
                output.lines_written(),
                ByteSize(output.bytes_written())
            ));
        }

        Ok(stats)
    }
}

/// Line iterator that advances the progress bar as it reads
struct TrackedLines<'a> {
    inner: EncodedLineIterator,
    pb: &'a ProgressBar,
}

impl Iterator for TrackedLines<'_> {
    type Item = anyhow::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.inner.next();
        self.pb.set_position(self.inner.bytes_read());
        line
    }
}

/// Write every line passing `criteria`, in input order
pub fn extract_words<I, F>(
    lines: I,
    criteria: &FilterCriteria,
    stats: &mut ProcessingStats,
    mut emit: F,
) -> anyhow::Result<()>
where
    I: Iterator<Item = anyhow::Result<String>>,
    F: FnMut(&str) -> anyhow::Result<()>,
{
    for line in lines {
        let word = line?;
        stats.add_line();

        if criteria.passes(&word) {
            emit(&word)?;
            stats.add_written(1);
        } else {
            stats.add_skipped();
        }
    }

    Ok(())
}

/// Write the padded variants of every line, in input order
pub fn generate_dictionary<I, F>(
    lines: I,
    spec: &PaddingSpec,
    stats: &mut ProcessingStats,
    mut emit: F,
) -> anyhow::Result<()>
where
    I: Iterator<Item = anyhow::Result<String>>,
    F: FnMut(&str) -> anyhow::Result<()>,
{
    for line in lines {
        let word = line?;
        stats.add_line();

        let padded = spec.pad(&word);
        if padded.is_empty() {
            log::debug!("'{}' is already {} characters or longer", word, spec.target_length());
            stats.add_skipped();
            continue;
        }

        for variant in &padded {
            emit(variant)?;
        }
        stats.add_written(padded.len() as u64);
    }

    Ok(())
}

/// Write every case/substitution variant of every line
///
/// Variants already written for an earlier line are dropped by `dedup`.
pub fn generate_combinatory<I, F>(
    lines: I,
    expander: &Expander,
    dedup: &mut dyn Deduplicator,
    stats: &mut ProcessingStats,
    mut emit: F,
) -> anyhow::Result<()>
where
    I: Iterator<Item = anyhow::Result<String>>,
    F: FnMut(&str) -> anyhow::Result<()>,
{
    for line in lines {
        let word = line?;
        stats.add_line();

        for variant in expander.expand(&word) {
            if dedup.insert(&variant) {
                emit(&variant)?;
                stats.add_written(1);
            } else {
                stats.add_duplicate();
            }
        }
    }

    Ok(())
}
