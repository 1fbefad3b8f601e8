//! Dictionary Generator - wordlist filtering, padding and case expansion
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::process;

use dictionary_generator::cli::Args;
use dictionary_generator::processor::{Processor, ProcessorConfig};
use dictionary_generator::progress::{print_banner, print_error, print_header, print_info};

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        std::env::set_var("RUST_LOG", "debug");
    } else if !args.quiet {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    if let Err(e) = run(args) {
        print_error(&format!("{}", e));

        // Print chain of errors
        let mut source = e.source();
        while let Some(err) = source {
            print_error(&format!("  Caused by: {}", err));
            source = err.source();
        }

        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    if !args.quiet {
        print_banner();
    }

    validate_args(&args)?;

    // All configuration errors surface here, before the output is touched
    let config = ProcessorConfig::from_args(&args)?;

    if !args.quiet && args.verbose {
        print_config(&args, &config);
    }

    let processor = Processor::new(config);
    let stats = processor.process(args.command.input())?;

    if !args.quiet {
        stats.print_summary();
    }

    Ok(())
}

/// Validate command-line arguments
fn validate_args(args: &Args) -> anyhow::Result<()> {
    let input = args.command.input();

    if !input.exists() {
        anyhow::bail!("Input file does not exist: {:?}", input);
    }
    if input.is_dir() {
        anyhow::bail!("Input path is a directory, expected a wordlist file: {:?}", input);
    }

    Ok(())
}

/// Print configuration summary
fn print_config(args: &Args, config: &ProcessorConfig) {
    print_header("Configuration");

    print_info(&format!("Command:      {}", args.command.name()));
    print_info(&format!("Input:        {:?}", args.command.input()));
    print_info(&format!("Output:       {:?}", config.output));
    print_info(&format!("Append:       {}", config.append));
    print_info(&format!(
        "Encoding:     {}",
        config.encoding.map_or("auto-detect", |e| e.name())
    ));
    print_info(&format!("Buffer size:  {}", bytesize::ByteSize(config.buffer_size as u64)));
}
