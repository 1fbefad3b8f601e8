//! Progress display module
//!
//! Styled status lines, the input progress bar, and the end-of-run summary.

use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// Print the application banner
pub fn print_banner() {
    let banner = r#"
╔══════════════════════════════════════════════════════════════════════════════╗
║                                                                              ║
║   ██████╗ ██╗ ██████╗████████╗     ██████╗ ███████╗███╗   ██╗              ║
║   ██╔══██╗██║██╔════╝╚══██╔══╝    ██╔════╝ ██╔════╝████╗  ██║              ║
║   ██║  ██║██║██║        ██║       ██║  ███╗█████╗  ██╔██╗ ██║              ║
║   ██║  ██║██║██║        ██║       ██║   ██║██╔══╝  ██║╚██╗██║              ║
║   ██████╔╝██║╚██████╗   ██║       ╚██████╔╝███████╗██║ ╚████║              ║
║   ╚═════╝ ╚═╝ ╚═════╝   ╚═╝        ╚═════╝ ╚══════╝╚═╝  ╚═══╝              ║
║                                                                              ║
║              Wordlist Filtering, Padding and Case Expansion                  ║
║                                                              v1.0.0          ║
╚══════════════════════════════════════════════════════════════════════════════╝
"#;

    println!("{}", banner.green());
}

/// Print a section header
pub fn print_header(text: &str) {
    println!("\n{} {}", "▶".green(), text.green().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    println!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    println!("  {} {}", "✔".green(), text.green());
}

/// Print a warning message
pub fn print_warning(text: &str) {
    println!("  {} {}", "⚠".yellow(), text.yellow());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Create a bytes-based progress bar
pub fn create_bytes_progress_bar(total_bytes: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(total_bytes);

    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.green/dim}] {bytes}/{total_bytes} ({bytes_per_sec}) {msg}")
    {
        pb.set_style(style.progress_chars("█▓░"));
    }

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Processing statistics for one pipeline run
#[derive(Debug)]
pub struct ProcessingStats {
    pub lines_read: u64,
    pub words_written: u64,
    pub skipped_lines: u64,
    pub duplicate_words: u64,
    pub bytes_processed: u64,
    pub start_time: Instant,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self {
            lines_read: 0,
            words_written: 0,
            skipped_lines: 0,
            duplicate_words: 0,
            bytes_processed: 0,
            start_time: Instant::now(),
        }
    }

    pub fn add_line(&mut self) {
        self.lines_read += 1;
    }

    pub fn add_written(&mut self, count: u64) {
        self.words_written += count;
    }

    pub fn add_skipped(&mut self) {
        self.skipped_lines += 1;
    }

    pub fn add_duplicate(&mut self) {
        self.duplicate_words += 1;
    }

    pub fn set_bytes_processed(&mut self, bytes: u64) {
        self.bytes_processed = bytes;
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn lines_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.lines_read as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Print final statistics
    pub fn print_summary(&self) {
        println!();
        println!("{}", "═".repeat(60).green());
        println!("{}", "                    PROCESSING COMPLETE".green().bold());
        println!("{}", "═".repeat(60).green());
        println!();

        println!("  {} {}", "Data processed: ".green(), ByteSize(self.bytes_processed));
        println!("  {} {}", "Lines read:     ".green(), format_number(self.lines_read));
        println!("  {} {}", "Lines skipped:  ".yellow(), format_number(self.skipped_lines));
        if self.duplicate_words > 0 {
            println!("  {} {}", "Duplicates:     ".yellow(), format_number(self.duplicate_words));
        }
        println!(
            "  {} {}",
            "Words written:  ".green().bold(),
            format_number(self.words_written).green().bold()
        );

        println!();
        println!("  {} {}", "Duration:       ".green(), format_duration(self.elapsed()));
        println!("  {} {:.2} lines/sec", "Throughput:     ".green(), self.lines_per_second());
        println!();
        println!("{}", "═".repeat(60).green());
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousand separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else if secs < 3600 {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}h {}m", hours, mins)
    }
}
