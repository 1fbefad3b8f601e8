//! Encoding detection and decoding module
//!
//! Wordlists come in whatever encoding they were scraped in (Latin-1 is common).
//! Lines are decoded to UTF-8 before any component sees them.

use crate::error::GeneratorError;
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Result of encoding detection
#[derive(Debug, Clone)]
pub struct EncodingInfo {
    /// Detected encoding name
    pub name: &'static str,
    /// Confidence level (0.0 - 1.0)
    pub confidence: f32,
    /// The encoding_rs Encoding reference
    pub encoding: &'static Encoding,
}

impl Default for EncodingInfo {
    fn default() -> Self {
        Self {
            name: "UTF-8",
            confidence: 1.0,
            encoding: encoding_rs::UTF_8,
        }
    }
}

impl From<&'static Encoding> for EncodingInfo {
    fn from(encoding: &'static Encoding) -> Self {
        Self {
            name: encoding.name(),
            confidence: 1.0,
            encoding,
        }
    }
}

/// Look up an encoding by WHATWG label, e.g. `latin1` or `utf-16le`
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding, GeneratorError> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| GeneratorError::UnknownEncoding(label.to_string()))
}

/// Detect the encoding of a file by sampling its content
pub fn detect_encoding(path: &Path) -> anyhow::Result<EncodingInfo> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    // Read sample for detection (first 64KB should be enough)
    let mut sample = vec![0u8; 64 * 1024];
    let bytes_read = reader.read(&mut sample)?;
    sample.truncate(bytes_read);

    // ASCII head: assume UTF-8, later non-UTF-8 lines fall back per line
    if bytes_read == 0 || sample.is_ascii() {
        return Ok(EncodingInfo::default());
    }

    if let Some((encoding, _)) = Encoding::for_bom(&sample) {
        return Ok(EncodingInfo::from(encoding));
    }

    let mut detector = EncodingDetector::new();
    detector.feed(&sample, bytes_read < 64 * 1024);
    let encoding = detector.guess(None, true);

    let confidence = if encoding == encoding_rs::UTF_8 {
        if std::str::from_utf8(&sample).is_ok() {
            1.0
        } else {
            0.5
        }
    } else {
        0.8
    };

    Ok(EncodingInfo {
        name: encoding.name(),
        confidence,
        encoding,
    })
}

enum LineSource {
    /// ASCII-compatible encodings are split on `\n` as they stream in
    Stream(BufReader<File>),
    /// UTF-16 input is decoded up front, since `\n` is not a single byte
    Decoded(std::vec::IntoIter<String>),
}

/// A line iterator that decodes each line to UTF-8
///
/// Yields lines without their trailing `\n` or `\r\n`. Everything else,
/// including other whitespace, is kept.
pub struct EncodedLineIterator {
    source: LineSource,
    encoding: &'static Encoding,
    /// Decoder for lines that are not valid in a detected UTF-8 file
    fallback: Option<&'static Encoding>,
    line_buffer: Vec<u8>,
    bytes_read: u64,
    first_line: bool,
}

impl EncodedLineIterator {
    /// Create a new line iterator for a file with automatic encoding detection
    ///
    /// Detection only samples the head of the file. When it settles on UTF-8,
    /// later lines that are not valid UTF-8 are decoded as Windows-1252.
    pub fn new(path: &Path) -> anyhow::Result<Self> {
        let info = detect_encoding(path)?;
        log::debug!(
            "Detected encoding {} for {:?} (confidence {:.1})",
            info.name,
            path,
            info.confidence
        );
        let fallback = (info.encoding == encoding_rs::UTF_8).then_some(encoding_rs::WINDOWS_1252);
        Self::open(path, info.encoding, fallback)
    }

    /// Create with a specific encoding
    pub fn with_encoding(path: &Path, encoding: &'static Encoding) -> anyhow::Result<Self> {
        Self::open(path, encoding, None)
    }

    fn open(
        path: &Path,
        encoding: &'static Encoding,
        fallback: Option<&'static Encoding>,
    ) -> anyhow::Result<Self> {
        let file = File::open(path)?;

        let source = if encoding.is_ascii_compatible() {
            LineSource::Stream(BufReader::with_capacity(64 * 1024, file))
        } else {
            let mut raw = Vec::new();
            BufReader::new(file).read_to_end(&mut raw)?;
            let (decoded, _, had_errors) = encoding.decode(&raw);
            if had_errors {
                log::warn!("Encoding errors in {:?}, using lossy conversion", path);
            }
            let lines: Vec<String> = split_lines(&decoded).map(str::to_string).collect();
            LineSource::Decoded(lines.into_iter())
        };

        Ok(Self {
            source,
            encoding,
            fallback,
            line_buffer: Vec::with_capacity(4096),
            bytes_read: 0,
            first_line: true,
        })
    }

    /// Get the encoding in use
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Bytes consumed so far (approximate for UTF-16 input)
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    fn next_streamed(&mut self) -> Option<anyhow::Result<String>> {
        let LineSource::Stream(reader) = &mut self.source else {
            return None;
        };

        self.line_buffer.clear();
        let read = match reader.read_until(b'\n', &mut self.line_buffer) {
            Ok(0) => return None, // EOF
            Ok(n) => n,
            Err(e) => return Some(Err(e.into())),
        };
        self.bytes_read += read as u64;

        let mut line: &[u8] = &self.line_buffer;
        if std::mem::take(&mut self.first_line) {
            line = line.strip_prefix(&[0xEF, 0xBB, 0xBF][..]).unwrap_or(line);
        }
        let line = line.strip_suffix(b"\n").unwrap_or(line);
        let line = line.strip_suffix(b"\r").unwrap_or(line);

        if self.encoding == encoding_rs::UTF_8 {
            // Fast path for UTF-8
            match (std::str::from_utf8(line), self.fallback) {
                (Ok(s), _) => Some(Ok(s.to_string())),
                (Err(_), Some(fallback)) => {
                    log::debug!("Invalid UTF-8 in line, decoding as {}", fallback.name());
                    let (decoded, _) = fallback.decode_without_bom_handling(line);
                    Some(Ok(decoded.into_owned()))
                }
                (Err(_), None) => {
                    log::warn!("Invalid UTF-8 in line, using lossy conversion");
                    Some(Ok(String::from_utf8_lossy(line).into_owned()))
                }
            }
        } else {
            let (decoded, had_errors) = self.encoding.decode_without_bom_handling(line);
            if had_errors {
                log::warn!("Encoding errors in line, using lossy conversion");
            }
            Some(Ok(decoded.into_owned()))
        }
    }
}

impl Iterator for EncodedLineIterator {
    type Item = anyhow::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if let LineSource::Decoded(lines) = &mut self.source {
            let line = lines.next()?;
            self.bytes_read += line.len() as u64 + 1;
            return Some(Ok(line));
        }
        self.next_streamed()
    }
}

/// Split decoded text into lines, dropping `\n` / `\r\n` terminators
///
/// A trailing terminator does not produce an extra empty line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let empty = text.is_empty();
    let text = text.strip_suffix('\n').unwrap_or(text);
    text.split('\n')
        .filter(move |_| !empty)
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_utf8_detection() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Hello, World!").unwrap();
        writeln!(file, "Привет мир!").unwrap();

        let info = detect_encoding(file.path()).unwrap();
        assert_eq!(info.name, "UTF-8");
    }

    #[test]
    fn test_empty_file_defaults_to_utf8() {
        let file = NamedTempFile::new().unwrap();
        let info = detect_encoding(file.path()).unwrap();
        assert_eq!(info.encoding, encoding_rs::UTF_8);

        let iter = EncodedLineIterator::new(file.path()).unwrap();
        assert_eq!(iter.count(), 0);
    }

    #[test]
    fn test_line_iterator() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "line1\r\nline 2\n\nline3").unwrap();

        let iter = EncodedLineIterator::new(file.path()).unwrap();
        let lines: Vec<_> = iter.filter_map(|r| r.ok()).collect();

        assert_eq!(lines, vec!["line1", "line 2", "", "line3"]);
    }

    #[test]
    fn test_bytes_read() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "abc\ndef\n").unwrap();

        let mut iter = EncodedLineIterator::new(file.path()).unwrap();
        while iter.next().is_some() {}
        assert_eq!(iter.bytes_read(), 8);
    }

    #[test]
    fn test_utf8_bom_is_skipped() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xEF, 0xBB, 0xBF]).unwrap();
        write!(file, "first\nsecond\n").unwrap();

        let lines: Vec<_> = EncodedLineIterator::new(file.path())
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();
        assert_eq!(lines, vec!["first", "second"]);
    }

    #[test]
    fn test_latin1_decoding() {
        let mut file = NamedTempFile::new().unwrap();
        // "contraseña" and "niño" in ISO-8859-1
        file.write_all(b"contrase\xf1a\nni\xf1o\n").unwrap();

        let latin1 = encoding_for_label("latin1").unwrap();
        let lines: Vec<_> = EncodedLineIterator::with_encoding(file.path(), latin1)
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();
        assert_eq!(lines, vec!["contraseña", "niño"]);
    }

    #[test]
    fn test_latin1_line_after_ascii_head() {
        let mut file = NamedTempFile::new().unwrap();
        for _ in 0..(70 * 1024 / 9 + 1) {
            file.write_all(b"password\n").unwrap();
        }
        file.write_all(b"ni\xf1o\ncaf\xc3\xa9\n").unwrap();

        let lines: Vec<_> = EncodedLineIterator::new(file.path())
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();
        let n = lines.len();
        assert_eq!(lines[n - 2], "niño");
        assert_eq!(lines[n - 1], "café");
    }

    #[test]
    fn test_forced_utf8_is_lossy() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"ni\xf1o\n").unwrap();

        let lines: Vec<_> = EncodedLineIterator::with_encoding(file.path(), encoding_rs::UTF_8)
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();
        assert_eq!(lines, vec!["ni\u{FFFD}o"]);
    }

    #[test]
    fn test_utf16_decoding() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xFF, 0xFE]).unwrap();
        for unit in "ab\r\ncd\n".encode_utf16() {
            file.write_all(&unit.to_le_bytes()).unwrap();
        }

        let lines: Vec<_> = EncodedLineIterator::new(file.path())
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();
        assert_eq!(lines, vec!["ab", "cd"]);
    }

    #[test]
    fn test_unknown_label() {
        let err = encoding_for_label("klingon").unwrap_err();
        assert_eq!(err, GeneratorError::UnknownEncoding("klingon".to_string()));
    }
}
