//! Memory access traces.
//!
//! A trace is plain text with one record per line:
//!
//! ```text
//! 2 408ed4      instruction fetch
//! 0 10019d94    data load
//! 1 0x10019d98  data store
//! ```
//!
//! The first token is the access label, the second the hexadecimal byte
//! address (an optional `0x` prefix is accepted). Any further tokens are
//! ignored. Blank lines and lines starting with `#` are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::common::data::AccessKind;
use crate::common::error::TraceError;

/// One access read from a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Byte address.
    pub addr: u64,
    /// Access kind.
    pub kind: AccessKind,
}

impl TraceRecord {
    /// Creates a record.
    pub const fn new(addr: u64, kind: AccessKind) -> Self {
        Self { addr, kind }
    }
}

/// Parses one trace line.
///
/// # Arguments
///
/// * `line` - 1-based line number, used in errors.
/// * `text` - Line content.
///
/// # Returns
///
/// `Ok(None)` for blank and comment lines.
///
/// # Errors
///
/// [`TraceError::Malformed`], [`TraceError::UnknownKind`] or
/// [`TraceError::BadAddress`] describing the first problem found.
pub fn parse_line(line: usize, text: &str) -> Result<Option<TraceRecord>, TraceError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let mut tokens = trimmed.split_whitespace();
    let (Some(label), Some(addr)) = (tokens.next(), tokens.next()) else {
        return Err(TraceError::Malformed {
            line,
            text: trimmed.to_string(),
        });
    };

    let kind = label
        .parse::<u32>()
        .ok()
        .and_then(AccessKind::from_label)
        .ok_or_else(|| TraceError::UnknownKind {
            line,
            label: label.to_string(),
        })?;

    let digits = addr
        .strip_prefix("0x")
        .or_else(|| addr.strip_prefix("0X"))
        .unwrap_or(addr);
    let addr = u64::from_str_radix(digits, 16).map_err(|_| TraceError::BadAddress {
        line,
        text: addr.to_string(),
    })?;

    Ok(Some(TraceRecord::new(addr, kind)))
}

/// Streaming reader over a text trace.
#[derive(Debug)]
pub struct TraceReader<R> {
    lines: Lines<R>,
    line: usize,
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file.
    ///
    /// # Errors
    ///
    /// [`TraceError::Io`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }

    /// Number of lines consumed so far.
    pub const fn line(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next = self.lines.next()?;
            self.line += 1;
            let text = match next {
                Ok(text) => text,
                Err(source) => {
                    return Some(Err(TraceError::Read {
                        line: self.line,
                        source,
                    }));
                }
            };
            match parse_line(self.line, &text) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => {}
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
