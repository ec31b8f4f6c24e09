//! Line classification for thread dumps.
//!
//! A dump is a sequence of thread sections:
//!
//! ```text
//! "worker-1" #12 prio=5 os_prio=0 tid=0x00007f nid=0x2a waiting on condition
//!    java.lang.Thread.State: TIMED_WAITING (sleeping)
//!         at java.lang.Thread.sleep(Native Method)
//!         at com.acme.Worker.run(Worker.java:42)
//!
//! ```
//!
//! Each line is classified independently; the reducer gives the lines meaning.

use super::thread_state::ThreadState;
use crate::utils::config::{FRAME_PREFIX, STATE_PREFIX};
use crate::utils::error::ParseError;
use std::io::BufRead;

/// A classified dump line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DumpLine {
    /// Thread header, carrying the first quoted token of the line
    ThreadHeader(String),
    /// Stack frame descriptor, e.g. `com.acme.Worker.run(Worker.java:42)`
    Frame(String),
    /// Thread state line
    State(ThreadState),
    /// Section terminator
    Blank,
    /// Anything else (lock annotations, banners, JNI summary...)
    Other,
}

/// Classify a single line of a dump
///
/// **Public** - used by `DumpLexer` and directly by tests
///
/// # Errors
/// * `ParseError::InvalidThreadState` - a state line carries an unknown token
pub fn classify_line(line: &str) -> Result<DumpLine, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(DumpLine::Blank);
    }

    let indented = line.starts_with(char::is_whitespace);

    if indented {
        if let Some(descriptor) = trimmed.strip_prefix(FRAME_PREFIX) {
            return Ok(DumpLine::Frame(descriptor.trim().to_string()));
        }

        if let Some(rest) = trimmed.strip_prefix(STATE_PREFIX) {
            // "TIMED_WAITING (sleeping)" -> "TIMED_WAITING"
            let token = rest.split_whitespace().next().unwrap_or("");
            return ThreadState::parse(token).map(DumpLine::State);
        }
    }

    if let Some(name) = first_quoted_token(trimmed) {
        return Ok(DumpLine::ThreadHeader(name.to_string()));
    }

    Ok(DumpLine::Other)
}

/// Extract the text between the first pair of double quotes
///
/// **Private** - header detection
fn first_quoted_token(line: &str) -> Option<&str> {
    let start = line.find('"')? + 1;
    let len = line[start..].find('"')?;
    Some(&line[start..start + len])
}

/// Forward-only iterator of classified lines over a reader
pub struct DumpLexer<R> {
    lines: std::io::Lines<R>,
    line_number: usize,
}

impl<R: BufRead> DumpLexer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
        }
    }

    /// Number of lines consumed so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> Iterator for DumpLexer<R> {
    type Item = Result<DumpLine, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = match self.lines.next()? {
            Ok(line) => line,
            Err(e) => return Some(Err(ParseError::Io(e))),
        };
        self.line_number += 1;
        Some(classify_line(&line))
    }
}
