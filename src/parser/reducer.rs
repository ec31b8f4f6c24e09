//! Fold classified dump lines into one call graph per thread.
//!
//! The reducer is a small state machine advanced once per line. It keeps the
//! current thread name, the current thread state and the frames seen so far
//! (innermost first, as they appear in the dump). A blank line closes the
//! section: the frames are reversed to outermost-first and folded into that
//! thread's tree, then the three fields are reset.

use super::lexer::{DumpLexer, DumpLine};
use super::thread_state::ThreadState;
use crate::graph::CallGraph;
use crate::utils::error::ParseError;
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Per-thread call graphs of a whole dump
#[derive(Debug, Clone, Default)]
pub struct ThreadDump {
    /// Thread name -> call graph rooted at the `root` sentinel
    pub threads: BTreeMap<String, CallGraph>,

    /// Number of thread sections folded into the graphs
    pub sections: usize,
}

impl ThreadDump {
    pub fn thread_count(&self) -> usize {
        self.threads.len()
    }
}

/// Line-by-line accumulator for thread sections
#[derive(Debug, Default)]
pub struct ThreadStackReducer {
    current_thread: Option<String>,
    current_state: ThreadState,
    current_stack: Vec<String>,
    dump: ThreadDump,
}

impl ThreadStackReducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the state machine by one classified line
    pub fn consume(&mut self, line: DumpLine) {
        match line {
            DumpLine::ThreadHeader(name) => self.current_thread = Some(name),
            DumpLine::Frame(frame) => self.current_stack.push(frame),
            DumpLine::State(state) => self.current_state = state,
            DumpLine::Blank => self.close_section(),
            DumpLine::Other => {}
        }
    }

    /// Fold the accumulated section (if any) and reset the accumulator
    ///
    /// **Private** - called on the section terminator
    fn close_section(&mut self) {
        let thread = self.current_thread.take();
        let state = std::mem::take(&mut self.current_state);
        let mut stack = std::mem::take(&mut self.current_stack);

        if stack.is_empty() {
            return;
        }

        let Some(thread) = thread else {
            warn!("Discarding {} frames that appear before any thread header", stack.len());
            return;
        };

        stack.reverse();

        let graph = self.dump.threads.entry(thread).or_default();
        *graph = graph.update(&stack, state);
        self.dump.sections += 1;
    }

    /// Finish reading and return the per-thread graphs
    ///
    /// A section that was not closed by a blank line is dropped.
    pub fn finish(self) -> ThreadDump {
        if !self.current_stack.is_empty() {
            warn!(
                "Ignoring unterminated section of {} frames for thread {:?}",
                self.current_stack.len(),
                self.current_thread.as_deref().unwrap_or("<unknown>")
            );
        }
        self.dump
    }
}

/// Parse a dump from any buffered reader
///
/// **Public** - main entry point for parsing
///
/// # Errors
/// * `ParseError::InvalidThreadState` - a state line carries an unknown token;
///   nothing of the dump is returned
/// * `ParseError::Io` - the reader failed
pub fn parse_dump<R: BufRead>(reader: R) -> Result<ThreadDump, ParseError> {
    let mut lexer = DumpLexer::new(reader);
    let mut reducer = ThreadStackReducer::new();

    for line in lexer.by_ref() {
        reducer.consume(line?);
    }

    let dump = reducer.finish();
    debug!(
        "Read {} lines: {} sections across {} threads",
        lexer.line_number(),
        dump.sections,
        dump.thread_count()
    );

    Ok(dump)
}

/// Parse a dump file
///
/// # Errors
/// * `ParseError::Io` - the file is missing or unreadable
/// * `ParseError::InvalidThreadState` - see `parse_dump`
pub fn parse_dump_file(path: impl AsRef<Path>) -> Result<ThreadDump, ParseError> {
    let path = path.as_ref();
    info!("Reading thread dump: {}", path.display());

    let file = File::open(path)?;
    parse_dump(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SINGLE: &str = "\
\"worker-1\" #12 prio=5 os_prio=0 tid=0x1 nid=0x2 waiting on condition
   java.lang.Thread.State: TIMED_WAITING (sleeping)
\tat java.lang.Thread.sleep(Native Method)
\tat com.acme.Worker.poll(Worker.java:30)
\tat com.acme.Worker.run(Worker.java:12)

";

    #[test]
    fn test_single_section_is_reversed() {
        let dump = parse_dump(Cursor::new(SINGLE)).unwrap();
        let graph = &dump.threads["worker-1"];

        assert_eq!(dump.sections, 1);
        assert_eq!(
            graph.critical_path(),
            vec![
                "com.acme.Worker.run(Worker.java:12)",
                "com.acme.Worker.poll(Worker.java:30)",
                "java.lang.Thread.sleep(Native Method)",
            ]
        );

        let leaves = graph.leaves();
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].state, ThreadState::TimedWaiting);
    }

    #[test]
    fn test_repeated_thread_accumulates() {
        let input = format!("{SINGLE}{SINGLE}");
        let dump = parse_dump(Cursor::new(input)).unwrap();

        assert_eq!(dump.thread_count(), 1);
        assert_eq!(dump.sections, 2);
        assert_eq!(dump.threads["worker-1"].total(), 2);
    }

    #[test]
    fn test_empty_sections_are_ignored() {
        let input = "\"idle\" daemon prio=9\n   java.lang.Thread.State: RUNNABLE\n\n\n\n";
        let dump = parse_dump(Cursor::new(input)).unwrap();
        assert_eq!(dump.sections, 0);
        assert!(dump.threads.is_empty());
    }

    #[test]
    fn test_state_resets_between_sections() {
        let input = "\
\"a\" prio=5
   java.lang.Thread.State: BLOCKED
\tat x.Y.z(Y.java:1)

\"b\" prio=5
\tat x.Y.w(Y.java:2)

";
        let dump = parse_dump(Cursor::new(input)).unwrap();
        assert_eq!(dump.threads["a"].leaves()[0].state, ThreadState::Blocked);
        assert_eq!(dump.threads["b"].leaves()[0].state, ThreadState::Runnable);
    }

    #[test]
    fn test_unterminated_section_is_dropped() {
        let input = "\"t\" prio=5\n\tat x.Y.z(Y.java:1)\n";
        let dump = parse_dump(Cursor::new(input)).unwrap();
        assert!(dump.threads.is_empty());
    }

    #[test]
    fn test_frames_without_header_are_dropped() {
        let input = "\tat x.Y.z(Y.java:1)\n\n";
        let dump = parse_dump(Cursor::new(input)).unwrap();
        assert!(dump.threads.is_empty());
        assert_eq!(dump.sections, 0);
    }

    #[test]
    fn test_invalid_state_fails_whole_parse() {
        let input = format!("{SINGLE}\"t\" prio=5\n   java.lang.Thread.State: FOO\n\tat a.B.c(B.java:1)\n\n");
        let err = parse_dump(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, ParseError::InvalidThreadState(ref t) if t == "FOO"));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_dump_file("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
