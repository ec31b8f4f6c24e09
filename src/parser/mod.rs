//! Thread dump parsing.
//!
//! This module handles:
//! - Classifying dump lines (thread header, frame, state, blank)
//! - Parsing thread states
//! - Folding thread sections into per-thread call graphs

pub mod lexer;
pub mod reducer;
pub mod thread_state;

// Re-export main types
pub use lexer::{classify_line, DumpLexer, DumpLine};
pub use reducer::{parse_dump, parse_dump_file, ThreadDump, ThreadStackReducer};
pub use thread_state::ThreadState;
