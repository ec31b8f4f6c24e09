//! Configuration and constants for the CLI.

/// Name of the sentinel node at the top of every per-thread call graph
pub const ROOT_NAME: &str = "root";

/// Separator used when merging two graphs whose roots have different names
pub const MERGE_SEPARATOR: char = '#';

/// Current JSON report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

// Line shapes recognized by the dump lexer
pub const FRAME_PREFIX: &str = "at ";
pub const STATE_PREFIX: &str = "java.lang.Thread.State:";

/// Prefix for every printed critical-path line
pub const PATH_LINE_PREFIX: &str = " + ";

/// One-line usage printed when no dump file is given
pub const USAGE: &str = "usage: stackpath [OPTIONS] <DUMP>";
