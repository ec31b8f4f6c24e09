//! Stackpath
//!
//! Call-graph aggregation and critical-path reporting for JVM thread dumps.
//!
//! A dump is folded into one weighted call tree per thread, the trees are
//! merged into one aggregate, and the most sampled chain of frames (the
//! critical path) is reported.
//!
//! ## Getting Started
//!
//! ```bash
//! jstack <pid> > threads.txt
//! stackpath threads.txt
//! ```

pub mod aggregator;
pub mod commands;
pub mod graph;
pub mod output;
pub mod parser;
pub mod utils;
