//! Aggregation of per-thread call graphs into reports.
//!
//! This module transforms the graphs of a parsed dump into:
//! - One aggregate graph (all threads merged)
//! - Per-pool aggregates
//! - Critical-path metrics

pub mod metrics;
pub mod pool;

// Re-export main types and functions
pub use metrics::{build_report, critical_path_steps, samples_by_state, CriticalPathReport, PathStep};
pub use pool::{group_by_pool, merge_all, pool_name, select_threads, ThreadPool};
