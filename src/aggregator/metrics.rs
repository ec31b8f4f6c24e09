//! Report metrics for an aggregated call graph.
//!
//! The critical path is the chain of most sampled frames. Each step carries
//! its sample count and its share of all samples.

use crate::graph::CallGraph;
use crate::utils::config::REPORT_SCHEMA_VERSION;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriticalPathReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Dump file that was analyzed
    pub source: String,

    /// Threads that contributed to the aggregate
    pub thread_count: usize,

    /// Samples in the aggregate, including those ending at inner frames
    pub sample_count: u64,

    /// Leaf samples per thread state token
    pub by_state: BTreeMap<String, u64>,

    /// Critical path, root to leaf
    pub critical_path: Vec<PathStep>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// One frame of the critical path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStep {
    pub frame: String,
    pub samples: u64,
    pub percentage: f64,
}

/// Build the report for an aggregate graph
///
/// **Public** - main entry point for metrics calculation
///
/// # Arguments
/// * `graph` - Aggregated (and possibly filtered) call graph
/// * `source` - Name of the analyzed dump
/// * `thread_count` - Number of threads merged into `graph`
pub fn build_report(graph: &CallGraph, source: &str, thread_count: usize) -> CriticalPathReport {
    let sample_count = graph.total();
    let critical_path = critical_path_steps(graph, sample_count);

    debug!(
        "Critical path has {} frames over {} samples",
        critical_path.len(),
        sample_count
    );

    CriticalPathReport {
        version: REPORT_SCHEMA_VERSION.to_string(),
        source: source.to_string(),
        thread_count,
        sample_count,
        by_state: samples_by_state(graph),
        critical_path,
        generated_at: chrono::Utc::now().to_rfc3339(),
    }
}

/// Critical path with per-step counts and percentages
pub fn critical_path_steps(graph: &CallGraph, total: u64) -> Vec<PathStep> {
    graph
        .critical_nodes()
        .into_iter()
        .map(|node| PathStep {
            frame: node.name().to_string(),
            samples: node.count(),
            percentage: percentage(node.count(), total),
        })
        .collect()
}

/// Leaf sample counts per thread state
pub fn samples_by_state(graph: &CallGraph) -> BTreeMap<String, u64> {
    let mut by_state = BTreeMap::new();
    for leaf in graph.leaves() {
        *by_state.entry(leaf.state.to_string()).or_insert(0) += leaf.count;
    }
    by_state
}

fn percentage(part: u64, total: u64) -> f64 {
    if total > 0 {
        (part as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ThreadState;

    fn sample() -> CallGraph {
        CallGraph::root()
            .update(&["A", "B"], ThreadState::Runnable)
            .update(&["A", "B"], ThreadState::Runnable)
            .update(&["A", "C"], ThreadState::Blocked)
            .update(&["D"], ThreadState::Waiting)
    }

    #[test]
    fn test_critical_path_steps() {
        let steps = critical_path_steps(&sample(), 4);

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].frame, "A");
        assert_eq!(steps[0].samples, 3);
        assert_eq!(steps[0].percentage, 75.0);
        assert_eq!(steps[1].frame, "B");
        assert_eq!(steps[1].percentage, 50.0);
    }

    #[test]
    fn test_samples_by_state() {
        let by_state = samples_by_state(&sample());
        assert_eq!(by_state["RUNNABLE"], 2);
        assert_eq!(by_state["BLOCKED"], 1);
        assert_eq!(by_state["WAITING"], 1);
        assert!(!by_state.contains_key("NEW"));
    }

    #[test]
    fn test_build_report() {
        let report = build_report(&sample(), "dump.txt", 3);
        assert_eq!(report.version, REPORT_SCHEMA_VERSION);
        assert_eq!(report.thread_count, 3);
        assert_eq!(report.sample_count, 4);
        assert_eq!(report.critical_path.len(), 2);
    }

    #[test]
    fn test_percentage_of_nothing() {
        assert_eq!(percentage(5, 0), 0.0);
        assert!(critical_path_steps(&CallGraph::root(), 0).is_empty());
    }
}
