//! Reduce per-thread call graphs into aggregates.
//!
//! All per-thread graphs share the `root` sentinel, so merging them yields a
//! single tree. Threads of the same pool (`pool-1-thread-1`, `pool-1-thread-2`,
//! ...) can also be merged per pool to analyze a pool as one logical actor.

use crate::graph::CallGraph;
use log::debug;
use std::collections::BTreeMap;

/// Merged call graph of the threads sharing a pool name
#[derive(Debug, Clone)]
pub struct ThreadPool {
    pub name: String,
    pub thread_count: usize,
    pub graph: CallGraph,
}

/// Merge every graph into one aggregate
///
/// **Public** - main entry point for aggregation
///
/// # Returns
/// `None` when there is nothing to merge
pub fn merge_all<'a>(graphs: impl IntoIterator<Item = &'a CallGraph>) -> Option<CallGraph> {
    let mut graphs = graphs.into_iter();
    let first = graphs.next()?.clone();

    let mut merged_count = 1usize;
    let aggregate = graphs.fold(first, |acc, graph| {
        merged_count += 1;
        acc.merge(graph)
    });

    debug!("Merged {} call graphs ({} samples)", merged_count, aggregate.total());

    Some(aggregate)
}

/// Pool name of a thread: the name without its trailing worker number
///
/// `pool-1-thread-7` -> `pool-1-thread`, `Worker #3` -> `Worker`.
/// Names without a numeric suffix are their own pool.
pub fn pool_name(thread: &str) -> &str {
    let stem = thread.trim_end_matches(|c: char| c.is_ascii_digit());
    if stem.len() == thread.len() {
        return thread;
    }

    let stem = stem
        .strip_suffix(|c: char| matches!(c, '-' | '_' | '#' | ' '))
        .unwrap_or(stem)
        .trim_end();

    if stem.is_empty() {
        thread
    } else {
        stem
    }
}

/// Merge the graphs of each pool
///
/// Pools are returned in name order.
pub fn group_by_pool(threads: &BTreeMap<String, CallGraph>) -> Vec<ThreadPool> {
    let mut pools: BTreeMap<&str, ThreadPool> = BTreeMap::new();

    for (thread, graph) in threads {
        let name = pool_name(thread);
        pools
            .entry(name)
            .and_modify(|pool| {
                pool.graph = pool.graph.merge(graph);
                pool.thread_count += 1;
            })
            .or_insert_with(|| ThreadPool {
                name: name.to_string(),
                thread_count: 1,
                graph: graph.clone(),
            });
    }

    debug!("Grouped {} threads into {} pools", threads.len(), pools.len());

    pools.into_values().collect()
}

/// Threads whose name contains `pattern` (all threads when `None`)
pub fn select_threads(
    threads: &BTreeMap<String, CallGraph>,
    pattern: Option<&str>,
) -> BTreeMap<String, CallGraph> {
    threads
        .iter()
        .filter(|(name, _)| pattern.map_or(true, |p| name.contains(p)))
        .map(|(name, graph)| (name.clone(), graph.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ThreadState;

    fn graph(stacks: &[&[&str]]) -> CallGraph {
        stacks.iter().fold(CallGraph::root(), |acc, stack| {
            acc.update(*stack, ThreadState::Runnable)
        })
    }

    #[test]
    fn test_pool_name() {
        assert_eq!(pool_name("pool-1-thread-7"), "pool-1-thread");
        assert_eq!(pool_name("http-nio-8080-exec-10"), "http-nio-8080-exec");
        assert_eq!(pool_name("Worker #3"), "Worker");
        assert_eq!(pool_name("main"), "main");
        assert_eq!(pool_name("42"), "42");
        assert_eq!(pool_name("GC task thread#0 (ParallelGC)"), "GC task thread#0 (ParallelGC)");
    }

    #[test]
    fn test_merge_all_empty() {
        let none: Vec<CallGraph> = Vec::new();
        assert!(merge_all(&none).is_none());
    }

    #[test]
    fn test_merge_all_sums_samples() {
        let graphs = vec![graph(&[&["X"]]), graph(&[&["Y"], &["Y"]]), graph(&[&["X", "Z"]])];
        let aggregate = merge_all(&graphs).unwrap();

        assert_eq!(aggregate.total(), 4);
        assert_eq!(aggregate.count(), 4);
        assert_eq!(aggregate.critical_path(), vec!["X", "Z"]);
    }

    #[test]
    fn test_group_by_pool() {
        let mut threads = BTreeMap::new();
        threads.insert("pool-1-thread-1".to_string(), graph(&[&["A"]]));
        threads.insert("pool-1-thread-2".to_string(), graph(&[&["A"], &["B"]]));
        threads.insert("main".to_string(), graph(&[&["M"]]));

        let pools = group_by_pool(&threads);
        assert_eq!(pools.len(), 2);
        assert_eq!(pools[0].name, "main");
        assert_eq!(pools[1].name, "pool-1-thread");
        assert_eq!(pools[1].thread_count, 2);
        assert_eq!(pools[1].graph.total(), 3);
    }

    #[test]
    fn test_select_threads() {
        let mut threads = BTreeMap::new();
        threads.insert("pool-1-thread-1".to_string(), graph(&[&["A"]]));
        threads.insert("main".to_string(), graph(&[&["M"]]));

        assert_eq!(select_threads(&threads, Some("pool")).len(), 1);
        assert_eq!(select_threads(&threads, None).len(), 2);
    }
}
