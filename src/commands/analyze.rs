//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Parses the thread dump into one call graph per thread
//! 2. Merges the selected threads into one aggregate
//! 3. Applies the optional state / frame filters
//! 4. Computes the critical path and writes the outputs

use super::models::AnalyzeArgs;
use crate::aggregator::{build_report, group_by_pool, merge_all, select_threads, CriticalPathReport};
use crate::graph::{all_of, every_frame_contains, leaf_in_state, CallGraph, PathPredicate};
use crate::output::{
    format_critical_path, format_critical_path_with_counts, print_critical_path, write_report,
};
use crate::parser::parse_dump_file;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::time::Instant;

/// Result of analyzing one dump
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Aggregate after filtering; `None` when no thread or no branch is left
    pub aggregate: Option<CallGraph>,

    /// Report for the aggregate
    pub report: Option<CriticalPathReport>,

    /// Console rendering of the critical path
    pub rendered: String,
}

/// Analyze a dump without printing or writing anything
///
/// **Public** - used by `execute_analyze` and by tests
///
/// # Errors
/// * Missing or unreadable dump file
/// * Unknown thread state token in the dump
pub fn analyze(args: &AnalyzeArgs) -> Result<Analysis> {
    let dump = parse_dump_file(&args.dump)
        .with_context(|| format!("Failed to parse thread dump {}", args.dump.display()))?;

    let threads = select_threads(&dump.threads, args.thread_filter.as_deref());
    info!(
        "Selected {} of {} threads ({} sections)",
        threads.len(),
        dump.thread_count(),
        dump.sections
    );

    if args.group_pools {
        for pool in group_by_pool(&threads) {
            info!(
                "Pool {} ({} threads): {}",
                pool.name,
                pool.thread_count,
                pool.graph.critical_path().join(" > ")
            );
        }
    }

    let Some(aggregate) = merge_all(threads.values()) else {
        warn!("No thread stacks found in {}", args.dump.display());
        return Ok(Analysis {
            aggregate: None,
            report: None,
            rendered: String::new(),
        });
    };

    let Some(aggregate) = apply_filters(aggregate, args) else {
        warn!("No call stack matched the requested filters");
        return Ok(Analysis {
            aggregate: None,
            report: None,
            rendered: String::new(),
        });
    };

    let source = args.dump.display().to_string();
    let report = build_report(&aggregate, &source, threads.len());

    let rendered = if args.show_counts {
        format_critical_path_with_counts(&report.critical_path)
    } else {
        format_critical_path(&aggregate.critical_path())
    };

    Ok(Analysis {
        aggregate: Some(aggregate),
        report: Some(report),
        rendered,
    })
}

/// Filter the aggregate with the predicates requested on the command line
///
/// **Private** - internal helper for analyze
fn apply_filters(aggregate: CallGraph, args: &AnalyzeArgs) -> Option<CallGraph> {
    let mut predicates: Vec<PathPredicate> = Vec::new();

    if let Some(state) = args.state {
        debug!("Filtering on leaf state {}", state);
        predicates.push(Box::new(leaf_in_state(state)));
    }

    if let Some(needle) = &args.frame_contains {
        debug!("Filtering on frames containing {:?}", needle);
        predicates.push(Box::new(every_frame_contains(needle.clone())));
    }

    if predicates.is_empty() {
        return Some(aggregate);
    }

    aggregate.filter(all_of(predicates))
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// Prints the critical path to stdout and writes the JSON report if asked.
pub fn execute_analyze(args: AnalyzeArgs) -> Result<()> {
    let start_time = Instant::now();

    let analysis = analyze(&args)?;

    print_critical_path(&analysis.rendered).context("Failed to print critical path")?;

    if let (Some(report), Some(json_path)) = (&analysis.report, &args.output_json) {
        write_report(report, json_path).context("Failed to write JSON report")?;
        info!("✓ Report written to: {}", json_path.display());
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.dump.as_os_str().is_empty() {
        anyhow::bail!("Dump path cannot be empty");
    }

    if args.thread_filter.as_deref() == Some("") {
        anyhow::bail!("Thread filter cannot be empty");
    }

    if args.frame_contains.as_deref() == Some("") {
        anyhow::bail!("Frame filter cannot be empty");
    }

    if let Some(json_path) = &args.output_json {
        if json_path == &args.dump {
            anyhow::bail!("JSON report would overwrite the dump file");
        }
    }

    Ok(())
}
