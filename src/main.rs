//! Stackpath CLI
//!
//! Reads a thread dump and prints its critical path, one ` + frame` line per
//! frame from the outermost call down to the most sampled leaf.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use stackpath::commands::{execute_analyze, validate_args, AnalyzeArgs};
use stackpath::parser::ThreadState;
use stackpath::utils::config::USAGE;

/// Stackpath - critical-path analysis for thread dumps
#[derive(Parser, Debug)]
#[command(name = "stackpath")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Thread dump file (jstack / kill -3 output)
    dump: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Only analyze threads whose name contains this text
    #[arg(long)]
    thread: Option<String>,

    /// Log the critical path of each thread pool
    #[arg(long)]
    group_pools: bool,

    /// Keep only stacks whose leaf is in this state (e.g. TIMED_WAITING)
    #[arg(long)]
    state: Option<String>,

    /// Keep only stacks whose every frame contains this text
    #[arg(long)]
    frame_contains: Option<String>,

    /// Output path for a JSON report (optional)
    #[arg(long)]
    json: Option<PathBuf>,

    /// Print sample counts next to each frame
    #[arg(long)]
    counts: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let Some(dump) = cli.dump else {
        println!("{}", USAGE);
        return Ok(());
    };

    let state = cli.state.as_deref().map(ThreadState::parse).transpose()?;

    let args = AnalyzeArgs {
        dump,
        thread_filter: cli.thread,
        state,
        frame_contains: cli.frame_contains,
        group_pools: cli.group_pools,
        output_json: cli.json,
        show_counts: cli.counts,
    };

    // Validate args first
    validate_args(&args)?;

    execute_analyze(args)
}
