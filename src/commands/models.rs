use crate::parser::ThreadState;
use std::path::PathBuf;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Thread dump to analyze
    pub dump: PathBuf,

    /// Only threads whose name contains this substring
    pub thread_filter: Option<String>,

    /// Keep only branches whose leaf is in this state
    pub state: Option<ThreadState>,

    /// Keep only branches whose every frame contains this substring
    pub frame_contains: Option<String>,

    /// Log the critical path of every thread pool
    pub group_pools: bool,

    /// Output path for the JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Print sample counts next to each frame
    pub show_counts: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            dump: PathBuf::new(),
            thread_filter: None,
            state: None,
            frame_contains: None,
            group_pools: false,
            output_json: None,
            show_counts: false,
        }
    }
}
