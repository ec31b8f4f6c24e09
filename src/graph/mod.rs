//! Call-graph tree and the operations built on it.
//!
//! This module provides:
//! - `CallGraph`: immutable weighted call tree (`update`, `merge`, `critical_path`, `filter`)
//! - Frame name accessors (package, class, method, file, line)
//! - Path predicates for filtering

pub mod call_graph;
pub mod frame;
pub mod predicate;

// Re-export main types
pub use call_graph::{CallGraph, LeafPath};
pub use frame::FrameDescriptor;
pub use predicate::{all_of, any_frame_contains, every_frame_contains, leaf_in_state, PathPredicate};
