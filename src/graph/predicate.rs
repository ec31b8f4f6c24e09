//! Ready-made path predicates for `CallGraph::filter`.
//!
//! A predicate sees the nodes from the first child of the filtered node down
//! to a leaf; the last element is the leaf.

use super::call_graph::CallGraph;
use crate::parser::ThreadState;

/// Boxed predicate, for combining predicates chosen at runtime
pub type PathPredicate = Box<dyn Fn(&[&CallGraph]) -> bool>;

/// Leaf was sampled in `state`
pub fn leaf_in_state(state: ThreadState) -> impl Fn(&[&CallGraph]) -> bool {
    move |path: &[&CallGraph]| path.last().is_some_and(|leaf| leaf.state() == state)
}

/// Every frame on the path contains `needle`
pub fn every_frame_contains(needle: impl Into<String>) -> impl Fn(&[&CallGraph]) -> bool {
    let needle = needle.into();
    move |path: &[&CallGraph]| path.iter().all(|node| node.name().contains(needle.as_str()))
}

/// At least one frame on the path contains `needle`
pub fn any_frame_contains(needle: impl Into<String>) -> impl Fn(&[&CallGraph]) -> bool {
    let needle = needle.into();
    move |path: &[&CallGraph]| path.iter().any(|node| node.name().contains(needle.as_str()))
}

/// All predicates hold (true for an empty list)
pub fn all_of(predicates: Vec<PathPredicate>) -> impl Fn(&[&CallGraph]) -> bool {
    move |path: &[&CallGraph]| predicates.iter().all(|p| p(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CallGraph {
        CallGraph::root()
            .update(&["app.Main.main", "app.Pool.take"], ThreadState::TimedWaiting)
            .update(&["app.Main.main", "java.Io.read"], ThreadState::Runnable)
    }

    #[test]
    fn test_every_frame_contains() {
        let kept = sample().filter(every_frame_contains("app.")).unwrap();
        assert_eq!(kept.critical_path(), vec!["app.Main.main", "app.Pool.take"]);
        assert_eq!(kept.total(), 1);
    }

    #[test]
    fn test_any_frame_contains() {
        let kept = sample().filter(any_frame_contains("java.")).unwrap();
        assert_eq!(kept.critical_path(), vec!["app.Main.main", "java.Io.read"]);
    }

    #[test]
    fn test_all_of_combines() {
        let both = all_of(vec![
            Box::new(leaf_in_state(ThreadState::TimedWaiting)) as PathPredicate,
            Box::new(every_frame_contains("app.")) as PathPredicate,
        ]);
        assert!(sample().filter(both).is_some());

        let none = all_of(vec![
            Box::new(leaf_in_state(ThreadState::Runnable)) as PathPredicate,
            Box::new(every_frame_contains("app.")) as PathPredicate,
        ]);
        assert!(sample().filter(none).is_none());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let once = sample().filter(leaf_in_state(ThreadState::Runnable)).unwrap();
        let twice = once.filter(leaf_in_state(ThreadState::Runnable)).unwrap();
        assert_eq!(once, twice);
    }
}
