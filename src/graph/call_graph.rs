//! Weighted call tree built from thread-dump call stacks.
//!
//! Every node is one frame position. `count` is the number of sampled call
//! stacks that passed through the node, so for a call stack `[A, B, C]` the
//! nodes `A`, `B` and `C` each gain one sample.
//!
//! Trees are immutable. `update`, `merge` and `filter` return new trees; child
//! nodes are shared through `Arc` so an update only rebuilds the nodes along
//! the updated path, and older versions stay valid for whoever holds them.

use crate::parser::ThreadState;
use crate::utils::config::{MERGE_SEPARATOR, ROOT_NAME};
use std::collections::BTreeMap;
use std::sync::Arc;

/// One node of an aggregated call tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallGraph {
    name: String,
    state: ThreadState,
    count: u64,
    descendants: BTreeMap<String, Arc<CallGraph>>,
}

/// A root-to-leaf path of a call tree (root excluded)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct LeafPath {
    pub frames: Vec<String>,
    pub state: ThreadState,
    pub count: u64,
}

impl CallGraph {
    /// Create the empty sentinel root of a per-thread tree
    ///
    /// **Public** - starting point for `update`
    pub fn root() -> Self {
        Self::node(ROOT_NAME.to_string(), ThreadState::default(), 0)
    }

    /// Create a leaf holding a single sample
    pub fn leaf(name: impl Into<String>, state: ThreadState) -> Self {
        Self::node(name.into(), state, 1)
    }

    /// Create a node over existing children
    ///
    /// The count is the sum of the children's counts.
    pub fn with_children(
        name: impl Into<String>,
        state: ThreadState,
        children: impl IntoIterator<Item = CallGraph>,
    ) -> Self {
        let descendants: BTreeMap<String, Arc<CallGraph>> = children
            .into_iter()
            .map(|child| (child.name.clone(), Arc::new(child)))
            .collect();
        let count = descendants.values().map(|c| c.count).sum();

        Self {
            name: name.into(),
            state,
            count,
            descendants,
        }
    }

    fn node(name: String, state: ThreadState, count: u64) -> Self {
        Self {
            name,
            state,
            count,
            descendants: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// State observed at the leaf of the stacks that produced this node
    ///
    /// Only meaningful for leaves.
    pub fn state(&self) -> ThreadState {
        self.state
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn is_leaf(&self) -> bool {
        self.descendants.is_empty()
    }

    /// Child node by frame name
    pub fn child(&self, name: &str) -> Option<&CallGraph> {
        self.descendants.get(name).map(Arc::as_ref)
    }

    /// Children in name order
    pub fn children(&self) -> impl Iterator<Item = &CallGraph> {
        self.descendants.values().map(Arc::as_ref)
    }

    /// Children ranked by count (descending), ties by name (ascending)
    pub fn children_by_count(&self) -> Vec<&CallGraph> {
        let mut children: Vec<&CallGraph> = self.children().collect();
        children.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        children
    }

    /// Fold one observed call stack into the tree
    ///
    /// **Public** - main entry point for building a tree
    ///
    /// # Arguments
    /// * `stack` - Frame names, outermost (called first) to innermost
    /// * `state` - Thread state captured with the stack
    ///
    /// # Returns
    /// A new tree in which this node and every node along `stack` carry one
    /// more sample. The innermost frame records `state`.
    pub fn update<S: AsRef<str>>(&self, stack: &[S], state: ThreadState) -> CallGraph {
        let Some((head, tail)) = stack.split_first() else {
            return Self {
                name: self.name.clone(),
                state,
                count: self.count + 1,
                descendants: self.descendants.clone(),
            };
        };

        let head = head.as_ref();
        let child = match self.descendants.get(head) {
            Some(existing) => existing.update(tail, state),
            None => Self::node(head.to_string(), state, 0).update(tail, state),
        };

        let mut descendants = self.descendants.clone();
        descendants.insert(head.to_string(), Arc::new(child));

        Self {
            name: self.name.clone(),
            state: self.state,
            count: self.count + 1,
            descendants,
        }
    }

    /// Combine two trees into one aggregate
    ///
    /// **Public** - used to fold a thread pool (or a whole dump) into one tree
    ///
    /// With equal root names, children are unioned and children present on
    /// both sides are merged recursively. With different root names a
    /// synthetic root `"<a>#<b>"` is created holding both trees unchanged.
    /// In both cases the resulting count is the sum of both counts.
    pub fn merge(&self, other: &CallGraph) -> CallGraph {
        if self.name != other.name {
            let name = format!("{}{}{}", self.name, MERGE_SEPARATOR, other.name);
            let mut descendants = BTreeMap::new();
            descendants.insert(self.name.clone(), Arc::new(self.clone()));
            descendants.insert(other.name.clone(), Arc::new(other.clone()));

            return Self {
                name,
                state: ThreadState::default(),
                count: self.count + other.count,
                descendants,
            };
        }

        // Walk the smaller child map, use the larger one as the base
        let (base, smaller) = if self.descendants.len() >= other.descendants.len() {
            (self, other)
        } else {
            (other, self)
        };

        let mut descendants = base.descendants.clone();
        for (key, child) in &smaller.descendants {
            let merged = match descendants.get(key) {
                Some(existing) => Arc::new(existing.merge(child)),
                None => Arc::clone(child),
            };
            descendants.insert(key.clone(), merged);
        }

        Self {
            name: self.name.clone(),
            state: dominant_state(self, other),
            count: self.count + other.count,
            descendants,
        }
    }

    /// Frame names along the most sampled chain, root excluded
    ///
    /// At each level the child with the highest count wins; equal counts are
    /// broken by the lexicographically smallest name. A root without
    /// children yields an empty path.
    pub fn critical_path(&self) -> Vec<String> {
        self.critical_nodes()
            .into_iter()
            .map(|node| node.name.clone())
            .collect()
    }

    /// Nodes along the critical path, root excluded
    pub fn critical_nodes(&self) -> Vec<&CallGraph> {
        let mut path = Vec::new();
        let mut node = self;
        while let Some(next) = node.heaviest_child() {
            path.push(next);
            node = next;
        }
        path
    }

    fn heaviest_child(&self) -> Option<&CallGraph> {
        self.children_by_count().into_iter().next()
    }

    /// Keep only the branches whose full path satisfies `predicate`
    ///
    /// **Public** - structural filter over the tree
    ///
    /// The predicate is evaluated once per leaf and receives the nodes from
    /// the first child of this node down to the leaf. Internal nodes survive
    /// only if at least one child branch survives, and their count becomes
    /// the sum of the surviving children. Samples that ended at an internal
    /// frame are not leaves and are dropped.
    ///
    /// # Returns
    /// `None` when no branch survives, including for a tree with no children.
    pub fn filter<P>(&self, predicate: P) -> Option<CallGraph>
    where
        P: Fn(&[&CallGraph]) -> bool,
    {
        let mut path = Vec::new();
        self.prune(&mut path, &predicate)
    }

    fn prune<'a, P>(&'a self, path: &mut Vec<&'a CallGraph>, predicate: &P) -> Option<CallGraph>
    where
        P: Fn(&[&CallGraph]) -> bool,
    {
        if self.descendants.is_empty() {
            if !path.is_empty() && predicate(path.as_slice()) {
                return Some(self.clone());
            }
            return None;
        }

        let mut descendants = BTreeMap::new();
        for child in self.descendants.values() {
            path.push(child.as_ref());
            let kept = child.prune(path, predicate);
            path.pop();

            if let Some(kept) = kept {
                descendants.insert(kept.name.clone(), Arc::new(kept));
            }
        }

        if descendants.is_empty() {
            return None;
        }

        Some(Self {
            name: self.name.clone(),
            state: self.state,
            count: descendants.values().map(|c| c.count).sum(),
            descendants,
        })
    }

    /// Every sampled path with the state and count of the frame it ended at
    ///
    /// Samples that ended at a frame which also has children show up as a
    /// path ending at that frame, so the counts always add up to `total()`.
    pub fn leaves(&self) -> Vec<LeafPath> {
        let mut out = Vec::new();
        let mut frames = Vec::new();
        self.push_terminal(&frames, &mut out);
        for child in self.children() {
            child.collect_leaves(&mut frames, &mut out);
        }
        out
    }

    fn collect_leaves(&self, frames: &mut Vec<String>, out: &mut Vec<LeafPath>) {
        frames.push(self.name.clone());
        self.push_terminal(frames, out);
        for child in self.children() {
            child.collect_leaves(frames, out);
        }
        frames.pop();
    }

    fn push_terminal(&self, frames: &[String], out: &mut Vec<LeafPath>) {
        let terminal = self.terminal_count();
        if terminal > 0 {
            out.push(LeafPath {
                frames: frames.to_vec(),
                state: self.state,
                count: terminal,
            });
        }
    }

    /// Samples whose innermost frame is this node
    pub fn terminal_count(&self) -> u64 {
        let below: u64 = self.children().map(|c| c.count).sum();
        self.count.saturating_sub(below)
    }

    /// Number of samples in the tree
    pub fn total(&self) -> u64 {
        self.count
    }

    /// Number of nodes below and including this one
    pub fn node_count(&self) -> usize {
        1 + self.children().map(CallGraph::node_count).sum::<usize>()
    }

    /// Length of the longest chain below this node
    pub fn depth(&self) -> usize {
        self.children()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

impl Default for CallGraph {
    fn default() -> Self {
        Self::root()
    }
}

/// State kept when two nodes of the same name are merged
///
/// The side with more samples ending at this node wins, then the better
/// sampled side; a full tie falls back to state order so the result does not
/// depend on argument order.
fn dominant_state(a: &CallGraph, b: &CallGraph) -> ThreadState {
    let weight = |g: &CallGraph| (g.terminal_count(), g.count);
    match weight(a).cmp(&weight(b)) {
        std::cmp::Ordering::Greater => a.state,
        std::cmp::Ordering::Less => b.state,
        std::cmp::Ordering::Equal => a.state.min(b.state),
    }
}
