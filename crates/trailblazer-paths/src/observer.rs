use std::collections::HashSet;

use trailblazer_core::NodeId;

/// What happened to a node during a search.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NodeMark {
    /// Pushed onto the frontier.
    Discovered,
    /// Popped from the frontier and expanded (or found to be the goal).
    Expanded,
}

/// Hook notified as a search discovers and expands nodes.
///
/// Observers only watch: nothing they do changes the route a search returns.
pub trait SearchObserver {
    fn mark(&mut self, node: NodeId, mark: NodeMark);
}

/// Observer that ignores everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoObserver;

impl SearchObserver for NoObserver {
    #[inline]
    fn mark(&mut self, _node: NodeId, _mark: NodeMark) {}
}

impl<F: FnMut(NodeId, NodeMark)> SearchObserver for F {
    #[inline]
    fn mark(&mut self, node: NodeId, mark: NodeMark) {
        self(node, mark)
    }
}

/// Observer that records every mark in order.
#[derive(Clone, Debug, Default)]
pub struct SearchTrace {
    marks: Vec<(NodeId, NodeMark)>,
}

impl SearchTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// All marks, in the order they were made.
    pub fn marks(&self) -> &[(NodeId, NodeMark)] {
        &self.marks
    }

    /// Nodes in the order they were expanded, repeats included.
    pub fn expanded(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.only(NodeMark::Expanded)
    }

    /// Nodes in the order they were discovered, repeats included.
    pub fn discovered(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.only(NodeMark::Discovered)
    }

    /// Set of distinct expanded nodes.
    pub fn expanded_set(&self) -> HashSet<NodeId> {
        self.expanded().collect()
    }

    pub fn distinct_expanded(&self) -> usize {
        self.expanded_set().len()
    }

    pub fn clear(&mut self) {
        self.marks.clear();
    }

    fn only(&self, mark: NodeMark) -> impl Iterator<Item = NodeId> + '_ {
        self.marks
            .iter()
            .filter(move |&&(_, m)| m == mark)
            .map(|&(n, _)| n)
    }
}

impl SearchObserver for SearchTrace {
    fn mark(&mut self, node: NodeId, mark: NodeMark) {
        self.marks.push((node, mark));
    }
}
