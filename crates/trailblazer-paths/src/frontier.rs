use std::cmp::Ordering;
use std::collections::BinaryHeap;

use trailblazer_core::NodeId;

use crate::route::Route;

/// Link index meaning "no parent".
const ROOT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Trail: append-only store of route prefixes
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
struct Link {
    node: NodeId,
    parent: usize,
}

/// Append-only arena of route prefixes.
///
/// Each link records a node and the link of the route it extends, so a link
/// index stands for the whole route from the start to that node. Extending
/// never touches existing links: two frontier entries that share a prefix
/// keep independent routes.
#[derive(Default)]
pub(crate) struct Trail {
    links: Vec<Link>,
}

impl Trail {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The one-node route `[node]`.
    pub(crate) fn start(&mut self, node: NodeId) -> usize {
        self.extend(ROOT, node)
    }

    /// The route of `parent` followed by `node`.
    pub(crate) fn extend(&mut self, parent: usize, node: NodeId) -> usize {
        self.links.push(Link { node, parent });
        self.links.len() - 1
    }

    /// Materialize the route ending at `link`.
    pub(crate) fn route(&self, link: usize) -> Route {
        let mut nodes = Vec::new();
        let mut li = link;
        while li != ROOT {
            let l = self.links[li];
            nodes.push(l.node);
            li = l.parent;
        }
        nodes.reverse();
        Route::new(nodes)
    }
}

// ---------------------------------------------------------------------------
// Frontier entries and the priority frontier
// ---------------------------------------------------------------------------

/// A frontier entry: the current node and the trail link of its route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Entry {
    pub(crate) node: NodeId,
    pub(crate) link: usize,
}

/// Entry queued at a priority, with the path cost it was pushed with.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Queued {
    pub(crate) entry: Entry,
    pub(crate) priority: f64,
    pub(crate) cost: f64,
    seq: u64,
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest priority first, and
        // the earliest push among equal priorities.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Queued {}

/// Min-priority frontier with first-in-first-out tie breaking.
#[derive(Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Queued>,
    seq: u64,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: Entry, priority: f64, cost: f64) {
        self.heap.push(Queued {
            entry,
            priority,
            cost,
            seq: self.seq,
        });
        self.seq += 1;
    }

    pub(crate) fn pop(&mut self) -> Option<Queued> {
        self.heap.pop()
    }

    /// Total number of pushes so far.
    pub(crate) fn pushed(&self) -> u64 {
        self.seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trail_branches_do_not_share_state() {
        let mut trail = Trail::new();
        let s = trail.start(NodeId(0));
        let a = trail.extend(s, NodeId(1));
        let b = trail.extend(s, NodeId(2));
        let a2 = trail.extend(a, NodeId(3));
        assert_eq!(trail.route(s).nodes(), &[NodeId(0)]);
        assert_eq!(trail.route(a).nodes(), &[NodeId(0), NodeId(1)]);
        assert_eq!(trail.route(b).nodes(), &[NodeId(0), NodeId(2)]);
        assert_eq!(trail.route(a2).nodes(), &[NodeId(0), NodeId(1), NodeId(3)]);
    }

    #[test]
    fn frontier_pops_smallest_priority() {
        let mut f = Frontier::new();
        for (i, p) in [5.0, 1.0, 3.0, 0.5].into_iter().enumerate() {
            f.push(Entry { node: NodeId(i as u32), link: i }, p, p);
        }
        let order: Vec<u32> = std::iter::from_fn(|| f.pop()).map(|q| q.entry.node.0).collect();
        assert_eq!(order, vec![3, 1, 2, 0]);
        assert_eq!(f.pushed(), 4);
    }

    #[test]
    fn frontier_ties_are_fifo() {
        let mut f = Frontier::new();
        for i in 0..5 {
            f.push(Entry { node: NodeId(i), link: 0 }, 2.0, 2.0);
        }
        let order: Vec<u32> = std::iter::from_fn(|| f.pop()).map(|q| q.entry.node.0).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn zero_priority_is_a_real_priority() {
        let mut f = Frontier::new();
        f.push(Entry { node: NodeId(1), link: 0 }, 0.0, 0.0);
        f.push(Entry { node: NodeId(2), link: 0 }, f64::INFINITY, 0.0);
        f.push(Entry { node: NodeId(3), link: 0 }, 1e-9, 0.0);
        assert_eq!(f.pop().map(|q| q.entry.node), Some(NodeId(1)));
        assert_eq!(f.pop().map(|q| q.entry.node), Some(NodeId(3)));
        assert_eq!(f.pop().map(|q| q.entry.node), Some(NodeId(2)));
        assert!(f.pop().is_none());
    }
}
