//! Per-search bookkeeping: best-known costs and finalized nodes.

use trailblazer_core::NodeId;

/// Best cumulative cost recorded per node. `None` means nothing has been
/// recorded, which is distinct from a recorded cost of zero.
pub(crate) struct CostMap {
    costs: Vec<Option<f64>>,
}

impl CostMap {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            costs: vec![None; len],
        }
    }

    #[inline]
    pub(crate) fn get(&self, n: NodeId) -> Option<f64> {
        self.costs.get(n.index()).copied().flatten()
    }

    #[inline]
    pub(crate) fn record(&mut self, n: NodeId, cost: f64) {
        if let Some(slot) = self.costs.get_mut(n.index()) {
            *slot = Some(cost);
        }
    }

    /// Whether `cost` is strictly below the recorded cost of `n`, or nothing
    /// is recorded yet.
    #[inline]
    pub(crate) fn improves(&self, n: NodeId, cost: f64) -> bool {
        self.get(n).is_none_or(|old| cost < old)
    }
}

/// Nodes whose cost is final. Membership only grows.
pub(crate) struct ClosedSet {
    closed: Vec<bool>,
    len: usize,
}

impl ClosedSet {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            closed: vec![false; len],
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn contains(&self, n: NodeId) -> bool {
        self.closed.get(n.index()).copied().unwrap_or(false)
    }

    /// Add `n`. Returns `true` if it was not already present.
    pub(crate) fn insert(&mut self, n: NodeId) -> bool {
        match self.closed.get_mut(n.index()) {
            Some(slot) if !*slot => {
                *slot = true;
                self.len += 1;
                true
            }
            _ => false,
        }
    }

    /// Number of members.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }
}
