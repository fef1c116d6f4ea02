use std::fmt;

use trailblazer_core::{NodeId, RoadGraph};

use crate::error::SearchError;
use crate::traits::WeightedNetwork;

/// An ordered sequence of nodes from start to end, both inclusive.
///
/// The empty route means "no route found". A single-node route is the
/// successful answer for a search whose start and end coincide.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Route(Vec<NodeId>);

impl Route {
    /// The empty route.
    #[inline]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    #[inline]
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Self(nodes)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Number of roads travelled.
    #[inline]
    pub fn hops(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    #[inline]
    pub fn nodes(&self) -> &[NodeId] {
        &self.0
    }

    #[inline]
    pub fn first(&self) -> Option<NodeId> {
        self.0.first().copied()
    }

    #[inline]
    pub fn last(&self) -> Option<NodeId> {
        self.0.last().copied()
    }

    pub fn contains(&self, n: NodeId) -> bool {
        self.0.contains(&n)
    }

    /// Consecutive (from, to) pairs along the route.
    pub fn legs(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }

    /// Total cost: the sum of the road costs between consecutive nodes.
    /// Zero for empty and single-node routes.
    pub fn cost<G: WeightedNetwork + ?Sized>(&self, graph: &G) -> Result<f64, SearchError> {
        let mut total = 0.0;
        for (from, to) in self.legs() {
            let edge = graph
                .edge_between(from, to)
                .ok_or(SearchError::MissingEdge { from, to })?;
            total += edge.cost;
        }
        Ok(total)
    }

    /// Node names joined by arrows, e.g. `"a -> b -> c"`.
    pub fn describe(&self, graph: &RoadGraph) -> String {
        let names: Vec<&str> = self.0.iter().map(|&n| graph.name(n)).collect();
        names.join(" -> ")
    }

    pub fn into_vec(self) -> Vec<NodeId> {
        self.0
    }
}

impl From<Vec<NodeId>> for Route {
    fn from(nodes: Vec<NodeId>) -> Self {
        Self(nodes)
    }
}

impl<'a> IntoIterator for &'a Route {
    type Item = &'a NodeId;
    type IntoIter = std::slice::Iter<'a, NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(no route)");
        }
        for (i, n) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{n}")?;
        }
        Ok(())
    }
}
