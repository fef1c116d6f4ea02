use std::fmt;

use trailblazer_core::{EdgeId, NodeId};

use crate::error::SearchError;
use crate::observer::{NoObserver, NodeMark, SearchObserver};
use crate::route::Route;
use crate::traits::{GeoNetwork, RoadNetwork, WeightedNetwork};

/// Default divergence an alternative route needs over the primary route: the
/// share of the candidate's node count made up by primary-route nodes the
/// candidate avoids must exceed this.
pub const SUFFICIENT_DIFFERENCE: f64 = 0.2;

/// The four route searches.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Algorithm {
    BreadthFirst,
    Dijkstra,
    AStar,
    Alternative,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::BreadthFirst,
        Algorithm::Dijkstra,
        Algorithm::AStar,
        Algorithm::Alternative,
    ];
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Algorithm::BreadthFirst => "bfs",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "a*",
            Algorithm::Alternative => "alternative",
        })
    }
}

// ---------------------------------------------------------------------------
// RouteFinder
// ---------------------------------------------------------------------------

/// Entry point for route searches.
///
/// A `RouteFinder` carries configuration and an optional [`SearchObserver`];
/// it holds no search state. Every call builds its frontier, cost map and
/// closed set from scratch and drops them on return.
#[derive(Debug, Clone)]
pub struct RouteFinder<O = NoObserver> {
    pub(crate) observer: O,
    pub(crate) sufficient_difference: f64,
}

impl Default for RouteFinder<NoObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteFinder<NoObserver> {
    /// A finder with no observer and the default difference threshold.
    pub fn new() -> Self {
        Self::with_observer(NoObserver)
    }
}

impl<O: SearchObserver> RouteFinder<O> {
    /// A finder that reports discovered and expanded nodes to `observer`.
    pub fn with_observer(observer: O) -> Self {
        Self {
            observer,
            sufficient_difference: SUFFICIENT_DIFFERENCE,
        }
    }

    /// Override the divergence an alternative route needs (default
    /// [`SUFFICIENT_DIFFERENCE`]).
    pub fn with_sufficient_difference(mut self, threshold: f64) -> Self {
        self.sufficient_difference = threshold;
        self
    }

    #[inline]
    pub fn sufficient_difference(&self) -> f64 {
        self.sufficient_difference
    }

    #[inline]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    #[inline]
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Run `algorithm` from `start` to `end`.
    pub fn search<G: GeoNetwork>(
        &mut self,
        algorithm: Algorithm,
        graph: &G,
        start: NodeId,
        end: NodeId,
    ) -> Result<Route, SearchError> {
        match algorithm {
            Algorithm::BreadthFirst => self.bfs(graph, start, end),
            Algorithm::Dijkstra => self.dijkstra(graph, start, end),
            Algorithm::AStar => self.astar(graph, start, end),
            Algorithm::Alternative => self.alternative_route(graph, start, end),
        }
    }

    #[inline]
    pub(crate) fn mark(&mut self, node: NodeId, mark: NodeMark) {
        self.observer.mark(node, mark);
    }
}

// ---------------------------------------------------------------------------
// Collaborator checks shared by the searches
// ---------------------------------------------------------------------------

/// Fail unless both endpoints belong to the network.
pub(crate) fn check_endpoints<G: RoadNetwork>(graph: &G, start: NodeId, end: NodeId) -> Result<(), SearchError> {
    let n = graph.node_count();
    for id in [start, end] {
        if id.index() >= n {
            return Err(SearchError::UnknownNode(id));
        }
    }
    Ok(())
}

/// Fill `buf` with the neighbors of `u`, rejecting ids outside the network.
pub(crate) fn expand<G: RoadNetwork>(graph: &G, u: NodeId, buf: &mut Vec<NodeId>) -> Result<(), SearchError> {
    buf.clear();
    graph.neighbors(u, buf);
    let n = graph.node_count();
    match buf.iter().find(|v| v.index() >= n) {
        Some(&v) => Err(SearchError::UnknownNode(v)),
        None => Ok(()),
    }
}

/// Cost of the road from `u` to `v`, or `None` if that road is `excluded`.
pub(crate) fn road_cost<G: WeightedNetwork>(
    graph: &G,
    u: NodeId,
    v: NodeId,
    excluded: Option<EdgeId>,
) -> Result<Option<f64>, SearchError> {
    let edge = graph
        .edge_between(u, v)
        .ok_or(SearchError::MissingEdge { from: u, to: v })?;
    if excluded == Some(edge.id) {
        return Ok(None);
    }
    // Rejects NaN as well as negatives.
    if !(edge.cost >= 0.0) {
        return Err(SearchError::InvalidCost {
            from: u,
            to: v,
            cost: edge.cost,
        });
    }
    Ok(Some(edge.cost))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Edge;

    /// Hand-built network that breaks the collaborator contract on purpose.
    struct Broken {
        neighbors: Vec<Vec<NodeId>>,
        cost: f64,
    }

    impl RoadNetwork for Broken {
        fn node_count(&self) -> usize {
            self.neighbors.len()
        }
        fn neighbors(&self, n: NodeId, buf: &mut Vec<NodeId>) {
            buf.extend(self.neighbors[n.index()].iter().copied());
        }
    }

    impl WeightedNetwork for Broken {
        fn edge_between(&self, from: NodeId, to: NodeId) -> Option<Edge> {
            // Only roads out of node 0 exist.
            (from.0 == 0 || to.0 == 0).then_some(Edge {
                id: EdgeId(from.0 + to.0),
                cost: self.cost,
            })
        }
    }

    #[test]
    fn endpoints_must_exist() {
        let g = Broken {
            neighbors: vec![vec![], vec![]],
            cost: 1.0,
        };
        assert_eq!(check_endpoints(&g, NodeId(0), NodeId(1)), Ok(()));
        assert_eq!(
            check_endpoints(&g, NodeId(0), NodeId(2)),
            Err(SearchError::UnknownNode(NodeId(2)))
        );
    }

    #[test]
    fn expand_rejects_foreign_neighbors() {
        let g = Broken {
            neighbors: vec![vec![NodeId(1), NodeId(9)], vec![]],
            cost: 1.0,
        };
        let mut buf = vec![NodeId(4)];
        assert_eq!(expand(&g, NodeId(0), &mut buf), Err(SearchError::UnknownNode(NodeId(9))));
        assert_eq!(expand(&g, NodeId(1), &mut buf), Ok(()));
        assert!(buf.is_empty());
    }

    #[test]
    fn road_cost_checks() {
        let g = Broken {
            neighbors: vec![vec![], vec![], vec![]],
            cost: -1.0,
        };
        assert_eq!(
            road_cost(&g, NodeId(1), NodeId(2), None),
            Err(SearchError::MissingEdge {
                from: NodeId(1),
                to: NodeId(2)
            })
        );
        assert!(matches!(
            road_cost(&g, NodeId(0), NodeId(1), None),
            Err(SearchError::InvalidCost { .. })
        ));
        // An excluded road is skipped before its cost is inspected.
        assert_eq!(road_cost(&g, NodeId(0), NodeId(1), Some(EdgeId(1))), Ok(None));
    }

    #[test]
    fn builder_settings() {
        let f = RouteFinder::new().with_sufficient_difference(0.5);
        assert_eq!(f.sufficient_difference(), 0.5);
        assert_eq!(RouteFinder::default().sufficient_difference(), SUFFICIENT_DIFFERENCE);
    }

    #[test]
    fn algorithm_names() {
        let names: Vec<String> = Algorithm::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["bfs", "dijkstra", "a*", "alternative"]);
    }
}
