use trailblazer_core::{EdgeId, NodeId, RoadGraph};

/// A road as seen by a search: its identity and traversal cost.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub cost: f64,
}

/// Minimal search interface: node arena size and neighbor enumeration.
pub trait RoadNetwork {
    /// Number of nodes. Valid ids are `0..node_count()`.
    fn node_count(&self) -> usize;

    /// Append neighbors of `n` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, n: NodeId, buf: &mut Vec<NodeId>);
}

/// Network with costed, undirected roads.
pub trait WeightedNetwork: RoadNetwork {
    /// The road joining `from` and `to`. Both directions return the same edge.
    /// Must be `Some` for every pair reported by [`RoadNetwork::neighbors`],
    /// with a non-negative cost.
    fn edge_between(&self, from: NodeId, to: NodeId) -> Option<Edge>;
}

/// Network with node geometry, required for A*.
pub trait GeoNetwork: WeightedNetwork {
    /// Straight-line distance between two nodes.
    fn crow_fly_distance(&self, from: NodeId, to: NodeId) -> f64;

    /// Upper bound on distance travelled per unit of cost over any road.
    /// Must be positive; `crow_fly_distance / max_road_speed` has to be a
    /// lower bound on the cost between two nodes (admissible).
    fn max_road_speed(&self) -> f64;
}

impl RoadNetwork for RoadGraph {
    #[inline]
    fn node_count(&self) -> usize {
        RoadGraph::node_count(self)
    }

    fn neighbors(&self, n: NodeId, buf: &mut Vec<NodeId>) {
        buf.extend(self.neighbors_of(n));
    }
}

impl WeightedNetwork for RoadGraph {
    fn edge_between(&self, from: NodeId, to: NodeId) -> Option<Edge> {
        let id = RoadGraph::edge_between(self, from, to)?;
        let cost = self.edge(id)?.cost;
        Some(Edge { id, cost })
    }
}

impl GeoNetwork for RoadGraph {
    fn crow_fly_distance(&self, from: NodeId, to: NodeId) -> f64 {
        // Unknown nodes never reach the heuristic; zero keeps it admissible anyway.
        RoadGraph::crow_fly_distance(self, from, to).unwrap_or(0.0)
    }

    #[inline]
    fn max_road_speed(&self) -> f64 {
        RoadGraph::max_road_speed(self)
    }
}
