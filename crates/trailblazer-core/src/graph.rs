//! The road network: an arena of named nodes joined by undirected, costed
//! roads.
//!
//! Nodes and roads are addressed by the stable indices [`NodeId`] and
//! [`EdgeId`]. A graph is assembled with [`RoadGraphBuilder`], which validates
//! every road up front so searches never meet a negative or NaN cost.

use std::collections::HashMap;
use std::fmt;

use crate::geom::{Metric, Position};

// ---------------------------------------------------------------------------
// Identities
// ---------------------------------------------------------------------------

/// Index of a node in its [`RoadGraph`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create an id from a raw index.
    #[inline]
    pub const fn new(idx: u32) -> Self {
        Self(idx)
    }

    /// The arena index as a `usize`.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Index of a road in its [`RoadGraph`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EdgeId(pub u32);

impl EdgeId {
    /// The arena index as a `usize`.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Nodes and roads
// ---------------------------------------------------------------------------

/// A named location.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadNode {
    pub name: String,
    pub pos: Position,
}

/// An undirected road between two nodes.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadEdge {
    pub a: NodeId,
    pub b: NodeId,
    /// Traversal cost, always finite and non-negative.
    pub cost: f64,
}

impl RoadEdge {
    /// The endpoint opposite to `n`, or `None` if `n` is not an endpoint.
    #[inline]
    pub fn other(&self, n: NodeId) -> Option<NodeId> {
        if n == self.a {
            Some(self.b)
        } else if n == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    /// Whether the road joins `x` and `y`, in either direction.
    #[inline]
    pub fn connects(&self, x: NodeId, y: NodeId) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while assembling a [`RoadGraph`].
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// A road endpoint does not exist.
    UnknownNode(NodeId),
    /// Two nodes were given the same name.
    DuplicateName(String),
    /// A node position has a NaN or infinite coordinate.
    InvalidPosition { name: String, pos: Position },
    /// A road starts and ends at the same node.
    SelfLoop(NodeId),
    /// A road between these nodes already exists.
    DuplicateRoad { a: NodeId, b: NodeId },
    /// A road cost is negative or NaN.
    InvalidCost { a: NodeId, b: NodeId, cost: f64 },
    /// The declared maximum road speed is not strictly positive.
    InvalidSpeed(f64),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode(n) => write!(f, "road graph: unknown node {n}"),
            Self::DuplicateName(name) => write!(f, "road graph: duplicate node name \u{201c}{name}\u{201d}"),
            Self::InvalidPosition { name, pos } => {
                write!(f, "road graph: node \u{201c}{name}\u{201d} has invalid position {pos}")
            }
            Self::SelfLoop(n) => write!(f, "road graph: road from {n} to itself"),
            Self::DuplicateRoad { a, b } => write!(f, "road graph: duplicate road {a} - {b}"),
            Self::InvalidCost { a, b, cost } => {
                write!(f, "road graph: road {a} - {b} has invalid cost {cost}")
            }
            Self::InvalidSpeed(s) => write!(f, "road graph: invalid maximum road speed {s}"),
        }
    }
}

impl std::error::Error for GraphError {}

// ---------------------------------------------------------------------------
// RoadGraph
// ---------------------------------------------------------------------------

/// An immutable, validated road network.
#[derive(Clone, Debug)]
pub struct RoadGraph {
    nodes: Vec<RoadNode>,
    edges: Vec<RoadEdge>,
    adjacency: Vec<Vec<(NodeId, EdgeId)>>,
    names: HashMap<String, NodeId>,
    metric: Metric,
    max_road_speed: f64,
}

impl RoadGraph {
    /// Start assembling a new graph.
    pub fn builder() -> RoadGraphBuilder {
        RoadGraphBuilder::new()
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn contains(&self, n: NodeId) -> bool {
        n.index() < self.nodes.len()
    }

    #[inline]
    pub fn node(&self, n: NodeId) -> Option<&RoadNode> {
        self.nodes.get(n.index())
    }

    #[inline]
    pub fn edge(&self, e: EdgeId) -> Option<&RoadEdge> {
        self.edges.get(e.index())
    }

    /// Look a node up by name.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    /// Name of `n`, or `"?"` for an unknown node.
    pub fn name(&self, n: NodeId) -> &str {
        self.node(n).map_or("?", |node| node.name.as_str())
    }

    /// Iterate over all nodes with their ids.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &RoadNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }

    /// Iterate over all roads with their ids.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &RoadEdge)> {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, edge)| (EdgeId(i as u32), edge))
    }

    /// The (neighbor, road) pairs leaving `n`, in insertion order. Empty for an
    /// unknown node.
    pub fn roads_of(&self, n: NodeId) -> &[(NodeId, EdgeId)] {
        self.adjacency.get(n.index()).map_or(&[], Vec::as_slice)
    }

    /// Neighbors of `n`, in road insertion order.
    pub fn neighbors_of(&self, n: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.roads_of(n).iter().map(|&(m, _)| m)
    }

    /// The road joining `a` and `b`, in either direction.
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        self.roads_of(a)
            .iter()
            .find(|&&(m, _)| m == b)
            .map(|&(_, e)| e)
    }

    /// Straight-line distance between two nodes under the graph's metric.
    pub fn crow_fly_distance(&self, a: NodeId, b: NodeId) -> Option<f64> {
        let pa = self.node(a)?.pos;
        let pb = self.node(b)?.pos;
        Some(self.metric.distance(pa, pb))
    }

    /// Upper bound on how fast any road can be travelled (distance per unit
    /// of cost).
    #[inline]
    pub fn max_road_speed(&self) -> f64 {
        self.max_road_speed
    }

    #[inline]
    pub fn metric(&self) -> Metric {
        self.metric
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Incrementally assembles a [`RoadGraph`].
#[derive(Debug, Default)]
pub struct RoadGraphBuilder {
    nodes: Vec<RoadNode>,
    edges: Vec<RoadEdge>,
    adjacency: Vec<Vec<(NodeId, EdgeId)>>,
    names: HashMap<String, NodeId>,
    metric: Metric,
    max_road_speed: Option<f64>,
}

impl RoadGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select how crow-fly distances are measured.
    pub fn metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Declare the global maximum road speed. Without it, [`build`] derives
    /// the fastest speed over all roads.
    ///
    /// [`build`]: RoadGraphBuilder::build
    pub fn max_road_speed(mut self, speed: f64) -> Self {
        self.max_road_speed = Some(speed);
        self
    }

    /// Add a named node.
    pub fn add_node(&mut self, name: impl Into<String>, pos: Position) -> Result<NodeId, GraphError> {
        let name = name.into();
        if !pos.is_finite() {
            return Err(GraphError::InvalidPosition { name, pos });
        }
        if self.names.contains_key(&name) {
            return Err(GraphError::DuplicateName(name));
        }
        let id = NodeId(self.nodes.len() as u32);
        self.names.insert(name.clone(), id);
        self.nodes.push(RoadNode { name, pos });
        self.adjacency.push(Vec::new());
        Ok(id)
    }

    /// Add an undirected road between `a` and `b`.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, cost: f64) -> Result<EdgeId, GraphError> {
        for n in [a, b] {
            if n.index() >= self.nodes.len() {
                return Err(GraphError::UnknownNode(n));
            }
        }
        if a == b {
            return Err(GraphError::SelfLoop(a));
        }
        // Rejects NaN as well as negatives.
        if !(cost >= 0.0) || cost.is_infinite() {
            return Err(GraphError::InvalidCost { a, b, cost });
        }
        if self.adjacency[a.index()].iter().any(|&(m, _)| m == b) {
            return Err(GraphError::DuplicateRoad { a, b });
        }
        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(RoadEdge { a, b, cost });
        self.adjacency[a.index()].push((b, id));
        self.adjacency[b.index()].push((a, id));
        Ok(id)
    }

    /// Add a road whose cost is the crow-fly length divided by `speed`.
    pub fn add_road_at_speed(&mut self, a: NodeId, b: NodeId, speed: f64) -> Result<EdgeId, GraphError> {
        if !(speed > 0.0) {
            return Err(GraphError::InvalidSpeed(speed));
        }
        let len = self.length(a, b)?;
        self.add_road(a, b, len / speed)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn length(&self, a: NodeId, b: NodeId) -> Result<f64, GraphError> {
        let pa = self.nodes.get(a.index()).ok_or(GraphError::UnknownNode(a))?.pos;
        let pb = self.nodes.get(b.index()).ok_or(GraphError::UnknownNode(b))?.pos;
        Ok(self.metric.distance(pa, pb))
    }

    /// The fastest speed any road allows. Zero-cost roads of positive length
    /// make it infinite.
    fn fastest_speed(&self) -> f64 {
        let mut fastest = 0.0_f64;
        for e in &self.edges {
            let len = self.metric.distance(self.nodes[e.a.index()].pos, self.nodes[e.b.index()].pos);
            if len == 0.0 {
                continue;
            }
            let speed = if e.cost == 0.0 { f64::INFINITY } else { len / e.cost };
            fastest = fastest.max(speed);
        }
        fastest
    }

    /// Finish the graph.
    pub fn build(self) -> Result<RoadGraph, GraphError> {
        let fastest = self.fastest_speed();
        let max_road_speed = match self.max_road_speed {
            Some(s) if !(s > 0.0) => return Err(GraphError::InvalidSpeed(s)),
            Some(s) => {
                if fastest > s {
                    log::warn!(
                        "declared max road speed {s} is below the fastest road ({fastest}); \
                         A* may return suboptimal routes"
                    );
                }
                s
            }
            None if fastest > 0.0 => fastest,
            None => 1.0,
        };
        log::debug!(
            "built road graph: {} nodes, {} roads, max speed {max_road_speed}",
            self.nodes.len(),
            self.edges.len()
        );
        Ok(RoadGraph {
            nodes: self.nodes,
            edges: self.edges,
            adjacency: self.adjacency,
            names: self.names,
            metric: self.metric,
            max_road_speed,
        })
    }
}
