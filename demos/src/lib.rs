//! Shared pieces of the `trailblazer` command-line demo: the JSON map file
//! format and the per-search report.
//!
//! A map file looks like:
//!
//! ```json
//! {
//!   "metric": "euclidean",
//!   "max_road_speed": 2.0,
//!   "nodes": [ { "name": "gates", "x": 0.0, "y": 0.0 }, ... ],
//!   "roads": [ { "from": "gates", "to": "packard", "cost": 1.5 }, ... ]
//! }
//! ```
//!
//! `metric` and `max_road_speed` are optional. A road without a `cost`
//! costs its crow-fly length.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use trailblazer_core::{GraphError, Metric, NodeId, Position, RoadGraph};
use trailblazer_paths::{Algorithm, Route, RouteFinder, SearchError, SearchTrace};

// ---------------------------------------------------------------------------
// Map files
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapFile {
    #[serde(default)]
    pub metric: Metric,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_road_speed: Option<f64>,
    pub nodes: Vec<MapNode>,
    #[serde(default)]
    pub roads: Vec<MapRoad>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapNode {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapRoad {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

/// Errors raised while reading a map file.
#[derive(Debug)]
pub enum MapFileError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// A road names a node that is not declared.
    UnknownName(String),
    Graph(GraphError),
}

impl fmt::Display for MapFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "map file: {e}"),
            Self::Json(e) => write!(f, "map file: {e}"),
            Self::UnknownName(name) => write!(f, "map file: road uses undeclared node \u{201c}{name}\u{201d}"),
            Self::Graph(e) => write!(f, "map file: {e}"),
        }
    }
}

impl std::error::Error for MapFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::UnknownName(_) => None,
            Self::Graph(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for MapFileError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for MapFileError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<GraphError> for MapFileError {
    fn from(e: GraphError) -> Self {
        Self::Graph(e)
    }
}

impl MapFile {
    /// Parse a map from JSON text.
    pub fn parse(json: &str) -> Result<Self, MapFileError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a map from a JSON file.
    pub fn load(path: &Path) -> Result<Self, MapFileError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Validate the map and build its road graph.
    pub fn to_graph(&self) -> Result<RoadGraph, MapFileError> {
        let mut b = RoadGraph::builder().metric(self.metric);
        if let Some(speed) = self.max_road_speed {
            b = b.max_road_speed(speed);
        }
        let mut ids = std::collections::HashMap::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let id = b.add_node(node.name.clone(), Position::new(node.x, node.y))?;
            ids.insert(node.name.as_str(), id);
        }
        let lookup = |name: &str| -> Result<NodeId, MapFileError> {
            ids.get(name)
                .copied()
                .ok_or_else(|| MapFileError::UnknownName(name.to_owned()))
        };
        for road in &self.roads {
            let (a, z) = (lookup(&road.from)?, lookup(&road.to)?);
            match road.cost {
                Some(cost) => b.add_road(a, z, cost)?,
                None => b.add_road_at_speed(a, z, 1.0)?,
            };
        }
        Ok(b.build()?)
    }

    /// Describe an existing graph as a map file.
    pub fn from_graph(graph: &RoadGraph) -> Self {
        MapFile {
            metric: graph.metric(),
            max_road_speed: Some(graph.max_road_speed()),
            nodes: graph
                .nodes()
                .map(|(_, n)| MapNode {
                    name: n.name.clone(),
                    x: n.pos.x,
                    y: n.pos.y,
                })
                .collect(),
            roads: graph
                .edges()
                .map(|(_, r)| MapRoad {
                    from: graph.name(r.a).to_owned(),
                    to: graph.name(r.b).to_owned(),
                    cost: Some(r.cost),
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Outcome of one search, ready to print.
#[derive(Debug, Clone, Serialize)]
pub struct RouteReport {
    pub algorithm: String,
    pub found: bool,
    pub route: Vec<String>,
    pub hops: usize,
    pub cost: f64,
    /// Distinct nodes expanded across every search the algorithm ran.
    pub expanded: usize,
}

impl fmt::Display for RouteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.found {
            return write!(f, "{:<12} no route ({} nodes expanded)", self.algorithm, self.expanded);
        }
        write!(
            f,
            "{:<12} {} hops, cost {:.3}, {} nodes expanded\n             {}",
            self.algorithm,
            self.hops,
            self.cost,
            self.expanded,
            self.route.join(" -> ")
        )
    }
}

/// Run `algorithm` from `start` to `end` and summarize the result.
pub fn run_search(
    graph: &RoadGraph,
    algorithm: Algorithm,
    start: NodeId,
    end: NodeId,
    sufficient_difference: f64,
) -> Result<RouteReport, SearchError> {
    let mut finder = RouteFinder::with_observer(SearchTrace::new()).with_sufficient_difference(sufficient_difference);
    let route: Route = finder.search(algorithm, graph, start, end)?;
    Ok(RouteReport {
        algorithm: algorithm.to_string(),
        found: !route.is_empty(),
        route: route.nodes().iter().map(|&n| graph.name(n).to_owned()).collect(),
        hops: route.hops(),
        cost: route.cost(graph)?,
        expanded: finder.observer().distinct_expanded(),
    })
}
