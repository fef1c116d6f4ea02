//! **trailblazer-core** — road network data model.
//!
//! This crate provides the types the route searches run over: geometry
//! primitives and crow-fly metrics, the validated [`RoadGraph`] arena with its
//! [`RoadGraphBuilder`], and a seeded random network generator.

pub mod geom;
pub mod graph;
pub mod mapgen;

pub use geom::{Metric, Position, euclidean, haversine};
pub use graph::{EdgeId, GraphError, NodeId, RoadEdge, RoadGraph, RoadGraphBuilder, RoadNode};
pub use mapgen::GridRoadGen;
