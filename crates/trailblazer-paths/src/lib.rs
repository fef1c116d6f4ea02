//! Route search over road networks.
//!
//! This crate finds routes between two nodes of a road network:
//!
//! - **Breadth-first search**, fewest roads ([`RouteFinder::bfs`])
//! - **Dijkstra**, cheapest route ([`RouteFinder::dijkstra`])
//! - **A\***, cheapest route guided by crow-fly distance ([`RouteFinder::astar`])
//! - **Alternative route**, the cheapest route that differs enough from the
//!   best one ([`RouteFinder::alternative_route`])
//!
//! Every search returns a [`Route`]; the empty route means the goal is
//! unreachable. Searches keep no state between calls. The free functions
//! below are shorthands for a default [`RouteFinder`].
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`RoadNetwork`] | BFS |
//! | [`WeightedNetwork`] : [`RoadNetwork`] | Dijkstra |
//! | [`GeoNetwork`] : [`WeightedNetwork`] | A*, alternative route |
//!
//! All three are implemented for [`trailblazer_core::RoadGraph`].

mod alternative;
mod astar;
mod bfs;
mod dijkstra;
mod error;
mod finder;
mod frontier;
mod observer;
mod route;
mod tracker;
mod traits;

pub use alternative::is_sufficiently_different;
pub use error::SearchError;
pub use finder::{Algorithm, RouteFinder, SUFFICIENT_DIFFERENCE};
pub use observer::{NoObserver, NodeMark, SearchObserver, SearchTrace};
pub use route::Route;
pub use traits::{Edge, GeoNetwork, RoadNetwork, WeightedNetwork};

use trailblazer_core::NodeId;

/// Fewest-roads route; see [`RouteFinder::bfs`].
pub fn breadth_first_search<G: RoadNetwork>(graph: &G, start: NodeId, end: NodeId) -> Result<Route, SearchError> {
    RouteFinder::new().bfs(graph, start, end)
}

/// Cheapest route; see [`RouteFinder::dijkstra`].
pub fn dijkstra<G: WeightedNetwork>(graph: &G, start: NodeId, end: NodeId) -> Result<Route, SearchError> {
    RouteFinder::new().dijkstra(graph, start, end)
}

/// Cheapest route via A*; see [`RouteFinder::astar`].
pub fn a_star<G: GeoNetwork>(graph: &G, start: NodeId, end: NodeId) -> Result<Route, SearchError> {
    RouteFinder::new().astar(graph, start, end)
}

/// Sufficiently different second route; see [`RouteFinder::alternative_route`].
pub fn alternative_route<G: GeoNetwork>(graph: &G, start: NodeId, end: NodeId) -> Result<Route, SearchError> {
    RouteFinder::new().alternative_route(graph, start, end)
}
