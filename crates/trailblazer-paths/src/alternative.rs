use std::collections::HashSet;

use trailblazer_core::NodeId;

use crate::RouteFinder;
use crate::error::SearchError;
use crate::observer::SearchObserver;
use crate::route::Route;
use crate::traits::{GeoNetwork, WeightedNetwork};

/// Whether `candidate` diverges enough from `primary`.
///
/// Counts the nodes of `primary` that `candidate` does not visit and divides
/// by the number of nodes in `candidate`; the candidate passes when that
/// ratio is strictly above `threshold`. An empty candidate never passes.
pub fn is_sufficiently_different(primary: &Route, candidate: &Route, threshold: f64) -> bool {
    if candidate.is_empty() {
        return false;
    }
    let visited: HashSet<NodeId> = candidate.nodes().iter().copied().collect();
    let avoided = primary.nodes().iter().filter(|n| !visited.contains(n)).count();
    avoided as f64 / candidate.len() as f64 > threshold
}

impl<O: SearchObserver> RouteFinder<O> {
    /// Find a route from `start` to `end` that differs materially from the
    /// best one.
    ///
    /// The best route is computed with A*. Then, for every road on it, a
    /// Dijkstra search runs with that single road closed. Candidates that do
    /// not pass [`is_sufficiently_different`] at the finder's threshold are
    /// dropped and the cheapest survivor is returned (the earliest one on a
    /// tie). Returns the empty route when no candidate survives.
    pub fn alternative_route<G: GeoNetwork>(
        &mut self,
        graph: &G,
        start: NodeId,
        end: NodeId,
    ) -> Result<Route, SearchError> {
        let primary = self.astar(graph, start, end)?;
        if primary.is_empty() {
            return Ok(Route::empty());
        }

        let mut candidates = Vec::with_capacity(primary.hops());
        for (a, b) in primary.legs() {
            let road = graph
                .edge_between(a, b)
                .ok_or(SearchError::MissingEdge { from: a, to: b })?;
            let candidate = self.dijkstra_excluding(graph, start, end, Some(road.id))?;
            if candidate.is_empty() {
                log::trace!("alternative {start} -> {end}: no route without {a} - {b}");
                continue;
            }
            candidates.push(candidate);
        }

        let best = self.pick_alternative(graph, &primary, candidates)?;
        log::debug!(
            "alternative {start} -> {end}: {}",
            if best.is_empty() { "none found" } else { "found" }
        );
        Ok(best)
    }

    /// Cheapest candidate passing the difference test, or the empty route.
    fn pick_alternative<G: WeightedNetwork>(
        &self,
        graph: &G,
        primary: &Route,
        candidates: Vec<Route>,
    ) -> Result<Route, SearchError> {
        let mut best: Option<(f64, Route)> = None;
        for candidate in candidates {
            if !is_sufficiently_different(primary, &candidate, self.sufficient_difference) {
                log::trace!("rejected candidate {candidate}: too close to {primary}");
                continue;
            }
            let cost = candidate.cost(graph)?;
            log::trace!("accepted candidate {candidate} at cost {cost}");
            if best.as_ref().is_none_or(|(best_cost, _)| cost < *best_cost) {
                best = Some((cost, candidate));
            }
        }
        Ok(best.map(|(_, route)| route).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trailblazer_core::{Position, RoadGraph};

    fn ids(raw: &[u32]) -> Route {
        Route::new(raw.iter().map(|&i| NodeId(i)).collect())
    }

    /// start -> A -> end and start -> B -> end, all roads cost 1.
    fn diamond() -> (RoadGraph, [NodeId; 4]) {
        let mut b = RoadGraph::builder();
        let s = b.add_node("start", Position::new(0.0, 0.0)).unwrap();
        let a = b.add_node("A", Position::new(1.0, 1.0)).unwrap();
        let bb = b.add_node("B", Position::new(1.0, -1.0)).unwrap();
        let e = b.add_node("end", Position::new(2.0, 0.0)).unwrap();
        b.add_road(s, a, 1.0).unwrap();
        b.add_road(s, bb, 1.0).unwrap();
        b.add_road(a, e, 1.0).unwrap();
        b.add_road(bb, e, 1.0).unwrap();
        (b.build().unwrap(), [s, a, bb, e])
    }

    #[test]
    fn difference_ratio() {
        let primary = ids(&[0, 1, 2, 3, 4]);
        // Avoids 1 of the primary's nodes over 5 candidate nodes: 0.2, not above.
        assert!(!is_sufficiently_different(&primary, &ids(&[0, 1, 2, 9, 4]), 0.2));
        // Avoids 2 over 5: 0.4.
        assert!(is_sufficiently_different(&primary, &ids(&[0, 8, 2, 9, 4]), 0.2));
        // Shares no interior node at all.
        assert!(is_sufficiently_different(&primary, &ids(&[0, 7, 8, 9, 4]), 0.2));
        // Identical route.
        assert!(!is_sufficiently_different(&primary, &primary, 0.0));
        assert!(!is_sufficiently_different(&primary, &Route::empty(), 0.0));
    }

    #[test]
    fn ratio_uses_candidate_length() {
        let primary = ids(&[0, 1, 2]);
        // Avoids 1 primary node; 1/3 passes but 1/6 does not.
        assert!(is_sufficiently_different(&primary, &ids(&[0, 5, 2]), 0.2));
        assert!(!is_sufficiently_different(&primary, &ids(&[0, 5, 6, 7, 8, 2]), 0.2));
    }

    #[test]
    fn diamond_takes_the_other_side() {
        let (g, [s, a, b, e]) = diamond();
        let mut finder = RouteFinder::new();
        assert_eq!(finder.astar(&g, s, e).unwrap().nodes(), &[s, a, e]);
        let alt = finder.alternative_route(&g, s, e).unwrap();
        assert_eq!(alt.nodes(), &[s, b, e]);
    }

    #[test]
    fn single_path_has_no_alternative() {
        let mut bld = RoadGraph::builder();
        let s = bld.add_node("s", Position::ZERO).unwrap();
        let m = bld.add_node("m", Position::new(1.0, 0.0)).unwrap();
        let e = bld.add_node("e", Position::new(2.0, 0.0)).unwrap();
        bld.add_road(s, m, 1.0).unwrap();
        bld.add_road(m, e, 1.0).unwrap();
        let g = bld.build().unwrap();
        assert!(RouteFinder::new().alternative_route(&g, s, e).unwrap().is_empty());
    }

    #[test]
    fn unreachable_and_trivial() {
        let (g, [s, ..]) = diamond();
        assert_eq!(RouteFinder::new().alternative_route(&g, s, s).unwrap(), Route::empty());

        let mut bld = RoadGraph::builder();
        let x = bld.add_node("x", Position::ZERO).unwrap();
        let y = bld.add_node("y", Position::new(1.0, 0.0)).unwrap();
        let g = bld.build().unwrap();
        assert!(RouteFinder::new().alternative_route(&g, x, y).unwrap().is_empty());
    }

    #[test]
    fn near_duplicate_detour_is_rejected() {
        // Primary: 0-1-2-3-4-5-6-7-8 along a line. The only detour swaps
        // node 4 for node 9, avoiding 1 of 9 primary nodes (ratio 1/9).
        let mut b = RoadGraph::builder();
        let line: Vec<NodeId> = (0..9)
            .map(|i| b.add_node(format!("l{i}"), Position::new(i as f64, 0.0)).unwrap())
            .collect();
        let detour = b.add_node("d", Position::new(4.0, 1.0)).unwrap();
        for w in line.windows(2) {
            b.add_road(w[0], w[1], 1.0).unwrap();
        }
        b.add_road(line[3], detour, 1.5).unwrap();
        b.add_road(detour, line[5], 1.5).unwrap();
        let g = b.build().unwrap();

        let mut finder = RouteFinder::new();
        assert!(finder.alternative_route(&g, line[0], line[8]).unwrap().is_empty());

        // A lax threshold lets the same detour through.
        let mut lax = RouteFinder::new().with_sufficient_difference(0.1);
        let alt = lax.alternative_route(&g, line[0], line[8]).unwrap();
        assert!(alt.contains(detour));
        assert!(!alt.contains(line[4]));
    }

    #[test]
    fn cheapest_survivor_wins() {
        // Three parallel two-road corridors between s and e through a, b, c
        // with total costs 2, 3 and 4. Closing either road of the best
        // corridor yields the b corridor each time.
        let mut bld = RoadGraph::builder();
        let s = bld.add_node("s", Position::new(0.0, 0.0)).unwrap();
        let a = bld.add_node("a", Position::new(1.0, 0.0)).unwrap();
        let b = bld.add_node("b", Position::new(1.0, 1.0)).unwrap();
        let c = bld.add_node("c", Position::new(1.0, -1.0)).unwrap();
        let e = bld.add_node("e", Position::new(2.0, 0.0)).unwrap();
        for (mid, cost) in [(a, 1.0), (b, 1.5), (c, 2.0)] {
            bld.add_road(s, mid, cost).unwrap();
            bld.add_road(mid, e, cost).unwrap();
        }
        let g = bld.build().unwrap();
        let alt = RouteFinder::new().alternative_route(&g, s, e).unwrap();
        assert_eq!(alt.nodes(), &[s, b, e]);
        assert_eq!(alt.cost(&g), Ok(3.0));
    }
}
