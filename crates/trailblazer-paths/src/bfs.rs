use std::collections::VecDeque;

use trailblazer_core::NodeId;

use crate::RouteFinder;
use crate::error::SearchError;
use crate::finder::{check_endpoints, expand};
use crate::frontier::{Entry, Trail};
use crate::observer::{NodeMark, SearchObserver};
use crate::route::Route;
use crate::tracker::ClosedSet;
use crate::traits::RoadNetwork;

impl<O: SearchObserver> RouteFinder<O> {
    /// Find the route from `start` to `end` with the fewest roads, ignoring
    /// costs.
    ///
    /// Returns the empty route if `end` is unreachable and `[start]` if the
    /// two coincide. A node is marked visited when first enqueued, so it
    /// enters the frontier at most once.
    pub fn bfs<G: RoadNetwork>(&mut self, graph: &G, start: NodeId, end: NodeId) -> Result<Route, SearchError> {
        check_endpoints(graph, start, end)?;

        let mut visited = ClosedSet::new(graph.node_count());
        let mut trail = Trail::new();
        let mut queue: VecDeque<Entry> = VecDeque::new();
        let mut nbuf = Vec::new();

        visited.insert(start);
        self.mark(start, NodeMark::Discovered);
        queue.push_back(Entry {
            node: start,
            link: trail.start(start),
        });

        let mut expanded = 0usize;
        while let Some(Entry { node: u, link }) = queue.pop_front() {
            self.mark(u, NodeMark::Expanded);
            expanded += 1;

            // FIFO order dequeues nodes by non-decreasing hop count.
            if u == end {
                let route = trail.route(link);
                log::debug!("bfs {start} -> {end}: {} hops, {expanded} expanded", route.hops());
                return Ok(route);
            }

            expand(graph, u, &mut nbuf)?;
            for &v in nbuf.iter() {
                if !visited.insert(v) {
                    continue;
                }
                self.mark(v, NodeMark::Discovered);
                queue.push_back(Entry {
                    node: v,
                    link: trail.extend(link, v),
                });
            }
        }

        log::debug!("bfs {start} -> {end}: unreachable, {expanded} expanded");
        Ok(Route::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::SearchTrace;
    use trailblazer_core::{Position, RoadGraph};

    /// start - mid - end costs 1 + 1, the direct start - end road costs 5.
    fn triangle() -> (RoadGraph, [NodeId; 3]) {
        let mut b = RoadGraph::builder();
        let s = b.add_node("start", Position::new(0.0, 0.0)).unwrap();
        let m = b.add_node("mid", Position::new(1.0, 0.5)).unwrap();
        let e = b.add_node("end", Position::new(2.0, 0.0)).unwrap();
        b.add_road(s, m, 1.0).unwrap();
        b.add_road(m, e, 1.0).unwrap();
        b.add_road(s, e, 5.0).unwrap();
        (b.build().unwrap(), [s, m, e])
    }

    #[test]
    fn fewest_hops_ignores_cost() {
        let (g, [s, _, e]) = triangle();
        let route = RouteFinder::new().bfs(&g, s, e).unwrap();
        assert_eq!(route.nodes(), &[s, e]);
    }

    #[test]
    fn start_equals_end() {
        let (g, [s, _, _]) = triangle();
        let route = RouteFinder::new().bfs(&g, s, s).unwrap();
        assert_eq!(route.nodes(), &[s]);
        assert_eq!(route.hops(), 0);
    }

    #[test]
    fn unreachable_is_empty() {
        let mut b = RoadGraph::builder();
        let a = b.add_node("a", Position::ZERO).unwrap();
        let c = b.add_node("c", Position::new(1.0, 0.0)).unwrap();
        let g = b.build().unwrap();
        let route = RouteFinder::new().bfs(&g, a, c).unwrap();
        assert!(route.is_empty());
    }

    #[test]
    fn unknown_endpoint() {
        let (g, [s, _, _]) = triangle();
        assert_eq!(
            RouteFinder::new().bfs(&g, s, NodeId(42)),
            Err(SearchError::UnknownNode(NodeId(42)))
        );
    }

    #[test]
    fn ladder_prefers_short_rung_path() {
        // 0 - 1 - 2 - 3
        // |           |
        // 4 --------- 5   (0-4-5-3 is also 3 hops; the first discovered wins)
        let mut b = RoadGraph::builder();
        let ids: Vec<NodeId> = (0..6)
            .map(|i| b.add_node(format!("{i}"), Position::new(i as f64, 0.0)).unwrap())
            .collect();
        for (x, y) in [(0, 1), (1, 2), (2, 3), (0, 4), (4, 5), (5, 3)] {
            b.add_road(ids[x], ids[y], 1.0).unwrap();
        }
        let g = b.build().unwrap();
        let route = RouteFinder::new().bfs(&g, ids[0], ids[3]).unwrap();
        assert_eq!(route.hops(), 3);
        assert_eq!(route.nodes(), &[ids[0], ids[1], ids[2], ids[3]]);
    }

    #[test]
    fn each_node_enqueued_once() {
        // Complete graph on 5 nodes: every node is reachable from many
        // branches but must be discovered only once.
        let mut b = RoadGraph::builder();
        let ids: Vec<NodeId> = (0..5)
            .map(|i| b.add_node(format!("k{i}"), Position::new(i as f64, 0.0)).unwrap())
            .collect();
        for i in 0..5 {
            for j in i + 1..5 {
                b.add_road(ids[i], ids[j], 1.0).unwrap();
            }
        }
        let g = b.build().unwrap();
        let mut finder = RouteFinder::with_observer(SearchTrace::new());
        let route = finder.bfs(&g, ids[0], ids[4]).unwrap();
        assert_eq!(route.nodes(), &[ids[0], ids[4]]);
        let discovered: Vec<NodeId> = finder.observer().discovered().collect();
        let mut unique = discovered.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(discovered.len(), unique.len());
    }

    #[test]
    fn observer_sees_start_first() {
        let (g, [s, _, e]) = triangle();
        let mut finder = RouteFinder::with_observer(SearchTrace::new());
        finder.bfs(&g, s, e).unwrap();
        let marks = finder.observer().marks();
        assert_eq!(marks[0], (s, NodeMark::Discovered));
        assert_eq!(marks[1], (s, NodeMark::Expanded));
        assert_eq!(marks.last(), Some(&(e, NodeMark::Expanded)));
    }
}
