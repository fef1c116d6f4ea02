use trailblazer_core::NodeId;

use crate::RouteFinder;
use crate::error::SearchError;
use crate::finder::{check_endpoints, expand, road_cost};
use crate::frontier::{Entry, Frontier, Trail};
use crate::observer::{NodeMark, SearchObserver};
use crate::route::Route;
use crate::tracker::{ClosedSet, CostMap};
use crate::traits::GeoNetwork;

impl<O: SearchObserver> RouteFinder<O> {
    /// Compute the minimum-cost route from `start` to `end` using A*.
    ///
    /// The heuristic is the crow-fly distance to `end` divided by the
    /// network's maximum road speed, which never overestimates as long as no
    /// road is faster than that speed. A node that was already expanded is
    /// reopened when a strictly cheaper route to it turns up.
    pub fn astar<G: GeoNetwork>(&mut self, graph: &G, start: NodeId, end: NodeId) -> Result<Route, SearchError> {
        check_endpoints(graph, start, end)?;

        let speed = graph.max_road_speed();
        if !(speed > 0.0) {
            return Err(SearchError::InvalidSpeed(speed));
        }
        let estimate = |n: NodeId| graph.crow_fly_distance(n, end) / speed;

        let n = graph.node_count();
        let mut g = CostMap::new(n);
        let mut closed = ClosedSet::new(n);
        let mut trail = Trail::new();
        let mut open = Frontier::new();
        let mut nbuf = Vec::new();

        g.record(start, 0.0);
        self.mark(start, NodeMark::Discovered);
        open.push(
            Entry {
                node: start,
                link: trail.start(start),
            },
            estimate(start),
            0.0,
        );

        let mut expanded = 0usize;
        let mut reopened = 0usize;

        while let Some(current) = open.pop() {
            let Entry { node: u, link } = current.entry;
            let Some(current_g) = g.get(u) else {
                continue;
            };
            // Skip entries superseded by a cheaper push.
            if current.cost > current_g {
                continue;
            }
            self.mark(u, NodeMark::Expanded);
            expanded += 1;

            if u == end {
                let route = trail.route(link);
                log::debug!(
                    "a* {start} -> {end}: cost {current_g}, {} hops, {expanded} expanded, {reopened} reopened",
                    route.hops()
                );
                return Ok(route);
            }

            expand(graph, u, &mut nbuf)?;
            for &v in nbuf.iter() {
                let Some(road) = road_cost(graph, u, v, None)? else {
                    continue;
                };
                let tentative_g = current_g + road;
                if !g.improves(v, tentative_g) {
                    continue;
                }
                if closed.contains(v) {
                    reopened += 1;
                }

                g.record(v, tentative_g);
                self.mark(v, NodeMark::Discovered);
                open.push(
                    Entry {
                        node: v,
                        link: trail.extend(link, v),
                    },
                    tentative_g + estimate(v),
                    tentative_g,
                );
            }
            closed.insert(u);
        }

        log::debug!("a* {start} -> {end}: unreachable, {expanded} expanded");
        Ok(Route::empty())
    }
}
