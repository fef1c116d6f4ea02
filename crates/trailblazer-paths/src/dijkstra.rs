use trailblazer_core::{EdgeId, NodeId};

use crate::RouteFinder;
use crate::error::SearchError;
use crate::finder::{check_endpoints, expand, road_cost};
use crate::frontier::{Entry, Frontier, Trail};
use crate::observer::{NodeMark, SearchObserver};
use crate::route::Route;
use crate::tracker::{ClosedSet, CostMap};
use crate::traits::WeightedNetwork;

impl<O: SearchObserver> RouteFinder<O> {
    /// Find the minimum-cost route from `start` to `end` with Dijkstra's
    /// algorithm.
    ///
    /// Road costs must be non-negative; a negative or NaN cost is reported as
    /// [`SearchError::InvalidCost`]. Returns the empty route if `end` is
    /// unreachable.
    pub fn dijkstra<G: WeightedNetwork>(&mut self, graph: &G, start: NodeId, end: NodeId) -> Result<Route, SearchError> {
        self.dijkstra_excluding(graph, start, end, None)
    }

    /// Dijkstra search that may not travel the `excluded` road in either
    /// direction. Stops as soon as `end` is popped.
    pub(crate) fn dijkstra_excluding<G: WeightedNetwork>(
        &mut self,
        graph: &G,
        start: NodeId,
        end: NodeId,
        excluded: Option<EdgeId>,
    ) -> Result<Route, SearchError> {
        check_endpoints(graph, start, end)?;

        let n = graph.node_count();
        let mut costs = CostMap::new(n);
        let mut closed = ClosedSet::new(n);
        let mut trail = Trail::new();
        let mut open = Frontier::new();
        let mut nbuf = Vec::new();

        costs.record(start, 0.0);
        self.mark(start, NodeMark::Discovered);
        open.push(
            Entry {
                node: start,
                link: trail.start(start),
            },
            0.0,
            0.0,
        );

        while let Some(current) = open.pop() {
            let Entry { node: u, link } = current.entry;

            // Stale entry for a node finalized through a cheaper push.
            if closed.contains(u) {
                continue;
            }
            let Some(cost_u) = costs.get(u) else {
                continue;
            };
            self.mark(u, NodeMark::Expanded);

            // With non-negative costs the first pop of the goal is optimal.
            if u == end {
                let route = trail.route(link);
                log::debug!(
                    "dijkstra {start} -> {end}: cost {cost_u}, {} hops, {} expanded, {} pushed",
                    route.hops(),
                    closed.len() + 1,
                    open.pushed()
                );
                return Ok(route);
            }

            expand(graph, u, &mut nbuf)?;
            for &v in nbuf.iter() {
                if closed.contains(v) {
                    continue;
                }
                let Some(road) = road_cost(graph, u, v, excluded)? else {
                    continue;
                };
                let candidate = cost_u + road;
                if !costs.improves(v, candidate) {
                    continue;
                }
                costs.record(v, candidate);
                self.mark(v, NodeMark::Discovered);
                open.push(
                    Entry {
                        node: v,
                        link: trail.extend(link, v),
                    },
                    candidate,
                    candidate,
                );
            }
            closed.insert(u);
        }

        log::debug!(
            "dijkstra {start} -> {end}: unreachable, {} expanded",
            closed.len()
        );
        Ok(Route::empty())
    }
}
