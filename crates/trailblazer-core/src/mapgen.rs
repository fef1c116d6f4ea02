//! Random road network generation.
//!
//! [`GridRoadGen`] lays towns out on a jittered grid and connects cardinal
//! neighbours with roads of random speed. The result is a planar-ish network
//! with plenty of near-equal alternatives, handy for exercising searches.

use rand::{Rng, RngExt};

use crate::geom::{Metric, Position};
use crate::graph::{GraphError, NodeId, RoadGraph};

/// Parameters for [`GridRoadGen`].
#[derive(Debug, Clone)]
pub struct GridRoadGen {
    /// Number of towns per row.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
    /// Distance between neighbouring grid slots.
    pub spacing: f64,
    /// Maximum offset of a town from its grid slot, as a fraction of
    /// `spacing`. Kept below 0.5 so towns never swap slots.
    pub jitter: f64,
    /// Probability that a road between two cardinal neighbours exists.
    pub road_density: f64,
    /// Slowest road speed.
    pub min_speed: f64,
    /// Fastest road speed. Also declared as the graph's maximum road speed.
    pub max_speed: f64,
}

impl Default for GridRoadGen {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            spacing: 1.0,
            jitter: 0.25,
            road_density: 0.85,
            min_speed: 0.5,
            max_speed: 2.0,
        }
    }
}

impl GridRoadGen {
    /// Grid with the given dimensions and default parameters.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Name given to the town at grid slot (x, y).
    pub fn town_name(x: u32, y: u32) -> String {
        format!("{x}_{y}")
    }

    /// Generate a network. Towns are named by [`GridRoadGen::town_name`] and
    /// numbered row by row, so the id of slot (x, y) is `y * width + x`.
    pub fn generate(&self, rng: &mut impl Rng) -> Result<RoadGraph, GraphError> {
        if !(self.min_speed > 0.0) || self.min_speed > self.max_speed {
            return Err(GraphError::InvalidSpeed(self.min_speed));
        }
        let mut b = RoadGraph::builder()
            .metric(Metric::Euclidean)
            .max_road_speed(self.max_speed);
        let jitter = self.jitter.clamp(0.0, 0.49) * self.spacing;

        for y in 0..self.height {
            for x in 0..self.width {
                let (dx, dy) = if jitter > 0.0 {
                    (rng.random_range(-jitter..=jitter), rng.random_range(-jitter..=jitter))
                } else {
                    (0.0, 0.0)
                };
                let pos = Position::new(x as f64 * self.spacing + dx, y as f64 * self.spacing + dy);
                b.add_node(Self::town_name(x, y), pos)?;
            }
        }

        let id = |x: u32, y: u32| NodeId(y * self.width + x);
        for y in 0..self.height {
            for x in 0..self.width {
                if x + 1 < self.width && rng.random_bool(self.road_density.clamp(0.0, 1.0)) {
                    let speed = self.speed(rng);
                    b.add_road_at_speed(id(x, y), id(x + 1, y), speed)?;
                }
                if y + 1 < self.height && rng.random_bool(self.road_density.clamp(0.0, 1.0)) {
                    let speed = self.speed(rng);
                    b.add_road_at_speed(id(x, y), id(x, y + 1), speed)?;
                }
            }
        }
        b.build()
    }

    fn speed(&self, rng: &mut impl Rng) -> f64 {
        if self.min_speed == self.max_speed {
            self.min_speed
        } else {
            rng.random_range(self.min_speed..=self.max_speed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn full_density_grid_has_every_road() {
        let mut rng = StdRng::seed_from_u64(7);
        let gen_ = GridRoadGen {
            road_density: 1.0,
            ..GridRoadGen::new(4, 3)
        };
        let g = gen_.generate(&mut rng).unwrap();
        assert_eq!(g.node_count(), 12);
        // 3 horizontal roads per row, 4 vertical roads per gap between rows.
        assert_eq!(g.edge_count(), 3 * 3 + 4 * 2);
        assert_eq!(g.find("2_1"), Some(NodeId(6)));
    }

    #[test]
    fn roads_respect_declared_speed() {
        let mut rng = StdRng::seed_from_u64(11);
        let gen_ = GridRoadGen::new(6, 6);
        let g = gen_.generate(&mut rng).unwrap();
        assert_eq!(g.max_road_speed(), gen_.max_speed);
        for (_, road) in g.edges() {
            let len = g.crow_fly_distance(road.a, road.b).unwrap();
            assert!(len / road.cost <= gen_.max_speed + 1e-9);
            assert!(len / road.cost >= gen_.min_speed - 1e-9);
        }
    }

    #[test]
    fn same_seed_same_network() {
        let gen_ = GridRoadGen::new(5, 5);
        let a = gen_.generate(&mut StdRng::seed_from_u64(3)).unwrap();
        let b = gen_.generate(&mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a.edge_count(), b.edge_count());
        for ((_, ra), (_, rb)) in a.edges().zip(b.edges()) {
            assert_eq!(ra, rb);
        }
    }

    #[test]
    fn rejects_inverted_speeds() {
        let gen_ = GridRoadGen {
            min_speed: 3.0,
            max_speed: 1.0,
            ..GridRoadGen::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(gen_.generate(&mut rng), Err(GraphError::InvalidSpeed(_))));
    }
}
