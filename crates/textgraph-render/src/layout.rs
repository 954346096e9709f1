//! Seeded 3-D force-directed layout
//!
//! Fruchterman-Reingold spring embedding. Initial positions are drawn from
//! a `StdRng` seeded with the configured seed, so a given graph always lays
//! out identically. Edges attract regardless of direction.

use std::collections::HashMap;

use petgraph::visit::EdgeRef;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use textgraph_core::LayoutConfig;
use textgraph_graph::KnowledgeGraph;

/// A point in 3-D space
pub type Point3 = [f64; 3];

/// Minimum distance between nodes in force computations
const MIN_DISTANCE: f64 = 0.01;

/// Node positions keyed by node text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    positions: HashMap<String, Point3>,
}

impl Layout {
    /// Position of a node
    pub fn get(&self, node: &str) -> Option<Point3> {
        self.positions.get(node).copied()
    }

    /// Number of positioned nodes
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no node is positioned
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Compute a 3-D spring layout for every node of `graph`
///
/// The result is centred on the origin and scaled so the largest absolute
/// coordinate is 1.
pub fn spring_layout(graph: &KnowledgeGraph, config: &LayoutConfig) -> Layout {
    let pg = graph.as_petgraph();
    let n = pg.node_count();

    let mut pos: Vec<Point3> = match n {
        0 => Vec::new(),
        1 => vec![[0.0; 3]],
        _ => {
            let mut rng = StdRng::seed_from_u64(config.seed);
            let mut pos: Vec<Point3> = (0..n)
                .map(|_| [rng.gen::<f64>(), rng.gen::<f64>(), rng.gen::<f64>()])
                .collect();

            let adjacency = adjacency_matrix(graph);
            fruchterman_reingold(&mut pos, &adjacency, config.iterations);
            rescale(&mut pos);
            pos
        }
    };

    let positions = pg
        .node_indices()
        .zip(pos.drain(..))
        .map(|(idx, p)| (pg[idx].clone(), p))
        .collect();

    tracing::debug!(nodes = n, seed = config.seed, "Computed spring layout");
    Layout { positions }
}

/// Symmetric edge weights; self-loops are ignored
fn adjacency_matrix(graph: &KnowledgeGraph) -> Vec<Vec<f64>> {
    let pg = graph.as_petgraph();
    let n = pg.node_count();
    let mut adjacency = vec![vec![0.0; n]; n];

    for edge in pg.edge_references() {
        let (a, b) = (edge.source().index(), edge.target().index());
        if a != b {
            adjacency[a][b] = 1.0;
            adjacency[b][a] = 1.0;
        }
    }
    adjacency
}

fn fruchterman_reingold(pos: &mut [Point3], adjacency: &[Vec<f64>], iterations: usize) {
    let n = pos.len();
    let k = (1.0 / n as f64).sqrt();

    // Temperature starts at a tenth of the initial domain width and cools
    // linearly to near zero
    let mut t = domain_width(pos) * 0.1;
    let dt = t / (iterations as f64 + 1.0);

    for _ in 0..iterations {
        let mut displacement = vec![[0.0f64; 3]; n];

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let delta = sub(pos[i], pos[j]);
                let distance = norm(delta).max(MIN_DISTANCE);
                let force = k * k / (distance * distance) - adjacency[i][j] * distance / k;
                for d in 0..3 {
                    displacement[i][d] += delta[d] * force;
                }
            }
        }

        for (p, disp) in pos.iter_mut().zip(&displacement) {
            let length = norm(*disp).max(MIN_DISTANCE);
            for d in 0..3 {
                p[d] += disp[d] * t / length;
            }
        }

        t -= dt;
    }
}

fn domain_width(pos: &[Point3]) -> f64 {
    (0..3)
        .map(|d| {
            let (lo, hi) = pos.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p[d]), hi.max(p[d]))
            });
            hi - lo
        })
        .fold(0.0, f64::max)
}

fn rescale(pos: &mut [Point3]) {
    let n = pos.len() as f64;
    let mut mean = [0.0; 3];
    for p in pos.iter() {
        for d in 0..3 {
            mean[d] += p[d] / n;
        }
    }

    let mut limit = 0.0f64;
    for p in pos.iter_mut() {
        for d in 0..3 {
            p[d] -= mean[d];
            limit = limit.max(p[d].abs());
        }
    }

    if limit > 0.0 {
        for p in pos.iter_mut() {
            for c in p.iter_mut() {
                *c /= limit;
            }
        }
    }
}

fn sub(a: Point3, b: Point3) -> Point3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn norm(v: Point3) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}
