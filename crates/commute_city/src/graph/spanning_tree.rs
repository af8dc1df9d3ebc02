//! Kruskal's minimum spanning tree over an edge list.
use std::collections::HashMap;

use crate::graph::GraphEdge;

/// Minimum spanning forest of the graph formed by `edges`, ordered by increasing length.
///
/// Vertices are identified by exact position. Over the Delaunay edges of a site set this is the
/// Euclidean minimum spanning tree of the sites.
pub fn kruskal(edges: &[GraphEdge]) -> Vec<GraphEdge> {
    let mut ids: HashMap<(u32, u32), usize> = HashMap::new();
    let mut endpoints = Vec::with_capacity(edges.len());
    for e in edges {
        let a = vertex_id(&mut ids, e.p0.x.to_bits(), e.p0.y.to_bits());
        let b = vertex_id(&mut ids, e.p1.x.to_bits(), e.p1.y.to_bits());
        endpoints.push((a, b));
    }

    let mut order: Vec<usize> = (0..edges.len()).collect();
    order.sort_by(|&i, &j| edges[i].length().total_cmp(&edges[j].length()));

    let mut sets = DisjointSets::new(ids.len());
    let mut tree = Vec::with_capacity(ids.len().saturating_sub(1));
    for i in order {
        let (a, b) = endpoints[i];
        if sets.union(a, b) {
            tree.push(edges[i]);
        }
    }
    tree
}

fn vertex_id(ids: &mut HashMap<(u32, u32), usize>, x: u32, y: u32) -> usize {
    let next = ids.len();
    *ids.entry((x, y)).or_insert(next)
}

struct DisjointSets {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSets {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merge the sets of `a` and `b`; `false` when they were already joined.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }
}
