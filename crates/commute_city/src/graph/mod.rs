//! Planar graphs over the sampled sites.
//!
//! [`PlanarGraph::build`] triangulates the sites once and derives three edge sets from the same
//! triangulation:
//! - `voronoi`: cell boundaries clipped to the field bounds; the skeleton for roads and houses
//! - `delaunay`: triangle sides, kept for debugging overlays
//! - `spanning_tree`: Euclidean minimum spanning tree (Kruskal over the Delaunay edges)
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::sampling::Site;

pub mod spanning_tree;
pub mod voronoi;

/// An ordered pair of points in grid space.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphEdge {
    pub p0: Vec2,
    pub p1: Vec2,
}

impl GraphEdge {
    pub fn new(p0: Vec2, p1: Vec2) -> Self {
        Self { p0, p1 }
    }

    #[inline]
    pub fn delta(&self) -> Vec2 {
        self.p1 - self.p0
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.delta().length()
    }

    /// Direction of `p0 -> p1` in degrees, measured in the grid XY plane.
    #[inline]
    pub fn angle_deg(&self) -> f32 {
        let d = self.delta();
        d.y.atan2(d.x).to_degrees()
    }

    /// Point at fraction `t` from `p0` to `p1`.
    #[inline]
    pub fn lerp(&self, t: f32) -> Vec2 {
        self.p0.lerp(self.p1, t)
    }

    /// Same segment regardless of endpoint order.
    pub fn same_segment(&self, other: &GraphEdge) -> bool {
        (self.p0 == other.p0 && self.p1 == other.p1) || (self.p0 == other.p1 && self.p1 == other.p0)
    }
}

/// Axis-aligned rectangle the Voronoi diagram is clipped to.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// `[0, width] x [0, height]`.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(width, height),
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Voronoi, Delaunay and spanning-tree edges derived from one site set.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlanarGraph {
    pub voronoi: Vec<GraphEdge>,
    pub delaunay: Vec<GraphEdge>,
    pub spanning_tree: Vec<GraphEdge>,
}

impl PlanarGraph {
    pub fn build(sites: &[Site], bounds: Bounds) -> Result<Self> {
        let triangulation = voronoi::triangulate(sites)?;
        let delaunay = voronoi::delaunay_edges(&triangulation);
        let voronoi = voronoi::voronoi_edges(&triangulation, bounds);
        let spanning_tree = spanning_tree::kruskal(&delaunay);

        debug!(
            "Built planar graph over {} sites: {} voronoi, {} delaunay, {} spanning-tree edges.",
            sites.len(),
            voronoi.len(),
            delaunay.len(),
            spanning_tree.len()
        );

        Ok(Self {
            voronoi,
            delaunay,
            spanning_tree,
        })
    }
}

/// Sum of edge lengths.
pub fn total_length(edges: &[GraphEdge]) -> f32 {
    edges.iter().map(GraphEdge::length).sum()
}
