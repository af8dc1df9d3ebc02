//! One road per Voronoi edge.
use glam::Vec3;

use crate::graph::GraphEdge;
use crate::layout::{AssetKind, PlacedAsset, TerrainMapping};

/// Append one road per edge, anchored at the edge's first endpoint and stretched along terrain Z
/// by the edge length.
pub fn place_roads(edges: &[GraphEdge], mapping: &TerrainMapping, roads: &mut Vec<PlacedAsset>) {
    roads.reserve(edges.len());
    for edge in edges {
        let index = roads.len();
        roads.push(PlacedAsset {
            index,
            name: format!("Road {index}"),
            kind: AssetKind::Road,
            position: mapping.to_terrain(edge.p0),
            angle_deg: edge.angle_deg(),
            scale: Vec3::new(1.0, 1.0, mapping.to_terrain_length(edge.length())),
        });
    }
}
