//! Delaunay triangulation of the sites and its dual Voronoi diagram.
//!
//! Each Delaunay edge has exactly one dual Voronoi edge on the perpendicular bisector of its
//! endpoints. Between two inner triangles it joins their circumcenters; on the convex hull it is a
//! ray from the single inner circumcenter away from the hull; for collinear site sets it is the
//! whole bisector. Every dual is clipped to the bounds and dropped when nothing of it remains.
use glam::{DVec2, Vec2};
use spade::{DelaunayTriangulation, Point2, Triangulation};

use crate::error::{Error, Result};
use crate::graph::{Bounds, GraphEdge};
use crate::sampling::Site;

pub(crate) type SiteTriangulation = DelaunayTriangulation<Point2<f64>>;

const MIN_EDGE_LENGTH: f64 = 1e-9;

pub(crate) fn triangulate(sites: &[Site]) -> Result<SiteTriangulation> {
    let mut triangulation = SiteTriangulation::new();
    for site in sites {
        triangulation
            .insert(Point2::new(site.x as f64, site.y as f64))
            .map_err(|e| Error::Other(format!("failed to triangulate site {site}: {e:?}")))?;
    }
    Ok(triangulation)
}

pub(crate) fn delaunay_edges(triangulation: &SiteTriangulation) -> Vec<GraphEdge> {
    triangulation
        .undirected_edges()
        .map(|edge| {
            let [a, b] = edge.vertices();
            GraphEdge::new(to_vec2(a.position()), to_vec2(b.position()))
        })
        .collect()
}

pub(crate) fn voronoi_edges(triangulation: &SiteTriangulation, bounds: Bounds) -> Vec<GraphEdge> {
    let min = bounds.min.as_dvec2();
    let max = bounds.max.as_dvec2();

    let mut out = Vec::new();
    for edge in triangulation.undirected_edges() {
        let directed = edge.as_directed();
        let from = to_dvec2(directed.from().position());
        let to = to_dvec2(directed.to().position());
        let normal_right = {
            let d = to - from;
            DVec2::new(d.y, -d.x)
        };

        // `face()` lies to the left of the directed edge, `rev().face()` to the right.
        let left = directed
            .face()
            .as_inner()
            .and_then(|f| circumcenter(f.vertices().map(|v| to_dvec2(v.position()))));
        let right = directed
            .rev()
            .face()
            .as_inner()
            .and_then(|f| circumcenter(f.vertices().map(|v| to_dvec2(v.position()))));

        let clipped = match (left, right) {
            (Some(l), Some(r)) => clip(l, r - l, 0.0, 1.0, min, max),
            (Some(c), None) => clip(c, normal_right, 0.0, f64::INFINITY, min, max),
            (None, Some(c)) => clip(c, -normal_right, 0.0, f64::INFINITY, min, max),
            (None, None) => clip(
                (from + to) * 0.5,
                normal_right,
                f64::NEG_INFINITY,
                f64::INFINITY,
                min,
                max,
            ),
        };

        if let Some((p0, p1)) = clipped {
            if p0.distance(p1) > MIN_EDGE_LENGTH {
                out.push(GraphEdge::new(p0.as_vec2(), p1.as_vec2()));
            }
        }
    }
    out
}

fn circumcenter([a, b, c]: [DVec2; 3]) -> Option<DVec2> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < f64::EPSILON {
        return None;
    }
    let a2 = a.length_squared();
    let b2 = b.length_squared();
    let c2 = c.length_squared();
    Some(DVec2::new(
        (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d,
        (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d,
    ))
}

/// Liang-Barsky clip of `origin + t * dir`, `t in [t0, t1]`, against `[min, max]`.
fn clip(
    origin: DVec2,
    dir: DVec2,
    mut t0: f64,
    mut t1: f64,
    min: DVec2,
    max: DVec2,
) -> Option<(DVec2, DVec2)> {
    let checks = [
        (-dir.x, origin.x - min.x),
        (dir.x, max.x - origin.x),
        (-dir.y, origin.y - min.y),
        (dir.y, max.y - origin.y),
    ];
    for (p, q) in checks {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    if !t0.is_finite() || !t1.is_finite() {
        return None;
    }
    Some((origin + dir * t0, origin + dir * t1))
}

#[inline]
fn to_dvec2(p: Point2<f64>) -> DVec2 {
    DVec2::new(p.x, p.y)
}

#[inline]
fn to_vec2(p: Point2<f64>) -> Vec2 {
    Vec2::new(p.x as f32, p.y as f32)
}
