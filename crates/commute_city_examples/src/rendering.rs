use std::path::Path;

use commute_city::field::Rgba;
use commute_city::prelude::*;
use glam::Vec2;
use image::RgbaImage;
use tracing::info;

/// Install a compact stderr subscriber. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .compact()
        .try_init();
}

/// Layers that can be drawn on top of the density height map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Overlay {
    Voronoi,
    Delaunay,
    SpanningTree,
    Sites,
    Houses,
    Offices,
}

/// Overlay selection and colors, drawn in insertion order.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    pub layers: Vec<(Overlay, Rgba)>,
    /// Half-width of point markers, in pixels.
    pub marker_radius: i32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new()
            .with_layer(Overlay::Voronoi, [230, 60, 40, 255])
            .with_layer(Overlay::Houses, [250, 200, 40, 255])
            .with_layer(Overlay::Offices, [40, 120, 240, 255])
    }
}

impl RenderConfig {
    /// An empty configuration that renders only the height map.
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            marker_radius: 2,
        }
    }

    pub fn with_layer(mut self, overlay: Overlay, color: Rgba) -> Self {
        self.layers.push((overlay, color));
        self
    }

    pub fn with_marker_radius(mut self, radius: i32) -> Self {
        self.marker_radius = radius.max(0);
        self
    }
}

/// Draw the height map of `city` plus the configured overlays into a pixel buffer.
pub fn render_city(city: &City, config: &RenderConfig) -> PixelBuffer {
    let mut pixels = PixelBuffer::from_field(&city.field);
    for &(overlay, color) in &config.layers {
        match overlay {
            Overlay::Voronoi => draw_edges(&mut pixels, &city.graph.voronoi, color),
            Overlay::Delaunay => draw_edges(&mut pixels, &city.graph.delaunay, color),
            Overlay::SpanningTree => draw_edges(&mut pixels, &city.graph.spanning_tree, color),
            Overlay::Sites => {
                for site in &city.sites {
                    draw_marker(&mut pixels, site.as_vec2(), config.marker_radius, color);
                }
            }
            Overlay::Houses => {
                for house in &city.layout.houses {
                    let p = city.mapping.to_grid(house.position);
                    draw_marker(&mut pixels, p, config.marker_radius, color);
                }
            }
            Overlay::Offices => {
                for office in &city.layout.offices {
                    let p = city.mapping.to_grid(office.position);
                    draw_marker(&mut pixels, p, config.marker_radius * 2, color);
                }
            }
        }
    }
    pixels
}

pub fn pixels_to_image(pixels: &PixelBuffer) -> anyhow::Result<RgbaImage> {
    let raw: Vec<u8> = pixels.data.iter().flatten().copied().collect();
    RgbaImage::from_raw(pixels.width as u32, pixels.height as u32, raw)
        .ok_or_else(|| anyhow::anyhow!("pixel buffer does not match its dimensions"))
}

pub fn render_city_to_png(
    city: &City,
    config: &RenderConfig,
    out_path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let out_path = out_path.as_ref();
    let image = pixels_to_image(&render_city(city, config))?;
    image.save(out_path)?;
    info!("Wrote {}.", out_path.display());
    Ok(())
}

fn draw_edges(pixels: &mut PixelBuffer, edges: &[GraphEdge], color: Rgba) {
    for edge in edges {
        pixels.draw_line(edge.p0, edge.p1, color);
    }
}

fn draw_marker(pixels: &mut PixelBuffer, center: Vec2, radius: i32, color: Rgba) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            pixels.draw_point(center + Vec2::new(dx as f32, dy as f32), color);
        }
    }
}
