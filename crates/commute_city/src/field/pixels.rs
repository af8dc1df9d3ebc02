//! RGBA pixel buffer rendered from a density field, with point and line drawing for overlays.
use glam::Vec2;

use super::density::DensityField;

/// An 8-bit RGBA color.
pub type Rgba = [u8; 4];

pub const BLACK: Rgba = [0, 0, 0, 255];
pub const WHITE: Rgba = [255, 255, 255, 255];

/// A `width x height` buffer of RGBA pixels, row-major (`data[y * width + x]`).
///
/// Pixel `(x, y)` corresponds to density cell `(x, y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    pub width: usize,
    pub height: usize,
    pub data: Vec<Rgba>,
}

impl PixelBuffer {
    /// A buffer filled with a single color.
    pub fn filled(width: usize, height: usize, color: Rgba) -> Self {
        Self {
            width,
            height,
            data: vec![color; width * height],
        }
    }

    /// Map every density value through a black-to-white interpolation.
    pub fn from_field(field: &DensityField) -> Self {
        let data = field
            .values()
            .iter()
            .map(|&v| lerp_color(BLACK, WHITE, v))
            .collect();
        Self {
            width: field.width(),
            height: field.height(),
            data,
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y * self.width + x])
    }

    /// Set a single pixel; positions outside the buffer are ignored.
    pub fn draw_point(&mut self, p: Vec2, color: Rgba) {
        if p.x >= 0.0 && p.y >= 0.0 && p.x < self.width as f32 && p.y < self.height as f32 {
            self.put(p.x as i64, p.y as i64, color);
        }
    }

    /// Bresenham line between two grid positions, clipped per pixel.
    pub fn draw_line(&mut self, p0: Vec2, p1: Vec2, color: Rgba) {
        let (mut x0, mut y0) = (p0.x as i64, p0.y as i64);
        let (x1, y1) = (p1.x as i64, p1.y as i64);

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;

        loop {
            self.put(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x0 += sx;
            }
            if e2 < dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    #[inline]
    fn put(&mut self, x: i64, y: i64, color: Rgba) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            let idx = y as usize * self.width + x as usize;
            self.data[idx] = color;
        }
    }
}

fn lerp_color(a: Rgba, b: Rgba, t: f32) -> Rgba {
    let t = t.clamp(0.0, 1.0);
    let mut out = [0u8; 4];
    for i in 0..4 {
        let v = a[i] as f32 + (b[i] as f32 - a[i] as f32) * t;
        out[i] = v.round() as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_field_maps_density_to_grayscale() {
        let field = DensityField::from_values(2, 1, vec![0.0, 1.0]).unwrap();
        let pixels = PixelBuffer::from_field(&field);
        assert_eq!(pixels.get(0, 0), Some(BLACK));
        assert_eq!(pixels.get(1, 0), Some(WHITE));

        let mid = DensityField::constant(1, 1, 0.5).unwrap();
        let gray = PixelBuffer::from_field(&mid).get(0, 0).unwrap();
        assert_eq!(gray[0], gray[1]);
        assert_eq!(gray[1], gray[2]);
        assert!((127..=128).contains(&gray[0]));
        assert_eq!(gray[3], 255);
    }

    #[test]
    fn draw_point_ignores_out_of_bounds() {
        let mut buf = PixelBuffer::filled(4, 4, BLACK);
        buf.draw_point(Vec2::new(-1.0, 2.0), WHITE);
        buf.draw_point(Vec2::new(4.0, 0.0), WHITE);
        assert!(buf.data.iter().all(|p| *p == BLACK));

        buf.draw_point(Vec2::new(2.5, 1.0), WHITE);
        assert_eq!(buf.get(2, 1), Some(WHITE));
    }

    #[test]
    fn draw_line_covers_both_endpoints() {
        let mut buf = PixelBuffer::filled(8, 8, BLACK);
        buf.draw_line(Vec2::new(1.0, 1.0), Vec2::new(6.0, 4.0), WHITE);
        assert_eq!(buf.get(1, 1), Some(WHITE));
        assert_eq!(buf.get(6, 4), Some(WHITE));
        // A Bresenham line touches one pixel per step along the major axis.
        let lit = buf.data.iter().filter(|p| **p == WHITE).count();
        assert_eq!(lit, 6);
    }

    #[test]
    fn draw_line_clips_outside_pixels() {
        let mut buf = PixelBuffer::filled(4, 4, BLACK);
        buf.draw_line(Vec2::new(-3.0, 0.0), Vec2::new(6.0, 0.0), WHITE);
        for x in 0..4 {
            assert_eq!(buf.get(x, 0), Some(WHITE));
        }
        assert_eq!(buf.get(0, 1), Some(BLACK));
    }
}
