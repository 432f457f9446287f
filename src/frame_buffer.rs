use crate::Polygon;
use crate::error::{Error, Result};
use std::path::Path;

/// An RGB canvas, black on creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub pixels: Vec<u8>, // RGB, 3 bytes per pixel
    pub width: u32,
    pub height: u32,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; width as usize * height as usize * 3],
            width,
            height,
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    pub fn num_pixels(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Load from an image crate DynamicImage
    pub fn from_image(img: &image::DynamicImage) -> Self {
        let rgb = img.to_rgb8();
        Self {
            width: rgb.width(),
            height: rgb.height(),
            pixels: rgb.into_raw(),
        }
    }

    /// Opens and decodes the reference image at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| Error::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_image(&img))
    }

    /// Copies the pixels into an `image` crate buffer.
    pub fn to_rgb_image(&self) -> Result<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone()).ok_or(
            Error::DimensionMismatch {
                expected: (self.width, self.height),
                actual: (self.pixels.len() as u32 / 3, 1),
            },
        )
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        image::save_buffer(
            path,
            &self.pixels,
            self.width,
            self.height,
            image::ExtendedColorType::Rgb8,
        )
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }

    /// Draws a horizontal span on row `y` covering pixels `x_start..=x_end`.
    ///
    /// The span is blended with the existing framebuffer contents:
    /// ```text
    /// new_pixel = (colour * alpha + old_pixel * (255 - alpha)) / 255
    /// ```
    /// rounded to the nearest integer. Spans are clipped to the framebuffer.
    fn draw_hline(&mut self, x_start: i64, x_end: i64, y: i64, rgb: [u8; 3], alpha: u8) {
        if y < 0 || y >= self.height as i64 {
            return;
        }
        let x_start = x_start.max(0);
        let x_end = x_end.min(self.width as i64 - 1);
        if x_start > x_end {
            return;
        }

        let a = alpha as u32;
        let row = y as usize * self.width as usize;
        for x in x_start as usize..=x_end as usize {
            let idx = (row + x) * 3;
            for (c, &src) in rgb.iter().enumerate() {
                let dst = self.pixels[idx + c] as u32;
                self.pixels[idx + c] = ((src as u32 * a + dst * (255 - a) + 127) / 255) as u8;
            }
        }
    }

    /// Fills a polygon with the even-odd rule, sampling at pixel centres.
    ///
    /// Vertices may lie anywhere; only the part of the polygon over the
    /// canvas is painted. Degenerate polygons (zero area) paint nothing.
    pub fn draw_polygon(&mut self, p: &Polygon) {
        let c = &p.colour;
        if c.alpha == 0 || p.vertices.len() < 3 {
            return;
        }
        let rgb = [c.r, c.g, c.b];

        let min_y = p.vertices.iter().map(|v| v.1).min().unwrap_or(0) as i64;
        let max_y = p.vertices.iter().map(|v| v.1).max().unwrap_or(0) as i64;
        let y_from = min_y.max(0);
        let y_to = max_y.min(self.height as i64 - 1);

        let n = p.vertices.len();
        let mut crossings: Vec<f64> = Vec::with_capacity(n);
        for y in y_from..=y_to {
            let yc = y as f64 + 0.5;
            crossings.clear();
            for i in 0..n {
                let (x0, y0) = p.vertices[i];
                let (x1, y1) = p.vertices[(i + 1) % n];
                let (fy0, fy1) = (y0 as f64, y1 as f64);
                if (fy0 <= yc) != (fy1 <= yc) {
                    let t = (yc - fy0) / (fy1 - fy0);
                    crossings.push(x0 as f64 + t * (x1 as f64 - x0 as f64));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for span in crossings.chunks_exact(2) {
                // pixels whose centre x + 0.5 lies in [span[0], span[1])
                let x_start = (span[0] - 0.5).ceil() as i64;
                let x_end = (span[1] - 0.5).ceil() as i64 - 1;
                self.draw_hline(x_start, x_end, y, rgb, c.alpha);
            }
        }
    }

    /// Paints `polygons` in order onto a cleared canvas.
    pub fn draw_polygons(&mut self, polygons: &[Polygon]) {
        self.clear();
        for p in polygons {
            self.draw_polygon(p);
        }
    }

    /// Sum of squared channel differences divided by the pixel count.
    pub fn mse(&self, other: &FrameBuffer) -> f64 {
        debug_assert_eq!(self.pixels.len(), other.pixels.len());

        let mut d: u64 = 0;
        for (a, b) in self.pixels.iter().zip(other.pixels.iter()) {
            let diff = *a as i64 - *b as i64;
            d += (diff * diff) as u64;
        }
        d as f64 / self.num_pixels() as f64
    }

    /// Places `left` and `right` next to each other on one canvas.
    pub fn side_by_side(left: &FrameBuffer, right: &FrameBuffer) -> Result<FrameBuffer> {
        if (left.width, left.height) != (right.width, right.height) {
            return Err(Error::DimensionMismatch {
                expected: (left.width, left.height),
                actual: (right.width, right.height),
            });
        }
        let row_bytes = left.width as usize * 3;
        let mut out = FrameBuffer::new(left.width * 2, left.height);
        for (y, dst) in out.pixels.chunks_exact_mut(row_bytes * 2).enumerate() {
            let src = y * row_bytes..(y + 1) * row_bytes;
            dst[..row_bytes].copy_from_slice(&left.pixels[src.clone()]);
            dst[row_bytes..].copy_from_slice(&right.pixels[src]);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Colour;

    fn square(size: i32, colour: Colour) -> Polygon {
        Polygon {
            vertices: vec![(0, 0), (size, 0), (size, size), (0, size)],
            colour,
        }
    }

    #[test]
    fn opaque_square_covers_canvas() {
        let mut fb = FrameBuffer::new(5, 5);
        fb.draw_polygon(&square(5, Colour { r: 200, g: 10, b: 3, alpha: 255 }));
        for y in 0..5 {
            for x in 0..5 {
                assert_eq!(fb.pixel(x, y), [200, 10, 3]);
            }
        }
    }

    #[test]
    fn half_alpha_blends_over_black() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.draw_polygon(&square(2, Colour { r: 255, g: 0, b: 0, alpha: 127 }));
        assert_eq!(fb.pixel(1, 1), [127, 0, 0]);
    }

    #[test]
    fn later_polygons_paint_over_earlier() {
        let mut fb = FrameBuffer::new(3, 3);
        fb.draw_polygons(&[
            square(3, Colour { r: 255, g: 0, b: 0, alpha: 255 }),
            square(3, Colour { r: 0, g: 0, b: 255, alpha: 255 }),
        ]);
        assert_eq!(fb.pixel(2, 0), [0, 0, 255]);
    }

    #[test]
    fn triangle_covers_half_the_square() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.draw_polygon(&Polygon {
            vertices: vec![(0, 0), (4, 0), (0, 4)],
            colour: Colour { r: 255, g: 255, b: 255, alpha: 255 },
        });
        // upper-left corner in, lower-right corner out
        assert_eq!(fb.pixel(0, 0), [255, 255, 255]);
        assert_eq!(fb.pixel(3, 3), [0, 0, 0]);
        let lit = fb.pixels.chunks(3).filter(|p| p[0] == 255).count();
        assert!((4..=12).contains(&lit), "lit = {lit}");
    }

    #[test]
    fn off_canvas_vertices_are_clipped() {
        let mut fb = FrameBuffer::new(3, 3);
        fb.draw_polygon(&Polygon {
            vertices: vec![(-10, -10), (20, -10), (20, 20), (-10, 20)],
            colour: Colour { r: 9, g: 9, b: 9, alpha: 255 },
        });
        assert!(fb.pixels.iter().all(|&v| v == 9));
    }

    #[test]
    fn extreme_vertices_do_not_overflow() {
        let mut fb = FrameBuffer::new(8, 8);
        fb.draw_polygon(&Polygon {
            vertices: vec![(i32::MIN, 0), (i32::MAX, 4), (0, i32::MAX)],
            colour: Colour { r: 255, g: 255, b: 255, alpha: 255 },
        });
        assert_eq!(fb.pixels.len(), 8 * 8 * 3);
    }

    #[test]
    fn degenerate_polygon_paints_nothing() {
        let mut fb = FrameBuffer::new(3, 3);
        fb.draw_polygon(&Polygon {
            vertices: vec![(1, 1), (1, 1), (1, 1)],
            colour: Colour { r: 255, g: 255, b: 255, alpha: 255 },
        });
        assert!(fb.pixels.iter().all(|&v| v == 0));
    }

    #[test]
    fn mse_divides_by_pixel_count() {
        let a = FrameBuffer::new(2, 1);
        let mut b = FrameBuffer::new(2, 1);
        b.pixels = vec![10, 0, 0, 0, 0, 20];
        // (100 + 400) / 2 pixels
        assert_eq!(a.mse(&b), 250.0);
        assert_eq!(a.mse(&a), 0.0);
    }

    #[test]
    fn side_by_side_places_left_then_right() {
        let left = FrameBuffer { pixels: vec![1; 12], width: 2, height: 2 };
        let right = FrameBuffer { pixels: vec![2; 12], width: 2, height: 2 };
        let out = FrameBuffer::side_by_side(&left, &right).unwrap();
        assert_eq!((out.width, out.height), (4, 2));
        assert_eq!(out.pixel(1, 1), [1, 1, 1]);
        assert_eq!(out.pixel(2, 1), [2, 2, 2]);

        let wrong = FrameBuffer::new(3, 2);
        assert!(FrameBuffer::side_by_side(&left, &wrong).is_err());
    }
}
