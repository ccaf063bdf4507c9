//! A small software rasterizer.  It knows how to do exactly three
//! things: stamp a square pen dab of a given thickness, trace a line
//! segment with that pen, and chain segments into an open or closed
//! path.  Everything lands in a `PixelBuffer`, a flat block of RGB
//! channels kept in the 0..1 range until the sink quantizes them.
use num::Complex;
use std::cmp;
use vector::{magnitude, normalize};

/// An RGB color.  Each channel is a real intensity in the 0..1 range.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color(pub f64, pub f64, pub f64);

/// Full-intensity white, the default stroke color.
pub const WHITE: Color = Color(1.0, 1.0, 1.0);

/// Black, used for points that never escape the Mandelbrot set.
pub const BLACK: Color = Color(0.0, 0.0, 0.0);

/// A coordinate on the raster grid.  Unlike a buffer index this may
/// land outside the image; writes are clipped at stamping time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridPoint(pub i64, pub i64);

/// A fixed-size block of interleaved RGB channels.  Allocated once
/// per image, mutated in place by the drawing routines, and consumed
/// exactly once by the image sink.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    channels: Vec<f64>,
}

impl PixelBuffer {
    /// Allocate an all-black buffer of the given dimensions.
    pub fn new(width: usize, height: usize) -> PixelBuffer {
        PixelBuffer {
            width,
            height,
            channels: vec![0.0; width * height * 3],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Overwrite the pixel at x, y.  Both coordinates must be inside
    /// the buffer.
    pub fn set(&mut self, x: usize, y: usize, color: Color) {
        debug_assert!(x < self.width && y < self.height);
        let offset = (y * self.width + x) * 3;
        self.channels[offset] = color.0;
        self.channels[offset + 1] = color.1;
        self.channels[offset + 2] = color.2;
    }

    /// Read back the pixel at x, y.
    pub fn get(&self, x: usize, y: usize) -> Color {
        let offset = (y * self.width + x) * 3;
        Color(
            self.channels[offset],
            self.channels[offset + 1],
            self.channels[offset + 2],
        )
    }

    /// The raw channel block, row-major, three channels per pixel.
    pub fn channels(&self) -> &[f64] {
        &self.channels
    }

    /// Mutable access to the raw channel block, for renderers that
    /// write whole rows at a time.
    pub fn channels_mut(&mut self) -> &mut [f64] {
        &mut self.channels
    }
}

/// Round a real point up to the raster grid.
fn grid_ceil(p: Complex<f64>) -> GridPoint {
    GridPoint(p.re.ceil() as i64, p.im.ceil() as i64)
}

/// Stamp a square pen dab.  Every pixel in the window running
/// thickness pixels out from the center in both axes is overwritten;
/// the part of the window falling outside the buffer is clipped.
/// Thickness 0 writes a single pixel.
pub fn draw_point(buffer: &mut PixelBuffer, center: GridPoint, thickness: usize, color: Color) {
    let t = thickness as i64;
    let (width, height) = (buffer.width() as i64, buffer.height() as i64);
    for y in (center.1 - t)..=(center.1 + t) {
        if y < 0 || y >= height {
            continue;
        }
        for x in (center.0 - t)..=(center.0 + t) {
            if x < 0 || x >= width {
                continue;
            }
            buffer.set(x as usize, y as usize, color);
        }
    }
}

/// Trace the segment from p1 to p2.  An integer counter starts at
/// zero and advances by max(2 * thickness, 1) while it is below the
/// segment length; each stop stamps a dab at the ceiling of the
/// interpolated position.  The dab width covers the stride, so the
/// segment is fully inked for any thickness.  A zero-length segment
/// stamps a single dab and never asks for a direction.
pub fn draw_segment(
    buffer: &mut PixelBuffer,
    p1: Complex<f64>,
    p2: Complex<f64>,
    thickness: usize,
    color: Color,
) {
    let length = magnitude(p2 - p1);
    if length == 0.0 {
        draw_point(buffer, grid_ceil(p1), thickness, color);
        return;
    }
    let dir = normalize(p2 - p1);
    let stride = cmp::max(2 * thickness, 1);
    let mut step = 0;
    while (step as f64) < length {
        let p = p1 + dir * (step as f64);
        draw_point(buffer, grid_ceil(p), thickness, color);
        step += stride;
    }
}

/// Draw a polyline through the vertices in order.  When `closed` is
/// set an extra segment runs from the last vertex back to the first.
pub fn draw_path(
    buffer: &mut PixelBuffer,
    vertices: &[Complex<f64>],
    thickness: usize,
    color: Color,
    closed: bool,
) {
    for pair in vertices.windows(2) {
        draw_segment(buffer, pair[0], pair[1], thickness, color);
    }
    if closed && vertices.len() > 1 {
        draw_segment(
            buffer,
            vertices[vertices.len() - 1],
            vertices[0],
            thickness,
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_pixels(buffer: &PixelBuffer) -> usize {
        (0..buffer.height())
            .flat_map(|y| (0..buffer.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| buffer.get(x, y) != BLACK)
            .count()
    }

    #[test]
    fn new_buffer_is_black() {
        let buffer = PixelBuffer::new(4, 3);
        assert_eq!(buffer.channels().len(), 4 * 3 * 3);
        assert_eq!(lit_pixels(&buffer), 0);
    }

    #[test]
    fn set_and_get_round_trip() {
        let mut buffer = PixelBuffer::new(4, 4);
        buffer.set(2, 1, Color(0.25, 0.5, 0.75));
        assert_eq!(buffer.get(2, 1), Color(0.25, 0.5, 0.75));
        assert_eq!(buffer.get(1, 2), BLACK);
    }

    #[test]
    fn thin_point_writes_exactly_one_pixel() {
        let mut buffer = PixelBuffer::new(9, 9);
        draw_point(&mut buffer, GridPoint(4, 4), 0, WHITE);
        assert_eq!(lit_pixels(&buffer), 1);
        assert_eq!(buffer.get(4, 4), WHITE);
    }

    #[test]
    fn thick_point_writes_square_window() {
        let mut buffer = PixelBuffer::new(9, 9);
        draw_point(&mut buffer, GridPoint(4, 4), 2, WHITE);
        assert_eq!(lit_pixels(&buffer), 25);
    }

    #[test]
    fn point_window_is_clipped_at_the_corner() {
        let mut buffer = PixelBuffer::new(9, 9);
        draw_point(&mut buffer, GridPoint(0, 0), 2, WHITE);
        assert_eq!(lit_pixels(&buffer), 9);
    }

    #[test]
    fn point_fully_outside_writes_nothing() {
        let mut buffer = PixelBuffer::new(9, 9);
        draw_point(&mut buffer, GridPoint(-7, 20), 1, WHITE);
        assert_eq!(lit_pixels(&buffer), 0);
    }

    #[test]
    fn zero_length_segment_is_a_single_dab() {
        let mut buffer = PixelBuffer::new(9, 9);
        let p = Complex::new(3.0, 3.0);
        draw_segment(&mut buffer, p, p, 0, WHITE);
        assert_eq!(lit_pixels(&buffer), 1);
        assert_eq!(buffer.get(3, 3), WHITE);
    }

    #[test]
    fn horizontal_segment_inks_the_whole_run() {
        let mut buffer = PixelBuffer::new(10, 3);
        draw_segment(
            &mut buffer,
            Complex::new(0.0, 1.0),
            Complex::new(8.0, 1.0),
            0,
            WHITE,
        );
        for x in 0..8 {
            assert_eq!(buffer.get(x, 1), WHITE, "gap at column {}", x);
        }
    }

    #[test]
    fn segment_leaving_the_buffer_is_clipped() {
        let mut buffer = PixelBuffer::new(4, 4);
        draw_segment(
            &mut buffer,
            Complex::new(-3.0, 2.0),
            Complex::new(9.0, 2.0),
            0,
            WHITE,
        );
        assert_eq!(lit_pixels(&buffer), 4);
    }

    #[test]
    fn closed_path_inks_the_closing_edge() {
        let triangle = [
            Complex::new(1.0, 1.0),
            Complex::new(7.0, 1.0),
            Complex::new(4.0, 6.0),
        ];
        let mut open = PixelBuffer::new(9, 9);
        draw_path(&mut open, &triangle, 0, WHITE, false);
        let mut closed = PixelBuffer::new(9, 9);
        draw_path(&mut closed, &triangle, 0, WHITE, true);
        assert!(lit_pixels(&closed) > lit_pixels(&open));
    }
}
