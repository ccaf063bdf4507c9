//! Contains the PlaneMapper struct, which ties a rectangle on the
//! integral plane with an origin at 0,0 to a window on the complex
//! plane.  A single scale factor is derived from the real-axis span
//! and the image width, and the same factor is used vertically, so
//! pixels are always square and the imaginary extent follows from
//! the image height.
use num::Complex;

/// Describes the x, y of a point in a region.  Both values are
/// non-negative and count from the upper-left corner of the image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels on the integral plane to samples on the complex
/// plane.  The origin is the complex number under pixel 0,0.
#[derive(Debug)]
pub struct PlaneMapper {
    width: usize,
    height: usize,
    origin: Complex<f64>,
    // Complex-plane distance covered by one pixel, on both axes.
    pixel_size: f64,
}

impl PlaneMapper {
    /// Constructor.  Takes the image dimensions, the complex number
    /// sitting under the upper-left pixel, and the real coordinate of
    /// the right edge.  The scale is fixed by the real span and the
    /// width; the imaginary span is whatever height pixels of that
    /// scale cover.
    pub fn new(
        width: usize,
        height: usize,
        origin: Complex<f64>,
        re_max: f64,
    ) -> Result<PlaneMapper, String> {
        if width == 0 || height == 0 {
            return Err("The integral plane has no pixels.".to_string());
        }
        if re_max <= origin.re {
            return Err("The right edge is not to the right of the origin.".to_string());
        }
        let pixel_size = (re_max - origin.re) / (width as f64);
        Ok(PlaneMapper {
            width,
            height,
            origin,
            pixel_size,
        })
    }

    /// Width of the integral plane in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the integral plane in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Given the row and column of a pixel on the integral plane,
    /// return the complex number that sits under it.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.origin.re + (pixel.0 as f64) * self.pixel_size,
            self.origin.im + (pixel.1 as f64) * self.pixel_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planemapper_fails_on_empty_plane() {
        let pm = PlaneMapper::new(0, 4, Complex::new(-1.0, -1.0), 1.0);
        assert!(pm.is_err());
        let pm = PlaneMapper::new(4, 0, Complex::new(-1.0, -1.0), 1.0);
        assert!(pm.is_err());
    }

    #[test]
    fn planemapper_fails_on_inverted_window() {
        let pm = PlaneMapper::new(4, 4, Complex::new(1.0, -1.0), -1.0);
        assert!(pm.is_err());
    }

    #[test]
    fn planemapper_passes_on_good_shape() {
        let pm = PlaneMapper::new(4, 4, Complex::new(-1.0, -1.0), 1.0);
        assert!(pm.is_ok());
    }

    #[test]
    fn origin_pixel_maps_to_origin_point() {
        let pm = PlaneMapper::new(10, 10, Complex::new(-3.0, -1.3), 2.0).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-3.0, -1.3));
    }

    #[test]
    fn right_edge_maps_to_re_max() {
        let pm = PlaneMapper::new(10, 10, Complex::new(-3.0, -1.3), 2.0).unwrap();
        let edge = pm.pixel_to_point(&Pixel(10, 0));
        assert_eq!(edge.re, 2.0);
    }

    #[test]
    fn pixels_are_square() {
        // A wide, short window still steps the same distance on both
        // axes.
        let pm = PlaneMapper::new(10, 2, Complex::new(0.0, 0.0), 5.0).unwrap();
        let p = pm.pixel_to_point(&Pixel(1, 1));
        assert_eq!(p.re, 0.5);
        assert_eq!(p.im, 0.5);
    }
}
