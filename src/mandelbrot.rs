// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The Mandelbrot engine.
//!
//! Every pixel of the output maps to a point c on the complex plane.
//! The map z = z * z + c is iterated from zero, and the number of
//! steps it takes |z| to pass 2 is the pixel's velocity.  A color
//! scheme turns the velocity into paint; points that never pass 2
//! within the iteration budget are considered members of the set and
//! painted black.
//!
//! Each pixel is independent of every other, so the render can be
//! split into bands of whole rows and handed to scoped threads.  The
//! bands are disjoint slices of one buffer, and the work done per
//! pixel does not depend on its neighbors, so the threaded render is
//! bit-identical to the single-threaded one.
use crossbeam;
use num::{clamp, Complex};
use std::path::PathBuf;

use planes::{Pixel, PlaneMapper};
use raster::{Color, PixelBuffer, BLACK};
use sink::{self, SinkError};

/// Left edge of the rendered window on the real axis.
pub const RE_MIN: f64 = -3.0;

/// Right edge of the rendered window on the real axis.
pub const RE_MAX: f64 = 2.0;

/// Imaginary coordinate under the top row of pixels.  The bottom of
/// the window follows from the image height, since pixels are
/// square.
pub const IM_MIN: f64 = -1.3;

/// Count the iterations of z = z * z + c, starting from zero, until
/// |z| squared reaches 4.  The count is 1-based: a point already
/// outside the radius-2 circle after the first step reports 1.  A
/// point that survives the whole budget reports max_iter + 1, which
/// no escaping point can.  Squared magnitudes keep the square root
/// out of the loop.
pub fn escape_count(c: Complex<f64>, max_iter: usize) -> usize {
    let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    for i in 1..=max_iter {
        z = z * z + c;
        if z.norm_sqr() >= 4.0 {
            return i;
        }
    }
    max_iter + 1
}

/// An ordered run of color stops with linear interpolation between
/// neighbors.  Sampling at 0 gives the first stop, sampling at 1 the
/// last, and everything between blends the two stops it falls
/// across.
#[derive(Clone, Debug)]
pub struct ColorScheme {
    stops: Vec<Color>,
}

impl ColorScheme {
    /// Build a scheme from its stops, in order.  A gradient needs at
    /// least two.
    pub fn new(stops: Vec<Color>) -> ColorScheme {
        assert!(stops.len() >= 2, "a color scheme needs at least two stops");
        ColorScheme { stops }
    }

    /// Sample the gradient at t, clamped to the 0..1 range.
    pub fn sample(&self, t: f64) -> Color {
        let t = clamp(t, 0.0, 1.0);
        let scaled = t * ((self.stops.len() - 1) as f64);
        let index = scaled.floor() as usize;
        if index + 1 >= self.stops.len() {
            return self.stops[self.stops.len() - 1];
        }
        let frac = scaled - (index as f64);
        let (a, b) = (self.stops[index], self.stops[index + 1]);
        Color(
            a.0 + (b.0 - a.0) * frac,
            a.1 + (b.1 - a.1) * frac,
            a.2 + (b.2 - a.2) * frac,
        )
    }
}

impl Default for ColorScheme {
    /// Deep blue through white into amber, the usual postcard look.
    fn default() -> ColorScheme {
        ColorScheme::new(vec![
            Color(0.0, 0.027, 0.392),
            Color(0.125, 0.42, 0.796),
            Color(0.93, 0.95, 1.0),
            Color(1.0, 0.667, 0.0),
        ])
    }
}

/// Turn an escape count into paint.  A count past the budget means
/// the point never escaped and is painted black; otherwise the count
/// is normalized against the 1..max_iter range and the scheme is
/// sampled there.
pub fn iteration_color(scheme: &ColorScheme, iter: usize, max_iter: usize) -> Color {
    if iter > max_iter {
        return BLACK;
    }
    let t = if max_iter > 1 {
        ((iter - 1) as f64) / ((max_iter - 1) as f64)
    } else {
        0.0
    };
    scheme.sample(t)
}

/// Options for a Mandelbrot image.  Every field has a default.
#[derive(Clone, Debug)]
pub struct MandelbrotConfig {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Iteration budget per pixel, at least 1.
    pub max_iter: usize,
    /// Number of row bands rendered concurrently.  1 keeps the whole
    /// render on the calling thread; any value produces the same
    /// image.
    pub threads: usize,
    /// Gradient used for escaping points.
    pub scheme: ColorScheme,
    /// Output format, handed to the sink as a file extension.
    pub format: String,
    /// Output file name, without the extension.
    pub file_name: String,
}

impl Default for MandelbrotConfig {
    fn default() -> MandelbrotConfig {
        MandelbrotConfig {
            width: 1280,
            height: 720,
            max_iter: 50,
            threads: 1,
            scheme: ColorScheme::default(),
            format: "BMP".to_string(),
            file_name: "Mandelbrot".to_string(),
        }
    }
}

/// Render the rows starting at `top` into a band of raw channels.
/// The band holds whole rows, three channels per pixel.
fn render_rows(
    plane: &PlaneMapper,
    scheme: &ColorScheme,
    max_iter: usize,
    top: usize,
    band: &mut [f64],
) {
    let width = plane.width();
    let rows = band.len() / (width * 3);
    for (row, column) in iproduct!(0..rows, 0..width) {
        let c = plane.pixel_to_point(&Pixel(column, top + row));
        let color = iteration_color(scheme, escape_count(c, max_iter), max_iter);
        let offset = (row * width + column) * 3;
        band[offset] = color.0;
        band[offset + 1] = color.1;
        band[offset + 2] = color.2;
    }
}

/// Render the configured window into a fresh buffer.  The image
/// dimensions must be non-zero.
pub fn render(config: &MandelbrotConfig) -> PixelBuffer {
    let plane = PlaneMapper::new(
        config.width,
        config.height,
        Complex::new(RE_MIN, IM_MIN),
        RE_MAX,
    )
    .expect("mandelbrot window requires non-zero image dimensions");
    let mut buffer = PixelBuffer::new(config.width, config.height);
    if config.threads <= 1 {
        render_rows(
            &plane,
            &config.scheme,
            config.max_iter,
            0,
            buffer.channels_mut(),
        );
    } else {
        let band_rows = config.height / config.threads + 1;
        let band_len = band_rows * config.width * 3;
        let scheme = &config.scheme;
        let max_iter = config.max_iter;
        let plane = &plane;
        let bands: Vec<&mut [f64]> = buffer.channels_mut().chunks_mut(band_len).collect();
        crossbeam::scope(|spawner| {
            for (i, band) in bands.into_iter().enumerate() {
                spawner.spawn(move |_| {
                    render_rows(plane, scheme, max_iter, i * band_rows, band);
                });
            }
        })
        .unwrap();
    }
    buffer
}

/// Render and write through the image sink.  Returns the path of the
/// file that was written.
pub fn generate(config: &MandelbrotConfig) -> Result<PathBuf, SinkError> {
    let buffer = render(config);
    sink::save(&buffer, &config.file_name, &config.format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn far_real_points_escape_immediately() {
        assert_eq!(escape_count(Complex::new(2.0, 0.0), 50), 1);
        assert_eq!(escape_count(Complex::new(-3.0, 0.0), 50), 1);
        assert_eq!(escape_count(Complex::new(17.5, 0.0), 50), 1);
    }

    #[test]
    fn the_origin_never_escapes() {
        assert_eq!(escape_count(Complex::new(0.0, 0.0), 1), 2);
        assert_eq!(escape_count(Complex::new(0.0, 0.0), 500), 501);
    }

    #[test]
    fn escape_step_does_not_depend_on_the_budget() {
        // A point just outside the set escapes at the same step no
        // matter how much budget is left beyond it.
        let c = Complex::new(0.26, 0.0);
        let step = escape_count(c, 1000);
        assert!(step <= 1000);
        assert_eq!(escape_count(c, 2000), step);
        assert_eq!(escape_count(c, step), step);
    }

    #[test]
    fn scheme_sample_hits_the_stops() {
        let scheme = ColorScheme::new(vec![BLACK, Color(1.0, 0.0, 0.0), Color(1.0, 1.0, 1.0)]);
        assert_eq!(scheme.sample(0.0), BLACK);
        assert_eq!(scheme.sample(1.0), Color(1.0, 1.0, 1.0));
        assert_eq!(scheme.sample(0.5), Color(1.0, 0.0, 0.0));
    }

    #[test]
    fn scheme_sample_blends_between_stops() {
        let scheme = ColorScheme::new(vec![BLACK, Color(1.0, 0.0, 0.0)]);
        let mid = scheme.sample(0.5);
        assert!((mid.0 - 0.5).abs() < 1e-12);
        assert_eq!(mid.1, 0.0);
        assert_eq!(mid.2, 0.0);
    }

    #[test]
    fn scheme_sample_clamps_out_of_range_input() {
        let scheme = ColorScheme::default();
        assert_eq!(scheme.sample(-3.0), scheme.sample(0.0));
        assert_eq!(scheme.sample(42.0), scheme.sample(1.0));
    }

    #[test]
    #[should_panic]
    fn scheme_rejects_a_single_stop() {
        ColorScheme::new(vec![BLACK]);
    }

    #[test]
    fn survivors_are_painted_black() {
        let scheme = ColorScheme::default();
        assert_eq!(iteration_color(&scheme, 2, 1), BLACK);
        assert_eq!(iteration_color(&scheme, 51, 50), BLACK);
    }

    #[test]
    fn escape_range_spans_the_gradient() {
        let scheme = ColorScheme::default();
        assert_eq!(iteration_color(&scheme, 1, 50), scheme.sample(0.0));
        assert_eq!(iteration_color(&scheme, 50, 50), scheme.sample(1.0));
    }

    #[test]
    fn tiny_render_paints_the_set_black() {
        // At 4x4 the pixel size is 1.25; pixel 2,1 sits at c =
        // (-0.5, -0.05), well inside the set, so it survives any
        // budget and comes out black.  The corner pixel maps to
        // (-3.0, -1.3), escapes on the first step, and takes the low
        // end of the gradient.
        let config = MandelbrotConfig {
            width: 4,
            height: 4,
            max_iter: 1,
            ..Default::default()
        };
        let buffer = render(&config);
        assert_eq!(buffer.get(2, 1), BLACK);
        assert_eq!(buffer.get(0, 0), config.scheme.sample(0.0));
    }

    #[test]
    fn threaded_render_matches_single_threaded() {
        let single = render(&MandelbrotConfig {
            width: 16,
            height: 11,
            max_iter: 30,
            threads: 1,
            ..Default::default()
        });
        let threaded = render(&MandelbrotConfig {
            width: 16,
            height: 11,
            max_iter: 30,
            threads: 3,
            ..Default::default()
        });
        assert_eq!(single, threaded);
    }
}
