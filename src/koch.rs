// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The Koch curve generator.
//!
//! One construction rule does all the work: a segment loses its
//! middle third, and an equilateral bump is erected over the gap.
//! Five vertices come out where two went in.  Applying the rule to
//! every segment of a path, over and over, turns a straight line
//! into the classic crinkled coastline, and turns a triangle into
//! the Koch snowflake.
use num::Complex;
use std::path::PathBuf;

use raster::{draw_path, Color, PixelBuffer, WHITE};
use sink::{self, SinkError};
use vector::{magnitude, normalize};

/// sqrt(3)/2, the height of an equilateral triangle of unit side.
pub const SQRT3_HALVES: f64 = 0.866_025_403_784_438_6;

/// Replace one segment with the five vertices of the Koch rule.  The
/// first and last outputs are p1 and p2 themselves; between them sit
/// the two trisection points and, at the middle, the apex of the
/// bump erected over the removed third, on the left-normal side of
/// the direction of travel.  The endpoints must be distinct.
pub fn koch_segment(p1: Complex<f64>, p2: Complex<f64>) -> [Complex<f64>; 5] {
    let span = p2 - p1;
    let dir = normalize(span);
    let normal = Complex::new(dir.im, -dir.re);
    let apex = p1 + span * 0.5 + normal * (magnitude(span) / 3.0 * SQRT3_HALVES);
    [p1, p1 + span / 3.0, apex, p1 + span * (2.0 / 3.0), p2]
}

/// One refinement pass over a whole path.  Consecutive five-point
/// replacements share their endpoints, so a path of n vertices comes
/// out with 4 * (n - 1) + 1, not five times as many.
pub fn subdivide(vertices: &[Complex<f64>]) -> Vec<Complex<f64>> {
    let mut out = Vec::with_capacity(4 * (vertices.len() - 1) + 1);
    out.push(vertices[0]);
    for pair in vertices.windows(2) {
        let seg = koch_segment(pair[0], pair[1]);
        out.extend_from_slice(&seg[1..]);
    }
    out
}

/// Refine a path `iterations` times, draw the result into the
/// buffer as an open polyline, and return the final vertex list.
/// Drawing is a terminal step: only the finest subdivision is ever
/// inked.  Callers supply at least one iteration.
pub fn koch_curve(
    buffer: &mut PixelBuffer,
    vertices: &[Complex<f64>],
    iterations: usize,
    thickness: usize,
    color: Color,
) -> Vec<Complex<f64>> {
    let mut path = vertices.to_vec();
    for _ in 0..iterations {
        path = subdivide(&path);
    }
    draw_path(buffer, &path, thickness, color, false);
    path
}

/// The starting path for a snowflake that will fill a square image
/// of the given dimension.  It is an equilateral triangle of side
/// sqrt(3)/2 * dimension, horizontally centered with its flat edge
/// up, followed by a repeat of the first vertex to close the loop.
/// The proportions are chosen so that the six-pointed star produced
/// by the first refinement spans the full image height.
pub fn snowflake_path(square_dimension: f64) -> Vec<Complex<f64>> {
    let side = SQRT3_HALVES * square_dimension;
    let top = square_dimension / 4.0;
    let left = (square_dimension - side) / 2.0;
    let v1 = Complex::new(left, top);
    let v2 = Complex::new(left + side, top);
    let v3 = Complex::new(square_dimension / 2.0, top + SQRT3_HALVES * side);
    vec![v1, v2, v3, v1]
}

/// Options for a Koch curve image.  Every field has a default, so a
/// caller can start from `Default::default()` and override the few
/// it cares about.
#[derive(Clone, Debug)]
pub struct KochCurveConfig {
    /// Number of refinement passes, at least 1.
    pub iterations: usize,
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Pen half-width in pixels; 0 is a single-pixel stroke.
    pub thickness: usize,
    /// Stroke color.
    pub color: Color,
    /// Output format, handed to the sink as a file extension.
    pub format: String,
    /// Output file name, without the extension.
    pub file_name: String,
}

impl Default for KochCurveConfig {
    fn default() -> KochCurveConfig {
        KochCurveConfig {
            iterations: 5,
            width: 2048,
            height: 2048,
            thickness: 0,
            color: WHITE,
            format: "BMP".to_string(),
            file_name: "koch_curve".to_string(),
        }
    }
}

/// Options for a Koch snowflake image.
#[derive(Clone, Debug)]
pub struct KochSnowflakeConfig {
    /// Number of refinement passes, at least 1.
    pub iterations: usize,
    /// Side of the square output image, in pixels.
    pub square_dimension: usize,
    /// Pen half-width in pixels; 0 is a single-pixel stroke.
    pub thickness: usize,
    /// Stroke color.
    pub color: Color,
    /// Output format, handed to the sink as a file extension.
    pub format: String,
    /// Output file name, without the extension.
    pub file_name: String,
}

impl Default for KochSnowflakeConfig {
    fn default() -> KochSnowflakeConfig {
        KochSnowflakeConfig {
            iterations: 5,
            square_dimension: 2048,
            thickness: 0,
            color: WHITE,
            format: "BMP".to_string(),
            file_name: "koch_snowflake".to_string(),
        }
    }
}

/// Render a Koch curve grown from a single horizontal baseline
/// spanning the full image width at two thirds of its height.
pub fn render_curve(config: &KochCurveConfig) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(config.width, config.height);
    let baseline_y = (config.height as f64) * 2.0 / 3.0;
    let baseline = [
        Complex::new(0.0, baseline_y),
        Complex::new(config.width as f64, baseline_y),
    ];
    koch_curve(
        &mut buffer,
        &baseline,
        config.iterations,
        config.thickness,
        config.color,
    );
    buffer
}

/// Render a Koch snowflake into a square buffer.
pub fn render_snowflake(config: &KochSnowflakeConfig) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(config.square_dimension, config.square_dimension);
    let path = snowflake_path(config.square_dimension as f64);
    koch_curve(
        &mut buffer,
        &path,
        config.iterations,
        config.thickness,
        config.color,
    );
    buffer
}

/// Render a Koch curve and write it through the image sink.  Returns
/// the path of the file that was written.
pub fn generate_curve(config: &KochCurveConfig) -> Result<PathBuf, SinkError> {
    let buffer = render_curve(config);
    sink::save(&buffer, &config.file_name, &config.format)
}

/// Render a Koch snowflake and write it through the image sink.
pub fn generate_snowflake(config: &KochSnowflakeConfig) -> Result<PathBuf, SinkError> {
    let buffer = render_snowflake(config);
    sink::save(&buffer, &config.file_name, &config.format)
}
