#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Fractal image generator
//!
//! Two families of fractal are rendered here.  The Koch curve (and
//! its closed cousin, the snowflake) is pure line geometry: a segment
//! is replaced by four segments bending around an equilateral bump,
//! and the replacement is applied again to every segment it produced.
//! After enough passes the vertex list is handed to a rasterizer that
//! walks each segment and stamps square pen dabs into a pixel buffer.
//!
//! The Mandelbrot set is the opposite kind of object.  There is no
//! geometry to subdivide; instead every pixel is mapped to a point c
//! on the complex plane and the map z = z * z + c is iterated from
//! zero.  The number of steps it takes |z| to pass 2 is the pixel's
//! "velocity", and a color scheme turns that velocity into paint.
//! Points that never leave are painted black.
//!
//! Either way the result is a width x height buffer of RGB channels
//! in the 0..1 range, written out exactly once through the image
//! sink.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
#[macro_use]
extern crate itertools;
extern crate num;

#[cfg(test)]
extern crate tempfile;

pub mod koch;
pub mod mandelbrot;
pub mod planes;
pub mod raster;
pub mod sink;
pub mod vector;

pub use koch::{KochCurveConfig, KochSnowflakeConfig};
pub use mandelbrot::{ColorScheme, MandelbrotConfig};
pub use raster::{Color, PixelBuffer, BLACK, WHITE};
pub use sink::SinkError;
