//! The image sink.  A finished pixel buffer comes in, a file goes
//! out.  The requested format is lower-cased and appended to the
//! file name as its extension, and the encoder is picked from that
//! extension by the image crate.  Channels are quantized from the
//! 0..1 range to bytes on the way through.
use image;
use image::ColorType;
use num::clamp;
use std::io;
use std::path::PathBuf;

use raster::PixelBuffer;

/// A failed attempt to encode or write an image file.  Carries the
/// path that was being written and the underlying error unmodified.
#[derive(Debug, Fail)]
#[fail(display = "could not write {}: {}", path, cause)]
pub struct SinkError {
    path: String,
    #[cause]
    cause: io::Error,
}

/// Quantize real channels to bytes.  Values are clamped to the 0..1
/// range first, so a buffer that was written correctly loses
/// nothing.
fn quantize(buffer: &PixelBuffer) -> Vec<u8> {
    buffer
        .channels()
        .iter()
        .map(|&c| clamp(c * 255.0, 0.0, 255.0) as u8)
        .collect()
}

/// Encode the buffer to `{file_name}.{format}`, with the format
/// lower-cased.  Unsupported formats surface as the encoder's error.
pub fn save(buffer: &PixelBuffer, file_name: &str, format: &str) -> Result<PathBuf, SinkError> {
    let path = PathBuf::from(format!("{}.{}", file_name, format.to_lowercase()));
    let bytes = quantize(buffer);
    image::save_buffer(
        &path,
        &bytes,
        buffer.width() as u32,
        buffer.height() as u32,
        ColorType::RGB(8),
    )
    .map_err(|cause| SinkError {
        path: path.display().to_string(),
        cause,
    })?;
    Ok(path)
}
