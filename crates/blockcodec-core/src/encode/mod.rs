//! Image encoding for the compression pipeline.
//!
//! This module provides functionality for:
//! - Encoding reconstructed RGB images as JPEG, PNG or TIFF
//! - Re-encoding in the format the input was detected as
//! - Writing the result atomically (the pipeline's only file write)

mod jpeg;
mod raster;

use thiserror::Error;

use crate::decode::DecodedImage;

pub use jpeg::encode_jpeg;
pub use raster::{encode_image, write_atomic};

/// Errors that can occur while encoding or writing the output image.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The format has no supported encoder
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Encoding failed
    #[error("Image encoding failed: {0}")]
    EncodingFailed(String),

    /// The output file could not be written
    #[error("Failed to write output: {0}")]
    IoError(String),
}

fn check_shape(image: &DecodedImage) -> Result<(), EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    match image.expected_byte_len() {
        Some(expected) if expected == image.pixels.len() => Ok(()),
        expected => Err(EncodeError::InvalidPixelData {
            expected: expected.unwrap_or(usize::MAX),
            actual: image.pixels.len(),
        }),
    }
}
