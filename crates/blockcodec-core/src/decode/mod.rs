//! Image decoding for the compression pipeline.
//!
//! This module provides functionality for:
//! - Detecting the raster format of a byte buffer
//! - Decoding JPEG, PNG and TIFF images to RGB8
//! - Reading an image file from disk
//!
//! Decoding is the pipeline's only file read.

mod raster;
mod types;

pub use raster::{decode_image, guess_format, read_bytes, read_image};
pub use types::{DecodeError, DecodedImage};
