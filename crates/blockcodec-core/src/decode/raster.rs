//! Raster decoding (JPEG, PNG, TIFF) into RGB8.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, ImageReader};

use super::{DecodeError, DecodedImage};

/// Detect the raster format from the leading bytes.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the signature is unknown.
pub fn guess_format(bytes: &[u8]) -> Result<ImageFormat, DecodeError> {
    image::guess_format(bytes).map_err(|_| DecodeError::InvalidFormat)
}

/// Decode an image from bytes, converting any pixel layout to RGB8.
///
/// # Arguments
///
/// * `bytes` - Raw file bytes
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be detected.
/// Returns `DecodeError::CorruptedFile` if the data is corrupted or truncated.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    Ok(DecodedImage::from_rgb_image(img.into_rgb8()))
}

/// Read the raw bytes of the file at `path`.
///
/// # Errors
///
/// Returns `DecodeError::IoError` if the file cannot be read.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>, DecodeError> {
    std::fs::read(path).map_err(|e| DecodeError::IoError(format!("{}: {}", path.display(), e)))
}

/// Read and decode the image file at `path`.
///
/// # Errors
///
/// Returns `DecodeError::IoError` if the file cannot be read, otherwise the
/// errors of [`decode_image`].
pub fn read_image(path: &Path) -> Result<DecodedImage, DecodeError> {
    decode_image(&read_bytes(path)?)
}
