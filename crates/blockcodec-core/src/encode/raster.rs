//! Format dispatch and the atomic output write.

use std::io::{Cursor, Write};
use std::path::Path;

use image::{ExtendedColorType, ImageFormat};
use tempfile::NamedTempFile;

use super::{encode_jpeg, EncodeError};
use crate::decode::DecodedImage;

/// Encode an RGB image in the given raster format.
///
/// JPEG, PNG and TIFF are supported; `jpeg_quality` is only used for JPEG.
pub fn encode_image(
    image: &DecodedImage,
    format: ImageFormat,
    jpeg_quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    match format {
        ImageFormat::Jpeg => encode_jpeg(image, jpeg_quality),
        ImageFormat::Png | ImageFormat::Tiff => {
            super::check_shape(image)?;
            let mut buffer = Cursor::new(Vec::new());
            image::write_buffer_with_format(
                &mut buffer,
                &image.pixels,
                image.width,
                image.height,
                ExtendedColorType::Rgb8,
                format,
            )
            .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
            Ok(buffer.into_inner())
        }
        other => Err(EncodeError::UnsupportedFormat(format!("{:?}", other))),
    }
}

/// Write `bytes` to `path` so that either the complete file appears or
/// nothing does.
///
/// The data goes to a uniquely named temporary file in the same directory,
/// which is then renamed over `path`. The temporary file is removed on any
/// failure.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), EncodeError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| io_error(path, e))?;
    tmp.write_all(bytes).map_err(|e| io_error(path, e))?;
    // A failed persist hands the file back; dropping it deletes it
    tmp.persist(path).map_err(|e| io_error(path, e.error))?;
    Ok(())
}

fn io_error(path: &Path, e: std::io::Error) -> EncodeError {
    EncodeError::IoError(format!("{}: {}", path.display(), e))
}
