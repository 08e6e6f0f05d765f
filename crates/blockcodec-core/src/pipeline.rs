//! End-to-end compression: file in, reconstructed file out.
//!
//! ## Stage Order
//! 1. Validate the configuration
//! 2. Read the input, detect its format from the content, decode to RGB8
//! 3. Apply the edge policy
//! 4. RGB -> Y/Cb/Cr
//! 5. Per-channel block codec with the channel's multiplier
//! 6. Y/Cb/Cr -> RGB, cropped back to the input size
//! 7. Encode in the detected input format and write it atomically
//!
//! The output format is always the one detected from the input bytes, for
//! files and in-memory buffers alike. The extension is only used to name the
//! output.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::channel::{compress_channel, join_channels};
use crate::color::{rgb_to_ycbcr, ycbcr_to_rgb};
use crate::config::{CompressionConfig, EdgePolicy};
use crate::decode::{decode_image, guess_format, read_bytes, DecodedImage};
use crate::encode::{encode_image, write_atomic};
use crate::error::CodecError;
use crate::plane::{is_block_aligned, ChannelName, YccImage};

/// Compress the image at `path` with the default settings.
///
/// Returns the path of the written output, `name_Compressed.ext` next to the
/// input.
pub fn compress(path: impl AsRef<Path>) -> Result<PathBuf, CodecError> {
    compress_with_config(path, &CompressionConfig::default())
}

/// Compress the image at `path` and write the reconstruction next to it.
///
/// # Errors
///
/// - `CodecError::InvalidConfiguration` before the file is opened
/// - `CodecError::Decode` if the input is missing or not a supported image
/// - `CodecError::Dimension` for unaligned sizes under `EdgePolicy::Reject`
/// - `CodecError::Encode` if the output cannot be encoded or written
///
/// No output file exists after any error.
pub fn compress_with_config(
    path: impl AsRef<Path>,
    config: &CompressionConfig,
) -> Result<PathBuf, CodecError> {
    let input = path.as_ref();
    config.validate()?;

    let output = compressed_path(input, &config.output_suffix);
    let source = read_bytes(input)?;
    let encoded = compress_bytes(&source, config)?;
    write_atomic(&output, &encoded)?;

    info!(
        "compressed {} -> {} ({} -> {} bytes)",
        input.display(),
        output.display(),
        source.len(),
        encoded.len()
    );
    Ok(output)
}

/// Run the lossy round trip on an in-memory RGB image.
///
/// The result has the same dimensions as the input.
///
/// # Errors
///
/// `CodecError::InvalidConfiguration` for unusable settings,
/// `CodecError::InvalidImage` for a malformed pixel buffer and
/// `CodecError::Dimension` for zero-sized images, or unaligned ones under
/// `EdgePolicy::Reject`.
pub fn compress_image(
    image: &DecodedImage,
    config: &CompressionConfig,
) -> Result<DecodedImage, CodecError> {
    config.validate()?;
    image.validate()?;

    let (width, height) = (image.width, image.height);
    let aligned = is_block_aligned(width, height);
    if !aligned && config.edge_policy == EdgePolicy::Reject {
        return Err(CodecError::Dimension { width, height });
    }

    let mut ycc = rgb_to_ycbcr(image);
    if !aligned {
        ycc = ycc.padded_to_block();
        debug!(
            "padded {}x{} to {}x{}",
            width,
            height,
            ycc.width(),
            ycc.height()
        );
    }

    let mut compressed = compress_ycc(&ycc, config)?;
    if !aligned {
        compressed = compressed.cropped(width, height);
    }

    Ok(ycbcr_to_rgb(&compressed))
}

/// Compress each plane of a Y/Cb/Cr image with its channel's multiplier.
///
/// Planes must already be block aligned.
pub fn compress_ycc(image: &YccImage, config: &CompressionConfig) -> Result<YccImage, CodecError> {
    let [y, cb, cr] = ChannelName::ALL.map(|name| {
        let multiplier = config.multiplier_for(name);
        debug!("channel {:?}: multiplier {}", name, multiplier);
        compress_channel(image.channel(name), multiplier, config.weighting)
    });
    join_channels(y?, cb?, cr?)
}

/// Compress an encoded image held in memory and re-encode it in the format
/// detected from its content.
pub fn compress_bytes(bytes: &[u8], config: &CompressionConfig) -> Result<Vec<u8>, CodecError> {
    config.validate()?;

    let format = guess_format(bytes)?;
    let image = decode_image(bytes)?;
    debug!("decoded {:?} ({}x{})", format, image.width, image.height);

    let reconstructed = compress_image(&image, config)?;
    Ok(encode_image(&reconstructed, format, config.jpeg_quality)?)
}

/// Derive the output path by inserting `suffix` before the extension.
///
/// Only the last extension counts: `dir/a.b.png` becomes
/// `dir/a.b_Compressed.png`. A name without an extension gets the suffix
/// appended.
pub fn compressed_path(input: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(input.file_stem().unwrap_or_default());
    name.push(suffix);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}
