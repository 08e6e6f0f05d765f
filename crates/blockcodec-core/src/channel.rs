//! Per-channel lossy round trip.
//!
//! A channel is tiled into 8x8 blocks and each block goes through
//! forward DCT, quantization, dequantization and inverse DCT. The result is
//! the channel as a decoder would reconstruct it.

use crate::dct::{forward_dct, inverse_dct};
use crate::error::CodecError;
use crate::plane::{Channel, ChannelName, YccImage};
use crate::quant::{validate_multiplier, Weighting};

/// Compress and reconstruct one channel.
///
/// # Arguments
///
/// * `channel` - Plane whose dimensions are multiples of 8
/// * `multiplier` - Quality multiplier; the quantization step is `table / multiplier`
/// * `weighting` - Quantization strategy
///
/// # Errors
///
/// Returns `CodecError::InvalidConfiguration` for an unusable multiplier
/// (checked before any block is transformed) and `CodecError::Dimension`
/// for planes that do not tile into whole blocks.
pub fn compress_channel(
    channel: &Channel,
    multiplier: f32,
    weighting: Weighting,
) -> Result<Channel, CodecError> {
    let multiplier = validate_multiplier(multiplier)?;

    channel.map_blocks(|block| {
        let coeffs = forward_dct(block);
        let quantized = weighting.quantize(&coeffs, multiplier)?;
        let restored = weighting.dequantize(&quantized, multiplier)?;
        Ok(inverse_dct(&restored))
    })
}

/// Split a Y/Cb/Cr image into its named planes.
pub fn split_channels(image: YccImage) -> [(ChannelName, Channel); 3] {
    [
        (ChannelName::Y, image.y),
        (ChannelName::Cb, image.cb),
        (ChannelName::Cr, image.cr),
    ]
}

/// Recombine three planes into a Y/Cb/Cr image.
///
/// # Errors
///
/// Returns `CodecError::InvalidImage` if the chroma planes do not have the
/// same dimensions and sample count as the luma plane.
pub fn join_channels(y: Channel, cb: Channel, cr: Channel) -> Result<YccImage, CodecError> {
    y.ensure_shape()?;
    for plane in [&cb, &cr] {
        if plane.width != y.width || plane.height != y.height {
            return Err(CodecError::InvalidImage {
                expected: y.samples.len(),
                actual: plane.samples.len(),
            });
        }
        plane.ensure_shape()?;
    }
    Ok(YccImage { y, cb, cr })
}
