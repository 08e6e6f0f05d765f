//! Blockcodec Core - block transform image codec
//!
//! This crate implements the lossy stage of a JPEG-style codec: an image is
//! converted to Y/Cb/Cr, each channel is tiled into 8x8 blocks, transformed
//! with an orthonormal DCT, quantized against a perceptual weighting table,
//! dequantized and transformed back. The reconstructed image is written next
//! to the input.
//!
//! # Module Structure
//!
//! - `color` - RGB <-> Y/Cb/Cr conversion (BT.601 studio swing)
//! - `dct` - Forward/inverse 2D DCT on blocks and whole channels
//! - `quant` - Quantization table, weighting strategies, multiplier validation
//! - `channel` - Per-channel round trip and channel split/join
//! - `pipeline` - File-to-file compression entry points
//! - `worker` - Background execution with a single-result hand-off
//!
//! # Concurrency
//!
//! Every operation is synchronous and touches only its arguments. Independent
//! calls can run concurrently without synchronization.

pub mod channel;
pub mod color;
pub mod config;
pub mod dct;
pub mod decode;
pub mod encode;
pub mod error;
pub mod pipeline;
pub mod plane;
pub mod quant;
#[cfg(not(target_arch = "wasm32"))]
pub mod worker;

pub use channel::{compress_channel, join_channels, split_channels};
pub use color::{rgb_to_ycbcr, ycbcr_to_rgb};
pub use config::{CompressionConfig, EdgePolicy};
pub use dct::{dct_channel, forward_dct, idct_channel, inverse_dct};
pub use decode::DecodedImage;
pub use error::CodecError;
pub use pipeline::{
    compress, compress_bytes, compress_image, compress_with_config, compress_ycc, compressed_path,
};
pub use plane::{Block, Channel, ChannelName, YccImage, BLOCK_SIZE};
pub use quant::{dequantize, quantize, validate_multiplier, Weighting, IJG_LUMINANCE_TABLE};
#[cfg(not(target_arch = "wasm32"))]
pub use worker::{spawn_compression, CompressionTask};
