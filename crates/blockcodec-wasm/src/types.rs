//! WASM-compatible wrapper types.
//!
//! This module provides JavaScript-friendly types that wrap the core blockcodec
//! types, handling the conversion between Rust and JavaScript data representations.

use blockcodec_core::config::{
    DEFAULT_CHROMA_MULTIPLIER, DEFAULT_JPEG_QUALITY, DEFAULT_LUMA_MULTIPLIER,
    DEFAULT_OUTPUT_SUFFIX,
};
use blockcodec_core::{CompressionConfig, DecodedImage, EdgePolicy, Weighting};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// An RGB image for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsImage {
    /// Create an image from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsImage {
        JsImage {
            width,
            height,
            pixels,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Convert to a core image without checking the buffer length; the core
    /// pipeline validates it.
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        DecodedImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// Compression settings as passed from TypeScript.
///
/// Field names are camelCase on the JavaScript side; every field is optional
/// and falls back to the core default. The output suffix is not exposed:
/// the bindings never name files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsCompressionConfig {
    pub luma_multiplier: Option<f32>,
    pub chroma_multiplier: Option<f32>,
    /// "perceptual" or "mask"
    pub weighting: Option<Weighting>,
    /// "reject" or "pad"
    pub edge_policy: Option<EdgePolicy>,
    pub jpeg_quality: Option<u8>,
}

impl From<JsCompressionConfig> for CompressionConfig {
    fn from(js: JsCompressionConfig) -> Self {
        CompressionConfig {
            luma_multiplier: js.luma_multiplier.unwrap_or(DEFAULT_LUMA_MULTIPLIER),
            chroma_multiplier: js.chroma_multiplier.unwrap_or(DEFAULT_CHROMA_MULTIPLIER),
            weighting: js.weighting.unwrap_or_default(),
            edge_policy: js.edge_policy.unwrap_or_default(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            jpeg_quality: js.jpeg_quality.unwrap_or(DEFAULT_JPEG_QUALITY),
        }
    }
}

impl From<&CompressionConfig> for JsCompressionConfig {
    fn from(config: &CompressionConfig) -> Self {
        JsCompressionConfig {
            luma_multiplier: Some(config.luma_multiplier),
            chroma_multiplier: Some(config.chroma_multiplier),
            weighting: Some(config.weighting),
            edge_policy: Some(config.edge_policy),
            jpeg_quality: Some(config.jpeg_quality),
        }
    }
}
