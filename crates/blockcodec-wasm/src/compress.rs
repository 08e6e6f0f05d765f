//! Compression WASM bindings.
//!
//! # Functions
//!
//! - [`compress_pixels`] - Lossy round trip on raw RGB pixels
//! - [`compress_encoded`] - Same, on an encoded JPEG/PNG/TIFF file, re-encoded in its own format
//! - [`default_config`] - The default settings as a plain object
//!
//! # Example
//!
//! ```typescript
//! import { compress_encoded } from '@blockcodec/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const out = compress_encoded(bytes, { lumaMultiplier: 2.0, edgePolicy: 'pad' });
//! ```

use crate::types::{JsCompressionConfig, JsImage};
use blockcodec_core::pipeline;
use blockcodec_core::CompressionConfig;
use wasm_bindgen::prelude::*;

/// Run the block codec on an RGB image and return the reconstruction.
///
/// # Arguments
///
/// * `image` - Source image
/// * `config` - Settings object, or `undefined`/`null` for the defaults
///
/// # Errors
///
/// Returns an error for an invalid config, a malformed pixel buffer or
/// unaligned dimensions (unless `edgePolicy` is `"pad"`).
#[wasm_bindgen]
pub fn compress_pixels(image: &JsImage, config: JsValue) -> Result<JsImage, JsValue> {
    let config = parse_config(config)?;
    pipeline::compress_image(&image.to_decoded(), &config)
        .map(JsImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Run the block codec on an encoded image file held in memory.
///
/// The output uses the same format as the input.
#[wasm_bindgen]
pub fn compress_encoded(bytes: &[u8], config: JsValue) -> Result<Vec<u8>, JsValue> {
    let config = parse_config(config)?;
    pipeline::compress_bytes(bytes, &config).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Return the default settings.
#[wasm_bindgen]
pub fn default_config() -> Result<JsValue, JsValue> {
    let js = JsCompressionConfig::from(&CompressionConfig::default());
    serde_wasm_bindgen::to_value(&js).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_config(value: JsValue) -> Result<CompressionConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(CompressionConfig::default());
    }
    let js: JsCompressionConfig = serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid compression config: {}", e)))?;
    Ok(js.into())
}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_compress_pixels_default_config() {
        let image = JsImage::new(8, 8, vec![128u8; 8 * 8 * 3]);
        let out = compress_pixels(&image, JsValue::UNDEFINED).unwrap();
        assert_eq!(out.width(), 8);
        assert_eq!(out.byte_length(), 8 * 8 * 3);
    }

    #[wasm_bindgen_test]
    fn test_compress_pixels_rejects_zero_multiplier() {
        let image = JsImage::new(8, 8, vec![128u8; 8 * 8 * 3]);
        let js = JsCompressionConfig {
            luma_multiplier: Some(0.0),
            ..Default::default()
        };
        let config = serde_wasm_bindgen::to_value(&js).unwrap();
        assert!(compress_pixels(&image, config).is_err());
    }

    #[wasm_bindgen_test]
    fn test_compress_pixels_bad_buffer() {
        let image = JsImage::new(8, 8, vec![0u8; 10]);
        assert!(compress_pixels(&image, JsValue::NULL).is_err());
    }

    #[wasm_bindgen_test]
    fn test_compress_pixels_oversized_dimensions() {
        // 65536 * 65536 * 3 does not fit in a 32-bit usize
        let image = JsImage::new(65536, 65536, Vec::new());
        assert!(compress_pixels(&image, JsValue::UNDEFINED).is_err());
    }

    #[wasm_bindgen_test]
    fn test_compress_encoded_garbage() {
        assert!(compress_encoded(&[0, 1, 2, 3], JsValue::UNDEFINED).is_err());
    }

    #[wasm_bindgen_test]
    fn test_default_config_parses_back() {
        let value = default_config().unwrap();
        let config = parse_config(value).unwrap();
        assert_eq!(config, CompressionConfig::default());
    }

    #[wasm_bindgen_test]
    fn test_default_config_has_no_output_suffix() {
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Keys {
            output_suffix: Option<String>,
        }
        let shape: Keys = serde_wasm_bindgen::from_value(default_config().unwrap()).unwrap();
        assert!(shape.output_suffix.is_none());
    }

    #[wasm_bindgen_test]
    fn test_invalid_config_shape() {
        let value = serde_wasm_bindgen::to_value(&42).unwrap();
        assert!(compress_encoded(&[0xFF, 0xD8], value).is_err());
    }
}
