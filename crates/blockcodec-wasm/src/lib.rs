//! Blockcodec WASM - WebAssembly bindings for the block transform codec
//!
//! This crate exposes the in-memory blockcodec-core pipeline to
//! JavaScript/TypeScript. File paths and the background worker are not
//! available here; the browser worker owns the file and calls these
//! functions directly.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible image and config types
//! - `compress` - Compression bindings (pixels or encoded bytes)
//!
//! # Usage
//!
//! ```typescript
//! import init, { compress_pixels, JsImage } from '@blockcodec/wasm';
//!
//! await init();
//!
//! const image = new JsImage(width, height, rgbPixels);
//! const out = compress_pixels(image, { chromaMultiplier: 0.5 });
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod types;

pub use compress::{compress_encoded, compress_pixels, default_config};
pub use types::{JsCompressionConfig, JsImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
