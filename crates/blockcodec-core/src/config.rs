//! Compression settings.

use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::plane::ChannelName;
use crate::quant::{validate_multiplier, Weighting};

/// Default multiplier for the luma channel.
pub const DEFAULT_LUMA_MULTIPLIER: f32 = 2.0;
/// Default multiplier for both chroma channels.
pub const DEFAULT_CHROMA_MULTIPLIER: f32 = 0.5;
/// Marker inserted before the output file's extension.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_Compressed";
/// Encoder quality used when the output is JPEG.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// What to do with images whose sides are not multiples of 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgePolicy {
    /// Fail with `CodecError::Dimension`.
    #[default]
    Reject,
    /// Replicate the last row/column up to the next multiple of 8, compress,
    /// then crop back to the original size.
    Pad,
}

/// Settings for one compression run.
///
/// Missing fields take their defaults when deserialized, so a partial
/// object such as `{ "luma_multiplier": 4.0 }` is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// Quality multiplier for Y (larger = finer)
    pub luma_multiplier: f32,
    /// Quality multiplier for Cb and Cr (larger = finer)
    pub chroma_multiplier: f32,
    /// Quantization strategy
    pub weighting: Weighting,
    /// Handling of unaligned dimensions
    pub edge_policy: EdgePolicy,
    /// Marker inserted before the output extension
    pub output_suffix: String,
    /// JPEG encoder quality (1-100)
    pub jpeg_quality: u8,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            luma_multiplier: DEFAULT_LUMA_MULTIPLIER,
            chroma_multiplier: DEFAULT_CHROMA_MULTIPLIER,
            weighting: Weighting::default(),
            edge_policy: EdgePolicy::default(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl CompressionConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace both multipliers.
    pub fn with_multipliers(mut self, luma: f32, chroma: f32) -> Self {
        self.luma_multiplier = luma;
        self.chroma_multiplier = chroma;
        self
    }

    /// Replace the edge policy.
    pub fn with_edge_policy(mut self, edge_policy: EdgePolicy) -> Self {
        self.edge_policy = edge_policy;
        self
    }

    /// Replace the weighting strategy.
    pub fn with_weighting(mut self, weighting: Weighting) -> Self {
        self.weighting = weighting;
        self
    }

    /// Multiplier applied to the given channel.
    pub fn multiplier_for(&self, channel: ChannelName) -> f32 {
        if channel.is_luma() {
            self.luma_multiplier
        } else {
            self.chroma_multiplier
        }
    }

    /// Check every field before any data is touched.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::InvalidConfiguration` for a multiplier that is
    /// not a finite positive number, or an output suffix that is empty or
    /// contains a path separator.
    pub fn validate(&self) -> Result<(), CodecError> {
        validate_multiplier(self.luma_multiplier)?;
        validate_multiplier(self.chroma_multiplier)?;

        if self.output_suffix.is_empty() {
            return Err(CodecError::InvalidConfiguration(
                "output suffix must not be empty".to_string(),
            ));
        }
        if self.output_suffix.contains(['/', '\\']) {
            return Err(CodecError::InvalidConfiguration(format!(
                "output suffix {:?} must not contain a path separator",
                self.output_suffix
            )));
        }
        Ok(())
    }
}
