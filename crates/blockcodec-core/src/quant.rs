//! Coefficient quantization.
//!
//! Quantization scales each DCT coefficient by `multiplier / table[cell]`
//! and rounds to the nearest integer (ties to even). Dequantization
//! multiplies by `table[cell] / multiplier`, undoing the scaling but not the
//! rounding, which is where all of the codec's loss comes from.
//!
//! The effective step size of a cell is therefore `table[cell] / multiplier`:
//! a larger multiplier gives a smaller step and keeps more precision, a
//! multiplier below one widens the step and discards more.
//!
//! Two weighting strategies are available:
//! - [`Weighting::Perceptual`]: the IJG standard luminance table
//! - [`Weighting::Mask`]: a hard cutoff keeping only the ten lowest-frequency
//!   coefficients

use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::plane::{Block, BLOCK_SIZE};

/// The IJG standard luminance quantization table, indexed `[row][col]`.
pub const IJG_LUMINANCE_TABLE: [[u16; BLOCK_SIZE]; BLOCK_SIZE] = [
    [16, 11, 10, 16, 24, 40, 51, 61],
    [12, 12, 14, 19, 26, 58, 60, 55],
    [14, 13, 16, 24, 40, 57, 69, 56],
    [14, 17, 22, 29, 51, 87, 80, 62],
    [18, 22, 37, 56, 68, 109, 103, 77],
    [24, 35, 55, 64, 81, 104, 113, 92],
    [49, 64, 78, 87, 103, 121, 120, 101],
    [72, 92, 95, 98, 112, 100, 103, 99],
];

/// Coefficients with `row + col` below this survive [`Weighting::Mask`].
pub const MASK_CUTOFF: usize = 4;

/// How coefficients are weighted before rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weighting {
    /// Divide by the IJG table scaled by the multiplier, then round.
    #[default]
    Perceptual,
    /// Keep the low-frequency triangle unchanged and zero everything else.
    /// The multiplier is validated but does not affect the result.
    Mask,
}

impl Weighting {
    /// Quantize one block of coefficients.
    pub fn quantize(self, coeffs: &Block, multiplier: f32) -> Result<Block, CodecError> {
        let multiplier = validate_multiplier(multiplier)?;
        Ok(match self {
            Weighting::Perceptual => coeffs.map(|row, col, v| {
                (v * multiplier / IJG_LUMINANCE_TABLE[row][col] as f32).round_ties_even()
            }),
            Weighting::Mask => {
                coeffs.map(|row, col, v| if is_masked_in(row, col) { v } else { 0.0 })
            }
        })
    }

    /// Undo the scaling step of [`Weighting::quantize`].
    pub fn dequantize(self, quantized: &Block, multiplier: f32) -> Result<Block, CodecError> {
        let multiplier = validate_multiplier(multiplier)?;
        Ok(match self {
            Weighting::Perceptual => quantized
                .map(|row, col, q| q * IJG_LUMINANCE_TABLE[row][col] as f32 / multiplier),
            Weighting::Mask => *quantized,
        })
    }
}

#[inline]
fn is_masked_in(row: usize, col: usize) -> bool {
    row + col < MASK_CUTOFF
}

/// Reject multipliers that would make the table scaling meaningless.
///
/// # Errors
///
/// Returns `CodecError::InvalidConfiguration` for zero, negative, NaN or
/// infinite values.
pub fn validate_multiplier(multiplier: f32) -> Result<f32, CodecError> {
    if multiplier.is_finite() && multiplier > 0.0 {
        Ok(multiplier)
    } else {
        Err(CodecError::InvalidConfiguration(format!(
            "quality multiplier must be finite and positive, got {}",
            multiplier
        )))
    }
}

/// Effective perceptual step size `table[row][col] / multiplier`.
pub fn quantization_step(row: usize, col: usize, multiplier: f32) -> Result<f32, CodecError> {
    let multiplier = validate_multiplier(multiplier)?;
    Ok(IJG_LUMINANCE_TABLE[row][col] as f32 / multiplier)
}

/// Quantize `coeffs` with the given multiplier and weighting strategy.
pub fn quantize(
    coeffs: &Block,
    multiplier: f32,
    weighting: Weighting,
) -> Result<Block, CodecError> {
    weighting.quantize(coeffs, multiplier)
}

/// Dequantize `quantized` with the given multiplier and weighting strategy.
pub fn dequantize(
    quantized: &Block,
    multiplier: f32,
    weighting: Weighting,
) -> Result<Block, CodecError> {
    weighting.dequantize(quantized, multiplier)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coeffs_strategy() -> impl Strategy<Value = Block> {
        prop::array::uniform8(prop::array::uniform8(-2000.0f32..=2000.0)).prop_map(Block)
    }

    fn multiplier_strategy() -> impl Strategy<Value = f32> {
        0.1f32..=8.0
    }

    proptest! {
        /// Property: quantized values are integers.
        #[test]
        fn prop_quantized_values_are_integral(
            coeffs in coeffs_strategy(),
            multiplier in multiplier_strategy(),
        ) {
            let q = quantize(&coeffs, multiplier, Weighting::Perceptual).unwrap();
            for v in q.0.iter().flatten() {
                prop_assert_eq!(v.fract(), 0.0);
            }
        }

        /// Property: the lossy compaction is idempotent after one pass.
        #[test]
        fn prop_requantization_is_stable(
            coeffs in coeffs_strategy(),
            multiplier in multiplier_strategy(),
        ) {
            let w = Weighting::Perceptual;
            let q1 = quantize(&coeffs, multiplier, w).unwrap();
            let d1 = dequantize(&q1, multiplier, w).unwrap();
            let q2 = quantize(&d1, multiplier, w).unwrap();
            let d2 = dequantize(&q2, multiplier, w).unwrap();

            prop_assert_eq!(q1, q2);
            prop_assert!(d1.max_abs_diff(&d2) < 1e-3);
        }

        /// Property: mask compaction is idempotent too.
        #[test]
        fn prop_mask_is_idempotent(coeffs in coeffs_strategy()) {
            let once = quantize(&coeffs, 1.0, Weighting::Mask).unwrap();
            let twice = quantize(&once, 1.0, Weighting::Mask).unwrap();
            prop_assert_eq!(once, twice);
        }

        /// Property: reconstruction error per cell never exceeds half a step.
        #[test]
        fn prop_error_bounded_by_half_step(
            coeffs in coeffs_strategy(),
            multiplier in multiplier_strategy(),
        ) {
            let w = Weighting::Perceptual;
            let quantized = quantize(&coeffs, multiplier, w).unwrap();
            let restored = dequantize(&quantized, multiplier, w).unwrap();
            for row in 0..BLOCK_SIZE {
                for col in 0..BLOCK_SIZE {
                    let step = quantization_step(row, col, multiplier).unwrap();
                    let err = (coeffs.0[row][col] - restored.0[row][col]).abs();
                    prop_assert!(err <= step / 2.0 + 1e-2, "err {} step {}", err, step);
                }
            }
        }

        /// Property: the rounding interval never narrows as quantization gets
        /// coarser (smaller multiplier), so neither does the error bound.
        #[test]
        fn prop_step_monotone_in_multiplier(
            m1 in multiplier_strategy(),
            m2 in multiplier_strategy(),
            row in 0usize..BLOCK_SIZE,
            col in 0usize..BLOCK_SIZE,
        ) {
            let (fine, coarse) = if m1 >= m2 { (m1, m2) } else { (m2, m1) };
            let fine_step = quantization_step(row, col, fine).unwrap();
            let coarse_step = quantization_step(row, col, coarse).unwrap();
            prop_assert!(coarse_step >= fine_step);
        }

        /// Property: invalid multipliers never yield NaN or infinity.
        #[test]
        fn prop_non_positive_multiplier_rejected(
            coeffs in coeffs_strategy(),
            multiplier in -8.0f32..=0.0,
        ) {
            prop_assert!(matches!(
                quantize(&coeffs, multiplier, Weighting::Perceptual),
                Err(CodecError::InvalidConfiguration(_))
            ));
            prop_assert!(matches!(
                dequantize(&coeffs, multiplier, Weighting::Perceptual),
                Err(CodecError::InvalidConfiguration(_))
            ));
        }
    }
}
