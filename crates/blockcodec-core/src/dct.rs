//! Orthonormal 2D discrete cosine transform on 8x8 blocks.
//!
//! The forward transform is a DCT-II and the inverse a DCT-III, both with
//! orthonormal scaling so that `inverse_dct(forward_dct(b)) == b` up to
//! floating-point rounding. The 2D transform is separable: a 1D transform
//! along the columns followed by one along the rows.
//!
//! With the basis matrix `C[k][n] = s(k) * cos((2n + 1) k pi / 16)`, where
//! `s(0) = sqrt(1/8)` and `s(k) = sqrt(2/8)` otherwise:
//!
//! - forward: `X = C * B * C^T`
//! - inverse: `B = C^T * X * C`

use std::f64::consts::PI;
use std::sync::OnceLock;

use crate::error::CodecError;
use crate::plane::{Block, Channel, BLOCK_SIZE};

const N: usize = BLOCK_SIZE;

type Basis = [[f64; N]; N];

fn basis() -> &'static Basis {
    static BASIS: OnceLock<Basis> = OnceLock::new();
    BASIS.get_or_init(|| {
        let first_factor = (1.0 / N as f64).sqrt();
        let others_factor = (2.0 / N as f64).sqrt();

        let mut c = [[0.0; N]; N];
        for (k, row) in c.iter_mut().enumerate() {
            let scale = if k == 0 { first_factor } else { others_factor };
            for (n, cell) in row.iter_mut().enumerate() {
                *cell = scale * (((2 * n + 1) * k) as f64 * PI / (2 * N) as f64).cos();
            }
        }
        c
    })
}

/// Compute `M * B * M^T` where `m(i, j)` yields the entries of `M`.
fn separable(block: &Block, m: impl Fn(usize, usize) -> f64) -> Block {
    // Columns: tmp = M * B
    let mut tmp = [[0.0f64; N]; N];
    for (u, tmp_row) in tmp.iter_mut().enumerate() {
        for (y, cell) in tmp_row.iter_mut().enumerate() {
            *cell = (0..N).map(|x| m(u, x) * block.0[x][y] as f64).sum();
        }
    }

    // Rows: out = tmp * M^T
    Block::from_fn(|u, v| (0..N).map(|y| tmp[u][y] * m(v, y)).sum::<f64>() as f32)
}

/// Forward 2D DCT-II of one block.
pub fn forward_dct(block: &Block) -> Block {
    let c = basis();
    separable(block, |i, j| c[i][j])
}

/// Inverse 2D DCT (DCT-III) of one block of coefficients.
pub fn inverse_dct(coeffs: &Block) -> Block {
    let c = basis();
    separable(coeffs, |i, j| c[j][i])
}

/// Forward-transform every 8x8 block of a channel independently.
///
/// # Errors
///
/// Returns `CodecError::Dimension` unless both dimensions are non-zero
/// multiples of 8.
pub fn dct_channel(channel: &Channel) -> Result<Channel, CodecError> {
    channel.map_blocks(|block| Ok(forward_dct(block)))
}

/// Inverse-transform every 8x8 block of a coefficient channel independently.
///
/// # Errors
///
/// Returns `CodecError::Dimension` unless both dimensions are non-zero
/// multiples of 8.
pub fn idct_channel(channel: &Channel) -> Result<Channel, CodecError> {
    channel.map_blocks(|block| Ok(inverse_dct(block)))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn block_strategy() -> impl Strategy<Value = Block> {
        prop::array::uniform8(prop::array::uniform8(-255.0f32..=255.0)).prop_map(Block)
    }

    proptest! {
        /// Property: inverse(forward(b)) == b within rounding.
        #[test]
        fn prop_transform_roundtrip(block in block_strategy()) {
            let back = inverse_dct(&forward_dct(&block));
            prop_assert!(block.max_abs_diff(&back) < 5e-3);
        }

        /// Property: forward(inverse(x)) == x within rounding.
        #[test]
        fn prop_inverse_then_forward(coeffs in block_strategy()) {
            let back = forward_dct(&inverse_dct(&coeffs));
            prop_assert!(coeffs.max_abs_diff(&back) < 5e-3);
        }

        /// Property: the transform is linear.
        #[test]
        fn prop_transform_is_linear(a in block_strategy(), b in block_strategy()) {
            let sum = Block::from_fn(|r, c| a.0[r][c] + b.0[r][c]);
            let fa = forward_dct(&a);
            let fb = forward_dct(&b);
            let expected = Block::from_fn(|r, c| fa.0[r][c] + fb.0[r][c]);
            prop_assert!(forward_dct(&sum).max_abs_diff(&expected) < 1e-2);
        }
    }
}
