//! Sample containers used between pipeline stages.
//!
//! A [`Channel`] is one real-valued plane of an image, a [`Block`] is an 8x8
//! tile of a channel and a [`YccImage`] groups the three Y/Cb/Cr channels.
//! Blocks never overlap and tile an aligned channel exactly.

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Side length of the square transform/quantization unit.
pub const BLOCK_SIZE: usize = 8;

/// An 8x8 tile of samples or coefficients, indexed `[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Block(pub [[f32; BLOCK_SIZE]; BLOCK_SIZE]);

impl Block {
    /// Block with every cell set to zero.
    pub const ZERO: Block = Block([[0.0; BLOCK_SIZE]; BLOCK_SIZE]);

    /// Build a block from a function of `(row, col)`.
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut cells = [[0.0; BLOCK_SIZE]; BLOCK_SIZE];
        for (row, line) in cells.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                *cell = f(row, col);
            }
        }
        Block(cells)
    }

    /// Block with every cell set to `value`.
    pub fn filled(value: f32) -> Self {
        Block([[value; BLOCK_SIZE]; BLOCK_SIZE])
    }

    /// Apply `f` to every cell, passing `(row, col, value)`.
    pub fn map(&self, mut f: impl FnMut(usize, usize, f32) -> f32) -> Self {
        Self::from_fn(|row, col| f(row, col, self.0[row][col]))
    }

    /// Largest absolute per-cell difference between two blocks.
    pub fn max_abs_diff(&self, other: &Block) -> f32 {
        self.0
            .iter()
            .flatten()
            .zip(other.0.iter().flatten())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f32::max)
    }

    /// Number of cells that are not exactly zero.
    pub fn nonzero_count(&self) -> usize {
        self.0.iter().flatten().filter(|v| **v != 0.0).count()
    }
}

/// A single plane of real-valued samples in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub width: u32,
    pub height: u32,
    pub samples: Vec<f32>,
}

impl Channel {
    /// Create a channel from dimensions and row-major samples.
    pub fn new(width: u32, height: u32, samples: Vec<f32>) -> Self {
        debug_assert_eq!(
            samples.len(),
            (width as usize) * (height as usize),
            "Channel sample count mismatch"
        );
        Self {
            width,
            height,
            samples,
        }
    }

    /// Create a channel with every sample set to `value`.
    pub fn filled(width: u32, height: u32, value: f32) -> Self {
        Self::new(width, height, vec![value; (width as usize) * (height as usize)])
    }

    /// Create a channel from a function of `(x, y)`.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> f32) -> Self {
        let mut samples = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                samples.push(f(x, y));
            }
        }
        Self::new(width, height, samples)
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.samples[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: f32) {
        let idx = self.index(x, y);
        self.samples[idx] = value;
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Number of samples the dimensions call for, or `None` if it does not
    /// fit in `usize`.
    pub fn expected_len(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }

    /// Fail with [`CodecError::InvalidImage`] unless the sample count
    /// matches the dimensions.
    pub fn ensure_shape(&self) -> Result<(), CodecError> {
        match self.expected_len() {
            Some(expected) if expected == self.samples.len() => Ok(()),
            expected => Err(CodecError::InvalidImage {
                expected: expected.unwrap_or(usize::MAX),
                actual: self.samples.len(),
            }),
        }
    }

    /// True if both dimensions are non-zero multiples of [`BLOCK_SIZE`].
    pub fn is_block_aligned(&self) -> bool {
        is_block_aligned(self.width, self.height)
    }

    /// Check that the plane can be tiled into whole blocks.
    pub fn ensure_block_aligned(&self) -> Result<(), CodecError> {
        self.ensure_shape()?;
        if !self.is_block_aligned() {
            return Err(CodecError::Dimension {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Number of block columns (partial blocks are not counted).
    pub fn blocks_wide(&self) -> usize {
        self.width as usize / BLOCK_SIZE
    }

    /// Number of block rows (partial blocks are not counted).
    pub fn blocks_high(&self) -> usize {
        self.height as usize / BLOCK_SIZE
    }

    /// Block coordinates `(bx, by)` in row-major order.
    pub fn blocks(&self) -> impl Iterator<Item = (usize, usize)> {
        let wide = self.blocks_wide();
        (0..self.blocks_high()).flat_map(move |by| (0..wide).map(move |bx| (bx, by)))
    }

    /// Copy out the block at block coordinates `(bx, by)`.
    pub fn block(&self, bx: usize, by: usize) -> Block {
        let stride = self.width as usize;
        let (x0, y0) = (bx * BLOCK_SIZE, by * BLOCK_SIZE);
        Block::from_fn(|row, col| self.samples[(y0 + row) * stride + x0 + col])
    }

    /// Write `block` back at block coordinates `(bx, by)`.
    pub fn set_block(&mut self, bx: usize, by: usize, block: &Block) {
        let stride = self.width as usize;
        let (x0, y0) = (bx * BLOCK_SIZE, by * BLOCK_SIZE);
        for (row, line) in block.0.iter().enumerate() {
            let start = (y0 + row) * stride + x0;
            self.samples[start..start + BLOCK_SIZE].copy_from_slice(line);
        }
    }

    /// Run `f` over every block and collect the results into a new plane.
    ///
    /// Blocks are processed independently; nothing is carried across block
    /// boundaries. Fails with [`CodecError::Dimension`] if the plane is not
    /// block aligned, or with the first error `f` returns.
    pub fn map_blocks<F>(&self, mut f: F) -> Result<Channel, CodecError>
    where
        F: FnMut(&Block) -> Result<Block, CodecError>,
    {
        self.ensure_block_aligned()?;
        let mut out = Channel::filled(self.width, self.height, 0.0);
        for (bx, by) in self.blocks() {
            let processed = f(&self.block(bx, by))?;
            out.set_block(bx, by, &processed);
        }
        Ok(out)
    }

    /// Extend the plane to the next block multiple by replicating the last
    /// column and row.
    pub fn padded_to_block(&self) -> Channel {
        let width = padded_dimension(self.width);
        let height = padded_dimension(self.height);
        if width == self.width && height == self.height {
            return self.clone();
        }
        let max_x = self.width.saturating_sub(1);
        let max_y = self.height.saturating_sub(1);
        Channel::from_fn(width, height, |x, y| self.get(x.min(max_x), y.min(max_y)))
    }

    /// Keep only the top-left `width` x `height` region.
    pub fn cropped(&self, width: u32, height: u32) -> Channel {
        let width = width.min(self.width);
        let height = height.min(self.height);
        if width == self.width && height == self.height {
            return self.clone();
        }
        Channel::from_fn(width, height, |x, y| self.get(x, y))
    }
}

/// True if both dimensions are non-zero multiples of [`BLOCK_SIZE`].
pub fn is_block_aligned(width: u32, height: u32) -> bool {
    let block = BLOCK_SIZE as u32;
    width > 0 && height > 0 && width % block == 0 && height % block == 0
}

/// Round a dimension up to the next multiple of [`BLOCK_SIZE`].
pub fn padded_dimension(value: u32) -> u32 {
    let block = BLOCK_SIZE as u32;
    value.div_ceil(block) * block
}

/// Names of the three luma/chroma channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelName {
    /// Luma.
    Y,
    /// Blue-difference chroma.
    Cb,
    /// Red-difference chroma.
    Cr,
}

impl ChannelName {
    /// All channels in storage order.
    pub const ALL: [ChannelName; 3] = [ChannelName::Y, ChannelName::Cb, ChannelName::Cr];

    /// True for the luma channel.
    pub fn is_luma(self) -> bool {
        self == ChannelName::Y
    }
}

/// An image held as three floating-point Y/Cb/Cr planes of equal size.
#[derive(Debug, Clone, PartialEq)]
pub struct YccImage {
    pub y: Channel,
    pub cb: Channel,
    pub cr: Channel,
}

impl YccImage {
    pub fn width(&self) -> u32 {
        self.y.width
    }

    pub fn height(&self) -> u32 {
        self.y.height
    }

    /// Borrow a plane by name.
    pub fn channel(&self, name: ChannelName) -> &Channel {
        match name {
            ChannelName::Y => &self.y,
            ChannelName::Cb => &self.cb,
            ChannelName::Cr => &self.cr,
        }
    }

    /// Pad every plane to the next block multiple.
    pub fn padded_to_block(&self) -> YccImage {
        YccImage {
            y: self.y.padded_to_block(),
            cb: self.cb.padded_to_block(),
            cr: self.cr.padded_to_block(),
        }
    }

    /// Crop every plane to `width` x `height`.
    pub fn cropped(&self, width: u32, height: u32) -> YccImage {
        YccImage {
            y: self.y.cropped(width, height),
            cb: self.cb.cropped(width, height),
            cr: self.cr.cropped(width, height),
        }
    }
}
