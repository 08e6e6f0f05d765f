//! RGB <-> Y/Cb/Cr conversion.
//!
//! Uses the ITU-R BT.601 "studio swing" matrix: luma spans 16..=235 and
//! chroma 16..=240 for in-gamut RGB. Forward results stay in `f32` so the
//! transform stages see unrounded samples; the reverse conversion rounds and
//! clamps back to 8-bit RGB.

use crate::decode::DecodedImage;
use crate::plane::{Channel, YccImage};

/// Forward matrix applied to RGB normalized to 0.0..=1.0.
const RGB_TO_YCBCR: [[f32; 3]; 3] = [
    [65.481, 128.553, 24.966],
    [-37.797, -74.203, 112.0],
    [112.0, -93.786, -18.214],
];

/// Offsets added after the forward matrix.
const YCBCR_OFFSET: [f32; 3] = [16.0, 128.0, 128.0];

/// Scale from studio-range luma to full-range RGB.
const LUMA_SCALE: f32 = 255.0 / 219.0;
const CR_TO_R: f32 = 1.402 * 255.0 / 224.0;
const CB_TO_G: f32 = -0.344136 * 255.0 / 224.0;
const CR_TO_G: f32 = -0.714136 * 255.0 / 224.0;
const CB_TO_B: f32 = 1.772 * 255.0 / 224.0;

/// Convert one RGB pixel (0-255 per sample) to Y/Cb/Cr.
#[inline]
pub fn rgb_to_ycbcr_pixel(rgb: [u8; 3]) -> [f32; 3] {
    let r = rgb[0] as f32 / 255.0;
    let g = rgb[1] as f32 / 255.0;
    let b = rgb[2] as f32 / 255.0;

    let mut out = YCBCR_OFFSET;
    for (value, row) in out.iter_mut().zip(RGB_TO_YCBCR.iter()) {
        *value += row[0] * r + row[1] * g + row[2] * b;
    }
    out
}

/// Convert one Y/Cb/Cr sample triple back to RGB, rounded and clamped.
#[inline]
pub fn ycbcr_to_rgb_pixel(ycc: [f32; 3]) -> [u8; 3] {
    let y = (ycc[0] - YCBCR_OFFSET[0]) * LUMA_SCALE;
    let cb = ycc[1] - YCBCR_OFFSET[1];
    let cr = ycc[2] - YCBCR_OFFSET[2];

    let r = y + CR_TO_R * cr;
    let g = y + CB_TO_G * cb + CR_TO_G * cr;
    let b = y + CB_TO_B * cb;

    [to_u8(r), to_u8(g), to_u8(b)]
}

#[inline]
fn to_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Convert an RGB image to three Y/Cb/Cr planes.
pub fn rgb_to_ycbcr(image: &DecodedImage) -> YccImage {
    debug_assert_eq!(Some(image.pixels.len()), image.expected_byte_len());

    let count = image.pixel_count();
    let mut y = Vec::with_capacity(count);
    let mut cb = Vec::with_capacity(count);
    let mut cr = Vec::with_capacity(count);

    for chunk in image.pixels.chunks_exact(3) {
        let [py, pcb, pcr] = rgb_to_ycbcr_pixel([chunk[0], chunk[1], chunk[2]]);
        y.push(py);
        cb.push(pcb);
        cr.push(pcr);
    }

    YccImage {
        y: Channel::new(image.width, image.height, y),
        cb: Channel::new(image.width, image.height, cb),
        cr: Channel::new(image.width, image.height, cr),
    }
}

/// Convert three Y/Cb/Cr planes back to an RGB image.
pub fn ycbcr_to_rgb(ycc: &YccImage) -> DecodedImage {
    debug_assert!(ycc.cb.samples.len() == ycc.y.samples.len());
    debug_assert!(ycc.cr.samples.len() == ycc.y.samples.len());

    let mut pixels = Vec::with_capacity(ycc.y.samples.len() * 3);
    for ((y, cb), cr) in ycc
        .y
        .samples
        .iter()
        .zip(ycc.cb.samples.iter())
        .zip(ycc.cr.samples.iter())
    {
        pixels.extend_from_slice(&ycbcr_to_rgb_pixel([*y, *cb, *cr]));
    }

    DecodedImage::new(ycc.width(), ycc.height(), pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: [f32; 3], expected: [f32; 3]) {
        for i in 0..3 {
            assert!(
                (actual[i] - expected[i]).abs() < 0.01,
                "component {}: expected {}, got {}",
                i,
                expected[i],
                actual[i]
            );
        }
    }

    #[test]
    fn test_black_and_white_studio_range() {
        assert_close(rgb_to_ycbcr_pixel([0, 0, 0]), [16.0, 128.0, 128.0]);
        assert_close(rgb_to_ycbcr_pixel([255, 255, 255]), [235.0, 128.0, 128.0]);
    }

    #[test]
    fn test_gray_has_neutral_chroma() {
        let [y, cb, cr] = rgb_to_ycbcr_pixel([128, 128, 128]);
        assert!((y - (16.0 + 219.0 * 128.0 / 255.0)).abs() < 0.01);
        assert!((cb - 128.0).abs() < 0.01);
        assert!((cr - 128.0).abs() < 0.01);
    }

    #[test]
    fn test_primaries_chroma_extremes() {
        // Pure blue reaches the top of the Cb range, pure red the top of Cr
        let [_, cb, _] = rgb_to_ycbcr_pixel([0, 0, 255]);
        assert!((cb - 240.0).abs() < 0.01);
        let [_, _, cr] = rgb_to_ycbcr_pixel([255, 0, 0]);
        assert!((cr - 240.0).abs() < 0.01);
    }

    #[test]
    fn test_inverse_clamps_out_of_gamut() {
        assert_eq!(ycbcr_to_rgb_pixel([0.0, 128.0, 128.0]), [0, 0, 0]);
        assert_eq!(ycbcr_to_rgb_pixel([255.0, 128.0, 128.0]), [255, 255, 255]);
    }

    #[test]
    fn test_pixel_roundtrip_exhaustive_grid() {
        for r in (0..=255).step_by(15) {
            for g in (0..=255).step_by(15) {
                for b in (0..=255).step_by(15) {
                    let rgb = [r as u8, g as u8, b as u8];
                    let back = ycbcr_to_rgb_pixel(rgb_to_ycbcr_pixel(rgb));
                    for i in 0..3 {
                        assert!(
                            (back[i] as i32 - rgb[i] as i32).abs() <= 1,
                            "{:?} -> {:?}",
                            rgb,
                            back
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_image_conversion_shapes() {
        let image = DecodedImage::new(2, 1, vec![255, 0, 0, 0, 0, 255]);
        let ycc = rgb_to_ycbcr(&image);
        assert_eq!((ycc.width(), ycc.height()), (2, 1));
        assert_eq!(ycc.y.samples.len(), 2);
        assert!(ycc.cr.get(0, 0) > ycc.cr.get(1, 0));
        assert!(ycc.cb.get(1, 0) > ycc.cb.get(0, 0));

        assert_eq!(ycbcr_to_rgb(&ycc), image);
    }
}
