//! Block compression: bounding-box endpoint selection and nearest-palette
//! index assignment.

use alloc::vec::Vec;

use enough::Stop;

use super::utils::{
    ALPHA_THRESHOLD, ColorMode, TRANSPARENT_INDEX, alpha_table, color_palette,
    pack_alpha_indices, quantize_565, rgb_distance,
};
use super::{Block, block_grid, gather_block};
use crate::error::DdsError;
use crate::pixel::Variant;

/// Pick two distinct RGB565 endpoints from the block's RGB bounding box,
/// inset by 1/16 of its extent per channel. The larger packed value comes first.
pub fn select_endpoints(block: &Block) -> (u16, u16) {
    let mut lo = [u8::MAX; 3];
    let mut hi = [u8::MIN; 3];
    for texel in block {
        for ch in 0..3 {
            lo[ch] = lo[ch].min(texel[ch]);
            hi[ch] = hi[ch].max(texel[ch]);
        }
    }
    for ch in 0..3 {
        let inset = (hi[ch] - lo[ch]) / 16;
        lo[ch] += inset;
        hi[ch] -= inset;
    }

    let mut color0 = quantize_565(hi);
    let mut color1 = quantize_565(lo);
    if color0 == color1 {
        // nudge blue by one step without carrying into green
        if color0 & 0x1F < 0x1F {
            color0 += 1;
        } else {
            color1 -= 1;
        }
    }
    if color0 < color1 {
        core::mem::swap(&mut color0, &mut color1);
    }
    (color0, color1)
}

fn nearest_color(palette: &[[u8; 4]], texel: &[u8; 4]) -> u32 {
    let mut best = 0;
    let mut best_dist = u32::MAX;
    for (i, entry) in palette.iter().enumerate() {
        let dist = rgb_distance(texel, entry);
        if dist < best_dist {
            best_dist = dist;
            best = i as u32;
        }
    }
    best
}

/// Encode the 8-byte color half of a block. With `punch_through`, any texel
/// below the alpha threshold switches the block to three-color mode.
fn encode_color(block: &Block, punch_through: bool, out: &mut [u8]) {
    let transparent = punch_through && block.iter().any(|t| t[3] < ALPHA_THRESHOLD);
    let (hi, lo) = select_endpoints(block);
    let (color0, color1, mode) = if transparent {
        (lo, hi, ColorMode::ThreeColorWithTransparency)
    } else {
        (hi, lo, ColorMode::FourColor)
    };
    debug_assert_eq!(ColorMode::from_endpoints(color0, color1), mode);

    let palette = color_palette(color0, color1, mode);
    let opaque = &palette[..mode.opaque_entries()];

    let mut indices = 0u32;
    for (i, texel) in block.iter().enumerate() {
        let index = if transparent && texel[3] < ALPHA_THRESHOLD {
            TRANSPARENT_INDEX
        } else {
            nearest_color(opaque, texel)
        };
        indices |= index << (2 * i);
    }

    out[0..2].copy_from_slice(&color0.to_le_bytes());
    out[2..4].copy_from_slice(&color1.to_le_bytes());
    out[4..8].copy_from_slice(&indices.to_le_bytes());
}

/// Compress 16 texels to one DXT1 block.
pub fn encode_dxt1_block(block: &Block) -> [u8; 8] {
    let mut out = [0u8; 8];
    encode_color(block, true, &mut out);
    out
}

/// Compress 16 texels to one DXT5 block.
pub fn encode_dxt5_block(block: &Block) -> [u8; 16] {
    let mut out = [0u8; 16];

    let (min, max) = block
        .iter()
        .fold((u8::MAX, u8::MIN), |(lo, hi), t| (lo.min(t[3]), hi.max(t[3])));
    let table = alpha_table(max, min);

    let mut bits = 0u64;
    for (i, texel) in block.iter().enumerate() {
        let mut best = 0u64;
        let mut best_dist = u8::MAX;
        for (j, &level) in table.iter().enumerate() {
            let dist = texel[3].abs_diff(level);
            if dist < best_dist {
                best_dist = dist;
                best = j as u64;
            }
        }
        bits |= best << (3 * i);
    }

    out[0] = max;
    out[1] = min;
    pack_alpha_indices(bits, &mut out[2..8]);
    encode_color(block, false, &mut out[8..16]);
    out
}

/// Compress one RGBA8 level, appending its blocks to `out` in row-major order.
pub(crate) fn encode_level(
    pixels: &[u8],
    width: u32,
    height: u32,
    variant: Variant,
    out: &mut Vec<u8>,
    stop: &dyn Stop,
) -> Result<(), DdsError> {
    let w = width as usize;
    let h = height as usize;
    let (blocks_x, blocks_y) = block_grid(width, height);
    for by in 0..blocks_y {
        stop.check()?;
        for bx in 0..blocks_x {
            let block = gather_block(pixels, w, h, bx, by);
            match variant {
                Variant::Dxt1 => out.extend_from_slice(&encode_dxt1_block(&block)),
                Variant::Dxt5 => out.extend_from_slice(&encode_dxt5_block(&block)),
            }
        }
    }
    Ok(())
}
