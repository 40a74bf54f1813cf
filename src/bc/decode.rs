//! Block decompression.

use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;

use super::utils::{ColorMode, alpha_table, color_palette, unpack_alpha_indices};
use super::{Block, block_grid, scatter_block};
use crate::error::DdsError;
use crate::pixel::Variant;

/// Decode the 8-byte color half of a block. `force_four` ignores the
/// endpoint ordering, as DXT5 color blocks never carry punch-through alpha.
fn decode_color(bytes: &[u8], force_four: bool) -> Block {
    let color0 = u16::from_le_bytes([bytes[0], bytes[1]]);
    let color1 = u16::from_le_bytes([bytes[2], bytes[3]]);
    let indices = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);

    let mode = if force_four {
        ColorMode::FourColor
    } else {
        ColorMode::from_endpoints(color0, color1)
    };
    let palette = color_palette(color0, color1, mode);

    core::array::from_fn(|i| palette[((indices >> (2 * i)) & 0x3) as usize])
}

/// Decode one DXT1 block to 16 RGBA texels.
pub fn decode_dxt1_block(bytes: &[u8; 8]) -> Block {
    decode_color(bytes, false)
}

/// Decode one DXT5 block to 16 RGBA texels.
pub fn decode_dxt5_block(bytes: &[u8; 16]) -> Block {
    let table = alpha_table(bytes[0], bytes[1]);
    let indices = unpack_alpha_indices(&bytes[2..8]);

    let mut block = decode_color(&bytes[8..16], true);
    for (i, texel) in block.iter_mut().enumerate() {
        texel[3] = table[((indices >> (3 * i)) & 0x7) as usize];
    }
    block
}

/// Decode the base level of a compressed payload into an RGBA8 raster.
pub(crate) fn decode_level(
    payload: &[u8],
    width: u32,
    height: u32,
    variant: Variant,
    stop: &dyn Stop,
) -> Result<Vec<u8>, DdsError> {
    if width == 0 || height == 0 {
        return Err(DdsError::InvalidDimensions { width, height });
    }
    let w = width as usize;
    let h = height as usize;
    let (blocks_x, _) = block_grid(width, height);
    let bpb = variant.bytes_per_block();
    let needed = variant
        .level_size(width, height)
        .ok_or(DdsError::DimensionsTooLarge { width, height })?;
    if payload.len() < needed {
        return Err(DdsError::Truncated {
            needed,
            actual: payload.len(),
        });
    }
    let out_len = w
        .checked_mul(h)
        .and_then(|wh| wh.checked_mul(4))
        .ok_or(DdsError::DimensionsTooLarge { width, height })?;

    let mut out = vec![0u8; out_len];
    for (by, row) in payload[..needed].chunks_exact(blocks_x * bpb).enumerate() {
        stop.check()?;
        for (bx, chunk) in row.chunks_exact(bpb).enumerate() {
            let block = match variant {
                Variant::Dxt1 => {
                    let mut bytes = [0u8; 8];
                    bytes.copy_from_slice(chunk);
                    decode_dxt1_block(&bytes)
                }
                Variant::Dxt5 => {
                    let mut bytes = [0u8; 16];
                    bytes.copy_from_slice(chunk);
                    decode_dxt5_block(&bytes)
                }
            };
            scatter_block(&block, &mut out, w, h, bx, by);
        }
    }
    Ok(out)
}
