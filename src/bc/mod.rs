//! DXT1/DXT5 block codecs.
//!
//! Both variants split the image into 4x4 texel blocks stored row-major.
//! DXT1 stores two RGB565 endpoints and sixteen 2-bit palette indices in
//! 8 bytes. DXT5 prefixes that with an 8-byte alpha block: two 8-bit
//! endpoints and sixteen 3-bit indices.

mod decode;
mod encode;
mod utils;

pub use decode::{decode_dxt1_block, decode_dxt5_block};
pub use encode::{encode_dxt1_block, encode_dxt5_block, select_endpoints};
pub use utils::ColorMode;

pub(crate) use decode::decode_level;
pub(crate) use encode::encode_level;

/// Sixteen RGBA texels of one 4x4 block, row-major.
pub type Block = [[u8; 4]; 16];

/// Block grid dimensions: `ceil(width / 4) x ceil(height / 4)`.
pub fn block_grid(width: u32, height: u32) -> (usize, usize) {
    ((width as usize).div_ceil(4), (height as usize).div_ceil(4))
}

/// Gather one block from an RGBA8 raster, repeating the last valid row and
/// column where the block overhangs the image edge.
pub(crate) fn gather_block(
    pixels: &[u8],
    width: usize,
    height: usize,
    bx: usize,
    by: usize,
) -> Block {
    let mut block = [[0u8; 4]; 16];
    for y in 0..4 {
        let sy = (by * 4 + y).min(height - 1);
        for x in 0..4 {
            let sx = (bx * 4 + x).min(width - 1);
            let off = (sy * width + sx) * 4;
            block[y * 4 + x].copy_from_slice(&pixels[off..off + 4]);
        }
    }
    block
}

/// Write one decoded block into an RGBA8 raster, dropping texels that fall
/// outside the image.
pub(crate) fn scatter_block(
    block: &Block,
    out: &mut [u8],
    width: usize,
    height: usize,
    bx: usize,
    by: usize,
) {
    for y in 0..4 {
        let py = by * 4 + y;
        if py >= height {
            break;
        }
        for x in 0..4 {
            let px = bx * 4 + x;
            if px >= width {
                break;
            }
            let off = (py * width + px) * 4;
            out[off..off + 4].copy_from_slice(&block[y * 4 + x]);
        }
    }
}
