//! Mipmap pyramid generation by 2x2 box filtering.

use alloc::borrow::Cow;
use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;

use crate::error::DdsError;

/// One level of a mipmap pyramid: an RGBA8 raster with its dimensions.
///
/// The base level of a pyramid borrows the caller's raster; smaller levels
/// are owned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MipLevel<'a> {
    pub width: u32,
    pub height: u32,
    pub pixels: Cow<'a, [u8]>,
}

/// Number of levels in a full pyramid: `floor(log2(max(width, height))) + 1`.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    let largest = width.max(height).max(1);
    largest.ilog2() + 1
}

/// Halve an RGBA8 raster. Each destination pixel is the rounded average of
/// its 2x2 source neighborhood; the second row/column is clamped to the
/// last valid source row/column.
pub fn downscale_2x(pixels: &[u8], width: u32, height: u32) -> MipLevel<'static> {
    let sw = width as usize;
    let sh = height as usize;
    let dw = (width >> 1).max(1);
    let dh = (height >> 1).max(1);
    let (dwu, dhu) = (dw as usize, dh as usize);

    let mut out = vec![0u8; dwu * dhu * 4];
    for y in 0..dhu {
        let y0 = (2 * y).min(sh - 1);
        let y1 = (2 * y + 1).min(sh - 1);
        for x in 0..dwu {
            let x0 = (2 * x).min(sw - 1);
            let x1 = (2 * x + 1).min(sw - 1);
            let taps = [
                (y0 * sw + x0) * 4,
                (y0 * sw + x1) * 4,
                (y1 * sw + x0) * 4,
                (y1 * sw + x1) * 4,
            ];
            let dst = (y * dwu + x) * 4;
            for ch in 0..4 {
                let sum: u32 = taps.iter().map(|&off| u32::from(pixels[off + ch])).sum();
                out[dst + ch] = ((sum + 2) / 4) as u8;
            }
        }
    }
    MipLevel {
        width: dw,
        height: dh,
        pixels: Cow::Owned(out),
    }
}

/// Build the full pyramid, base level first, ending at 1x1.
pub fn generate_pyramid<'a>(
    pixels: &'a [u8],
    width: u32,
    height: u32,
    stop: &dyn Stop,
) -> Result<Vec<MipLevel<'a>>, DdsError> {
    if width == 0 || height == 0 {
        return Err(DdsError::InvalidDimensions { width, height });
    }
    let mut levels = Vec::with_capacity(mip_level_count(width, height) as usize);
    levels.push(MipLevel {
        width,
        height,
        pixels: Cow::Borrowed(pixels),
    });
    loop {
        let last = &levels[levels.len() - 1];
        if last.width == 1 && last.height == 1 {
            break;
        }
        stop.check()?;
        let next = downscale_2x(&last.pixels, last.width, last.height);
        levels.push(next);
    }
    Ok(levels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use enough::Unstoppable;

    #[test]
    fn level_count_matches_log2() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(2, 1), 2);
        assert_eq!(mip_level_count(6, 6), 3);
        assert_eq!(mip_level_count(256, 16), 9);
        assert_eq!(mip_level_count(2048, 2048), 12);
        assert_eq!(mip_level_count(3, 1000), 10);
    }

    #[test]
    fn pyramid_ends_at_one_by_one() {
        for (w, h) in [(1u32, 1u32), (6, 6), (7, 3), (16, 1), (1, 9), (64, 32)] {
            let pixels = alloc::vec![128u8; (w * h * 4) as usize];
            let levels = generate_pyramid(&pixels, w, h, &Unstoppable).unwrap();
            assert_eq!(levels.len() as u32, mip_level_count(w, h), "{w}x{h}");
            let last = &levels[levels.len() - 1];
            assert_eq!((last.width, last.height), (1, 1));
            for pair in levels.windows(2) {
                assert_eq!(pair[1].width, (pair[0].width >> 1).max(1));
                assert_eq!(pair[1].height, (pair[0].height >> 1).max(1));
                assert_eq!(
                    pair[1].pixels.len(),
                    (pair[1].width * pair[1].height * 4) as usize
                );
            }
        }
    }

    #[test]
    fn base_level_borrows_input() {
        let pixels = alloc::vec![7u8; 8 * 4 * 4];
        let levels = generate_pyramid(&pixels, 8, 4, &Unstoppable).unwrap();
        assert!(matches!(levels[0].pixels, Cow::Borrowed(_)));
        assert_eq!(levels[0].pixels.as_ptr(), pixels.as_ptr());
        assert!(levels[1..].iter().all(|l| matches!(l.pixels, Cow::Owned(_))));
    }

    #[test]
    fn box_filter_rounds() {
        // 2x2 -> 1x1, red channel 0,1,1,1 averages to 3/4 -> rounds to 1
        let pixels = [
            0, 10, 255, 255, 1, 20, 255, 255, //
            1, 30, 0, 255, 1, 40, 0, 255,
        ];
        let level = downscale_2x(&pixels, 2, 2);
        assert_eq!((level.width, level.height), (1, 1));
        assert_eq!(&*level.pixels, &[1, 25, 128, 255]);
    }

    #[test]
    fn single_column_clamps() {
        // 1x2 -> 1x1: the missing column repeats the only one
        let pixels = [100, 0, 0, 255, 200, 0, 0, 255];
        let level = downscale_2x(&pixels, 1, 2);
        assert_eq!(&*level.pixels, &[150, 0, 0, 255]);
    }
}
