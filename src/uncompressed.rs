//! Uncompressed payloads described by per-channel bit masks.

use alloc::borrow::Cow;
use alloc::vec;

use enough::Stop;

use crate::error::DdsError;
use crate::header::ChannelMasks;

/// Position and width of one channel inside a packed pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ChannelShift {
    shift: u32,
    bit_count: u32,
}

impl ChannelShift {
    /// Derive shift (trailing zeros) and width (contiguous set bits above it).
    pub(crate) fn from_mask(mask: u32) -> Self {
        if mask == 0 {
            return Self {
                shift: 0,
                bit_count: 0,
            };
        }
        let shift = mask.trailing_zeros();
        Self {
            shift,
            bit_count: (mask >> shift).trailing_ones(),
        }
    }

    /// Extract the channel and rescale it to 0..=255, or `default` when absent.
    #[inline]
    pub(crate) fn extract(self, pixel: u32, default: u8) -> u8 {
        if self.bit_count == 0 {
            return default;
        }
        let max = (1u64 << self.bit_count) - 1;
        let value = (u64::from(pixel) >> self.shift) & max;
        (value * 255 / max) as u8
    }
}

/// Decode a tightly packed uncompressed level to RGBA8.
///
/// 32-bit RGBA in memory order is returned borrowed from `payload`.
pub(crate) fn decode<'a>(
    payload: &'a [u8],
    width: u32,
    height: u32,
    masks: &ChannelMasks,
    stop: &dyn Stop,
) -> Result<Cow<'a, [u8]>, DdsError> {
    if width == 0 || height == 0 {
        return Err(DdsError::InvalidDimensions { width, height });
    }
    let w = width as usize;
    let h = height as usize;
    let bpp = masks.bytes_per_pixel();
    let too_large = DdsError::DimensionsTooLarge { width, height };
    let needed = w
        .checked_mul(h)
        .and_then(|wh| wh.checked_mul(bpp))
        .ok_or(too_large)?;
    if payload.len() < needed {
        return Err(DdsError::Truncated {
            needed,
            actual: payload.len(),
        });
    }

    if *masks == ChannelMasks::RGBA8 {
        return Ok(Cow::Borrowed(&payload[..needed]));
    }

    let red = ChannelShift::from_mask(masks.red);
    let green = ChannelShift::from_mask(masks.green);
    let blue = ChannelShift::from_mask(masks.blue);
    let alpha = ChannelShift::from_mask(masks.alpha);

    let mut out = vec![0u8; w * h * 4];
    let row_in = w * bpp;
    for (row_idx, (src, dst)) in payload[..needed]
        .chunks_exact(row_in)
        .zip(out.chunks_exact_mut(w * 4))
        .enumerate()
    {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for (px, rgba) in src.chunks_exact(bpp).zip(dst.chunks_exact_mut(4)) {
            let v = px
                .iter()
                .rev()
                .fold(0u32, |acc, &b| (acc << 8) | u32::from(b));
            let r = red.extract(v, 0);
            if masks.luminance {
                rgba[0] = r;
                rgba[1] = r;
                rgba[2] = r;
            } else {
                rgba[0] = r;
                rgba[1] = green.extract(v, 0);
                rgba[2] = blue.extract(v, 0);
            }
            rgba[3] = alpha.extract(v, 255);
        }
    }
    Ok(Cow::Owned(out))
}
