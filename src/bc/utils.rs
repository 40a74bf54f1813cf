//! RGB565 packing, palette and alpha-table construction shared by the block
//! decoder and encoder.

/// Texels with alpha below this are punch-through transparent in DXT1.
pub(crate) const ALPHA_THRESHOLD: u8 = 128;

/// Interpolation mode of a DXT1-style color block, signalled on the wire by
/// endpoint ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    /// `color0 > color1`: two endpoints plus two interpolants, all opaque.
    FourColor,
    /// `color0 <= color1`: two endpoints, their average, and transparent black.
    ThreeColorWithTransparency,
}

impl ColorMode {
    /// Resolve the mode from the packed endpoints as stored.
    pub fn from_endpoints(color0: u16, color1: u16) -> Self {
        if color0 > color1 {
            Self::FourColor
        } else {
            Self::ThreeColorWithTransparency
        }
    }

    /// Palette entries an opaque texel may use.
    pub(crate) fn opaque_entries(self) -> usize {
        match self {
            Self::FourColor => 4,
            Self::ThreeColorWithTransparency => 3,
        }
    }
}

/// Index of the transparent entry in [`ColorMode::ThreeColorWithTransparency`].
pub(crate) const TRANSPARENT_INDEX: u32 = 3;

/// Expand RGB565 to 8 bits per channel.
pub(crate) fn expand_565(color: u16) -> [u8; 3] {
    let r = u32::from(color >> 11) & 0x1F;
    let g = u32::from(color >> 5) & 0x3F;
    let b = u32::from(color) & 0x1F;
    [
        ((r * 255 + 15) / 31) as u8,
        ((g * 255 + 31) / 63) as u8,
        ((b * 255 + 15) / 31) as u8,
    ]
}

/// Quantize an 8-bit RGB color to RGB565 with rounding.
pub(crate) fn quantize_565(rgb: [u8; 3]) -> u16 {
    let r = (u32::from(rgb[0]) * 31 + 127) / 255;
    let g = (u32::from(rgb[1]) * 63 + 127) / 255;
    let b = (u32::from(rgb[2]) * 31 + 127) / 255;
    ((r << 11) | (g << 5) | b) as u16
}

/// Build the 4-entry RGBA palette for a color block.
pub(crate) fn color_palette(color0: u16, color1: u16, mode: ColorMode) -> [[u8; 4]; 4] {
    let c0 = expand_565(color0);
    let c1 = expand_565(color1);
    let mix = |w0: u32, w1: u32| -> [u8; 4] {
        let total = w0 + w1;
        let mut out = [0u8, 0, 0, 255];
        for ch in 0..3 {
            let v = w0 * u32::from(c0[ch]) + w1 * u32::from(c1[ch]);
            out[ch] = ((v + total / 2) / total) as u8;
        }
        out
    };
    match mode {
        ColorMode::FourColor => [mix(1, 0), mix(0, 1), mix(2, 1), mix(1, 2)],
        ColorMode::ThreeColorWithTransparency => [mix(1, 0), mix(0, 1), mix(1, 1), [0, 0, 0, 0]],
    }
}

/// Build the 8-entry alpha table of a DXT5 block.
///
/// `alpha0 > alpha1` selects six interpolants; otherwise four interpolants
/// followed by the fixed values 0 and 255.
pub(crate) fn alpha_table(alpha0: u8, alpha1: u8) -> [u8; 8] {
    let a0 = u32::from(alpha0);
    let a1 = u32::from(alpha1);
    let mut table = [alpha0, alpha1, 0, 0, 0, 0, 0, 255];
    if alpha0 > alpha1 {
        for i in 1..7u32 {
            table[i as usize + 1] = (((7 - i) * a0 + i * a1 + 3) / 7) as u8;
        }
    } else {
        for i in 1..5u32 {
            table[i as usize + 1] = (((5 - i) * a0 + i * a1 + 2) / 5) as u8;
        }
    }
    table
}

/// Squared Euclidean RGB distance.
#[inline]
pub(crate) fn rgb_distance(a: &[u8; 4], b: &[u8; 4]) -> u32 {
    (0..3)
        .map(|ch| {
            let d = i32::from(a[ch]) - i32::from(b[ch]);
            (d * d) as u32
        })
        .sum()
}

/// Read sixteen 3-bit indices packed LSB-first across six bytes.
pub(crate) fn unpack_alpha_indices(bytes: &[u8]) -> u64 {
    bytes[..6]
        .iter()
        .rev()
        .fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
}

/// Inverse of [`unpack_alpha_indices`].
pub(crate) fn pack_alpha_indices(bits: u64, out: &mut [u8]) {
    out[..6].copy_from_slice(&bits.to_le_bytes()[..6]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_hits_extremes() {
        assert_eq!(expand_565(0x0000), [0, 0, 0]);
        assert_eq!(expand_565(0xFFFF), [255, 255, 255]);
        assert_eq!(expand_565(0xF800), [255, 0, 0]);
        assert_eq!(expand_565(0x07E0), [0, 255, 0]);
    }

    #[test]
    fn quantize_inverts_expand() {
        for color in (0..=u16::MAX).step_by(7) {
            assert_eq!(quantize_565(expand_565(color)), color);
        }
    }

    #[test]
    fn mode_follows_ordering() {
        assert_eq!(ColorMode::from_endpoints(2, 1), ColorMode::FourColor);
        assert_eq!(
            ColorMode::from_endpoints(1, 1),
            ColorMode::ThreeColorWithTransparency
        );
        assert_eq!(
            ColorMode::from_endpoints(1, 2),
            ColorMode::ThreeColorWithTransparency
        );
    }

    #[test]
    fn three_color_palette_ends_in_transparent_black() {
        let palette = color_palette(0x0000, 0xFFFF, ColorMode::ThreeColorWithTransparency);
        assert_eq!(palette[0], [0, 0, 0, 255]);
        assert_eq!(palette[1], [255, 255, 255, 255]);
        assert_eq!(palette[2], [128, 128, 128, 255]);
        assert_eq!(palette[3], [0, 0, 0, 0]);
    }

    #[test]
    fn four_color_palette_interpolates_thirds() {
        let palette = color_palette(0xFFFF, 0x0000, ColorMode::FourColor);
        assert_eq!(palette[2], [170, 170, 170, 255]);
        assert_eq!(palette[3], [85, 85, 85, 255]);
        assert!(palette.iter().all(|c| c[3] == 255));
    }

    #[test]
    fn alpha_table_eight_value_mode() {
        let table = alpha_table(255, 0);
        assert_eq!(table[0], 255);
        assert_eq!(table[1], 0);
        for i in 3..8 {
            assert!(table[i - 1] > table[i]);
        }
        assert_eq!(table[2], 219);
        assert_eq!(table[7], 36);
    }

    #[test]
    fn alpha_table_six_value_mode_has_fixed_extremes() {
        let table = alpha_table(100, 200);
        assert_eq!(table[0], 100);
        assert_eq!(table[1], 200);
        assert_eq!(&table[2..6], &[120, 140, 160, 180]);
        assert_eq!(table[6], 0);
        assert_eq!(table[7], 255);
    }

    #[test]
    fn alpha_indices_straddle_bytes() {
        // index 2 occupies bits 6..9, spanning bytes 0 and 1
        let bits = 0b101u64 << 6;
        let mut bytes = [0u8; 6];
        pack_alpha_indices(bits, &mut bytes);
        assert_eq!(bytes[0], 0b0100_0000);
        assert_eq!(bytes[1], 0b0000_0001);
        assert_eq!(unpack_alpha_indices(&bytes), bits);
    }
}
