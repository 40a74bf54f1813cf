use crate::header::ChannelMasks;

/// Compressed block layout.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Variant {
    /// `DXT1` — 8-byte blocks, RGB565 endpoints, optional punch-through alpha.
    Dxt1,
    /// `DXT5` — 16-byte blocks, interpolated 8-bit alpha plus a DXT1-style color block.
    #[default]
    Dxt5,
}

impl Variant {
    /// The FourCC tag stored in the pixel-format header.
    pub const fn fourcc(self) -> [u8; 4] {
        match self {
            Self::Dxt1 => *b"DXT1",
            Self::Dxt5 => *b"DXT5",
        }
    }

    /// Compressed bytes per 4x4 block.
    pub const fn bytes_per_block(self) -> usize {
        match self {
            Self::Dxt1 => 8,
            Self::Dxt5 => 16,
        }
    }

    /// Look up a variant by its FourCC tag.
    pub fn from_fourcc(tag: &[u8]) -> Option<Self> {
        match tag {
            b"DXT1" => Some(Self::Dxt1),
            b"DXT5" => Some(Self::Dxt5),
            _ => None,
        }
    }

    /// Like [`Variant::from_fourcc`], but unknown tags fall back to [`Variant::Dxt5`].
    pub fn from_fourcc_or_default(tag: &[u8]) -> Self {
        Self::from_fourcc(tag).unwrap_or_else(|| {
            log::debug!("unsupported encode variant {tag:?}, using DXT5");
            Self::default()
        })
    }

    /// Byte size of one compressed level of the given dimensions.
    pub(crate) fn level_size(self, width: u32, height: u32) -> Option<usize> {
        let (bw, bh) = crate::bc::block_grid(width, height);
        bw.checked_mul(bh)?.checked_mul(self.bytes_per_block())
    }
}

/// Storage format of a DDS payload, as understood by this codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureFormat {
    /// Block-compressed payload.
    Compressed(Variant),
    /// Raw per-pixel samples described by channel bit masks.
    Uncompressed(ChannelMasks),
}

impl TextureFormat {
    /// FourCC tag for compressed formats.
    pub fn fourcc(&self) -> Option<[u8; 4]> {
        match self {
            Self::Compressed(v) => Some(v.fourcc()),
            Self::Uncompressed(_) => None,
        }
    }

    /// Byte size of the base level payload.
    pub(crate) fn base_level_size(&self, width: u32, height: u32) -> Option<usize> {
        match self {
            Self::Compressed(v) => v.level_size(width, height),
            Self::Uncompressed(masks) => {
                let pitch = masks.row_pitch(width)?;
                (pitch as usize).checked_mul(height as usize)
            }
        }
    }
}
