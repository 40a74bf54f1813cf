use crate::error::DdsError;
use crate::header::parse_header;
use crate::pixel::TextureFormat;

/// Header-level facts about a DDS file, available without decoding pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Mip levels declared by the header (at least 1).
    pub mip_count: u32,
    pub format: TextureFormat,
    /// Length of the whole input, header included.
    pub byte_length: usize,
}

impl ImageInfo {
    /// Probe a DDS file's header.
    ///
    /// Fails for the same header-level reasons as decoding, but applies no
    /// dimension limits and does not check payload length.
    pub fn from_bytes(data: &[u8]) -> Result<Self, DdsError> {
        let header = parse_header(data)?;
        if header.width == 0 || header.height == 0 {
            return Err(DdsError::InvalidDimensions {
                width: header.width,
                height: header.height,
            });
        }
        Ok(Self {
            width: header.width,
            height: header.height,
            mip_count: header.mip_levels(),
            format: header.texture_format()?,
            byte_length: data.len(),
        })
    }

    /// FourCC variant tag, `None` for uncompressed files.
    pub fn variant_tag(&self) -> Option<[u8; 4]> {
        self.format.fourcc()
    }
}
