use alloc::borrow::Cow;
use alloc::vec::Vec;

use enough::Stop;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::error::DdsError;
use crate::header::{HEADER_LEN, parse_header};
use crate::info::ImageInfo;
use crate::limits::Limits;
use crate::pixel::TextureFormat;

static TEXTURE_LIMITS: Limits = Limits::texture();

/// Decoded base level as RGBA8. Pixels may be borrowed (zero-copy) or owned.
#[derive(Clone, Debug)]
pub struct DecodeOutput<'a> {
    pixels: Cow<'a, [u8]>,
    pub width: u32,
    pub height: u32,
    pub info: ImageInfo,
}

impl<'a> DecodeOutput<'a> {
    /// Access the RGBA8 pixel data (`width * height * 4` bytes, no row padding).
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data (copies if borrowed).
    pub fn into_owned(self) -> DecodeOutput<'static> {
        DecodeOutput {
            pixels: Cow::Owned(self.pixels.into_owned()),
            width: self.width,
            height: self.height,
            info: self.info,
        }
    }

    /// Consume the output, returning the pixel buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels.into_owned()
    }

    /// Whether the pixel data is borrowed (zero-copy from input).
    pub fn is_borrowed(&self) -> bool {
        matches!(self.pixels, Cow::Borrowed(_))
    }

    /// Reinterpret pixel data as typed RGBA pixels.
    #[cfg(feature = "rgb")]
    pub fn as_rgba(&self) -> &[rgb::RGBA8] {
        self.pixels().as_pixels()
    }

    /// Copy into an [`imgref::ImgVec`] of RGBA pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::RGBA8> {
        imgref::ImgVec::new(
            self.as_rgba().to_vec(),
            self.width as usize,
            self.height as usize,
        )
    }
}

/// Builder for decoding a DDS file.
///
/// Without [`DecodeRequest::with_limits`], [`Limits::texture`] applies.
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Replace the default texture limits.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode the base level. Embedded smaller mip levels are ignored.
    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput<'a>, DdsError> {
        let data = self.data;
        let header = parse_header(data)?;
        let (width, height) = (header.width, header.height);
        if width == 0 || height == 0 {
            return Err(DdsError::InvalidDimensions { width, height });
        }

        let limits = self.limits.unwrap_or(&TEXTURE_LIMITS);
        limits.check(width, height)?;

        let format = header.texture_format()?;
        let out_bytes = (width as usize)
            .checked_mul(height as usize)
            .and_then(|wh| wh.checked_mul(4))
            .ok_or(DdsError::DimensionsTooLarge { width, height })?;
        limits.check_memory(out_bytes)?;

        let payload = &data[HEADER_LEN..];
        let needed = format
            .base_level_size(width, height)
            .ok_or(DdsError::DimensionsTooLarge { width, height })?;
        if payload.len() < needed {
            return Err(DdsError::Truncated {
                needed,
                actual: payload.len(),
            });
        }

        stop.check()?;

        let pixels = match &format {
            TextureFormat::Compressed(variant) => Cow::Owned(crate::bc::decode_level(
                payload, width, height, *variant, &stop,
            )?),
            TextureFormat::Uncompressed(masks) => {
                crate::uncompressed::decode(payload, width, height, masks, &stop)?
            }
        };

        Ok(DecodeOutput {
            pixels,
            width,
            height,
            info: ImageInfo {
                width,
                height,
                mip_count: header.mip_levels(),
                format,
                byte_length: data.len(),
            },
        })
    }
}
