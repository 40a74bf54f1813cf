use alloc::vec::Vec;

use enough::Stop;

#[cfg(feature = "rgb")]
use rgb::ComponentBytes as _;

use crate::error::DdsError;
use crate::header::{DdsHeader, HEADER_LEN, PixelFormat, write_header};
use crate::mipmap::generate_pyramid;
use crate::pixel::Variant;

/// Builder for encoding an RGBA8 raster to a DDS file with a full mip chain.
#[derive(Clone, Copy, Debug, Default)]
pub struct EncodeRequest {
    variant: Variant,
}

impl EncodeRequest {
    pub fn new(variant: Variant) -> Self {
        Self { variant }
    }

    /// DXT1 with punch-through alpha.
    pub fn dxt1() -> Self {
        Self::new(Variant::Dxt1)
    }

    /// DXT5 with interpolated alpha.
    pub fn dxt5() -> Self {
        Self::new(Variant::Dxt5)
    }

    /// Select the variant by FourCC tag. Unknown tags fall back to DXT5.
    pub fn from_fourcc(tag: &[u8]) -> Self {
        Self::new(Variant::from_fourcc_or_default(tag))
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Encode `width * height` RGBA8 pixels (no row padding).
    pub fn encode(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
        stop: impl Stop,
    ) -> Result<Vec<u8>, DdsError> {
        if width == 0 || height == 0 {
            return Err(DdsError::InvalidDimensions { width, height });
        }
        let too_large = || DdsError::DimensionsTooLarge { width, height };
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|wh| wh.checked_mul(4))
            .ok_or_else(too_large)?;
        if pixels.len() != expected {
            return Err(DdsError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        let variant = self.variant;
        let levels = generate_pyramid(pixels, width, height, &stop)?;

        let mut payload_len = 0usize;
        for level in &levels {
            let size = variant
                .level_size(level.width, level.height)
                .ok_or_else(too_large)?;
            payload_len = payload_len.checked_add(size).ok_or_else(too_large)?;
        }
        log::debug!(
            "encoding {width}x{height} as {variant:?}: {} levels, {payload_len} payload bytes",
            levels.len()
        );

        let header = DdsHeader {
            width,
            height,
            mip_count: levels.len() as u32,
            format: PixelFormat::FourCc(variant.fourcc()),
        };
        let mut out = Vec::with_capacity(HEADER_LEN + payload_len);
        out.extend_from_slice(&write_header(&header));
        for level in &levels {
            log::trace!("encoding mip level {}x{}", level.width, level.height);
            crate::bc::encode_level(
                &level.pixels,
                level.width,
                level.height,
                variant,
                &mut out,
                &stop,
            )?;
        }
        debug_assert_eq!(out.len(), HEADER_LEN + payload_len);
        Ok(out)
    }

    /// Encode typed RGBA pixels.
    #[cfg(feature = "rgb")]
    pub fn encode_rgba(
        &self,
        pixels: &[rgb::RGBA8],
        width: u32,
        height: u32,
        stop: impl Stop,
    ) -> Result<Vec<u8>, DdsError> {
        self.encode(pixels.as_bytes(), width, height, stop)
    }

    /// Encode an [`imgref::ImgRef`], dropping any row stride padding.
    #[cfg(feature = "imgref")]
    pub fn encode_img(
        &self,
        img: imgref::ImgRef<'_, rgb::RGBA8>,
        stop: impl Stop,
    ) -> Result<Vec<u8>, DdsError> {
        let mut pixels = Vec::with_capacity(img.width() * img.height() * 4);
        for row in img.rows() {
            pixels.extend_from_slice(row.as_bytes());
        }
        self.encode(&pixels, img.width() as u32, img.height() as u32, stop)
    }
}
