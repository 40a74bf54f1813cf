/// Resource limits for decode operations.
///
/// All fields default to `None` (no limit). Decoding without explicit limits
/// uses [`Limits::texture`].
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum memory bytes for output buffer allocation.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Largest edge accepted by [`Limits::texture`].
    pub const TEXTURE_MAX_DIMENSION: u64 = 2048;

    /// Default decode limits: 2048x2048 texels.
    pub const fn texture() -> Self {
        Self {
            max_width: Some(Self::TEXTURE_MAX_DIMENSION),
            max_height: Some(Self::TEXTURE_MAX_DIMENSION),
            max_pixels: Some(Self::TEXTURE_MAX_DIMENSION * Self::TEXTURE_MAX_DIMENSION),
            max_memory_bytes: None,
        }
    }

    /// Check dimensions against limits. Returns Ok(()) or DimensionsTooLarge.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), crate::DdsError> {
        let too_large = crate::DdsError::DimensionsTooLarge { width, height };
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(too_large);
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(too_large);
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(too_large);
            }
        }
        Ok(())
    }

    /// Check that an allocation size is within memory limits.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), crate::DdsError> {
        if let Some(max_mem) = self.max_memory_bytes {
            if bytes as u64 > max_mem {
                return Err(crate::DdsError::LimitExceeded(alloc::format!(
                    "allocation {bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }
}
