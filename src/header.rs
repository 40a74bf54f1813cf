//! DDS container header: the fixed 128-byte prefix (magic + 124-byte struct).
//!
//! All fields are little-endian. Only the fields this codec reads or writes
//! are named; reserved regions are zero-filled on write and ignored on read.

use crate::error::DdsError;
use crate::pixel::{TextureFormat, Variant};

/// `"DDS "` signature.
pub const MAGIC: [u8; 4] = *b"DDS ";
/// Magic plus header struct.
pub const HEADER_LEN: usize = 128;

const HEADER_STRUCT_SIZE: u32 = 124;
const PIXEL_FORMAT_SIZE: u32 = 32;

// Header flags
const DDSD_CAPS: u32 = 0x1;
const DDSD_HEIGHT: u32 = 0x2;
const DDSD_WIDTH: u32 = 0x4;
const DDSD_PITCH: u32 = 0x8;
const DDSD_PIXELFORMAT: u32 = 0x1000;
const DDSD_MIPMAPCOUNT: u32 = 0x2_0000;
const DDSD_LINEARSIZE: u32 = 0x8_0000;

const COMPRESSED_FLAGS: u32 =
    DDSD_CAPS | DDSD_HEIGHT | DDSD_WIDTH | DDSD_PIXELFORMAT | DDSD_MIPMAPCOUNT | DDSD_LINEARSIZE;
const UNCOMPRESSED_FLAGS: u32 =
    DDSD_CAPS | DDSD_HEIGHT | DDSD_WIDTH | DDSD_PITCH | DDSD_PIXELFORMAT | DDSD_MIPMAPCOUNT;

// Pixel format flags
const DDPF_ALPHAPIXELS: u32 = 0x1;
const DDPF_ALPHA: u32 = 0x2;
const DDPF_FOURCC: u32 = 0x4;
const DDPF_RGB: u32 = 0x40;
const DDPF_LUMINANCE: u32 = 0x2_0000;

// DDSCAPS_COMPLEX | DDSCAPS_TEXTURE | DDSCAPS_MIPMAP
const CAPS: u32 = 0x40_1008;

// Field offsets (from start of file, magic included)
const OFF_SIZE: usize = 4;
const OFF_FLAGS: usize = 8;
const OFF_HEIGHT: usize = 12;
const OFF_WIDTH: usize = 16;
const OFF_LINEAR_SIZE: usize = 20;
const OFF_MIP_COUNT: usize = 28;
const OFF_PF_SIZE: usize = 76;
const OFF_PF_FLAGS: usize = 80;
const OFF_FOURCC: usize = 84;
const OFF_BIT_COUNT: usize = 88;
const OFF_MASKS: usize = 92;
const OFF_CAPS: usize = 108;

/// Bit layout of an uncompressed pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelMasks {
    /// Bits per pixel (8, 16, 24 or 32).
    pub bit_count: u32,
    pub red: u32,
    pub green: u32,
    pub blue: u32,
    pub alpha: u32,
    /// Single luminance channel stored under the red mask.
    pub luminance: bool,
}

impl ChannelMasks {
    /// 32-bit RGBA in memory order (R in the lowest byte).
    pub const RGBA8: Self = Self {
        bit_count: 32,
        red: 0x0000_00FF,
        green: 0x0000_FF00,
        blue: 0x00FF_0000,
        alpha: 0xFF00_0000,
        luminance: false,
    };

    /// 32-bit BGRA in memory order (B in the lowest byte).
    pub const BGRA8: Self = Self {
        bit_count: 32,
        red: 0x00FF_0000,
        green: 0x0000_FF00,
        blue: 0x0000_00FF,
        alpha: 0xFF00_0000,
        luminance: false,
    };

    /// Whether this codec can decode the layout.
    pub fn is_supported(&self) -> bool {
        if !matches!(self.bit_count, 8 | 16 | 24 | 32) {
            return false;
        }
        let all = self.red | self.green | self.blue | self.alpha;
        if all == 0 {
            return false;
        }
        // every mask must fit inside one pixel
        self.bit_count == 32 || all >> self.bit_count == 0
    }

    /// Bytes per pixel.
    pub fn bytes_per_pixel(&self) -> usize {
        (self.bit_count as usize).div_ceil(8)
    }

    /// Tightly packed row length in bytes.
    pub(crate) fn row_pitch(&self, width: u32) -> Option<u32> {
        let bits = u64::from(width) * u64::from(self.bit_count);
        u32::try_from(bits.div_ceil(8)).ok()
    }
}

/// Pixel-format section of the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// FourCC-tagged (compressed) format. The tag is not validated here.
    FourCc([u8; 4]),
    /// Explicit-mask (uncompressed) format.
    Masked(ChannelMasks),
}

/// Parsed DDS header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DdsHeader {
    pub width: u32,
    pub height: u32,
    /// Number of mip levels as stored. Zero is written by some tools for
    /// single-level files; see [`DdsHeader::mip_levels`].
    pub mip_count: u32,
    pub format: PixelFormat,
}

impl DdsHeader {
    /// Mip level count, treating a stored zero as one level.
    pub fn mip_levels(&self) -> u32 {
        self.mip_count.max(1)
    }

    /// Resolve the pixel format into something this codec can decode.
    pub fn texture_format(&self) -> Result<TextureFormat, DdsError> {
        match self.format {
            PixelFormat::FourCc(tag) => Variant::from_fourcc(&tag)
                .map(TextureFormat::Compressed)
                .ok_or_else(|| {
                    DdsError::UnsupportedFormat(alloc::format!(
                        "FourCC {:?}",
                        core::str::from_utf8(&tag).unwrap_or("<binary>")
                    ))
                }),
            PixelFormat::Masked(masks) if masks.is_supported() => {
                Ok(TextureFormat::Uncompressed(masks))
            }
            PixelFormat::Masked(masks) => Err(DdsError::UnsupportedFormat(alloc::format!(
                "uncompressed layout {}bpp masks r={:#x} g={:#x} b={:#x} a={:#x}",
                masks.bit_count,
                masks.red,
                masks.green,
                masks.blue,
                masks.alpha
            ))),
        }
    }
}

fn read_u32(data: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([data[off], data[off + 1], data[off + 2], data[off + 3]])
}

fn write_u32(out: &mut [u8], off: usize, v: u32) {
    out[off..off + 4].copy_from_slice(&v.to_le_bytes());
}

/// Parse the 128-byte header. Does not judge whether the format is supported.
pub fn parse_header(data: &[u8]) -> Result<DdsHeader, DdsError> {
    if data.len() < HEADER_LEN {
        return Err(DdsError::TooSmall {
            needed: HEADER_LEN,
            actual: data.len(),
        });
    }
    if data[0..4] != MAGIC {
        return Err(DdsError::BadMagic);
    }

    let height = read_u32(data, OFF_HEIGHT);
    let width = read_u32(data, OFF_WIDTH);
    let mip_count = read_u32(data, OFF_MIP_COUNT);
    let pf_flags = read_u32(data, OFF_PF_FLAGS);

    let format = if pf_flags & DDPF_FOURCC != 0 {
        let mut tag = [0u8; 4];
        tag.copy_from_slice(&data[OFF_FOURCC..OFF_FOURCC + 4]);
        PixelFormat::FourCc(tag)
    } else {
        PixelFormat::Masked(ChannelMasks {
            bit_count: read_u32(data, OFF_BIT_COUNT),
            red: read_u32(data, OFF_MASKS),
            green: read_u32(data, OFF_MASKS + 4),
            blue: read_u32(data, OFF_MASKS + 8),
            // X8R8G8B8 writers often leave the alpha mask set on the padding byte
            alpha: if pf_flags & (DDPF_ALPHAPIXELS | DDPF_ALPHA) != 0 {
                read_u32(data, OFF_MASKS + 12)
            } else {
                0
            },
            luminance: pf_flags & DDPF_LUMINANCE != 0,
        })
    };

    let header = DdsHeader {
        width,
        height,
        mip_count,
        format,
    };
    log::debug!("parsed DDS header: {width}x{height}, {mip_count} mips, {format:?}");
    Ok(header)
}

/// Serialize a header. The linear-size (or pitch) field is computed from the
/// dimensions and format; flags and caps are fixed constants.
pub fn write_header(header: &DdsHeader) -> [u8; HEADER_LEN] {
    let mut out = [0u8; HEADER_LEN];
    out[0..4].copy_from_slice(&MAGIC);
    write_u32(&mut out, OFF_SIZE, HEADER_STRUCT_SIZE);
    write_u32(&mut out, OFF_HEIGHT, header.height);
    write_u32(&mut out, OFF_WIDTH, header.width);
    write_u32(&mut out, OFF_MIP_COUNT, header.mip_count);
    write_u32(&mut out, OFF_PF_SIZE, PIXEL_FORMAT_SIZE);
    write_u32(&mut out, OFF_CAPS, CAPS);

    match header.format {
        PixelFormat::FourCc(tag) => {
            let linear_size = Variant::from_fourcc(&tag)
                .and_then(|v| v.level_size(header.width, header.height))
                .and_then(|size| u32::try_from(size).ok())
                .unwrap_or(0);
            write_u32(&mut out, OFF_FLAGS, COMPRESSED_FLAGS);
            write_u32(&mut out, OFF_LINEAR_SIZE, linear_size);
            write_u32(&mut out, OFF_PF_FLAGS, DDPF_FOURCC);
            out[OFF_FOURCC..OFF_FOURCC + 4].copy_from_slice(&tag);
        }
        PixelFormat::Masked(masks) => {
            let mut pf_flags = if masks.luminance {
                DDPF_LUMINANCE
            } else {
                DDPF_RGB
            };
            if masks.alpha != 0 {
                pf_flags |= DDPF_ALPHAPIXELS;
            }
            write_u32(&mut out, OFF_FLAGS, UNCOMPRESSED_FLAGS);
            write_u32(
                &mut out,
                OFF_LINEAR_SIZE,
                masks.row_pitch(header.width).unwrap_or(0),
            );
            write_u32(&mut out, OFF_PF_FLAGS, pf_flags);
            write_u32(&mut out, OFF_BIT_COUNT, masks.bit_count);
            write_u32(&mut out, OFF_MASKS, masks.red);
            write_u32(&mut out, OFF_MASKS + 4, masks.green);
            write_u32(&mut out, OFF_MASKS + 8, masks.blue);
            write_u32(&mut out, OFF_MASKS + 12, masks.alpha);
        }
    }
    out
}
