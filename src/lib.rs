//! # zendds
//!
//! DDS texture decoder and encoder for the two common 4-color block formats.
//!
//! ## Supported Formats
//!
//! - **DXT1** — 8-byte blocks, RGB565 endpoints, 1-bit punch-through alpha
//! - **DXT5** — 16-byte blocks, interpolated 8-bit alpha plus a DXT1 color block
//! - **Uncompressed** (decode only) — any 8/16/24/32-bit layout described by
//!   channel bit masks, including luminance
//!
//! Decoding returns the base level as RGBA8; embedded mip levels are skipped.
//! Encoding always writes a full mip chain down to 1x1, generated with a 2x2
//! box filter.
//!
//! ## Zero-Copy Decoding
//!
//! Uncompressed 32-bit files already in RGBA byte order are returned as a
//! borrowed slice of the input. Everything else allocates.
//!
//! ## Non-Goals
//!
//! - DXT2/3/4, BC4-7, DX10 extended headers, cube maps and volume textures
//! - Cluster-fit or PCA endpoint optimization (a bounding-box heuristic is used)
//!
//! ## Usage
//!
//! ```no_run
//! use zendds::{DecodeRequest, EncodeRequest, ImageInfo};
//! use enough::Unstoppable;
//!
//! let data: &[u8] = &[]; // your DDS bytes
//!
//! // Probe without decoding
//! let info = ImageInfo::from_bytes(data)?;
//! println!("{}x{} {:?}, {} mips", info.width, info.height, info.format, info.mip_count);
//!
//! // Decode the base level to RGBA8
//! let decoded = DecodeRequest::new(data).decode(Unstoppable)?;
//!
//! // Re-encode as DXT1 with a full mip chain
//! let encoded = EncodeRequest::dxt1()
//!     .encode(decoded.pixels(), decoded.width, decoded.height, Unstoppable)?;
//! # Ok::<(), zendds::DdsError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod info;
mod limits;
mod pixel;
mod uncompressed;

pub mod bc;
pub mod header;
pub mod mipmap;

mod decode;
mod encode;

use alloc::vec::Vec;

// Re-exports
pub use decode::{DecodeOutput, DecodeRequest};
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::DdsError;
pub use header::{ChannelMasks, DdsHeader, PixelFormat};
pub use info::ImageInfo;
pub use limits::Limits;
pub use pixel::{TextureFormat, Variant};

/// Decode a DDS file's base level to RGBA8 under [`Limits::texture`].
pub fn decode(data: &[u8], stop: impl Stop) -> Result<DecodeOutput<'_>, DdsError> {
    DecodeRequest::new(data).decode(stop)
}

/// Decode a DDS file's base level to RGBA8 under custom limits.
pub fn decode_with_limits<'a>(
    data: &'a [u8],
    limits: &'a Limits,
    stop: impl Stop,
) -> Result<DecodeOutput<'a>, DdsError> {
    DecodeRequest::new(data).with_limits(limits).decode(stop)
}

/// Read header information without decoding pixels.
pub fn probe(data: &[u8]) -> Result<ImageInfo, DdsError> {
    ImageInfo::from_bytes(data)
}

/// Encode RGBA8 pixels with a full mip chain.
pub fn encode(
    pixels: &[u8],
    width: u32,
    height: u32,
    variant: Variant,
    stop: impl Stop,
) -> Result<Vec<u8>, DdsError> {
    EncodeRequest::new(variant).encode(pixels, width, height, stop)
}

/// Encode RGBA8 pixels as DXT1 with a full mip chain.
pub fn encode_dxt1(
    pixels: &[u8],
    width: u32,
    height: u32,
    stop: impl Stop,
) -> Result<Vec<u8>, DdsError> {
    EncodeRequest::dxt1().encode(pixels, width, height, stop)
}

/// Encode RGBA8 pixels as DXT5 with a full mip chain.
pub fn encode_dxt5(
    pixels: &[u8],
    width: u32,
    height: u32,
    stop: impl Stop,
) -> Result<Vec<u8>, DdsError> {
    EncodeRequest::dxt5().encode(pixels, width, height, stop)
}
