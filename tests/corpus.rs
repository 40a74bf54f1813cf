//! Test corpus: pattern sweeps across sizes and variants, plus malformed input.

use enough::Unstoppable;
use zendds::header::write_header;
use zendds::*;

fn checkerboard(w: usize, h: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; w * h * 4];
    for y in 0..h {
        for x in 0..w {
            let off = (y * w + x) * 4;
            if (x + y) % 2 == 0 {
                pixels[off..off + 4].copy_from_slice(&[220, 240, 30, 255]);
            } else {
                pixels[off..off + 4].copy_from_slice(&[10, 40, 200, 0]);
            }
        }
    }
    pixels
}

fn noise_pattern(w: usize, h: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; w * h * 4];
    let mut state: u32 = 0xDEAD_BEEF;
    for p in pixels.iter_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *p = state as u8;
    }
    pixels
}

const SIZES: [(usize, usize); 8] = [
    (1, 1),
    (2, 3),
    (4, 4),
    (5, 7),
    (6, 6),
    (16, 16),
    (33, 9),
    (1, 40),
];

fn dxt_file(width: u32, height: u32, tag: &[u8; 4], payload_len: usize) -> Vec<u8> {
    let header = DdsHeader {
        width,
        height,
        mip_count: 1,
        format: PixelFormat::FourCc(*tag),
    };
    let mut file = write_header(&header).to_vec();
    file.resize(file.len() + payload_len, 0);
    file
}

// ── Pattern sweeps ───────────────────────────────────────────────────

#[test]
fn noise_dxt1_alpha_is_thresholded() {
    for (w, h) in SIZES {
        let pixels = noise_pattern(w, h);
        let encoded = encode_dxt1(&pixels, w as u32, h as u32, Unstoppable).unwrap();
        let decoded = decode(&encoded, Unstoppable).unwrap();
        assert_eq!((decoded.width as usize, decoded.height as usize), (w, h));
        for (src, dst) in pixels.chunks_exact(4).zip(decoded.pixels().chunks_exact(4)) {
            assert_eq!(dst[3], if src[3] < 128 { 0 } else { 255 }, "{w}x{h}");
        }
    }
}

#[test]
fn noise_dxt5_alpha_within_one_table_step() {
    for (w, h) in SIZES {
        let pixels = noise_pattern(w, h);
        let encoded = encode_dxt5(&pixels, w as u32, h as u32, Unstoppable).unwrap();
        let decoded = decode(&encoded, Unstoppable).unwrap();
        for (src, dst) in pixels.chunks_exact(4).zip(decoded.pixels().chunks_exact(4)) {
            assert!(src[3].abs_diff(dst[3]) <= 19, "{w}x{h}: {} vs {}", src[3], dst[3]);
        }
    }
}

#[test]
fn checkerboard_two_colors_per_block() {
    for (w, h) in SIZES {
        let pixels = checkerboard(w, h);

        let encoded = encode_dxt5(&pixels, w as u32, h as u32, Unstoppable).unwrap();
        let decoded = decode(&encoded, Unstoppable).unwrap();
        for (src, dst) in pixels.chunks_exact(4).zip(decoded.pixels().chunks_exact(4)) {
            // two alpha values per block are reproduced exactly
            assert_eq!(src[3], dst[3]);
        }

        let encoded = encode_dxt1(&pixels, w as u32, h as u32, Unstoppable).unwrap();
        let decoded = decode(&encoded, Unstoppable).unwrap();
        for (src, dst) in pixels.chunks_exact(4).zip(decoded.pixels().chunks_exact(4)) {
            assert_eq!(src[3], dst[3]);
        }
    }
}

#[test]
fn every_size_has_expected_payload() {
    for (w, h) in SIZES {
        let pixels = noise_pattern(w, h);
        for variant in [Variant::Dxt1, Variant::Dxt5] {
            let encoded = encode(&pixels, w as u32, h as u32, variant, Unstoppable).unwrap();
            let info = probe(&encoded).unwrap();
            assert_eq!(info.format, TextureFormat::Compressed(variant));
            assert_eq!(info.mip_count, mipmap::mip_level_count(w as u32, h as u32));
            let base = w.div_ceil(4) * h.div_ceil(4) * variant.bytes_per_block();
            assert!(encoded.len() >= 128 + base);
        }
    }
}

#[test]
fn block_api_matches_file_api() {
    let pixels = noise_pattern(4, 4);
    let block: bc::Block = core::array::from_fn(|i| {
        [
            pixels[i * 4],
            pixels[i * 4 + 1],
            pixels[i * 4 + 2],
            pixels[i * 4 + 3],
        ]
    });
    let encoded = encode_dxt5(&pixels, 4, 4, Unstoppable).unwrap();
    assert_eq!(&encoded[128..144], &bc::encode_dxt5_block(&block));

    let decoded = decode(&encoded, Unstoppable).unwrap();
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&encoded[128..144]);
    let texels = bc::decode_dxt5_block(&bytes);
    assert_eq!(decoded.pixels(), texels.as_flattened());
}

// ── Malformed input ──────────────────────────────────────────────────

#[test]
fn too_small() {
    assert!(matches!(
        decode(&[0u8; 64], Unstoppable),
        Err(DdsError::TooSmall {
            needed: 128,
            actual: 64
        })
    ));
    assert!(matches!(
        decode(&[], Unstoppable),
        Err(DdsError::TooSmall { .. })
    ));
}

#[test]
fn bad_magic() {
    let mut file = dxt_file(4, 4, b"DXT1", 8);
    file[0] = b'P';
    assert!(matches!(decode(&file, Unstoppable), Err(DdsError::BadMagic)));
    assert!(matches!(probe(&file), Err(DdsError::BadMagic)));
}

#[test]
fn zero_dimensions() {
    for (w, h) in [(0, 4), (4, 0), (0, 0)] {
        let file = dxt_file(w, h, b"DXT1", 8);
        assert!(matches!(
            decode(&file, Unstoppable),
            Err(DdsError::InvalidDimensions { .. })
        ));
    }
}

#[test]
fn dimensions_over_default_limit() {
    let file = dxt_file(4096, 4, b"DXT1", 0);
    assert!(matches!(
        decode(&file, Unstoppable),
        Err(DdsError::DimensionsTooLarge {
            width: 4096,
            height: 4
        })
    ));

    // enormous header values are rejected before any allocation
    let file = dxt_file(u32::MAX, u32::MAX, b"DXT5", 0);
    assert!(matches!(
        decode(&file, Unstoppable),
        Err(DdsError::DimensionsTooLarge { .. })
    ));
}

#[test]
fn custom_limits_widen_and_narrow() {
    let file = dxt_file(4096, 4, b"DXT1", 1024 * 8);
    let wide = Limits {
        max_width: Some(8192),
        ..Limits::texture()
    };
    let decoded = decode_with_limits(&file, &wide, Unstoppable).unwrap();
    assert_eq!(decoded.pixels().len(), 4096 * 4 * 4);

    let small = dxt_file(8, 8, b"DXT1", 32);
    let narrow = Limits {
        max_pixels: Some(16),
        ..Default::default()
    };
    assert!(matches!(
        decode_with_limits(&small, &narrow, Unstoppable),
        Err(DdsError::DimensionsTooLarge { .. })
    ));

    let tight_memory = Limits {
        max_memory_bytes: Some(100),
        ..Default::default()
    };
    assert!(matches!(
        decode_with_limits(&small, &tight_memory, Unstoppable),
        Err(DdsError::LimitExceeded(_))
    ));
}

#[test]
fn unsupported_fourcc() {
    for tag in [b"DXT3", b"ATI2", b"DX10"] {
        let file = dxt_file(4, 4, tag, 16);
        assert!(matches!(
            decode(&file, Unstoppable),
            Err(DdsError::UnsupportedFormat(_))
        ));
    }
}

#[test]
fn unsupported_uncompressed_layout() {
    let header = DdsHeader {
        width: 4,
        height: 4,
        mip_count: 1,
        format: PixelFormat::Masked(ChannelMasks::default()),
    };
    let mut file = write_header(&header).to_vec();
    file.resize(file.len() + 64, 0);
    assert!(matches!(
        decode(&file, Unstoppable),
        Err(DdsError::UnsupportedFormat(_))
    ));
}

#[test]
fn truncated_payload() {
    // 6x6 DXT5 needs 4 blocks = 64 bytes
    let file = dxt_file(6, 6, b"DXT5", 63);
    assert!(matches!(
        decode(&file, Unstoppable),
        Err(DdsError::Truncated {
            needed: 64,
            actual: 63
        })
    ));

    let pixels = noise_pattern(8, 8);
    let encoded = encode_dxt1(&pixels, 8, 8, Unstoppable).unwrap();
    assert!(matches!(
        decode(&encoded[..128 + 31], Unstoppable),
        Err(DdsError::Truncated { .. })
    ));
}

#[test]
fn encode_rejects_bad_input() {
    assert!(matches!(
        encode_dxt1(&[0u8; 12], 2, 2, Unstoppable),
        Err(DdsError::BufferSizeMismatch {
            expected: 16,
            actual: 12
        })
    ));
    assert!(matches!(
        encode_dxt5(&[0u8; 20], 2, 2, Unstoppable),
        Err(DdsError::BufferSizeMismatch { .. })
    ));
    assert!(matches!(
        encode_dxt5(&[], 0, 3, Unstoppable),
        Err(DdsError::InvalidDimensions { .. })
    ));
}

#[test]
fn garbage_never_panics() {
    let mut data = noise_pattern(64, 2);
    data[0..4].copy_from_slice(b"DDS ");
    for len in [128, 129, 200, 300, 512] {
        let _ = decode(&data[..len], Unstoppable);
        let _ = probe(&data[..len]);
    }
}
