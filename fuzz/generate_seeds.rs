#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(width: u32, height: u32, flags: u32, pf_flags: u32) -> Vec<u8> {
    let mut h = vec![0u8; 128];
    h[0..4].copy_from_slice(b"DDS ");
    h[4..8].copy_from_slice(&124u32.to_le_bytes());
    h[8..12].copy_from_slice(&flags.to_le_bytes());
    h[12..16].copy_from_slice(&height.to_le_bytes());
    h[16..20].copy_from_slice(&width.to_le_bytes());
    h[28..32].copy_from_slice(&1u32.to_le_bytes()); // mip count
    h[76..80].copy_from_slice(&32u32.to_le_bytes()); // pixel format size
    h[80..84].copy_from_slice(&pf_flags.to_le_bytes());
    h[108..112].copy_from_slice(&0x401008u32.to_le_bytes()); // caps
    h
}

fn compressed(width: u32, height: u32, fourcc: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut file = header(width, height, 0xA1007, 0x4);
    file[84..88].copy_from_slice(fourcc);
    file.extend_from_slice(payload);
    file
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // DXT1 4x4: red/blue endpoints, mixed indices
    let dxt1 = compressed(4, 4, b"DXT1", &[0x00, 0xF8, 0x1F, 0x00, 0xE4, 0xE4, 0x1B, 0x1B]);
    fs::write(format!("{dir}/dxt1_4x4.dds"), &dxt1).unwrap();

    // DXT1 4x4 three-color block with transparent texels
    let dxt1_punch = compressed(4, 4, b"DXT1", &[0x1F, 0x00, 0x00, 0xF8, 0xFF, 0x00, 0xFF, 0x00]);
    fs::write(format!("{dir}/dxt1_punch_4x4.dds"), dxt1_punch).unwrap();

    // DXT5 6x6: alpha ramp block repeated over the 2x2 block grid
    let block = [
        0xFF, 0x00, 0x88, 0x46, 0x3A, 0xB1, 0x6B, 0xDB, // alpha
        0xE0, 0x07, 0x00, 0x00, 0x55, 0xAA, 0x55, 0xAA, // color
    ];
    let dxt5 = compressed(6, 6, b"DXT5", &block.repeat(4));
    fs::write(format!("{dir}/dxt5_6x6.dds"), dxt5).unwrap();

    // Uncompressed RGBA8 2x2
    let mut rgba = header(2, 2, 0x2100F, 0x41);
    rgba[88..92].copy_from_slice(&32u32.to_le_bytes());
    rgba[92..96].copy_from_slice(&0x0000_00FFu32.to_le_bytes());
    rgba[96..100].copy_from_slice(&0x0000_FF00u32.to_le_bytes());
    rgba[100..104].copy_from_slice(&0x00FF_0000u32.to_le_bytes());
    rgba[104..108].copy_from_slice(&0xFF00_0000u32.to_le_bytes());
    rgba.extend_from_slice(&[255, 0, 0, 255, 0, 255, 0, 128, 0, 0, 255, 0, 9, 9, 9, 255]);
    fs::write(format!("{dir}/rgba8_2x2.dds"), rgba).unwrap();

    // Uncompressed 8-bit luminance 3x1
    let mut lum = header(3, 1, 0x2100F, 0x20000);
    lum[88..92].copy_from_slice(&8u32.to_le_bytes());
    lum[92..96].copy_from_slice(&0xFFu32.to_le_bytes());
    lum.extend_from_slice(&[0, 128, 255]);
    fs::write(format!("{dir}/l8_3x1.dds"), lum).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_magic.bin"), b"DDS ").unwrap();
    fs::write(format!("{dir}/header_only.dds"), &dxt1[..128]).unwrap();
    fs::write(format!("{dir}/dxt3.dds"), compressed(4, 4, b"DXT3", &[0; 16])).unwrap();
    fs::write(format!("{dir}/huge.dds"), compressed(u32::MAX, u32::MAX, b"DXT5", &[])).unwrap();

    println!("Generated seed corpus in {dir}/");
}
