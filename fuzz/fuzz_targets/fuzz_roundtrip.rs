#![no_main]
use libfuzzer_sys::fuzz_target;
use zendds::*;

fuzz_target!(|data: &[u8]| {
    // Anything we can decode must re-encode and decode to the same shape
    let Ok(decoded) = decode(data, enough::Unstoppable) else {
        return;
    };

    let variant = match decoded.info.format {
        TextureFormat::Compressed(v) => v,
        _ => Variant::Dxt5,
    };
    let reencoded = encode(
        decoded.pixels(),
        decoded.width,
        decoded.height,
        variant,
        enough::Unstoppable,
    )
    .expect("decoded pixels must encode");

    let Ok(decoded2) = decode(&reencoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded.width, decoded2.width);
    assert_eq!(decoded.height, decoded2.height);
    assert_eq!(decoded.pixels().len(), decoded2.pixels().len());
    assert_eq!(decoded2.info.format, TextureFormat::Compressed(variant));
});
