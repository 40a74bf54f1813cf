#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header probe and default-limit decode must never panic
    let _ = zendds::probe(data);
    let _ = zendds::decode(data, enough::Unstoppable);

    // Unbounded limits exercise the size arithmetic on huge headers
    let limits = zendds::Limits::default();
    let _ = zendds::decode_with_limits(data, &limits, enough::Unstoppable);
});
