// fuzz/fuzz_targets/fuzz_header_scan.rs
#![no_main]

use incubator_prebuild::stamp::{
    next_build_number, previous_build_number, render_header, scan_header, BuildRecord, PriorBuild,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // The stamper decodes prior headers lossily, so do the same here.
    let content = String::from_utf8_lossy(data);

    let next = next_build_number(Some(&content));
    assert!(next >= 1);

    // Both entry points agree on what the header says.
    match previous_build_number(&content) {
        Some(n) if n < u64::MAX => assert_eq!(next, n + 1),
        _ => assert_eq!(next, 1),
    }

    // A recovered number must round-trip through a freshly rendered header.
    if let PriorBuild::Number(n) = scan_header(&content) {
        let record = BuildRecord {
            build_number: n,
            build_date: "2000-01-01 00:00:00".to_string(),
        };
        assert_eq!(scan_header(&render_header(&record)), PriorBuild::Number(n));
    }
});
