#![no_main]

use gst_invoicing::gst::{gstin_check_char, validate_gstin};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Any accepted GSTIN must carry its own check character.
        if let Ok(gstin) = validate_gstin(s) {
            let text = gstin.as_str();
            assert_eq!(gstin_check_char(&text[..14]), text.chars().nth(14));
        }
    }
});
