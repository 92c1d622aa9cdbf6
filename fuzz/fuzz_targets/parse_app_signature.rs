#![no_main]

use std::str::FromStr;

use appsig_crypto::AppSignature;
use libfuzzer_sys::fuzz_target;

// AppSignature parsing should never panic, and anything it accepts must print back unchanged
fuzz_target!(|data: &[u8]| {
    let Ok(data_string) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(signature) = AppSignature::from_str(data_string) {
        assert_eq!(signature.as_str(), data_string);
    }
});
