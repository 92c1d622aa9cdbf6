#![no_main]

use appsig_crypto::sms::VerificationSms;
use libfuzzer_sys::fuzz_target;

// Received messages are untrusted, parsing should never panic
fuzz_target!(|data: &[u8]| {
    let Ok(message) = std::str::from_utf8(data) else {
        return;
    };
    let _ = VerificationSms::parse(message);
});
