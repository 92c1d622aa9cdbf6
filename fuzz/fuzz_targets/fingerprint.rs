#![no_main]

use appsig_crypto::{fingerprint, APP_SIGNATURE_LEN};
use libfuzzer_sys::fuzz_target;

// Arbitrary bytes either fail with a typed error or produce a well formed signature
fuzz_target!(|input: (&[u8], &[u8])| {
    let (identifier, certificate) = input;
    if let Ok(signature) = fingerprint(identifier, certificate) {
        assert_eq!(signature.as_str().len(), APP_SIGNATURE_LEN);
    }
});
