//! Known answer tests for the app signature derivation.
//!
//! These values are shared with the server side implementation and must never change.

use appsig_crypto::{fingerprint, fingerprints, AppSignature, SigningCertificate};

#[test]
fn test_known_vectors() {
    let vectors = [
        ("com.example.app", "3082\u{2026}abc", "fWJJeOH8i8F"),
        ("", "", "Nqnn8clbgv+"),
        ("a", "bc", "LmWmMILOyFi"),
        ("ab", "c", "vRsJ+QeHGSM"),
        ("com.example.app", "308201ab", "yWvcmvn8c5t"),
        (
            "com.google.android.gms",
            "308204433082032ba003020102020900c2e08746644a308d300d06092a864886f70d01010405003074310b3009060355040613025553311330110603550408130a43616c69666f726e6961",
            "v9sSZnQKyoy",
        ),
    ];

    for (identifier, certificate, expected) in vectors {
        let signature = fingerprint(identifier, certificate).unwrap();
        assert_eq!(signature.as_str(), expected, "{identifier:?} {certificate:?}");

        let parsed: AppSignature = expected.parse().unwrap();
        assert!(parsed.matches(identifier, certificate));
    }
}

#[test]
fn test_der_certificate_end_to_end() {
    let certificate = SigningCertificate::from_der(&[0x30, 0x82, 0x01, 0xab]).unwrap();
    let signature = fingerprint("com.example.app", &certificate).unwrap();
    assert_eq!(signature.as_str(), "yWvcmvn8c5t");
}

#[test]
fn test_rotated_certificates_are_independent() {
    let results = fingerprints("com.example.app", ["3082\u{2026}abc", "308201ab"]);
    let signatures: Vec<String> = results
        .into_iter()
        .map(|result| result.unwrap().to_string())
        .collect();

    assert_eq!(signatures, ["fWJJeOH8i8F", "yWvcmvn8c5t"]);
}

#[test]
fn test_concurrent_derivation() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let identifier = format!("com.example.app{i}");
                (fingerprint(&identifier, "3082\u{2026}abc").unwrap(), identifier)
            })
        })
        .collect();

    for handle in handles {
        let (signature, identifier) = handle.join().unwrap();
        assert_eq!(signature, fingerprint(&identifier, "3082\u{2026}abc").unwrap());
    }
}
