//! Derivation of the app signature from a package identifier and a signing certificate.
//!
//! The construction is fixed by the verification service and must not change:
//!
//! ```text
//! base64(sha256(identifier || " " || certificate)[..9])[..11]
//! ```
//!
//! Nine digest bytes encode to twelve Base64 symbols. Only the first eleven are kept, so the
//! output never carries padding.
use std::str::FromStr;

use sha2::Digest;

use crate::{error::Result, AppSignature, AppSignatureError, InputField};

/// Number of leading digest bytes that make up an app signature.
pub const HASH_PREFIX_LEN: usize = 9;

const SEPARATOR: u8 = b' ';

/// Digest algorithms that can back an app signature.
///
/// Only SHA-256 is accepted by the verification service. Names are resolved case-insensitively,
/// the same way a platform digest registry is queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigestAlgorithm {
    /// SHA-256
    #[default]
    Sha256,
}

impl DigestAlgorithm {
    fn digest_prefix(&self, data: &[u8]) -> [u8; HASH_PREFIX_LEN] {
        let mut prefix = [0u8; HASH_PREFIX_LEN];
        match self {
            DigestAlgorithm::Sha256 => {
                let digest = sha2::Sha256::digest(data);
                prefix.copy_from_slice(&digest[..HASH_PREFIX_LEN]);
            }
        }
        prefix
    }
}

impl FromStr for DigestAlgorithm {
    type Err = AppSignatureError;

    fn from_str(name: &str) -> Result<Self> {
        match name.to_ascii_uppercase().as_str() {
            "SHA-256" | "SHA256" => Ok(DigestAlgorithm::Sha256),
            _ => Err(AppSignatureError::DigestUnavailable(name.to_owned())),
        }
    }
}

/// Compute the app signature for one signing certificate.
///
/// Both inputs must be valid UTF-8. `&str` and `String` can be passed directly, raw bytes are
/// validated and rejected with [`AppSignatureError::Encoding`] when malformed.
///
/// ```
/// let signature = appsig_crypto::fingerprint("com.example.app", "3082\u{2026}abc").unwrap();
/// assert_eq!(signature.as_str(), "fWJJeOH8i8F");
/// ```
pub fn fingerprint(
    identifier: impl AsRef<[u8]>,
    certificate: impl AsRef<[u8]>,
) -> Result<AppSignature> {
    derive(
        DigestAlgorithm::Sha256,
        identifier.as_ref(),
        certificate.as_ref(),
    )
}

/// Compute the app signature using a digest algorithm looked up by name.
///
/// Fails with [`AppSignatureError::DigestUnavailable`] for names other than SHA-256.
pub fn fingerprint_with_digest(
    identifier: impl AsRef<[u8]>,
    certificate: impl AsRef<[u8]>,
    digest_name: &str,
) -> Result<AppSignature> {
    let algorithm: DigestAlgorithm = digest_name.parse()?;
    derive(algorithm, identifier.as_ref(), certificate.as_ref())
}

/// Compute one app signature per signing certificate.
///
/// Apps signed by several certificates (key rotation, multi-signing) have one signature per
/// certificate. The results are independent and returned in input order, nothing is selected or
/// deduplicated.
pub fn fingerprints<I>(identifier: impl AsRef<[u8]>, certificates: I) -> Vec<Result<AppSignature>>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let identifier = identifier.as_ref();
    certificates
        .into_iter()
        .map(|certificate| fingerprint(identifier, certificate))
        .collect()
}

fn derive(
    algorithm: DigestAlgorithm,
    identifier: &[u8],
    certificate: &[u8],
) -> Result<AppSignature> {
    let identifier =
        std::str::from_utf8(identifier).map_err(|source| AppSignatureError::Encoding {
            field: InputField::Identifier,
            source,
        })?;
    let certificate =
        std::str::from_utf8(certificate).map_err(|source| AppSignatureError::Encoding {
            field: InputField::Certificate,
            source,
        })?;

    let mut info = Vec::with_capacity(identifier.len() + 1 + certificate.len());
    info.extend_from_slice(identifier.as_bytes());
    info.push(SEPARATOR);
    info.extend_from_slice(certificate.as_bytes());

    Ok(AppSignature::from_digest_prefix(&algorithm.digest_prefix(&info)))
}
