#![doc = include_str!("../README.md")]

mod app_signature;
pub use app_signature::{AppSignature, APP_SIGNATURE_LEN};
mod certificate;
pub use certificate::{CertificateError, SigningCertificate};
mod error;
pub use error::{AppSignatureError, InputField};
mod fingerprint;
pub use fingerprint::{
    fingerprint, fingerprint_with_digest, fingerprints, DigestAlgorithm, HASH_PREFIX_LEN,
};
pub mod sms;

#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

#[cfg(feature = "uniffi")]
mod uniffi_support;
