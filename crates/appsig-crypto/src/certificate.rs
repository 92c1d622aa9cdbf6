//! Text representation of a signing certificate.
//!
//! Package managers expose a signing certificate as the lowercase hex string of its DER encoding.
//! That string, not the raw bytes, is what feeds the app signature.
use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use thiserror::Error;

use crate::{fingerprint, AppSignature, AppSignatureError};

const PEM_BEGIN: &str = "-----BEGIN CERTIFICATE-----";
const PEM_END: &str = "-----END CERTIFICATE-----";

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum CertificateError {
    #[error("Certificate contains no data")]
    Empty,
    #[error("No PEM certificate block found")]
    MissingPemBlock,
    #[error("Invalid PEM body: {0}")]
    InvalidPemBody(#[from] base64::DecodeError),
}

/// One signing certificate in the textual form the host platform reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningCertificate(String);

impl SigningCertificate {
    /// Use an already textual certificate representation verbatim.
    pub fn from_text(text: impl Into<String>) -> Self {
        SigningCertificate(text.into())
    }

    /// Hex encode DER certificate bytes.
    pub fn from_der(der: &[u8]) -> Result<Self, CertificateError> {
        if der.is_empty() {
            return Err(CertificateError::Empty);
        }
        Ok(SigningCertificate(hex::encode(der)))
    }

    /// Parse the first `CERTIFICATE` block of a PEM document.
    pub fn from_pem(pem: &str) -> Result<Self, CertificateError> {
        Self::from_pem_bundle(pem)?
            .into_iter()
            .next()
            .ok_or(CertificateError::MissingPemBlock)
    }

    /// Parse every `CERTIFICATE` block of a PEM document, in order.
    ///
    /// Used for apps signed by more than one certificate. Fails if the document contains no
    /// block at all or if any block is malformed.
    pub fn from_pem_bundle(pem: &str) -> Result<Vec<Self>, CertificateError> {
        let mut certificates = Vec::new();
        let mut rest = pem;

        while let Some(begin) = rest.find(PEM_BEGIN) {
            let after_begin = rest
                .get(begin + PEM_BEGIN.len()..)
                .ok_or(CertificateError::MissingPemBlock)?;
            let end = after_begin
                .find(PEM_END)
                .ok_or(CertificateError::MissingPemBlock)?;
            let body: String = after_begin
                .get(..end)
                .ok_or(CertificateError::MissingPemBlock)?
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();

            let der = STANDARD.decode(body)?;
            certificates.push(Self::from_der(&der)?);

            rest = after_begin
                .get(end + PEM_END.len()..)
                .ok_or(CertificateError::MissingPemBlock)?;
        }

        if certificates.is_empty() {
            return Err(CertificateError::MissingPemBlock);
        }
        Ok(certificates)
    }

    #[allow(missing_docs)]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// App signature of this certificate for the given package identifier.
    pub fn app_signature(&self, identifier: &str) -> Result<AppSignature, AppSignatureError> {
        fingerprint(identifier, &self.0)
    }
}

impl From<String> for SigningCertificate {
    fn from(text: String) -> Self {
        SigningCertificate(text)
    }
}

impl AsRef<str> for SigningCertificate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<[u8]> for SigningCertificate {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for SigningCertificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
