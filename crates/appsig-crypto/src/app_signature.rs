use std::{fmt, str::FromStr};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine};
use serde::{Deserialize, Serialize};

use crate::{error::Result, fingerprint, AppSignatureError, HASH_PREFIX_LEN};

/// Length in characters of every app signature.
pub const APP_SIGNATURE_LEN: usize = 11;

/// The 11 character token that identifies an app to an SMS verification service.
///
/// Values are either derived with [`fingerprint`](crate::fingerprint) or parsed from text, in which
/// case the length and alphabet are validated. Characters are always drawn from the standard
/// Base64 alphabet and never include padding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppSignature(String);

impl AppSignature {
    pub(crate) fn from_digest_prefix(prefix: &[u8; HASH_PREFIX_LEN]) -> Self {
        let mut encoded = STANDARD_NO_PAD.encode(prefix);
        encoded.truncate(APP_SIGNATURE_LEN);
        AppSignature(encoded)
    }

    #[allow(missing_docs)]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Re-derive the signature from the given inputs and compare.
    ///
    /// Inputs that cannot be fingerprinted never match.
    pub fn matches(&self, identifier: impl AsRef<[u8]>, certificate: impl AsRef<[u8]>) -> bool {
        fingerprint(identifier, certificate).is_ok_and(|derived| derived == *self)
    }
}

fn is_base64_symbol(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '+' || c == '/'
}

impl FromStr for AppSignature {
    type Err = AppSignatureError;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() != APP_SIGNATURE_LEN {
            return Err(AppSignatureError::InvalidAppSignature(
                "expected exactly 11 characters",
            ));
        }
        if !s.chars().all(is_base64_symbol) {
            return Err(AppSignatureError::InvalidAppSignature(
                "contains a character outside the Base64 alphabet",
            ));
        }
        Ok(AppSignature(s.to_owned()))
    }
}

impl TryFrom<&str> for AppSignature {
    type Error = AppSignatureError;

    fn try_from(value: &str) -> Result<Self> {
        value.parse()
    }
}

impl TryFrom<String> for AppSignature {
    type Error = AppSignatureError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<AppSignature> for String {
    fn from(value: AppSignature) -> Self {
        value.0
    }
}

impl AsRef<str> for AppSignature {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
