use std::fmt::{self, Display};

use thiserror::Error;

/// Which input of the fingerprint derivation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    #[allow(missing_docs)]
    Identifier,
    #[allow(missing_docs)]
    Certificate,
}

impl Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputField::Identifier => f.write_str("identifier"),
            InputField::Certificate => f.write_str("certificate"),
        }
    }
}

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum AppSignatureError {
    #[error("Digest algorithm {0} is not available")]
    DigestUnavailable(String),

    #[error("The {field} is not valid UTF-8: {source}")]
    Encoding {
        field: InputField,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("Invalid app signature: {0}")]
    InvalidAppSignature(&'static str),
}

/// Alias for `Result<T, AppSignatureError>`.
pub(crate) type Result<T, E = AppSignatureError> = std::result::Result<T, E>;
