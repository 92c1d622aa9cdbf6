use appsig_crypto::{sms::SmsError, AppSignatureError, CertificateError};

pub type Result<T, E = AppSigError> = std::result::Result<T, E>;

// Name is converted from *Error to *Exception, so we can't just name the enum Error because
// Exception already exists
#[derive(uniffi::Error, thiserror::Error, Debug)]
#[uniffi(flat_error)]
pub enum AppSigError {
    #[error(transparent)]
    AppSignature(#[from] AppSignatureError),
    #[error(transparent)]
    Certificate(#[from] CertificateError),
    #[error(transparent)]
    Sms(#[from] SmsError),
}

/// Errors a foreign [`LogCallback`](crate::LogCallback) implementation can report.
#[derive(uniffi::Error, thiserror::Error, Debug)]
pub enum LogCallbackError {
    #[error("Callback invocation failed")]
    CallbackError,
}

/// Required From implementation for UNIFFI callback error handling
/// Converts unexpected mobile exceptions into LogCallbackError
impl From<uniffi::UnexpectedUniFFICallbackError> for LogCallbackError {
    fn from(_: uniffi::UnexpectedUniFFICallbackError) -> Self {
        Self::CallbackError
    }
}
