//! Verification messages for SMS Retriever style delivery.
//!
//! The retriever only hands a message to the app when the message carries the app signature as
//! its final token and fits into a single 140 byte SMS.
use thiserror::Error;

use crate::AppSignature;

/// Maximum size of a verification message in bytes.
pub const MAX_SMS_BYTES: usize = 140;

/// Template used when the caller does not provide one.
pub const DEFAULT_TEMPLATE: &str = "<#> Your verification code is {code}";

const CODE_PLACEHOLDER: &str = "{code}";
const MIN_CODE_LEN: usize = 4;
const MAX_CODE_LEN: usize = 10;

#[allow(missing_docs)]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SmsError {
    #[error("One-time code must be 4 to 10 ASCII digits")]
    InvalidCode,
    #[error("Template does not contain the {{code}} placeholder")]
    MissingCodePlaceholder,
    #[error("Message is {len} bytes, the limit is 140")]
    MessageTooLong { len: usize },
    #[error("Template text next to {{code}} would be read back as a different code")]
    AmbiguousCode,
    #[error("Message does not end with an app signature")]
    MissingAppSignature,
    #[error("Message does not contain a one-time code")]
    MissingCode,
}

fn is_valid_code(code: &str) -> bool {
    (MIN_CODE_LEN..=MAX_CODE_LEN).contains(&code.len()) && code.bytes().all(|b| b.is_ascii_digit())
}

/// A one-time code addressed to the app identified by `app_signature`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationSms {
    code: String,
    app_signature: AppSignature,
}

impl VerificationSms {
    #[allow(missing_docs)]
    pub fn new(code: impl Into<String>, app_signature: AppSignature) -> Result<Self, SmsError> {
        let code = code.into();
        if !is_valid_code(&code) {
            return Err(SmsError::InvalidCode);
        }
        Ok(VerificationSms {
            code,
            app_signature,
        })
    }

    #[allow(missing_docs)]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[allow(missing_docs)]
    pub fn app_signature(&self) -> &AppSignature {
        &self.app_signature
    }

    /// Render the message text. `{code}` in the template is replaced by the code and the app
    /// signature is appended on its own line.
    ///
    /// The rendered message must parse back to the same code, so templates with a later run of 4
    /// to 10 digits, or digits touching `{code}`, are rejected.
    pub fn render(&self, template: &str) -> Result<String, SmsError> {
        if !template.contains(CODE_PLACEHOLDER) {
            return Err(SmsError::MissingCodePlaceholder);
        }

        let message = format!(
            "{}\n{}",
            template.replace(CODE_PLACEHOLDER, &self.code),
            self.app_signature
        );
        if message.len() > MAX_SMS_BYTES {
            return Err(SmsError::MessageTooLong { len: message.len() });
        }

        match Self::parse(&message) {
            Ok(parsed) if parsed.code == self.code => Ok(message),
            _ => Err(SmsError::AmbiguousCode),
        }
    }

    /// Extract the code and app signature from a received message.
    ///
    /// The last whitespace separated token must be the app signature. The code is the last run of
    /// 4 to 10 consecutive digits before it.
    pub fn parse(message: &str) -> Result<Self, SmsError> {
        let trimmed = message.trim_end();
        let (body, last) = trimmed
            .rsplit_once(char::is_whitespace)
            .unwrap_or(("", trimmed));

        let app_signature: AppSignature =
            last.parse().map_err(|_| SmsError::MissingAppSignature)?;
        let code = body
            .split(|c: char| !c.is_ascii_digit())
            .rfind(|run| is_valid_code(run))
            .ok_or(SmsError::MissingCode)?;

        Ok(VerificationSms {
            code: code.to_owned(),
            app_signature,
        })
    }
}
