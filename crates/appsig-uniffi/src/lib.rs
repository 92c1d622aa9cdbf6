#![doc = include_str!("../README.md")]

uniffi::setup_scaffolding!();

use std::sync::Arc;

use appsig_crypto::{
    fingerprint,
    sms::{VerificationSms, DEFAULT_TEMPLATE},
    AppSignature, SigningCertificate,
};
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter,
};

#[allow(missing_docs)]
pub mod error;
mod log_callback;

use error::Result;
pub use log_callback::LogCallback;
use log_callback::CallbackLayer;

/// Configuration supplied by the host app.
#[derive(uniffi::Record, Debug, Clone, Default)]
pub struct ClientSettings {
    /// Template for verification messages, must contain `{code}`. Defaults to
    /// [`DEFAULT_TEMPLATE`].
    pub sms_template: Option<String>,
}

/// Code and app signature extracted from a received verification message.
#[allow(missing_docs)]
#[derive(uniffi::Record, Debug, Clone, PartialEq, Eq)]
pub struct ParsedVerificationSms {
    pub code: String,
    pub app_signature: AppSignature,
}

#[allow(missing_docs)]
#[derive(uniffi::Object)]
pub struct AppSignatureClient {
    settings: ClientSettings,
}

#[uniffi::export]
impl AppSignatureClient {
    /// Initialize a new instance of the SDK client
    #[uniffi::constructor]
    pub fn new(settings: Option<ClientSettings>) -> Self {
        init_logger(None);

        Self {
            settings: settings.unwrap_or_default(),
        }
    }

    /// App signature for one signing certificate, as reported by the package manager.
    pub fn app_signature(&self, package_name: String, certificate: String) -> Result<AppSignature> {
        let signature = fingerprint(&package_name, &certificate)?;
        tracing::info!(package = %package_name, app_signature = %signature, "Computed app signature");
        Ok(signature)
    }

    /// App signatures for every signing certificate of the package, in the given order.
    ///
    /// Fails on the first certificate that cannot be fingerprinted.
    pub fn app_signatures(
        &self,
        package_name: String,
        certificates: Vec<String>,
    ) -> Result<Vec<AppSignature>> {
        certificates
            .into_iter()
            .map(|certificate| self.app_signature(package_name.clone(), certificate))
            .collect()
    }

    /// App signature for a DER encoded signing certificate.
    pub fn app_signature_from_der(
        &self,
        package_name: String,
        der: Vec<u8>,
    ) -> Result<AppSignature> {
        let certificate = SigningCertificate::from_der(&der)?;
        self.app_signature(package_name, certificate.to_string())
    }

    /// Render a verification message carrying `code` for the app identified by `app_signature`.
    pub fn verification_sms(&self, code: String, app_signature: String) -> Result<String> {
        let app_signature: AppSignature = app_signature.parse()?;
        let template = self
            .settings
            .sms_template
            .as_deref()
            .unwrap_or(DEFAULT_TEMPLATE);

        Ok(VerificationSms::new(code, app_signature)?.render(template)?)
    }

    /// Extract the code and app signature from a received verification message.
    pub fn parse_verification_sms(&self, message: String) -> Result<ParsedVerificationSms> {
        let sms = VerificationSms::parse(&message)?;
        Ok(ParsedVerificationSms {
            code: sms.code().to_owned(),
            app_signature: sms.app_signature().clone(),
        })
    }

    /// Test method, echoes back the input
    pub fn echo(&self, msg: String) -> String {
        msg
    }
}

/// Install the SDK logger, optionally forwarding every event to `callback`.
///
/// Only the first call in a process has an effect, so hosts that want a callback must call this
/// before creating an [`AppSignatureClient`].
#[uniffi::export]
pub fn init_logger(callback: Option<Arc<dyn LogCallback>>) {
    // the log level hierarchy is determined by:
    //    - if RUST_LOG is detected at runtime
    //    - default to INFO
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(callback.map(CallbackLayer::new));

    #[cfg(not(any(target_os = "android", target_os = "ios")))]
    let _ = registry
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    #[cfg(any(target_os = "android", target_os = "ios"))]
    {
        init_platform_logger();
        let _ = registry.try_init();
    }
}

#[cfg(target_os = "android")]
fn init_platform_logger() {
    android_logger::init_once(
        android_logger::Config::default()
            .with_tag("com.appsig.sdk")
            .with_max_level(log::LevelFilter::Info),
    );
}

#[cfg(target_os = "ios")]
fn init_platform_logger() {
    let _ = oslog::OsLogger::new("com.appsig.sdk")
        .level_filter(log::LevelFilter::Info)
        .init();
}
