use std::path::Path;

use appsig_crypto::{fingerprint_with_digest, AppSignature, SigningCertificate};
use color_eyre::eyre::{bail, Result, WrapErr};
use serde::Serialize;

use crate::{
    command::{CertFormat, CertificateArgs, ComputeArgs, VerifyArgs},
    render::CommandResult,
};

const PEM_MARKER: &[u8] = b"-----BEGIN";
// Every DER certificate is an ASN.1 SEQUENCE
const DER_SEQUENCE_TAG: u8 = 0x30;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AppSignatureOutput {
    package: String,
    certificate: String,
    app_signature: AppSignature,
}

impl CertificateArgs {
    /// Collect the certificates from the command line, then from each file, in order.
    fn load(&self) -> Result<Vec<SigningCertificate>> {
        let mut certificates: Vec<SigningCertificate> = self
            .certificates
            .iter()
            .map(|text| SigningCertificate::from_text(text.as_str()))
            .collect();

        for path in &self.cert_files {
            let loaded = read_certificate_file(path, self.cert_format)
                .wrap_err_with(|| format!("Failed to load certificate {}", path.display()))?;
            tracing::debug!(path = %path.display(), count = loaded.len(), "Loaded certificate file");
            certificates.extend(loaded);
        }

        if certificates.is_empty() {
            bail!("At least one --certificate or --cert-file is required");
        }
        Ok(certificates)
    }
}

fn read_certificate_file(
    path: &Path,
    format: Option<CertFormat>,
) -> Result<Vec<SigningCertificate>> {
    let data = std::fs::read(path)?;

    let format = match format {
        Some(format) => format,
        None => detect_format(&data)?,
    };

    Ok(match format {
        CertFormat::Der => vec![SigningCertificate::from_der(&data)?],
        CertFormat::Pem => SigningCertificate::from_pem_bundle(std::str::from_utf8(&data)?)?,
        CertFormat::Text => vec![SigningCertificate::from_text(
            std::str::from_utf8(&data)?.trim(),
        )],
    })
}

fn detect_format(data: &[u8]) -> Result<CertFormat> {
    if data.trim_ascii_start().starts_with(PEM_MARKER) {
        Ok(CertFormat::Pem)
    } else if data.first() == Some(&DER_SEQUENCE_TAG) {
        Ok(CertFormat::Der)
    } else if std::str::from_utf8(data).is_ok() {
        Ok(CertFormat::Text)
    } else {
        bail!("Unrecognized certificate format, pass --cert-format")
    }
}

impl ComputeArgs {
    pub(crate) fn run(self) -> CommandResult {
        let package = self.package.package;
        let output = self
            .certificates
            .load()?
            .into_iter()
            .map(|certificate| {
                let app_signature = fingerprint_with_digest(&package, &certificate, &self.digest)?;
                tracing::info!(package = %package, app_signature = %app_signature, "Computed app signature");
                Ok(AppSignatureOutput {
                    package: package.clone(),
                    certificate: certificate.to_string(),
                    app_signature,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(crate::render::CommandOutput::Object(Box::new(output)))
    }
}

impl VerifyArgs {
    pub(crate) fn run(self) -> CommandResult {
        let expected: AppSignature = self.expected.parse()?;
        let package = self.package.package;

        let position = self
            .certificates
            .load()?
            .iter()
            .position(|certificate| expected.matches(&package, certificate));

        match position {
            Some(index) => Ok(format!(
                "App signature {expected} matches certificate {} of {package}",
                index + 1
            )
            .into()),
            None => bail!("App signature {expected} does not match any certificate of {package}"),
        }
    }
}
