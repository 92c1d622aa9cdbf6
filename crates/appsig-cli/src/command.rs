use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::{color::Color, render::Output};

pub const PACKAGE_ENV: &str = "APPSIG_PACKAGE";

#[derive(Parser, Clone)]
#[command(name = "appsig", version, about = "SMS Retriever app signature tool", long_about = None, disable_version_flag = true)]
pub struct Cli {
    // Optional as a workaround for https://github.com/clap-rs/clap/issues/3572
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short = 'o', long, global = true, value_enum, default_value_t = Output::JSON)]
    pub output: Output,

    #[arg(short = 'c', long, global = true, value_enum, default_value_t = Color::Auto)]
    pub color: Color,

    #[arg(
        short = 'q',
        long,
        global = true,
        help = "Don't return anything to stdout."
    )]
    pub quiet: bool,

    // Clap uses uppercase V for the short flag by default
    #[arg(short = 'v', long, action = clap::builder::ArgAction::Version)]
    pub version: (),
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    #[command(long_about = "Compute the app signature for each signing certificate.")]
    Compute(ComputeArgs),

    #[command(long_about = "Check that an app signature belongs to one of the signing certificates.")]
    Verify(VerifyArgs),

    #[command(long_about = "Render a verification SMS carrying a one-time code and app signature.")]
    Sms(SmsArgs),

    #[command(long_about = "Read a verification SMS from stdin and extract its code and app signature.")]
    ParseSms,

    #[command(long_about = "Generate shell completion files.")]
    Completion {
        #[arg(value_enum)]
        shell: Option<Shell>,
    },
}

#[derive(Args, Clone)]
pub struct PackageArgs {
    #[arg(
        long,
        env = PACKAGE_ENV,
        help = "Package identifier of the app, e.g. com.example.app"
    )]
    pub package: String,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum CertFormat {
    /// Raw DER bytes
    Der,
    /// One or more PEM `CERTIFICATE` blocks
    Pem,
    /// Certificate text as reported by the package manager
    Text,
}

#[derive(Args, Clone)]
pub struct CertificateArgs {
    #[arg(
        long = "certificate",
        help = "Certificate text as reported by the package manager. Can be repeated."
    )]
    pub certificates: Vec<String>,

    #[arg(
        long = "cert-file",
        help = "Certificate file to read. Can be repeated."
    )]
    pub cert_files: Vec<PathBuf>,

    #[arg(
        long,
        value_enum,
        help = "Format of the certificate files. Detected from the file contents when omitted."
    )]
    pub cert_format: Option<CertFormat>,
}

#[derive(Args, Clone)]
pub struct ComputeArgs {
    #[command(flatten)]
    pub package: PackageArgs,

    #[command(flatten)]
    pub certificates: CertificateArgs,

    #[arg(long, default_value = "SHA-256", help = "Digest algorithm")]
    pub digest: String,
}

#[derive(Args, Clone)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub package: PackageArgs,

    #[command(flatten)]
    pub certificates: CertificateArgs,

    #[arg(long, help = "The app signature to check")]
    pub expected: String,
}

#[derive(Args, Clone)]
pub struct SmsArgs {
    #[arg(long, help = "One-time code, 4 to 10 digits")]
    pub code: String,

    #[arg(long, help = "App signature to address the message to")]
    pub signature: String,

    #[arg(long, help = "Message template containing {code}")]
    pub template: Option<String>,
}
