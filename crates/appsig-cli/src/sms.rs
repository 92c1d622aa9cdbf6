use appsig_crypto::{
    sms::{VerificationSms, DEFAULT_TEMPLATE},
    AppSignature,
};
use serde::Serialize;

use crate::{
    command::SmsArgs,
    render::{CommandOutput, CommandResult},
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ParsedSmsOutput {
    code: String,
    app_signature: AppSignature,
}

impl SmsArgs {
    pub(crate) fn run(self) -> CommandResult {
        let signature: AppSignature = self.signature.parse()?;
        let template = self.template.as_deref().unwrap_or(DEFAULT_TEMPLATE);

        let message = VerificationSms::new(self.code, signature)?.render(template)?;
        Ok(message.into())
    }
}

pub(crate) fn parse_sms(message: &str) -> CommandResult {
    let sms = VerificationSms::parse(message)?;
    Ok(CommandOutput::Object(Box::new(ParsedSmsOutput {
        code: sms.code().to_owned(),
        app_signature: sms.app_signature().clone(),
    })))
}
