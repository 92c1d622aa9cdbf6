use crate::{AppSignature, AppSignatureError};

uniffi::custom_type!(AppSignature, String, {
    try_lift: |val| {
        AppSignature::try_from(val).map_err(|e: AppSignatureError| e.into())
    },
    lower: |obj| obj.into(),
});
