use std::{fmt::Write as _, sync::Arc};

use tracing_subscriber::{layer::Context, Layer};

use crate::error::LogCallbackError;

/// Callback interface for receiving SDK log events
/// Mobile implementations forward these to their own logging pipeline
#[uniffi::export(with_foreign)]
pub trait LogCallback: Send + Sync {
    /// Called when SDK emits a log entry
    ///
    /// # Parameters
    /// - level: Log level ("TRACE", "DEBUG", "INFO", "WARN", "ERROR")
    /// - target: Module that emitted log (e.g., "appsig_uniffi")
    /// - message: The log message text, followed by any structured fields as `name=value`
    ///
    /// # Returns
    /// Result<(), LogCallbackError> - mobile implementations should catch exceptions
    /// and return errors rather than panicking
    fn on_log(
        &self,
        level: String,
        target: String,
        message: String,
    ) -> Result<(), LogCallbackError>;
}

/// Custom tracing Layer that forwards events to UNIFFI callback
pub(crate) struct CallbackLayer {
    callback: Arc<dyn LogCallback>,
}
impl CallbackLayer {
    pub(crate) fn new(callback: Arc<dyn LogCallback>) -> Self {
        Self { callback }
    }
}
impl<S> Layer<S> for CallbackLayer
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        // Filter out our own error messages to prevent infinite callback loop
        if metadata.target() == "appsig_uniffi::log_callback" {
            return;
        }
        let level = metadata.level().to_string();
        let target = metadata.target().to_string();

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        if let Err(e) = self.callback.on_log(level, target, visitor.finish()) {
            tracing::error!(target: "appsig_uniffi::log_callback", "Logging callback failed: {:?}", e);
        }
    }
}

/// Visitor to extract message and fields from tracing event
///
/// Only `record_debug` is implemented, the remaining `record_*` methods of
/// [`tracing::field::Visit`] forward to it by default.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}
impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields
        } else {
            format!("{} {}", self.message, self.fields)
        }
    }
}
impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
            return;
        }
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={:?}", field.name(), value);
    }
}
